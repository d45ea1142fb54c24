//! Command-line interface built on clap.
//!
//! [`Cli`] holds the [`Command`] subcommands (wizard, process, generate,
//! match, email) and the global flags (--api-url, --countdown, --verbose).

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::wizard::steps::JobType;

/// Recruiting assistant: job descriptions, resume upload and AI candidate
/// matching.
#[derive(Debug, Parser)]
#[command(name = "recruitflow", version, about)]
pub struct Cli {
    /// Defaults to `wizard`.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the recruiting API, e.g. http://localhost:8000/api/v1.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Seconds shown before the wizard starts over after completion.
    #[arg(long, global = true)]
    pub countdown: Option<u32>,

    /// Enables debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the three-step interactive wizard.
    Wizard,

    /// Formats a PDF/Word job description through the API.
    Process {
        /// Job description document.
        file: PathBuf,
    },

    /// Writes a job description with AI.
    Generate(GenerateArgs),

    /// Scores resumes against a job description.
    Match {
        /// Job description: a PDF/Word document (formatted by the server), a
        /// text file, or the description itself.
        #[arg(long)]
        job: String,

        /// Resume documents (PDF/Word), at most 10.
        #[arg(long = "resume", short, required = true, num_args = 1..)]
        resumes: Vec<PathBuf>,

        /// Writes the results as JSON to this file.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Prints an interview invitation or rejection email.
    #[command(group(ArgGroup::new("kind").required(true).args(["accept", "reject"])))]
    Email {
        /// Candidate name used in the greeting.
        name: String,

        #[arg(long)]
        accept: bool,

        #[arg(long)]
        reject: bool,

        /// Also copies the email to the system clipboard.
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub company: String,

    /// Required experience, e.g. "3-5 years".
    #[arg(long, default_value = "")]
    pub experience: String,

    /// full-time, part-time, contract or remote.
    #[arg(long = "type")]
    pub job_type: Option<JobType>,

    /// Comma-separated must-have skills.
    #[arg(long, default_value = "")]
    pub skills: String,

    #[arg(long, default_value = "")]
    pub industry: String,

    #[arg(long, default_value = "")]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_defaults_to_wizard() {
        let cli = Cli::parse_from(["recruitflow"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_match_subcommand() {
        let cli = Cli::parse_from([
            "recruitflow",
            "match",
            "--job",
            "jd.txt",
            "-r",
            "a.pdf",
            "b.docx",
            "--output",
            "out.json",
        ]);
        match cli.command {
            Some(Command::Match {
                job,
                resumes,
                output,
            }) => {
                assert_eq!(job, "jd.txt");
                assert_eq!(resumes, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.json")));
            }
            other => panic!("expected Match command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_generate_subcommand() {
        let cli = Cli::parse_from([
            "recruitflow",
            "generate",
            "--title",
            "Backend Engineer",
            "--company",
            "Acme",
            "--type",
            "full-time",
        ]);
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.title, "Backend Engineer");
                assert_eq!(args.company, "Acme");
                assert_eq!(args.job_type, Some(JobType::FullTime));
                assert!(args.skills.is_empty());
            }
            other => panic!("expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_email_needs_exactly_one_kind() {
        assert!(Cli::try_parse_from(["recruitflow", "email", "Ana"]).is_err());
        assert!(
            Cli::try_parse_from(["recruitflow", "email", "Ana", "--accept", "--reject"]).is_err()
        );
        let cli = Cli::parse_from(["recruitflow", "email", "Ana", "--reject", "--copy"]);
        assert!(matches!(
            cli.command,
            Some(Command::Email {
                reject: true,
                accept: false,
                copy: true,
                ..
            })
        ));
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "recruitflow",
            "--api-url",
            "http://example.test/api/v1",
            "--countdown",
            "3",
            "--verbose",
            "wizard",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api/v1"));
        assert_eq!(cli.countdown, Some(3));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
