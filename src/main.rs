mod api;
mod cli;
mod clipboard;
mod commands;
mod config;
mod error;
mod report;
mod session;
mod ui;
mod wizard;

use anyhow::{Context, Result};
use clap::Parser;

use api::RecruitClient;
use cli::{Cli, Command, GenerateArgs};
use clipboard::SystemClipboard;
use config::AppConfig;
use report::MatchReport;
use session::WizardSession;
use ui::{Spinner, TerminalNotifier};
use wizard::Countdown;
use wizard::notify::{Clipboard, Notification, Notifier};
use wizard::steps::{EmailDraft, EmailKind, GenerateForm};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load().context("failed to load recruitflow.toml")?;
    config.apply_api_url(cli.api_url.clone());
    if let Some(seconds) = cli.countdown {
        config.completion_countdown_secs = seconds;
    }
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Command::Wizard) {
        Command::Wizard => {
            let client = RecruitClient::from_config(&config)?;
            tracing::info!(base_url = client.base_url(), "starting wizard");
            let mut session = WizardSession::new(
                client,
                TerminalNotifier::default(),
                SystemClipboard::new(),
                Countdown::new(config.completion_countdown_secs),
                session::stdin_lines(),
            );
            session.run().await?;
        }
        Command::Process { file } => {
            let client = RecruitClient::from_config(&config)?;
            let spinner = Spinner::start(&format!("Processing {}...", file.display()));
            let result = commands::process(&client, &file).await;
            spinner.finish();
            let response =
                result.with_context(|| format!("could not process {}", file.display()))?;
            ui::print_job_description(&response.formatted_text);
            println!("Processed in {:.2}s.", response.processing_time);
        }
        Command::Generate(args) => {
            let client = RecruitClient::from_config(&config)?;
            let form = generate_form(args);
            let spinner = Spinner::start("Generating job description...");
            let result = commands::generate(&client, &form).await;
            spinner.finish();
            let response = result.context("could not generate a job description")?;
            ui::print_job_description(&response.formatted_text);
            println!("Generated in {:.2}s.", response.processing_time);
        }
        Command::Match {
            job,
            resumes,
            output,
        } => {
            let client = RecruitClient::from_config(&config)?;
            let documents = commands::load_resumes(&resumes)?;
            let spinner = Spinner::start("Reading job description...");
            let job_description = commands::load_job_description(&client, &job).await;
            spinner.finish();
            let job_description = job_description.context("could not read the job description")?;

            let spinner = Spinner::start("Processing resumes and generating matches...");
            let result = commands::match_resumes(&client, &job_description, &documents).await;
            spinner.finish();
            let results = result.context("matching failed")?;

            ui::print_summary(&results.summary);
            ui::print_candidates(&results.candidates);

            if let Some(path) = output {
                let report = MatchReport::new(
                    &job_description,
                    documents.iter().map(|d| d.name.clone()).collect(),
                    results.summary,
                    &results.candidates,
                );
                report
                    .write_to(&path)
                    .with_context(|| format!("could not write {}", path.display()))?;
                println!("Results written to {}.", path.display());
            }
        }
        Command::Email {
            name, accept, copy, ..
        } => {
            let kind = if accept {
                EmailKind::Accept
            } else {
                EmailKind::Reject
            };
            let draft = EmailDraft::for_candidate(&name, kind);
            ui::print_email(&draft);
            if copy {
                let mut clipboard = SystemClipboard::new();
                clipboard
                    .write_text(&draft.clipboard_text())
                    .map_err(error::RecruitError::from)?;
                TerminalNotifier::default().notify(Notification::info(
                    "Copied to clipboard",
                    "Email content has been copied to your clipboard.",
                ));
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with printed results. `RUST_LOG`
/// wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "recruitflow=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn generate_form(args: GenerateArgs) -> GenerateForm {
    GenerateForm {
        job_title: args.title,
        experience: args.experience,
        company: args.company,
        job_type: args.job_type,
        skills: args.skills,
        industry: args.industry,
        location: args.location,
    }
}
