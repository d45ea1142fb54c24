use std::time::Duration;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// The timer reached zero.
    Elapsed,
    /// The user cancelled before zero.
    Cancelled,
}

/// One-second countdown shown in the completion dialog.
///
/// Cancelled when `true` is sent on the watch channel. Dropping the future
/// stops it as well.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    seconds: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Calls `on_tick` with the remaining seconds, starting at the full
    /// duration and ending at zero.
    pub async fn run(
        &self,
        mut cancel: watch::Receiver<bool>,
        mut on_tick: impl FnMut(u32),
    ) -> CountdownOutcome {
        if *cancel.borrow_and_update() {
            return CountdownOutcome::Cancelled;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;

        let mut remaining = self.seconds;
        let mut cancellable = true;
        on_tick(remaining);

        while remaining > 0 {
            tokio::select! {
                _ = interval.tick() => {
                    remaining -= 1;
                    on_tick(remaining);
                }
                changed = cancel.changed(), if cancellable => {
                    match changed {
                        Ok(()) if *cancel.borrow_and_update() => {
                            return CountdownOutcome::Cancelled;
                        }
                        Ok(()) => {}
                        // Sender gone: nobody can cancel any more.
                        Err(_) => cancellable = false,
                    }
                }
            }
        }

        CountdownOutcome::Elapsed
    }
}
