//! Debounced query controller.
//!
//! Raw input values go in through a [`DebouncerHandle`]; a value comes out
//! of [`SettledQueries`] only once the input has been quiet for the full
//! quiet period. Each change re-arms the timer, so a burst of keystrokes
//! settles exactly once, on its last value.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

use crate::{MarqueeError, Result};

/// Sends raw input changes to the debounce task.
///
/// Cheap to clone. The task ends once every handle is dropped.
#[derive(Debug, Clone)]
pub struct DebouncerHandle {
    sender: mpsc::UnboundedSender<String>,
}

impl DebouncerHandle {
    /// Reports a new raw input value, restarting the quiet period.
    ///
    /// # Errors
    /// - `MarqueeError::InputClosed` - The debounce task has stopped
    pub fn update(&self, raw: impl Into<String>) -> Result<()> {
        self.sender
            .send(raw.into())
            .map_err(|_| MarqueeError::InputClosed)
    }
}

/// Stream of settled query values.
#[derive(Debug)]
pub struct SettledQueries {
    receiver: mpsc::UnboundedReceiver<String>,
}

impl SettledQueries {
    /// Waits for the next settled value. Returns `None` once the input side is gone.
    pub async fn next(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Returns a settled value if one is already waiting.
    pub fn try_next(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

/// Spawns the debounce task and returns its input and output ends.
///
/// `initial` is treated as already settled: typing it again does not
/// produce a new settled value.
pub fn spawn_debouncer(
    quiet_period: Duration,
    initial: impl Into<String>,
) -> (DebouncerHandle, SettledQueries) {
    let (raw_sender, raw_receiver) = mpsc::unbounded_channel();
    let (settled_sender, settled_receiver) = mpsc::unbounded_channel();

    tokio::spawn(run_debounce_loop(
        quiet_period,
        initial.into(),
        raw_receiver,
        settled_sender,
    ));

    (
        DebouncerHandle {
            sender: raw_sender,
        },
        SettledQueries {
            receiver: settled_receiver,
        },
    )
}

async fn run_debounce_loop(
    quiet_period: Duration,
    mut last_settled: String,
    mut raw_receiver: mpsc::UnboundedReceiver<String>,
    settled_sender: mpsc::UnboundedSender<String>,
) {
    tracing::debug!(?quiet_period, "Debouncer started");

    let mut pending: Option<String> = None;
    let timer = sleep(quiet_period);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            raw = raw_receiver.recv() => match raw {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet_period);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                let Some(value) = pending.take() else { continue };
                if value == last_settled {
                    tracing::trace!(query = %value, "Settled value unchanged");
                    continue;
                }

                tracing::debug!(query = %value, "Query settled");
                last_settled = value.clone();
                if settled_sender.send(value).is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("Debouncer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_on_last_value() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "");

        for raw in ["b", "ba", "bat", "batm", "batman"] {
            handle.update(raw).unwrap();
            sleep(Duration::from_millis(100)).await;
        }
        let last_change = Instant::now() - Duration::from_millis(100);

        let value = settled.next().await.unwrap();
        assert_eq!(value, "batman");
        assert!(Instant::now() >= last_change + QUIET);

        sleep(QUIET * 4).await;
        assert!(settled.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_settles_before_quiet_period() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "");

        handle.update("dune").unwrap();
        sleep(Duration::from_millis(499)).await;
        assert!(settled.try_next().is_none());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(settled.try_next().as_deref(), Some("dune"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_restarts_wait() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "");

        handle.update("alien").unwrap();
        sleep(Duration::from_millis(400)).await;
        handle.update("aliens").unwrap();
        sleep(Duration::from_millis(400)).await;
        assert!(settled.try_next().is_none());

        assert_eq!(settled.next().await.as_deref(), Some("aliens"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_value_debounces_like_any_other() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "batman");

        handle.update("batma").unwrap();
        sleep(Duration::from_millis(100)).await;
        handle.update("").unwrap();

        let start = Instant::now();
        assert_eq!(settled.next().await.as_deref(), Some(""));
        assert!(Instant::now() >= start + QUIET);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_settled_value_emits_nothing() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "heat");

        handle.update("heat2").unwrap();
        sleep(Duration::from_millis(100)).await;
        handle.update("heat").unwrap();

        sleep(QUIET * 2).await;
        assert!(settled.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_settle_separately() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "");

        handle.update("up").unwrap();
        assert_eq!(settled.next().await.as_deref(), Some("up"));

        handle.update("her").unwrap();
        assert_eq!(settled.next().await.as_deref(), Some("her"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_ends_when_handles_dropped() {
        let (handle, mut settled) = spawn_debouncer(QUIET, "");

        handle.update("pending").unwrap();
        drop(handle);

        assert_eq!(settled.next().await, None);
    }
}
