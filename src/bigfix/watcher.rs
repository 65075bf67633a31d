//! Polling a plan action until the server stops reporting it.
//!
//! Server Automation only returns status for open plan actions. Once an
//! action completes, stops or expires the status request comes back empty or
//! non-200, which is what ends the watch.

use std::time::Duration;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::{ApiError, BigFixError, Result};

use super::client::BigFixClient;
use super::types::WatchOutcome;

/// Polls plan action status at a fixed interval.
#[derive(Debug)]
pub struct ActionWatcher<'a> {
    client: &'a BigFixClient,
    interval: Duration,
    max_polls: u32,
}

impl<'a> ActionWatcher<'a> {
    /// Creates a watcher. The action is always polled at least once.
    #[must_use]
    pub const fn new(client: &'a BigFixClient, interval: Duration, max_polls: u32) -> Self {
        Self {
            client,
            interval,
            max_polls: if max_polls == 0 { 1 } else { max_polls },
        }
    }

    /// Creates a watcher using the run settings from configuration.
    #[must_use]
    pub const fn from_config(client: &'a BigFixClient, run: &RunConfig) -> Self {
        Self::new(client, Duration::from_secs(run.poll_interval_secs), run.max_polls)
    }

    /// Polls until the action is no longer reported.
    ///
    /// # Errors
    ///
    /// Returns a timeout error if the action is still reported after
    /// `max_polls` requests, or any error from the status request.
    pub async fn watch(&self, action_id: &str) -> Result<WatchOutcome> {
        let mut last_status = None;

        for poll in 1..=self.max_polls {
            match self.client.get_status_action(action_id).await? {
                Some(status) if !status.trim().is_empty() => {
                    debug!("Action {action_id} still reported (poll {poll}/{})", self.max_polls);
                    last_status = Some(status);
                }
                _ => {
                    info!("Action {action_id} is no longer reported after {poll} polls");
                    return Ok(WatchOutcome {
                        action_id: action_id.to_string(),
                        polls: poll,
                        last_status,
                    });
                }
            }

            if poll < self.max_polls {
                tokio::time::sleep(self.interval).await;
            }
        }

        Err(BigFixError::Api(ApiError::Timeout {
            action_id: action_id.to_string(),
            polls: self.max_polls,
        }))
    }
}
