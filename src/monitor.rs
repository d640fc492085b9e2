//! One monitoring pass: connectivity gate, account scan, threshold check and
//! a single Telegram report.

use std::thread;

use chrono_tz::Tz;
use tracing::info;

use crate::accounts::list_owned_accounts;
use crate::config::Config;
use crate::error::RunError;
use crate::logging::timestamp;
use crate::models::{AlertEntry, RunSummary};
use crate::quota::fetch_usage;
use crate::report::{format_number, render_alert, render_summary, render_test_message};
use crate::telegram::MessageSink;
use crate::whm::{ControlPanelApi, check_connectivity};

/// Telegram-only diagnostic; needs no control-panel settings.
pub fn send_test_message(sink: &impl MessageSink, tz: Tz) -> bool {
    info!("Testing Telegram connection...");
    let message = render_test_message(&timestamp(tz));
    match sink.send(&message) {
        Ok(()) => {
            info!("Telegram test message sent successfully");
            true
        }
        Err(e) => {
            info!("Failed to send Telegram test message: {e}");
            false
        }
    }
}

pub struct Monitor<'a, A, N> {
    config: &'a Config,
    api: A,
    sink: N,
}

impl<'a, A: ControlPanelApi, N: MessageSink> Monitor<'a, A, N> {
    pub fn new(config: &'a Config, api: A, sink: N) -> Self {
        Monitor { config, api, sink }
    }

    /// Connectivity-only diagnostic.
    pub fn test_connection(&self) -> bool {
        check_connectivity(&self.api)
    }

    /// Sends a fixed test message through the notifier transport.
    pub fn test_telegram(&self) -> bool {
        send_test_message(&self.sink, self.config.timezone)
    }

    /// Full pass over every owned account. Delivery failures are logged but do
    /// not fail the run.
    pub fn run(&self) -> Result<RunSummary, RunError> {
        info!("Starting disk usage monitoring");
        info!("Threshold: {}%", self.config.threshold);
        info!("Timezone: {}", self.config.timezone.name());

        if !self.test_connection() {
            info!("API connection test failed. Please check your credentials.");
            return Err(RunError::Connectivity);
        }

        let accounts = match list_owned_accounts(&self.api, &self.config.whm.user) {
            Ok(accounts) => accounts,
            Err(e) => {
                info!("Error fetching accounts: {e}");
                Vec::new()
            }
        };
        if accounts.is_empty() {
            info!("No accounts found or API error");
            return Err(RunError::NoAccounts);
        }

        let mut summary = self.scan(&accounts);
        self.notify(&mut summary);

        info!("Monitoring completed");
        info!("Accounts checked: {}", summary.accounts_checked);
        info!("Accounts over threshold: {}", summary.accounts_over_threshold());
        info!("Alert messages sent: {}", summary.alerts_sent);
        Ok(summary)
    }

    fn scan(&self, accounts: &[String]) -> RunSummary {
        let mut summary = RunSummary::default();

        for account in accounts {
            info!("Checking account: {account}");

            match fetch_usage(&self.api, account) {
                Ok(Some(usage)) => {
                    summary.accounts_checked += 1;
                    info!(
                        "  Usage: {}MB / {}MB ({}%)",
                        format_number(usage.used),
                        format_number(usage.limit),
                        format_number(usage.percentage)
                    );
                    if usage.percentage >= self.config.threshold {
                        info!("  WARNING: Usage exceeds threshold!");
                        summary.alerts.push(AlertEntry {
                            account: account.clone(),
                            usage,
                        });
                    } else {
                        info!("  OK: Usage within limits");
                    }
                }
                Ok(None) => info!("  ERROR: Could not retrieve usage data"),
                Err(e) => {
                    info!("Error fetching usage for {account}: {e}");
                    info!("  ERROR: Could not retrieve usage data");
                }
            }

            thread::sleep(self.config.account_delay);
        }

        summary
    }

    fn notify(&self, summary: &mut RunSummary) {
        let completed_at = timestamp(self.config.timezone);

        if summary.alerts.is_empty() {
            let message = render_summary(summary.accounts_checked, 0, &completed_at);
            if let Err(e) = self.sink.send(&message) {
                info!("Failed to send monitoring summary: {e}");
            }
            return;
        }

        let message = render_alert(
            &summary.alerts,
            summary.accounts_checked,
            self.config.threshold,
            &completed_at,
        );
        match self.sink.send(&message) {
            Ok(()) => {
                summary.alerts_sent = 1;
                info!(
                    "Consolidated Telegram alert sent for {} accounts",
                    summary.alerts.len()
                );
            }
            Err(e) => info!("Failed to send consolidated Telegram alert: {e}"),
        }
    }
}
