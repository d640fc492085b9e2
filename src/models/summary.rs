/// Counters for a single monitoring run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Accounts that produced a valid usage sample.
    pub accounts_checked: usize,
    /// Accounts whose usage is at or above the threshold, in scan order.
    pub alerts: Vec<super::AlertEntry>,
    /// 1 when the consolidated alert was delivered, 0 otherwise.
    pub alerts_sent: usize,
}

impl RunSummary {
    pub fn accounts_over_threshold(&self) -> usize {
        self.alerts.len()
    }
}
