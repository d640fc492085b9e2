/// Disk usage of one account, in the units reported by the API (megabytes).
///
/// Only constructed for accounts with a positive limit; see [`UsageSample::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageSample {
    pub used: f64,
    pub limit: f64,
    pub percentage: f64,
}

impl UsageSample {
    /// Returns `None` when the limit is zero or negative (unlimited or unset
    /// quota), or when either figure is not finite.
    pub fn new(used: f64, limit: f64) -> Option<Self> {
        if limit <= 0.0 || !limit.is_finite() || !used.is_finite() {
            return None;
        }
        Some(Self {
            used,
            limit,
            percentage: used / limit * 100.0,
        })
    }
}

/// An account whose usage reached the configured threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertEntry {
    pub account: String,
    pub usage: UsageSample,
}
