/// A hosting account as listed by the control panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub user: String,
    pub owner: Option<String>,
}

impl Account {
    /// Exact, case-sensitive owner match.
    pub fn is_owned_by(&self, reseller: &str) -> bool {
        self.owner.as_deref() == Some(reseller)
    }
}
