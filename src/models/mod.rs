pub mod account;
pub mod summary;
pub mod usage;

pub use account::Account;
pub use summary::RunSummary;
pub use usage::{AlertEntry, UsageSample};
