//! # WHM Disk Monitor
//!
//! Scheduled check of disk quota usage for every account owned by a WHM
//! reseller, reported through a Telegram bot.
//!
//! ## Overview
//!
//! Each invocation performs one sequential pass and exits:
//! - verify the WHM JSON API answers (`version`)
//! - list accounts (`listaccts`) and keep those owned by the reseller
//! - fetch each account's quota (`accountsummary`), pausing between accounts
//! - collect accounts at or above the threshold
//! - send one consolidated alert, or a summary when nothing is over
//!
//! ## Features
//!
//! - `colors` (default): Colored final status line via owo-colors

/// Account enumeration and reseller filtering
pub mod accounts;

/// Command-line argument parsing
pub mod cli;

/// Validated, immutable run configuration
pub mod config;

/// Failure taxonomy
pub mod error;

/// Log sink setup and timestamps
pub mod logging;

/// Data models for accounts, usage samples and run counters
pub mod models;

/// Monitoring pass orchestration and test modes
pub mod monitor;

/// Per-account quota lookup
pub mod quota;

/// Message rendering for Telegram
pub mod report;

/// Telegram Bot API transport
pub mod telegram;

/// WHM JSON API client
pub mod whm;
