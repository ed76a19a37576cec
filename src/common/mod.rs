//! # Common Components
//!
//! Support code for the command-line tool.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration parsing
//! - [`report`]: JSON run reports

pub mod config;
pub mod report;
