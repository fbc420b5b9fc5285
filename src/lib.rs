//! Character build calculator: class/ability eligibility and minimum skill-rank totals.

pub mod calc;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod server;
