//! Loan Advisor: conversation backend for a loan-advisory chat widget.

pub mod advisor;
pub mod config;
pub mod error;
pub mod languages;
pub mod sentiment;
pub mod server;

pub use error::{Error, Result};
