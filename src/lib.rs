//! wingetctl: a client core for the winget package manager.
//!
//! The library runs winget as a child process, parses its column-aligned
//! output into [`state::Package`] and [`state::PackageSource`] records, and
//! reports mutations as [`state::OperationResult`] values. Source changes
//! run through an elevation bridge when the process lacks admin rights.
//!
//! [`service::WingetService`] is the entry point; the `wingetctl` binary is a
//! thin command-line front end over it.

pub mod args;
pub mod config;
pub mod logic;
pub mod parse;
pub mod service;
pub mod state;
pub mod util;

pub use service::{ConnectionMonitor, ServiceConfig, WingetService};
