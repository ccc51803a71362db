//! Cash-flow scenario planner
//!
//! Keeps a book of named scenarios on disk, runs them through
//! [`moneysim_core`] and renders the results for the terminal.

pub mod cli;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

pub use logging::init_logging;
