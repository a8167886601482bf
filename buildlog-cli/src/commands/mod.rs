//! Command handlers -- one module per subcommand

pub mod config;
pub mod phases;
pub mod report;
