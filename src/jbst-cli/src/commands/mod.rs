//! Command handlers for jbst CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod extract;
pub mod scan;
pub mod show;
