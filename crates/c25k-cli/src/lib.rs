//! Command-line front end for the Couch to 5K planner.

pub mod cli_args;
pub mod faq;
pub mod report;
