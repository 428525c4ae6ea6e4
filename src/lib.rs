pub mod cli;
pub mod config;
pub mod discovery;
pub mod duration;
pub mod filter;
pub mod formatter;
pub mod outcome;
pub mod runner;

mod error;
pub use error::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

#[cfg(test)]
mod test_support;
