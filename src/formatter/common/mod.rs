//! Common helpers for formatter implementations.
//!
//! These are small display helpers shared by the progress output and the
//! ranked report. They are formatter focused and not meant as general purpose
//! building blocks.

pub mod color;
pub mod duration;
