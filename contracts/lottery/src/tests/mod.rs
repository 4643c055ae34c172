//! Test modules for the commit-reveal lottery contract.

mod common;
mod reveal;
