#![allow(dead_code)] // Each test binary uses a different subset of the fixtures

pub mod fixtures;
pub mod strategies;

pub use fixtures::*;
