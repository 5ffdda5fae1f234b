//! Identifiers exchanged with the test host

pub mod identifier;

pub use identifier::{GroupKey, TestIdentifier};
