//! Core domain types and logic.

pub mod batch;
pub mod config_validation;
pub mod error;
pub mod fetch;
pub mod fundamentals;
pub mod score;
pub mod screen;
pub mod suite;
pub mod universe;
