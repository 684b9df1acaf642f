//! Concrete adapter implementations for ports.

#[cfg(feature = "iex")]
pub mod iex_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_adapter;
pub mod wire;
