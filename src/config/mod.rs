//! Configuration management
pub mod service;

pub use service::*;
