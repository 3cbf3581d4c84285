pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod math;

pub use crate::config::SessionConfig;
pub use crate::error::DrawError;
