//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the prediction service,
//! command line configuration and log setup.

pub mod config;
pub mod logging;
pub mod predictor;

pub use config::*;
pub use logging::*;
pub use predictor::*;
