//! bcrisk - Breast Cancer Risk Self-Assessment
//!
//! A terminal form that collects self-reported health attributes, sends them
//! to a remote prediction service and shows the resulting risk assessment.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
