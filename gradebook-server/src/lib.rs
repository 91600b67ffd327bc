//! gradebook-server: HTTP backend for a student gradebook
//!
//! Manages students and their math, science and history grades, and
//! serves a composite per-student view with subject averages.

pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use http::{build_router, run_server, AppState, ServerConfig};
pub use service::{GradebookService, ServiceError, ServiceResult};
