//! Data models

pub mod audit;

pub use audit::AuditRequest;
