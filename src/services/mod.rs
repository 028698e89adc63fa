//! External service clients

pub mod lyzr;

pub use lyzr::LyzrClient;
