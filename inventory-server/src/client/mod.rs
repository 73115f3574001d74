//! Outbound clients

pub mod backend;

pub use backend::BackendClient;
