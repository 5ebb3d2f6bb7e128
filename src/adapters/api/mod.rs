//! Patient service adapter
//!
//! The [`PatientTransport`] trait and its HTTP implementation.

pub mod client;
pub mod models;
mod transport;

pub use client::PatientApiClient;
pub use models::ServiceErrorBody;
pub use transport::PatientTransport;
