//! Adapters for the controller's external collaborators
//!
//! - [`api`] - Patient service transport (trait + HTTP client)
//! - [`credentials`] - Credential store and providers
//! - [`navigation`] - Navigation routes and navigators

pub mod api;
pub mod credentials;
pub mod navigation;

pub use api::{PatientApiClient, PatientTransport};
pub use credentials::{CredentialProvider, CredentialStore, StaticCredential, StoredCredential};
pub use navigation::{ConsoleNavigator, Navigator, Route};
