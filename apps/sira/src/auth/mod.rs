//! Credentials, visitor-pending work and the sign-in flows built on them.

pub mod credentials;
pub mod flows;
pub mod pending;
pub mod storage;

pub use credentials::{CredentialProvider, FileCredentials, MemoryCredentials};
pub use flows::Landing;
pub use pending::PendingStore;
pub use storage::{LocalStorage, StorageError};
