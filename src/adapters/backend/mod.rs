//! Hosted backend adapters (REST query endpoint + object storage).

pub mod rest_client;
pub mod storage_client;

pub use rest_client::RestQueryClient;
pub use storage_client::RestStorageClient;
