pub mod config;
pub mod firestore;

pub use config::StoreConfig;
#[cfg(not(target_arch = "wasm32"))]
pub use firestore::Firestore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store config: missing {0}")]
    MissingConfig(&'static str),
    #[error("store config: {0}")]
    Io(#[from] std::io::Error),
    #[error("store config: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("store write: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store write: server returned {status}: {body}")]
    Rejected { status: u16, body: String },
}
