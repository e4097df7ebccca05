//! Reads the feed from the network or the bundled asset and extracts its records.

pub mod config;
pub mod envelope;
pub mod local;
pub mod remote;
pub mod transport;

pub use config::FetchConfig;
pub use envelope::Record;
pub use local::{AssetError, LocalFeed};
pub use remote::{FetchError, RemoteFeed};
pub use transport::{ReqwestTransport, Transport};
