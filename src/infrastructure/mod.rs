pub mod error;
pub mod logging;
pub mod network;

pub use error::{ErrorKind, LookupError, NetworkContext, Notice, StatusMessage};
pub use logging::{setup_logging, LoggingConfig};
pub use network::{NetworkConfig, NetworkManager};
