//! Tile provider abstraction
//!
//! Resolves tile coordinates to download URLs. A provider is either one of
//! the built-in named servers or a caller-supplied URL generator with an
//! explicit cache namespace; both are resolved once at configuration time
//! into a [`TileProvider`].
//!
//! ```
//! use geocanvas::provider::{BuiltinProvider, TileProvider};
//!
//! let provider: TileProvider = "watercolor".parse().unwrap();
//! assert_eq!(provider.namespace(), BuiltinProvider::Watercolor.name());
//! ```

mod config;
mod http;
mod types;

pub use config::{TileProvider, UrlGenerator};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::{BuiltinProvider, ProviderError};

#[cfg(test)]
pub use http::tests::MockHttpClient;
