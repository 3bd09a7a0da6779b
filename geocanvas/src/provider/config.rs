//! Config-time provider resolution
//!
//! A provider is resolved into a [`TileProvider`] exactly once, when the
//! cache is configured. Lookups after that only ever call `tile_url` and
//! `namespace`; there is no name dispatch left on the per-tile path, and a
//! bad provider name fails loudly at configuration instead of during
//! rendering.

use super::types::{BuiltinProvider, ProviderError};
use crate::coord::TileId;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Caller-supplied URL generator: `(zoom, x, y)` to a download URL.
pub type UrlGenerator = Arc<dyn Fn(u8, u32, u32) -> String + Send + Sync>;

/// A fully resolved tile source.
#[derive(Clone)]
pub enum TileProvider {
    /// One of the built-in named servers
    Builtin(BuiltinProvider),
    /// A caller-supplied URL generator caching under its own namespace
    Custom {
        /// Directory name its tiles are cached under
        namespace: String,
        generator: UrlGenerator,
    },
}

impl TileProvider {
    /// Wraps a custom URL generator together with the cache namespace its
    /// tiles are stored under.
    ///
    /// The namespace keeps tiles from different generators apart on disk;
    /// it cannot be derived from the function itself, so the caller must
    /// name it.
    ///
    /// # Example
    ///
    /// ```
    /// use geocanvas::provider::TileProvider;
    ///
    /// let provider = TileProvider::custom("company-tiles", |zoom, x, y| {
    ///     format!("https://tiles.example.com/{}/{}/{}.png", zoom, x, y)
    /// })
    /// .unwrap();
    /// assert_eq!(provider.namespace(), "company-tiles");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::EmptyNamespace`] if the namespace is empty.
    pub fn custom<F>(namespace: impl Into<String>, generator: F) -> Result<Self, ProviderError>
    where
        F: Fn(u8, u32, u32) -> String + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(ProviderError::EmptyNamespace);
        }
        Ok(TileProvider::Custom {
            namespace,
            generator: Arc::new(generator),
        })
    }

    /// The directory name tiles from this provider are cached under.
    pub fn namespace(&self) -> &str {
        match self {
            TileProvider::Builtin(provider) => provider.name(),
            TileProvider::Custom { namespace, .. } => namespace,
        }
    }

    /// Builds the download URL for a tile.
    pub fn tile_url(&self, tile: TileId) -> String {
        match self {
            TileProvider::Builtin(provider) => provider.tile_url(tile),
            TileProvider::Custom { generator, .. } => generator(tile.zoom, tile.x, tile.y),
        }
    }
}

impl From<BuiltinProvider> for TileProvider {
    fn from(provider: BuiltinProvider) -> Self {
        TileProvider::Builtin(provider)
    }
}

impl FromStr for TileProvider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<BuiltinProvider>().map(TileProvider::Builtin)
    }
}

impl fmt::Debug for TileProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileProvider::Builtin(provider) => {
                f.debug_tuple("Builtin").field(provider).finish()
            }
            TileProvider::Custom { namespace, .. } => f
                .debug_struct("Custom")
                .field("namespace", namespace)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_namespace_matches_name() {
        let provider = TileProvider::from(BuiltinProvider::Toner);
        assert_eq!(provider.namespace(), "toner");
    }

    #[test]
    fn test_builtin_url_delegates_to_template() {
        let provider = TileProvider::from(BuiltinProvider::Mapquest);
        let tile = TileId::new(5, 16, 11);
        assert_eq!(
            provider.tile_url(tile),
            BuiltinProvider::Mapquest.tile_url(tile)
        );
    }

    #[test]
    fn test_custom_generator() {
        let provider = TileProvider::custom("acme", |zoom, x, y| {
            format!("https://tiles.acme.test/{}/{}/{}.png", zoom, x, y)
        })
        .unwrap();

        assert_eq!(provider.namespace(), "acme");
        assert_eq!(
            provider.tile_url(TileId::new(4, 7, 9)),
            "https://tiles.acme.test/4/7/9.png"
        );
    }

    #[test]
    fn test_custom_rejects_empty_namespace() {
        let result = TileProvider::custom("", |_, _, _| String::new());
        assert!(matches!(result, Err(ProviderError::EmptyNamespace)));
    }

    #[test]
    fn test_parse_resolves_builtin() {
        let provider: TileProvider = "toolserver".parse().unwrap();
        assert!(matches!(
            provider,
            TileProvider::Builtin(BuiltinProvider::Toolserver)
        ));

        assert!("voyager".parse::<TileProvider>().is_err());
    }

    #[test]
    fn test_debug_hides_generator() {
        let provider = TileProvider::custom("acme", |_, _, _| String::new()).unwrap();
        let repr = format!("{:?}", provider);
        assert!(repr.contains("acme"));
    }
}
