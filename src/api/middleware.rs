//! HTTP configuration: CORS policy and static front-end hosting.

use std::path::{Path, PathBuf};

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Server configuration loaded from environment variables and CLI flags.
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (from BLACK_CROZ_CORS_ORIGINS, comma-separated).
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Directory holding the built front end. `None` serves the API only.
    pub public_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("BLACK_CROZ_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .filter(|origins| !origins.is_empty());

        Self {
            cors_origins,
            public_dir: None,
        }
    }

    /// Restrict CORS to specific origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Serve the front end from `dir`, with `index.html` as the deep-link fallback.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// CORS layer for the configured origins. Read-only API, so only GET and
/// HEAD are allowed cross-origin.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let Some(origins) = &config.cors_origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any)
}

/// Static files from `dir`; unknown paths get `index.html` so client-side
/// deep links resolve.
pub fn static_site(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
