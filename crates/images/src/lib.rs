//! Best-effort image lookup by keyword over HTTP.
//!
//! Every failure (transport, status, undecodable body) degrades to "no image".

pub mod http;
pub mod validate;

pub use http::{
    HttpImageSource, ImageSourceConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_BYTES,
    DEFAULT_TIMEOUT_SECS,
};
pub use validate::validate_image;

use slidegen_core::{ImageSource, NoImages, Picture};

/// Image source chosen at startup: HTTP lookups or none at all.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpImageSource),
    Disabled(NoImages),
}

impl ConfiguredSource {
    /// Build from configuration; `enabled = false` turns lookups off.
    pub fn from_config(config: ImageSourceConfig, enabled: bool) -> Result<Self, FetchError> {
        if enabled {
            Ok(Self::Http(HttpImageSource::new(config)?))
        } else {
            Ok(Self::Disabled(NoImages))
        }
    }
}

impl ImageSource for ConfiguredSource {
    async fn fetch(&self, query: &str) -> Option<Picture> {
        match self {
            Self::Http(source) => source.fetch(query).await,
            Self::Disabled(source) => source.fetch(query).await,
        }
    }
}

/// Why a lookup produced no picture. Never surfaces to callers of
/// [`ImageSource::fetch`]; it is logged and turned into `None`.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Response body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Undecodable image: {0}")]
    Decode(String),
}

#[cfg(test)]
pub(crate) mod testdata {
    /// 1x1 transparent PNG.
    pub(crate) const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
}
