//! Image source abstraction.

use crate::types::Picture;
use std::future::Future;

/// Something that can find a picture for a keyword query.
///
/// Lookups are best-effort: any failure is reported as `None` and the slide is
/// rendered without a picture.
pub trait ImageSource {
    /// Fetch one picture matching `query`.
    fn fetch(&self, query: &str) -> impl Future<Output = Option<Picture>> + Send;
}

/// Source that never returns a picture (offline generation).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    async fn fetch(&self, query: &str) -> Option<Picture> {
        log::debug!("Image lookup disabled, skipping query \"{}\"", query);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_images_returns_none() {
        assert_eq!(NoImages.fetch("ocean").await, None);
    }
}
