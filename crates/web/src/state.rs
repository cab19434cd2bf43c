//! Shared state for request handlers.

use slidegen_images::ConfiguredSource;
use slidegen_pptx::DeckGenerator;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<DeckGenerator<ConfiguredSource>>,
    /// Where generated decks are also written, if anywhere.
    pub save_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(generator: DeckGenerator<ConfiguredSource>, save_dir: Option<PathBuf>) -> Self {
        Self {
            generator: Arc::new(generator),
            save_dir,
        }
    }
}
