//! Terminal progress for the per-tile extraction phase

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tiles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over the tiles of a run
///
/// Ticking takes `&self`, so workers of the parallel extraction phase can
/// share one manager.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that shows nothing until initialized
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Create a manager that never draws
    pub fn hidden() -> Self {
        Self {
            bar: Some(ProgressBar::hidden()),
        }
    }

    /// Start a bar for `tile_count` tiles
    pub fn initialize(&mut self, tile_count: usize) {
        let bar = self
            .bar
            .take()
            .filter(ProgressBar::is_hidden)
            .unwrap_or_else(|| ProgressBar::new(0).with_style(TILE_STYLE.clone()));
        bar.set_length(tile_count as u64);
        bar.set_position(0);
        self.bar = Some(bar);
    }

    /// Record one finished tile
    pub fn complete_tile(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
            bar.inc(1);
        }
    }

    /// Tiles recorded so far
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
