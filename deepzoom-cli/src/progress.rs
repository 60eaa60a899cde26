//! Console progress reporting.
//!
//! Progress lines go to stdout. The per-level tile bar is drawn by
//! `indicatif` on stderr and hides itself when stderr is not a terminal.

use std::path::Path;

use deepzoom::{
    GenerationSummary, LevelPlan, OutputLayout, ProgressObserver, PyramidPlan, SourceImage,
    TileRect,
};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {pos}/{len} tiles ({eta})";

/// Prints the generation progress of one pyramid.
pub struct ConsoleProgress {
    layout: OutputLayout,
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new(output_base: &Path) -> Self {
        Self {
            layout: OutputLayout::new(output_base),
            bar: None,
        }
    }

    fn level_bar(level: &LevelPlan) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        let bar = ProgressBar::new(level.tile_count());
        bar.set_style(style);
        bar.set_message(format!("  Level {}", level.level()));
        bar
    }
}

impl ProgressObserver for ConsoleProgress {
    fn source_loaded(&mut self, source: &SourceImage, plan: &PyramidPlan) {
        println!("Image size: {}x{} pixels", source.width(), source.height());
        println!("Generating {} zoom levels", plan.level_count());
        print_destination(&self.layout);
    }

    fn level_started(&mut self, level: &LevelPlan) {
        self.bar = Some(Self::level_bar(level));
    }

    fn tile_written(&mut self, _level: &LevelPlan, _tile: &TileRect, _path: &Path) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn level_finished(&mut self, level: &LevelPlan, tiles_written: u64) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        println!(
            "  Level {}: {}x{} px, {} tiles ({}x{})",
            level.level(),
            level.width(),
            level.height(),
            tiles_written,
            level.columns(),
            level.rows()
        );
    }
}

/// Print where the descriptor and tiles are going.
pub fn print_destination(layout: &OutputLayout) {
    println!(
        "Saving Deep Zoom to: {} (tiles in {})",
        layout.descriptor_path().display(),
        layout.tiles_dir().display()
    );
}

/// Print the closing success block.
pub fn print_success(summary: &GenerationSummary) {
    let name = |path: &Path| {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    };

    println!();
    println!("SUCCESS: Generated {}", name(&summary.descriptor_path));
    println!("Tiles folder: {}/", name(&summary.tiles_dir));
    println!("Total zoom levels: {}", summary.levels);
    println!("Total tiles: {}", summary.tiles_written);
}
