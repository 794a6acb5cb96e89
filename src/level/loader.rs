//! Level asset pairs on disk: `<id>.level.png` + `<id>.metadata.json`

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use super::{LevelError, LevelGrid, LevelMetadata};
use crate::sim::LevelLayout;

/// Loads levels from a directory of asset pairs
#[derive(Debug, Clone)]
pub struct LevelLoader {
    dir: PathBuf,
}

impl LevelLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn image_path(&self, level_id: u32) -> PathBuf {
        self.dir.join(format!("{level_id}.level.png"))
    }

    pub fn metadata_path(&self, level_id: u32) -> PathBuf {
        self.dir.join(format!("{level_id}.metadata.json"))
    }

    /// Decode the level into a classified grid
    pub fn load_grid(&self, level_id: u32) -> Result<LevelGrid, LevelError> {
        let image_path = self.image_path(level_id);
        let metadata_path = self.metadata_path(level_id);
        for path in [&image_path, &metadata_path] {
            if !path.is_file() {
                return Err(LevelError::NotFound {
                    level_id,
                    path: path.clone(),
                });
            }
        }

        let json = fs::read_to_string(&metadata_path)
            .map_err(|source| LevelError::Io { level_id, source })?;
        let meta = LevelMetadata::from_json(level_id, &json)?;

        let image = image::open(&image_path)
            .map_err(|source| LevelError::Image { level_id, source })?;
        // Trees come from the alpha channel; widening RGB would make every cell opaque
        if !image.color().has_alpha() {
            return Err(LevelError::NoAlpha { level_id });
        }
        let raster = image.to_rgba8();

        LevelGrid::from_rgba(level_id, &meta, &raster)
    }

    /// Load a level and spawn its trees and coins
    pub fn load<R: Rng>(&self, level_id: u32, rng: &mut R) -> Result<LevelLayout, LevelError> {
        let grid = self.load_grid(level_id)?;
        let layout = grid.spawn(rng);
        log::info!(
            "Loaded level {} ({}x{}): {} trees, {} coins",
            level_id,
            grid.rows(),
            grid.columns(),
            layout.trees.len(),
            layout.coins.len()
        );
        Ok(layout)
    }
}
