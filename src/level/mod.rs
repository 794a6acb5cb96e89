//! Level decoding
//!
//! A level is an image plus a JSON metadata file. Every opaque pixel of the
//! image (non-zero alpha) inside the `nb_rows` x `nb_columns` grid is a tree.
//! Coins are sprinkled at random over the cells that come after the first
//! tree in row-major order, so the slope starts clean.

mod loader;

pub use loader::LevelLoader;

use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell_to_world;
use crate::consts::COIN_DRAW_MAX;
use crate::sim::{Coin, LevelLayout, Tree};

/// Errors from loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {level_id} can't be loaded: {} is missing", .path.display())]
    NotFound {
        level_id: u32,
        path: std::path::PathBuf,
    },
    #[error("level {level_id} has malformed metadata: {reason}")]
    MalformedMetadata { level_id: u32, reason: String },
    #[error("level {level_id} image could not be decoded: {source}")]
    Image {
        level_id: u32,
        #[source]
        source: image::ImageError,
    },
    #[error("level {level_id} image has no alpha channel to place trees from")]
    NoAlpha { level_id: u32 },
    #[error("failed to read level {level_id}: {source}")]
    Io {
        level_id: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Grid dimensions stored next to the level image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub nb_rows: usize,
    pub nb_columns: usize,
}

impl LevelMetadata {
    /// Parse and validate metadata JSON. Extra keys are ignored.
    pub fn from_json(level_id: u32, json: &str) -> Result<Self, LevelError> {
        let meta: LevelMetadata =
            serde_json::from_str(json).map_err(|e| LevelError::MalformedMetadata {
                level_id,
                reason: e.to_string(),
            })?;
        if meta.nb_rows == 0 || meta.nb_columns == 0 {
            return Err(LevelError::MalformedMetadata {
                level_id,
                reason: format!("empty grid {}x{}", meta.nb_rows, meta.nb_columns),
            });
        }
        Ok(meta)
    }
}

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Before the first tree; nothing can spawn here
    Empty,
    Tree,
    /// After the first tree; may receive a coin
    CoinEligible,
}

/// Classified level grid, row-major
#[derive(Debug, Clone)]
pub struct LevelGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl LevelGrid {
    /// Classify the grid cells from the alpha channel of an RGBA raster.
    ///
    /// The raster may be larger than the grid; the extra pixels are ignored.
    pub fn from_rgba(
        level_id: u32,
        meta: &LevelMetadata,
        raster: &RgbaImage,
    ) -> Result<Self, LevelError> {
        let (width, height) = raster.dimensions();
        if meta.nb_columns > width as usize || meta.nb_rows > height as usize {
            return Err(LevelError::MalformedMetadata {
                level_id,
                reason: format!(
                    "grid {}x{} exceeds the {}x{} image",
                    meta.nb_rows, meta.nb_columns, height, width
                ),
            });
        }

        let pixels = raster.as_raw();
        let stride = width as usize * 4;
        let mut cells = Vec::with_capacity(meta.nb_rows * meta.nb_columns);
        let mut first_tree_placed = false;

        for row in 0..meta.nb_rows {
            let line = &pixels[row * stride..(row + 1) * stride];
            for col in 0..meta.nb_columns {
                let alpha = line[col * 4 + 3];
                let cell = if alpha != 0 {
                    first_tree_placed = true;
                    Cell::Tree
                } else if first_tree_placed {
                    Cell::CoinEligible
                } else {
                    Cell::Empty
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: meta.nb_rows,
            columns: meta.nb_columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.columns + col]
    }

    /// Place trees and roll for coins, in scan order
    pub fn spawn<R: Rng>(&self, rng: &mut R) -> LevelLayout {
        let mut layout = LevelLayout::default();
        for (i, cell) in self.cells.iter().enumerate() {
            let pos = cell_to_world(i / self.columns, i % self.columns);
            match cell {
                Cell::Tree => layout.trees.push(Tree::new(pos.x, pos.y)),
                Cell::CoinEligible => {
                    if rng.random_range(0..=COIN_DRAW_MAX) == 0 {
                        layout.coins.push(Coin::new(pos.x, pos.y));
                    }
                }
                Cell::Empty => {}
            }
        }
        layout
    }
}
