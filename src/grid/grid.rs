use serde::{Serialize, Deserialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{DetectorError, Result};

/// One cell of the drawing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: usize,
    pub is_active: bool,
}

/// A `width`-wide, row-major arrangement of tiles.
///
/// Serializes as `{"width": 5, "tiles": [{"id": 0, "isActive": false}, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    tiles: Vec<Tile>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = DetectorError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::new(raw.width, raw.tiles)
    }
}

impl Grid {
    /// Wraps existing tiles. Fails unless `width > 0` and the tile count is a
    /// multiple of `width`.
    pub fn new(width: usize, tiles: Vec<Tile>) -> Result<Grid> {
        if width == 0 {
            return Err(DetectorError::InvalidGrid("width must be positive".into()));
        }
        if tiles.len() % width != 0 {
            return Err(DetectorError::InvalidGrid(format!(
                "{} tiles do not fill rows of width {width}",
                tiles.len()
            )));
        }
        Ok(Grid { width, tiles })
    }

    /// `width × height` grid with every tile off, ids numbered in row order.
    pub fn blank(width: usize, height: usize) -> Result<Grid> {
        let tiles = (0..width * height)
            .map(|id| Tile { id, is_active: false })
            .collect();
        Grid::new(width, tiles)
    }

    /// Builds a grid from text rows where `#` is an active tile and `.` an
    /// inactive one.
    pub fn from_pattern(rows: &[&str]) -> Result<Grid> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * rows.len());

        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(DetectorError::InvalidGrid(format!(
                    "row {r} is not {width} tiles wide"
                )));
            }
            for c in row.chars() {
                let is_active = match c {
                    '#' => true,
                    '.' => false,
                    other => {
                        return Err(DetectorError::InvalidGrid(format!(
                            "unexpected character {other:?} in row {r}"
                        )))
                    }
                };
                tiles.push(Tile { id: tiles.len(), is_active });
            }
        }

        Grid::new(width, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at row `r`, column `c`.
    pub fn tile(&self, r: usize, c: usize) -> Option<&Tile> {
        if c >= self.width {
            return None;
        }
        self.tiles.get(r * self.width + c)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Flips the tile with the given id. Returns `false` when no tile has that id.
    pub fn toggle(&mut self, id: usize) -> bool {
        match self.tiles.iter_mut().find(|t| t.id == id) {
            Some(tile) => {
                tile.is_active = !tile.is_active;
                true
            }
            None => false,
        }
    }

    /// Switches every tile off.
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.is_active = false;
        }
    }

    /// The network's view of the grid: `1.0` for active tiles, `0.0` otherwise,
    /// in tile order.
    pub fn input_vector(&self) -> Vec<f64> {
        self.tiles
            .iter()
            .map(|t| if t.is_active { 1.0 } else { 0.0 })
            .collect()
    }

    /// Tab-indented JSON mirror of the grid.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut ser)
            .map_err(|e| DetectorError::InvalidGrid(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| DetectorError::InvalidGrid(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Grid> {
        serde_json::from_str(json).map_err(|e| DetectorError::InvalidGrid(e.to_string()))
    }
}
