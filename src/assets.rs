//! Sprite loading.
//!
//! A bitmap is a small text file: every non-space character is a visible
//! cell, spaces are transparent.  Rows are padded to the widest line so the
//! sprite always has a rectangular size.

use std::path::Path;

use crate::error::AssetError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    rows: Vec<Vec<char>>,
    width: u32,
}

impl Bitmap {
    /// Parse sprite text.  Returns `None` when no cell is visible.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();

        // Blank lines around the art do not count toward the size
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let leading = rows.iter().take_while(|r| r.is_empty()).count();
        rows.drain(..leading);

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }

        Some(Bitmap {
            rows,
            width: width as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Visible cells as `(column, row, glyph)`.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, ch)| **ch != ' ')
                .map(move |(x, ch)| (x as u32, y as u32, *ch))
        })
    }
}

pub fn load_bitmap(path: &Path) -> Result<Bitmap, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let bitmap = Bitmap::parse(&text).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })?;
    tracing::debug!(
        path = %path.display(),
        width = bitmap.width(),
        height = bitmap.height(),
        "loaded bitmap"
    );
    Ok(bitmap)
}
