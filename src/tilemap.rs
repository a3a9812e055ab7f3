use glam::{IVec2, UVec2, Vec2};

use crate::api::TileQuery;
use crate::config::ConfigError;
use crate::types::*;

/// Dense row-major grid of tile ids.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    cell_size: Vec2,
    size: UVec2,
    data: Vec<TileId>,
}

impl TileLayer {
    /// Empty layer of `width` x `height` cells.
    pub fn new(width: u32, height: u32, cell_size: Vec2) -> Result<Self, ConfigError> {
        if !(cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0) {
            return Err(ConfigError::InvalidGrid(cell_size));
        }
        Ok(Self {
            cell_size,
            size: UVec2::new(width, height),
            data: vec![EMPTY_TILE; width as usize * height as usize],
        })
    }

    /// Layer built from existing row-major data.
    pub fn from_data(width: u32, height: u32, cell_size: Vec2, data: Vec<TileId>) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(ConfigError::LayerDataMismatch { expected, actual: data.len() });
        }
        let mut layer = Self::new(width, height, cell_size)?;
        layer.data = data;
        Ok(layer)
    }

    /// Parse an ASCII layout: one string per row, `.` or space for empty,
    /// decimal digits for tile ids 0-9.
    pub fn from_rows(rows: &[&str], cell_size: Vec2) -> Result<Self, ConfigError> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut layer = Self::new(width, height, cell_size)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = match c {
                    '.' | ' ' => EMPTY_TILE,
                    d => d.to_digit(10).ok_or(ConfigError::BadLayoutChar(d))? as TileId,
                };
                layer.set(x as i32, y as i32, tile);
            }
        }
        Ok(layer)
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Cell containing a world position.
    pub fn position_to_cell(&self, position: Vec2) -> IVec2 {
        (position / self.cell_size).floor().as_ivec2()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.x as i32 || y >= self.size.y as i32 {
            return None;
        }
        Some(y as usize * self.size.x as usize + x as usize)
    }

    /// Tile at a cell; out-of-range cells read as empty.
    pub fn get(&self, x: i32, y: i32) -> TileId {
        self.index(x, y).map_or(EMPTY_TILE, |i| self.data[i])
    }

    /// Overwrite one cell. Out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: TileId) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = tile;
        }
    }

    pub fn data(&self) -> &[TileId] {
        &self.data
    }

    /// Copy `tiles` over the layer from index 0; extra input is dropped.
    pub fn set_multiple_tiles(&mut self, tiles: &[TileId]) {
        let n = tiles.len().min(self.data.len());
        self.data[..n].copy_from_slice(&tiles[..n]);
    }

    /// Write a row-major `size` block of `tiles` with its top-left cell at `origin`.
    pub fn set_chunk_tiles(&mut self, origin: IVec2, size: UVec2, tiles: &[TileId]) -> Result<(), ConfigError> {
        let expected = size.x as usize * size.y as usize;
        if tiles.len() != expected {
            return Err(ConfigError::LayerDataMismatch { expected, actual: tiles.len() });
        }
        for cy in 0..size.y {
            for cx in 0..size.x {
                let tile = tiles[cy as usize * size.x as usize + cx as usize];
                self.set(origin.x + cx as i32, origin.y + cy as i32, tile);
            }
        }
        Ok(())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.data.fill(EMPTY_TILE);
    }
}

impl TileQuery for TileLayer {
    fn check_collision(&self, position: Vec2) -> CollisionSample {
        let cell = self.position_to_cell(position);
        match self.index(cell.x, cell.y) {
            Some(i) => {
                let tile = self.data[i];
                CollisionSample { hit: tile > EMPTY_TILE, tile }
            }
            None => CollisionSample::MISS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec2 {
        Vec2::splat(16.0)
    }

    #[test]
    fn test_new_rejects_zero_cell() {
        assert!(matches!(TileLayer::new(4, 4, Vec2::new(16.0, 0.0)), Err(ConfigError::InvalidGrid(_))));
    }

    #[test]
    fn test_from_rows_layout() {
        let l = TileLayer::from_rows(&["1..", ".2", "..3"], grid()).unwrap();
        assert_eq!(l.width(), 3);
        assert_eq!(l.height(), 3);
        assert_eq!(l.get(0, 0), 1);
        assert_eq!(l.get(1, 1), 2);
        assert_eq!(l.get(2, 1), 0);
        assert_eq!(l.get(2, 2), 3);
        assert!(matches!(TileLayer::from_rows(&["x"], grid()), Err(ConfigError::BadLayoutChar('x'))));
    }

    #[test]
    fn test_check_collision_hits_non_empty_cells() {
        let l = TileLayer::from_rows(&["....", ".1.."], grid()).unwrap();
        assert_eq!(l.check_collision(Vec2::new(20.0, 20.0)), CollisionSample::hit(1));
        assert!(!l.check_collision(Vec2::new(4.0, 20.0)).hit);
        assert_eq!(l.check_collision(Vec2::new(31.99, 31.99)).tile, 1);
        assert!(!l.check_collision(Vec2::new(32.0, 20.0)).hit);
    }

    #[test]
    fn test_out_of_range_is_a_miss() {
        let l = TileLayer::from_rows(&["11", "11"], grid()).unwrap();
        assert_eq!(l.check_collision(Vec2::new(-0.1, 5.0)), CollisionSample::MISS);
        assert_eq!(l.check_collision(Vec2::new(5.0, 32.0)), CollisionSample::MISS);
        assert_eq!(l.get(-1, 0), EMPTY_TILE);
    }

    #[test]
    fn test_negative_ids_do_not_collide() {
        let mut l = TileLayer::new(2, 2, grid()).unwrap();
        l.set(0, 0, -4);
        let s = l.check_collision(Vec2::new(1.0, 1.0));
        assert!(!s.hit);
        assert_eq!(s.tile, -4);
    }

    #[test]
    fn test_filtered_lookup() {
        let l = TileLayer::from_rows(&["12"], grid()).unwrap();
        assert!(l.check_collision_filtered(Vec2::new(1.0, 1.0), &[1]).hit);
        assert!(!l.check_collision_filtered(Vec2::new(17.0, 1.0), &[1]).hit);
    }

    #[test]
    fn test_bulk_writes() {
        let mut l = TileLayer::new(3, 2, grid()).unwrap();
        l.set_multiple_tiles(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(l.data(), &[1, 2, 3, 4, 5, 6]);
        l.clear();
        assert!(l.data().iter().all(|&t| t == EMPTY_TILE));

        l.set_chunk_tiles(IVec2::new(1, 0), UVec2::new(2, 2), &[9, 8, 7, 6]).unwrap();
        assert_eq!(l.data(), &[0, 9, 8, 0, 7, 6]);
        assert!(l.set_chunk_tiles(IVec2::ZERO, UVec2::new(2, 2), &[1]).is_err());
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(TileLayer::from_data(2, 2, grid(), vec![0; 3]).is_err());
        let l = TileLayer::from_data(2, 1, grid(), vec![0, 5]).unwrap();
        assert_eq!(l.get(1, 0), 5);
    }
}
