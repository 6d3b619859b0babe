//! Grid geometry: conversions between continuous pixel space and discrete
//! cell coordinates.

/// A single grid cell, addressed by column and row.
///
/// Coordinates are signed so that a head cell that has stepped past the
/// border is still representable for the wall-collision check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// A fixed playfield of `width x height` pixels divided into square cells
/// of `unit_size` pixels. Both dimensions must be exact multiples of the
/// cell size; `GameConfig::validate` enforces that before a `Grid` is built.
#[derive(Debug, Copy, Clone)]
pub struct Grid {
    unit_size: u32,
    width: u32,
    height: u32,
}

impl Grid {
    pub fn new(unit_size: u32, width: u32, height: u32) -> Self {
        Grid { unit_size, width, height }
    }

    pub fn unit_size(&self) -> u32 {
        self.unit_size
    }

    /// Number of columns.
    pub fn cells_wide(&self) -> i32 {
        (self.width / self.unit_size) as i32
    }

    /// Number of rows.
    pub fn cells_high(&self) -> i32 {
        (self.height / self.unit_size) as i32
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, cell: Cell) -> (i32, i32) {
        let unit = self.unit_size as i32;
        (cell.x * unit, cell.y * unit)
    }

    /// Cell containing a pixel coordinate. Rounds toward negative infinity
    /// so pixels left of or above the grid land in negative cells.
    pub fn cell_at(&self, px: i32, py: i32) -> Cell {
        let unit = self.unit_size as i32;
        Cell::new(px.div_euclid(unit), py.div_euclid(unit))
    }

    /// True iff the cell lies within `[0, cells_wide) x [0, cells_high)`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cells_wide() && cell.y < self.cells_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_counts_from_pixel_dimensions() {
        let grid = Grid::new(20, 800, 600);
        assert_eq!(grid.cells_wide(), 40);
        assert_eq!(grid.cells_high(), 30);
    }

    #[test]
    fn pixel_to_cell_floors() {
        let grid = Grid::new(20, 200, 200);
        assert_eq!(grid.cell_at(0, 0), Cell::new(0, 0));
        assert_eq!(grid.cell_at(19, 19), Cell::new(0, 0));
        assert_eq!(grid.cell_at(25, 45), Cell::new(1, 2));
        assert_eq!(grid.cell_at(-5, 21), Cell::new(-1, 1));
    }

    #[test]
    fn cell_to_pixel_is_top_left_corner() {
        let grid = Grid::new(20, 200, 200);
        assert_eq!(grid.cell_origin(Cell::new(0, 0)), (0, 0));
        assert_eq!(grid.cell_origin(Cell::new(3, 7)), (60, 140));
    }

    #[test]
    fn contains_is_boundary_inclusive_at_zero_exclusive_at_extent() {
        let grid = Grid::new(10, 50, 30);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(4, 2)));
        assert!(!grid.contains(Cell::new(5, 0)));
        assert!(!grid.contains(Cell::new(0, 3)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(0, -1)));
    }
}
