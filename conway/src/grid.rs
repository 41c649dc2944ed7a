// grid.rs - Toroidal grid type for Conway's Game of Life

use std::fmt;

use crate::error::ConfigError;

/// Fixed-size boolean grid, row-major. `true` is a live cell.
///
/// Dimensions are set at construction and never change. Neighbour lookups
/// go through [`Grid::wrapped`], so the last row/column touches the first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid of `height` rows by `width` columns.
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyGrid { height, width });
        }
        Ok(Self {
            height,
            width,
            cells: vec![false; height * width],
        })
    }

    /// Builds a grid from text rows, `#` or `O` alive and anything else dead.
    /// Every row must have the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::new(height, width)?;
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ConfigError::RaggedRows { row: r, expected: width });
            }
            for (c, ch) in row.chars().enumerate() {
                grid.set(r, c, matches!(ch, '#' | 'O'));
            }
        }
        Ok(grid)
    }

    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self { height, width, cells }
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Panics if out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of range");
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of range");
        self.cells[row * self.width + col] = alive;
    }

    /// Position at a signed offset from `(row, col)`, wrapping on both axes.
    pub fn wrap_position(
        &self,
        row: usize,
        col: usize,
        d_row: isize,
        d_col: isize,
    ) -> (usize, usize) {
        let r = (row as isize + d_row).rem_euclid(self.height as isize) as usize;
        let c = (col as isize + d_col).rem_euclid(self.width as isize) as usize;
        (r, c)
    }

    /// Cell at a signed offset from `(row, col)`, wrapping on both axes.
    pub fn wrapped(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> bool {
        let (r, c) = self.wrap_position(row, col, d_row, d_col);
        self.cells[r * self.width + c]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(ConfigError::EmptyGrid { .. })));
        assert!(matches!(Grid::new(4, 0), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn from_rows_reads_live_cells() {
        let grid = Grid::from_rows(&["#..", ".O.", "..."]).unwrap();
        assert_eq!((grid.height(), grid.width()), (3, 3));
        assert!(grid.get(0, 0));
        assert!(grid.get(1, 1));
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.to_string(), "#..\n.#.\n...\n");
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(&["##", "#"]).unwrap_err();
        assert!(matches!(err, ConfigError::RaggedRows { row: 1, expected: 2 }));
    }

    #[test]
    fn wrapped_lookup_crosses_edges() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(2, 3, true);
        assert!(grid.wrapped(0, 0, -1, -1));
        assert!(grid.wrapped(2, 0, 0, -1));
        assert!(!grid.wrapped(0, 0, 1, 1));
    }

    #[test]
    fn empty_grid_has_no_population() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.population(), 0);
    }
}
