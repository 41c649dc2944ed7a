// engine.rs - Generation stepping and the reseed policy

use rand::Rng;

use crate::config::SeedDensity;
use crate::error::ConfigError;
use crate::grid::Grid;

/// Offsets of the eight neighbours around a cell.
#[rustfmt::skip]
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Fresh random grid: each cell is alive iff a uniform `[0, 1)` draw falls
/// below `density`.
pub fn seed<R: Rng>(
    height: usize,
    width: usize,
    density: SeedDensity,
    rng: &mut R,
) -> Result<Grid, ConfigError> {
    let mut grid = Grid::new(height, width)?;
    fill_random(&mut grid, density, rng);
    Ok(grid)
}

/// Redraws every cell of `grid` in place, row-major.
fn fill_random<R: Rng>(grid: &mut Grid, density: SeedDensity, rng: &mut R) {
    for cell in grid.cells_mut() {
        *cell = rng.random::<f64>() < density.get();
    }
}

/// Live neighbours of `(row, col)`, wrapping on both axes.
pub fn live_neighbours(grid: &Grid, row: usize, col: usize) -> u8 {
    if grid.height() >= 3 && grid.width() >= 3 {
        return NEIGHBOURS
            .iter()
            .filter(|&&(dr, dc)| grid.wrapped(row, col, dr, dc))
            .count() as u8;
    }

    // Below three rows or columns the wrapped offsets alias, so each
    // distinct cell other than (row, col) counts once.
    let mut seen: Vec<(usize, usize)> = Vec::with_capacity(NEIGHBOURS.len());
    for &(dr, dc) in &NEIGHBOURS {
        let pos = grid.wrap_position(row, col, dr, dc);
        if pos != (row, col) && !seen.contains(&pos) {
            seen.push(pos);
        }
    }
    seen.iter().filter(|&&(r, c)| grid.get(r, c)).count() as u8
}

/// Next generation under B3/S23. Leaves `grid` untouched.
pub fn step(grid: &Grid) -> Grid {
    let (height, width) = (grid.height(), grid.width());
    let mut cells = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            let next_state = match (grid.get(row, col), live_neighbours(grid, row, col)) {
                (true, 2) | (true, 3) => true, // Survival
                (false, 3) => true,            // Birth
                _ => false,                    // Death or stays dead
            };
            cells.push(next_state);
        }
    }
    Grid::from_cells(height, width, cells)
}

/// Owns the current generation and the one before it.
///
/// [`advance`](Self::advance) steps the automaton and replaces the result
/// with a fresh random grid when the population died out, or when the new
/// generation repeats the current grid or the grid two generations back.
/// Still lifes and period-2 oscillators are therefore reseeded; longer
/// cycles and gliders keep running.
pub struct SimulationEngine<R> {
    current: Grid,
    previous: Grid,
    density: SeedDensity,
    rng: R,
    generation: u64,
    reseeds: u64,
}

impl<R: Rng> SimulationEngine<R> {
    /// Starts from a random grid at `density`.
    pub fn new(
        height: usize,
        width: usize,
        density: SeedDensity,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        let current = seed(height, width, density, &mut rng)?;
        Ok(Self::from_grid(current, density, rng))
    }

    /// Starts from an explicit grid. Reseeds still use `density`.
    pub fn from_grid(grid: Grid, density: SeedDensity, rng: R) -> Self {
        Self {
            previous: grid.clone(),
            current: grid,
            density,
            rng,
            generation: 0,
            reseeds: 0,
        }
    }

    /// Advances one generation and returns it.
    pub fn advance(&mut self) -> &Grid {
        let candidate = step(&self.current);
        let died_out = candidate.is_empty();
        let stagnant = candidate == self.current || candidate == self.previous;

        self.previous = std::mem::replace(&mut self.current, candidate);
        self.generation += 1;

        if died_out || stagnant {
            log::debug!(
                "generation {}: {}, reseeding",
                self.generation,
                if died_out { "population died out" } else { "grid stopped changing" }
            );
            // The stagnant candidate never leaves the engine
            fill_random(&mut self.current, self.density, &mut self.rng);
            self.reseeds += 1;
        }
        &self.current
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn density(value: f64) -> SeedDensity {
        SeedDensity::new(value).unwrap()
    }

    /// Grid with a live centre cell at (2, 2) and `n` live neighbours.
    fn centre_with_neighbours(centre_alive: bool, n: usize) -> Grid {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(2, 2, centre_alive);
        for &(dr, dc) in NEIGHBOURS.iter().take(n) {
            grid.set((2 + dr) as usize, (2 + dc) as usize, true);
        }
        grid
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let born = step(&centre_with_neighbours(false, n)).get(2, 2);
            assert_eq!(born, n == 3, "dead cell with {n} neighbours");

            let survives = step(&centre_with_neighbours(true, n)).get(2, 2);
            assert_eq!(survives, n == 2 || n == 3, "live cell with {n} neighbours");
        }
    }

    #[test]
    fn dead_grid_stays_dead() {
        let grid = Grid::new(16, 32).unwrap();
        assert!(step(&grid).is_empty());
    }

    #[test]
    fn step_is_pure() {
        let grid = seed(16, 32, density(0.4), &mut rng()).unwrap();
        let before = grid.clone();
        let first = step(&grid);
        let second = step(&grid);
        assert_eq!(first, second);
        assert_eq!(grid, before);
    }

    #[test]
    fn opposite_corners_are_neighbours() {
        let mut grid = Grid::new(6, 8).unwrap();
        grid.set(0, 0, true);
        grid.set(5, 7, true);
        assert_eq!(live_neighbours(&grid, 0, 0), 1);
        assert_eq!(live_neighbours(&grid, 5, 7), 1);
    }

    #[test]
    fn small_grids_count_distinct_neighbours() {
        let full = Grid::from_rows(&["##", "##"]).unwrap();
        assert_eq!(live_neighbours(&full, 0, 0), 3);
        assert_eq!(live_neighbours(&full, 1, 1), 3);

        let single = Grid::from_rows(&["#"]).unwrap();
        assert_eq!(live_neighbours(&single, 0, 0), 0);
        assert!(step(&single).is_empty());

        let strip = Grid::from_rows(&["####"]).unwrap();
        assert_eq!(live_neighbours(&strip, 0, 0), 2);
    }

    #[test]
    fn blinker_wraps_across_the_edge() {
        // Horizontal blinker split over the left/right edge
        let grid = Grid::from_rows(&[
            ".....",
            ".....",
            "##..#",
            ".....",
            ".....",
        ])
        .unwrap();
        let next = step(&grid);
        let expected = Grid::from_rows(&[
            ".....",
            "#....",
            "#....",
            "#....",
            ".....",
        ])
        .unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn seed_density_extremes() {
        assert!(seed(8, 8, density(0.0), &mut rng()).unwrap().is_empty());
        assert_eq!(seed(8, 8, density(1.0), &mut rng()).unwrap().population(), 64);
    }

    #[test]
    fn seed_is_reproducible_for_a_fixed_rng() {
        let a = seed(16, 32, density(0.25), &mut rng()).unwrap();
        let b = seed(16, 32, density(0.25), &mut rng()).unwrap();
        assert_eq!(a, b);
        // Roughly a quarter of 512 cells
        assert!((60..200).contains(&a.population()), "population {}", a.population());
    }

    #[test]
    fn still_life_is_not_emitted_twice() {
        let mut grid = Grid::new(16, 32).unwrap();
        for (r, c) in [(7, 15), (7, 16), (8, 15), (8, 16)] {
            grid.set(r, c, true);
        }
        assert_eq!(step(&grid), grid);

        let mut engine = SimulationEngine::from_grid(grid.clone(), density(0.5), rng());
        let next = engine.advance().clone();
        assert_ne!(next, grid);
        assert_ne!(next.population(), 4);
        assert_eq!(engine.reseeds(), 1);
    }

    #[test]
    fn extinction_is_reseeded() {
        let mut grid = Grid::new(16, 32).unwrap();
        grid.set(3, 3, true);
        let mut engine = SimulationEngine::from_grid(grid, density(0.5), rng());
        assert!(!engine.advance().is_empty());
        assert_eq!(engine.reseeds(), 1);
    }

    #[test]
    fn dead_start_is_reseeded() {
        let grid = Grid::new(16, 32).unwrap();
        let mut engine = SimulationEngine::from_grid(grid, density(0.25), rng());
        assert!(!engine.advance().is_empty());
    }

    #[test]
    fn period_two_oscillator_is_reseeded() {
        let vertical = Grid::from_rows(&[
            ".....",
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ])
        .unwrap();
        let horizontal = step(&vertical);
        let mut engine = SimulationEngine::from_grid(vertical.clone(), density(0.5), rng());

        assert_eq!(engine.advance(), &horizontal);
        assert_eq!(engine.reseeds(), 0);

        // Back to the grid from two generations ago
        let second = engine.advance().clone();
        assert_eq!(engine.reseeds(), 1);
        assert_ne!(second, vertical);
    }

    #[test]
    fn longer_cycles_keep_running() {
        let pulsar = crate::patterns::find("pulsar").unwrap().place(17, 17).unwrap();
        let mut engine = SimulationEngine::from_grid(pulsar.clone(), density(0.5), rng());
        for _ in 0..6 {
            engine.advance();
        }
        assert_eq!(engine.reseeds(), 0);
        assert_eq!(engine.grid(), &pulsar);
        assert_eq!(engine.generation(), 6);
    }

    #[test]
    fn gliders_keep_running() {
        let glider = crate::patterns::find("glider").unwrap().place(12, 12).unwrap();
        let mut engine = SimulationEngine::from_grid(glider, density(0.5), rng());
        for _ in 0..40 {
            engine.advance();
        }
        assert_eq!(engine.reseeds(), 0);
        assert_eq!(engine.grid().population(), 5);
    }

    #[test]
    fn zero_sized_seed_is_rejected() {
        assert!(matches!(
            seed(4, 0, density(0.5), &mut rng()),
            Err(ConfigError::EmptyGrid { height: 4, width: 0 })
        ));
        assert!(SimulationEngine::new(0, 8, density(0.5), rng()).is_err());
    }

    #[test]
    fn full_two_by_two_grid_is_stagnant() {
        // Every cell sees the other three (wrapped), so the grid maps to itself
        let mut engine = SimulationEngine::new(2, 2, density(1.0), rng()).unwrap();
        assert_eq!(engine.grid().population(), 4);
        assert_eq!(step(engine.grid()), *engine.grid());

        for expected in 1..=3 {
            let next = engine.advance();
            assert_eq!(next.population(), 4);
            assert_eq!(engine.reseeds(), expected);
        }
    }

    #[test]
    fn advance_keeps_the_previous_generation() {
        let grid = Grid::from_rows(&[
            ".....",
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ])
        .unwrap();
        let mut engine = SimulationEngine::from_grid(grid.clone(), density(0.5), rng());
        engine.advance();
        assert_eq!(engine.previous(), &grid);
        assert_eq!(engine.height(), 5);
        assert_eq!(engine.width(), 5);
    }
}
