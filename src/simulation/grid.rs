//! # CPU Cell Grid
//!
//! Host-side mirror of the simulation state. Used to seed the front texture,
//! to decode readbacks, and as a reference implementation of the update rule
//! that the GPU kernel is checked against.
//!
//! Row `y = 0` is the first row in memory, which is also the first row of the
//! state texture.

use rand::Rng;

/// Canonical encoding of a live cell in the state texture
pub const ALIVE_TEXEL: [u8; 4] = [255, 255, 255, 255];
/// Canonical encoding of a dead cell in the state texture
pub const DEAD_TEXEL: [u8; 4] = [0, 0, 0, 0];

/// The 8 Moore neighbourhood offsets, self excluded
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Binary W×H grid on a torus
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl CellGrid {
    /// All-dead grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Independent fair coin per cell
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let cells = (0..width * height).map(|_| rng.random_bool(0.5)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Decodes tightly packed RGBA8 texels.
    ///
    /// Only the red channel is inspected, matching the kernel's liveness test.
    /// Returns `None` if `data` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        if data.len() != (width * height * 4) as usize {
            return None;
        }
        let cells = data.chunks_exact(4).map(|texel| texel[0] == 255).collect();
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Encodes the grid as canonical RGBA8 texels
    pub fn to_rgba(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|&alive| if alive { ALIVE_TEXEL } else { DEAD_TEXEL })
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell state with toroidal wrap on both axes
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Sets a cell, wrapping out-of-range coordinates
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        let index = self.index(x, y);
        self.cells[index] = alive;
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Marks `cells` (relative offsets) alive around the origin `(x, y)`
    pub fn stamp(&mut self, x: i64, y: i64, cells: &[(i64, i64)]) {
        for (dx, dy) in cells {
            self.set(x + dx, y + dy, true);
        }
    }

    /// Number of live cells in the Moore neighbourhood of `(x, y)`
    pub fn neighbor_sum(&self, x: i64, y: i64) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dx, dy)| self.get(x + dx, y + dy))
            .count() as u8
    }

    /// Advances one generation with the same three-way rule as the GPU kernel
    pub fn step(&self) -> Self {
        let mut next = Self::new(self.width, self.height);
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let alive = match self.neighbor_sum(x, y) {
                    3 => true,
                    2 => self.get(x, y),
                    _ => false,
                };
                next.set(x, y, alive);
            }
        }
        next
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let x = x.rem_euclid(self.width as i64);
        let y = y.rem_euclid(self.height as i64);
        (y * self.width as i64 + x) as usize
    }
}

/// Classic seed patterns
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pattern {
    /// 2×2 still life
    Block,
    /// Period-2 oscillator, horizontal phase
    Blinker,
    /// Period-4 spaceship heading towards +x, +y
    Glider,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Block => "Block",
            Pattern::Blinker => "Blinker",
            Pattern::Glider => "Glider",
        }
    }

    /// Live cell offsets relative to the pattern origin
    pub fn cells(&self) -> &'static [(i64, i64)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        }
    }

    /// Grid of the given size with this pattern stamped at `(x, y)`
    pub fn seeded(&self, width: u32, height: u32, x: i64, y: i64) -> CellGrid {
        let mut grid = CellGrid::new(width, height);
        grid.stamp(x, y, self.cells());
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = CellGrid::new(16, 9);
        assert_eq!(grid.step(), grid);
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = CellGrid::new(4, 4);
        grid.set(1, 1, true);
        let next = grid.step();
        assert_eq!(next.live_count(), 0);
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = Pattern::Block.seeded(8, 8, 3, 3);
        assert_eq!(grid.step(), grid);
    }

    #[test]
    fn test_blinker_has_period_two() {
        let grid = Pattern::Blinker.seeded(8, 8, 2, 4);
        let once = grid.step();
        assert_ne!(once, grid);
        assert!(once.get(3, 3) && once.get(3, 4) && once.get(3, 5));
        assert_eq!(once.live_count(), 3);
        assert_eq!(once.step(), grid);
    }

    #[test]
    fn test_glider_translates_diagonally() {
        let grid = Pattern::Glider.seeded(10, 10, 0, 0);
        let mut state = grid.clone();
        for _ in 0..4 {
            state = state.step();
        }
        assert_eq!(state, Pattern::Glider.seeded(10, 10, 1, 1));
    }

    #[test]
    fn test_corner_cell_wraps_to_opposite_edges() {
        let (w, h) = (5i64, 4i64);
        let mut grid = CellGrid::new(w as u32, h as u32);
        grid.set(0, 0, true);

        for (x, y) in [(w - 1, h - 1), (w - 1, 0), (0, h - 1), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(grid.neighbor_sum(x, y), 1, "cell ({}, {})", x, y);
        }
        assert_eq!(grid.neighbor_sum(0, 0), 0);
        assert_eq!(grid.neighbor_sum(2, 2), 0);
    }

    #[test]
    fn test_glider_crosses_the_seam() {
        let grid = Pattern::Glider.seeded(8, 8, 6, 6);
        let mut state = grid.clone();
        for _ in 0..4 {
            state = state.step();
        }
        assert_eq!(state, Pattern::Glider.seeded(8, 8, 7, 7));
        assert_eq!(state.live_count(), 5);
    }

    #[test]
    fn test_branches_depend_only_on_sum_except_two() {
        // Centre of a 5×5 grid, every assignment of its 8 neighbours and itself.
        for mask in 0u32..512 {
            let mut grid = CellGrid::new(5, 5);
            for (bit, (dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
                grid.set(2 + dx, 2 + dy, mask & (1 << bit) != 0);
            }
            let current = mask & (1 << 8) != 0;
            grid.set(2, 2, current);

            let sum = (mask & 0xff).count_ones();
            let expected = match sum {
                3 => true,
                2 => current,
                _ => false,
            };
            assert_eq!(grid.neighbor_sum(2, 2) as u32, sum);
            assert_eq!(grid.step().get(2, 2), expected, "mask {:#b}", mask);
        }
    }

    #[test]
    fn test_rgba_encoding() {
        let mut grid = CellGrid::new(2, 1);
        grid.set(1, 0, true);
        let bytes = grid.to_rgba();
        assert_eq!(bytes, vec![0, 0, 0, 0, 255, 255, 255, 255]);
        assert_eq!(CellGrid::from_rgba(2, 1, &bytes), Some(grid));
        assert_eq!(CellGrid::from_rgba(2, 2, &bytes), None);
    }

    #[test]
    fn test_opaque_dead_texel_decodes_dead() {
        let grid = CellGrid::from_rgba(1, 1, &[0, 0, 0, 255]).unwrap();
        assert!(!grid.get(0, 0));
    }

    #[test]
    fn test_random_fill_is_reproducible() {
        let a = CellGrid::random(32, 32, &mut StdRng::seed_from_u64(42));
        let b = CellGrid::random(32, 32, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        let live = a.live_count();
        assert!(live > 350 && live < 674, "live count {}", live);
    }
}
