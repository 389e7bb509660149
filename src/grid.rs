//! Sparse unbounded Life grid.
//!
//! Only live cells are stored; any coordinate not present is dead, so the
//! grid has no edges and patterns can wander arbitrarily far in any
//! direction. One `step` applies Conway's B3/S23 rule to the whole set.

use std::collections::HashSet;
use std::fmt;

use bevy::prelude::Resource;

/// Offsets of the eight Moore neighbours, shared by rule evaluation and
/// candidate collection instead of being rebuilt per call.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell position on the infinite grid.
///
/// Plain value type; membership in [`LifeGrid`] is by derived equality and
/// hash, not by a formatted string key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The eight surrounding positions.
    pub fn neighbors(self) -> impl Iterator<Item = CellCoord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| CellCoord::new(self.x + dx, self.y + dy))
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellCoord {
    /// Canonical `"x-y"` form, kept for log readability and parity with
    /// older grid dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Sparse set of live cells plus the Conway step.
#[derive(Clone, Debug, Default, Resource)]
pub struct LifeGrid {
    live: HashSet<CellCoord>,
    /// Bumped on every mutation, for cheap change detection by the renderer.
    version: u64,
}

impl LifeGrid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the cell at `coord` is alive.
    pub fn is_alive(&self, coord: CellCoord) -> bool {
        self.live.contains(&coord)
    }

    /// Set a cell alive. Idempotent; setting an already-live cell is a no-op.
    pub fn set_alive(&mut self, coord: CellCoord) {
        if self.live.insert(coord) {
            self.version += 1;
        }
    }

    /// Set a cell dead. Idempotent; killing an already-dead cell is a no-op.
    pub fn set_dead(&mut self, coord: CellCoord) {
        if self.live.remove(&coord) {
            self.version += 1;
        }
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, coord: CellCoord) -> bool {
        if self.is_alive(coord) {
            self.set_dead(coord);
            false
        } else {
            self.set_alive(coord);
            true
        }
    }

    /// Remove all cells.
    pub fn clear(&mut self) {
        if !self.live.is_empty() {
            self.live.clear();
            self.version += 1;
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Iterate over all live cell positions, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = &CellCoord> {
        self.live.iter()
    }

    /// Owned copy of the live positions, safe to hold across mutations.
    pub fn snapshot(&self) -> Vec<CellCoord> {
        self.live.iter().copied().collect()
    }

    /// Current version, for change detection.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Count live neighbours of `coord` in the current generation.
    pub fn live_neighbors(&self, coord: CellCoord) -> u8 {
        coord.neighbors().filter(|n| self.is_alive(*n)).count() as u8
    }

    /// Advance the whole grid by one generation.
    ///
    /// Candidates are the live cells plus their neighbourhoods; nothing else
    /// can change state, so unbounded space is never scanned. The next
    /// generation is built as a separate set and swapped in, so every
    /// neighbour count reads the pre-step state.
    pub fn step(&mut self) {
        let mut candidates: HashSet<CellCoord> = HashSet::with_capacity(self.live.len() * 9);
        for &cell in &self.live {
            candidates.insert(cell);
            candidates.extend(cell.neighbors());
        }

        let mut next: HashSet<CellCoord> = HashSet::with_capacity(self.live.len());
        for &cell in &candidates {
            let neighbors = self.live_neighbors(cell);
            let lives = match (self.is_alive(cell), neighbors) {
                (true, 2) | (true, 3) => true,
                (false, 3) => true,
                _ => false,
            };
            if lives {
                next.insert(cell);
            }
        }

        self.live = next;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(cells: &[(i32, i32)]) -> LifeGrid {
        let mut g = LifeGrid::new();
        for &(x, y) in cells {
            g.set_alive(CellCoord::new(x, y));
        }
        g
    }

    fn live_set(g: &LifeGrid) -> HashSet<CellCoord> {
        g.cells().copied().collect()
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut g = LifeGrid::new();
        g.step();
        assert!(g.is_empty());
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut g = grid_of(&[(1, 0), (1, 1), (1, 2)]);

        g.step();
        let horizontal: HashSet<CellCoord> =
            [(0, 1), (1, 1), (2, 1)].iter().map(|&c| c.into()).collect();
        assert_eq!(live_set(&g), horizontal);

        g.step();
        let vertical: HashSet<CellCoord> =
            [(1, 0), (1, 1), (1, 2)].iter().map(|&c| c.into()).collect();
        assert_eq!(live_set(&g), vertical);
    }

    #[test]
    fn block_is_still() {
        let mut g = grid_of(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let before = live_set(&g);
        g.step();
        assert_eq!(live_set(&g), before);
    }

    #[test]
    fn lone_cell_dies_of_underpopulation() {
        let mut g = grid_of(&[(0, 0)]);
        g.step();
        assert!(g.is_empty());
    }

    #[test]
    fn pair_dies_of_underpopulation() {
        let mut g = grid_of(&[(0, 0), (1, 0)]);
        g.step();
        assert!(g.is_empty());
    }

    #[test]
    fn crowded_cell_dies_of_overpopulation() {
        // Centre of a plus sign has four neighbours.
        let mut g = grid_of(&[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]);
        g.step();
        assert!(!g.is_alive(CellCoord::new(0, 0)));
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let mut g = grid_of(&[(0, 0), (1, 0), (0, 1)]);
        g.step();
        assert!(g.is_alive(CellCoord::new(1, 1)));
    }

    #[test]
    fn dead_cell_with_two_neighbors_stays_dead() {
        let mut g = grid_of(&[(0, 0), (2, 0)]);
        g.step();
        assert!(!g.is_alive(CellCoord::new(1, 0)));
    }

    #[test]
    fn dead_cell_with_four_neighbors_stays_dead() {
        let mut g = grid_of(&[(0, 1), (2, 1), (1, 0), (1, 2)]);
        g.step();
        assert!(!g.is_alive(CellCoord::new(1, 1)));
    }

    #[test]
    fn glider_translates_after_four_generations() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut g = grid_of(&glider);
        for _ in 0..4 {
            g.step();
        }
        let moved: HashSet<CellCoord> = glider
            .iter()
            .map(|&(x, y)| CellCoord::new(x + 1, y + 1))
            .collect();
        assert_eq!(live_set(&g), moved);
    }

    #[test]
    fn works_far_from_the_origin_in_all_quadrants() {
        let mut g = grid_of(&[
            (-1_000_000, -1_000_000),
            (-1_000_000, -999_999),
            (-1_000_000, -999_998),
        ]);
        g.step();
        assert!(g.is_alive(CellCoord::new(-1_000_001, -999_999)));
        assert!(g.is_alive(CellCoord::new(-1_000_000, -999_999)));
        assert!(g.is_alive(CellCoord::new(-999_999, -999_999)));
        assert_eq!(g.population(), 3);
    }

    #[test]
    fn set_alive_and_set_dead_are_idempotent() {
        let mut g = LifeGrid::new();
        let c = CellCoord::new(3, -7);
        g.set_alive(c);
        let v = g.version();
        g.set_alive(c);
        assert_eq!(g.version(), v, "re-inserting must not count as a change");
        assert_eq!(g.population(), 1);

        g.set_dead(c);
        let v = g.version();
        g.set_dead(c);
        assert_eq!(g.version(), v);
        assert!(g.is_empty());
    }

    #[test]
    fn toggle_flips_state_and_reports_it() {
        let mut g = LifeGrid::new();
        let c = CellCoord::new(0, 0);
        assert!(g.toggle(c));
        assert!(g.is_alive(c));
        assert!(!g.toggle(c));
        assert!(!g.is_alive(c));
    }

    #[test]
    fn clear_empties_the_grid() {
        let mut g = grid_of(&[(0, 0), (5, 5), (-3, 9)]);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn version_tracks_changes_only() {
        let mut g = LifeGrid::new();
        let v0 = g.version();
        g.clear(); // already empty, no change
        assert_eq!(g.version(), v0);
        g.set_alive(CellCoord::new(1, 1));
        assert!(g.version() > v0);
        let v1 = g.version();
        g.step();
        assert!(g.version() > v1);
    }

    #[test]
    fn coord_display_uses_dash_key_form() {
        assert_eq!(CellCoord::new(3, -4).to_string(), "3--4");
        assert_eq!(CellCoord::new(-1, 2).to_string(), "-1-2");
    }
}
