use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tile address within one zoom level of a pyramidal imagery scheme.
/// `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Everything that identifies one rendering of the tile grid. Held as a single
/// immutable value per view and replaced wholesale on any control change, so a
/// half-updated combination of inputs can never be observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRequest {
    pub layer: String,
    /// `None` selects the layer's "default" (dateless) imagery.
    pub date: Option<NaiveDate>,
    pub zoom: u8,
    pub center: TileCoord,
    /// Side length of the square grid. Must be odd so a true center tile exists.
    pub size: u32,
    /// Opaque value appended to tile URLs to defeat browser/CDN caching.
    pub cache_token: u64,
}

impl GridRequest {
    /// Coordinates of every tile this request covers, in render order.
    pub fn tile_coords(&self) -> Vec<TileCoord> {
        grid_coords(self.center, self.size)
    }
}

/// Square neighborhood of `center` with side length `size`, iterated row by row
/// (y outer, x inner). Candidates where either coordinate would go negative are
/// dropped, not clamped or wrapped, so a grid hugging the origin shrinks below
/// `size * size` tiles. No upper bound is applied here; callers clamp the
/// center against the layer's tile matrix before building a request.
pub fn grid_coords(center: TileCoord, size: u32) -> Vec<TileCoord> {
    let offset = i64::from(size / 2);
    let start_x = i64::from(center.x) - offset;
    let start_y = i64::from(center.y) - offset;

    let mut coords = Vec::with_capacity((size * size) as usize);
    for y in start_y..start_y + i64::from(size) {
        if y < 0 {
            continue;
        }
        for x in start_x..start_x + i64::from(size) {
            if x < 0 {
                continue;
            }
            coords.push(TileCoord::new(x as u32, y as u32));
        }
    }
    coords
}

/// Visual state of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    Loading,
    Ready,
    Error,
}

/// Tracks per-tile load completion for one grid request.
///
/// Tile fetches complete in arbitrary order; insertion into a set makes the
/// tracker commutative with respect to arrival. The first failed tile flips the
/// grid to `Error` and both `Ready` and `Error` are terminal until `reset`.
#[derive(Debug, Clone)]
pub struct GridLoadTracker {
    expected: HashSet<TileCoord>,
    loaded: HashSet<TileCoord>,
    phase: GridPhase,
}

impl GridLoadTracker {
    pub fn new<I: IntoIterator<Item = TileCoord>>(expected: I) -> Self {
        let expected: HashSet<TileCoord> = expected.into_iter().collect();
        let phase = if expected.is_empty() {
            GridPhase::Ready
        } else {
            GridPhase::Loading
        };
        Self {
            expected,
            loaded: HashSet::new(),
            phase,
        }
    }

    /// Discard all progress and start tracking a new set of tiles.
    pub fn reset<I: IntoIterator<Item = TileCoord>>(&mut self, expected: I) {
        *self = Self::new(expected);
    }

    /// Record a successful tile load. Completions for tiles outside the current
    /// expected set (stale fetches from a superseded request) are ignored.
    pub fn mark_loaded(&mut self, coord: TileCoord) -> GridPhase {
        if self.phase == GridPhase::Loading && self.expected.contains(&coord) {
            self.loaded.insert(coord);
            if self.loaded.len() == self.expected.len() {
                self.phase = GridPhase::Ready;
            }
        }
        self.phase
    }

    /// Record a failed tile load. First failure wins; no retry, no
    /// partial-success rendering.
    pub fn mark_failed(&mut self, coord: TileCoord) -> GridPhase {
        if self.phase == GridPhase::Loading && self.expected.contains(&coord) {
            self.phase = GridPhase::Error;
        }
        self.phase
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn expected_count(&self) -> usize {
        self.expected.len()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{GridLoadTracker, GridPhase, TileCoord, grid_coords};
    use std::collections::HashSet;

    #[test]
    fn interior_center_yields_full_square() {
        for size in [1_u32, 3, 5, 7] {
            let offset = size / 2;
            let coords = grid_coords(TileCoord::new(offset, offset), size);
            assert_eq!(coords.len(), (size * size) as usize);
            let distinct: HashSet<_> = coords.iter().copied().collect();
            assert_eq!(distinct.len(), coords.len());
        }
    }

    #[test]
    fn origin_center_drops_negative_candidates() {
        let coords = grid_coords(TileCoord::new(0, 0), 3);
        assert_eq!(
            coords,
            vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn iteration_is_row_major_around_center() {
        let coords = grid_coords(TileCoord::new(13, 36), 3);
        assert_eq!(coords[0], TileCoord::new(12, 35));
        assert_eq!(coords[4], TileCoord::new(13, 36));
        assert_eq!(coords[8], TileCoord::new(14, 37));
    }

    #[test]
    fn generator_is_pure() {
        let a = grid_coords(TileCoord::new(5, 9), 5);
        let b = grid_coords(TileCoord::new(5, 9), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn all_loaded_transitions_to_ready() {
        let coords = grid_coords(TileCoord::new(2, 2), 3);
        let mut tracker = GridLoadTracker::new(coords.iter().copied());
        assert_eq!(tracker.phase(), GridPhase::Loading);

        // Arrival order differs from generation order.
        for coord in coords.iter().rev() {
            tracker.mark_loaded(*coord);
        }
        assert_eq!(tracker.phase(), GridPhase::Ready);
        assert_eq!(tracker.loaded_count(), tracker.expected_count());
    }

    #[test]
    fn any_failure_wins_over_other_completions() {
        let coords = grid_coords(TileCoord::new(2, 2), 3);
        let mut tracker = GridLoadTracker::new(coords.iter().copied());

        tracker.mark_loaded(coords[0]);
        assert_eq!(tracker.mark_failed(coords[5]), GridPhase::Error);

        // Later successes cannot resurrect the grid.
        for coord in &coords {
            assert_eq!(tracker.mark_loaded(*coord), GridPhase::Error);
        }
    }

    #[test]
    fn reset_clears_progress_and_restores_loading() {
        let first = grid_coords(TileCoord::new(2, 2), 3);
        let mut tracker = GridLoadTracker::new(first.iter().copied());
        for coord in &first {
            tracker.mark_loaded(*coord);
        }
        assert_eq!(tracker.phase(), GridPhase::Ready);

        let second = grid_coords(TileCoord::new(8, 8), 5);
        tracker.reset(second.iter().copied());
        assert_eq!(tracker.phase(), GridPhase::Loading);
        assert_eq!(tracker.loaded_count(), 0);
        assert_eq!(tracker.expected_count(), second.len());
    }

    #[test]
    fn stale_completions_are_ignored() {
        let old = grid_coords(TileCoord::new(20, 20), 3);
        let new = grid_coords(TileCoord::new(2, 2), 3);
        let mut tracker = GridLoadTracker::new(new.iter().copied());

        // A fetch from the superseded grid resolves late.
        tracker.mark_loaded(old[0]);
        assert_eq!(tracker.loaded_count(), 0);
        assert_eq!(tracker.phase(), GridPhase::Loading);
    }
}
