//! Tile layout generation
//!
//! Positions are rejection-sampled inside the board margins so that every
//! new point keeps [`MIN_TILE_DISTANCE`] from the points already placed.
//! After [`MAX_PLACEMENT_ATTEMPTS`] failed samples the last candidate is
//! accepted anyway; such points are counted in [`Layout::relaxed`] and may
//! sit closer than the minimum distance to an earlier tile.

use crate::rng::SimpleRng;
use crate::types::{Bounds, Point, MAX_PLACEMENT_ATTEMPTS, MIN_TILE_DISTANCE, TILE_COUNT};

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub positions: [Point; TILE_COUNT as usize],
    /// Points accepted after exhausting the attempt cap.
    pub relaxed: u8,
    /// Which positions were relaxed. Every other position keeps the minimum
    /// distance to all positions placed before it.
    pub relaxed_mask: [bool; TILE_COUNT as usize],
}

impl Layout {
    pub fn is_relaxed(&self, index: usize) -> bool {
        self.relaxed_mask.get(index).copied().unwrap_or(false)
    }

    /// Smallest distance between two positions that were both placed with
    /// full spacing (infinity if fewer than two qualify).
    pub fn min_unrelaxed_distance(&self) -> f32 {
        let mut min = f32::INFINITY;
        for (i, a) in self.positions.iter().enumerate() {
            if self.relaxed_mask[i] {
                continue;
            }
            for (j, b) in self.positions.iter().enumerate().skip(i + 1) {
                if !self.relaxed_mask[j] {
                    min = min.min(a.distance(*b));
                }
            }
        }
        min
    }

    /// Whether every pair of positions honours the minimum distance.
    pub fn is_spaced(&self) -> bool {
        min_pairwise_distance(&self.positions) >= MIN_TILE_DISTANCE
    }
}

/// Sample a fresh layout for `bounds`.
pub fn generate_positions(rng: &mut SimpleRng, bounds: Bounds) -> Layout {
    let mut positions = [Point::default(); TILE_COUNT as usize];
    let mut relaxed = 0u8;
    let mut relaxed_mask = [false; TILE_COUNT as usize];

    for i in 0..positions.len() {
        let (placed, rest) = positions.split_at_mut(i);
        let mut candidate = random_position(rng, bounds);
        let mut attempts = 1;
        while !is_position_valid(candidate, placed) {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                relaxed += 1;
                relaxed_mask[i] = true;
                break;
            }
            candidate = random_position(rng, bounds);
            attempts += 1;
        }
        rest[0] = candidate;
    }

    Layout {
        positions,
        relaxed,
        relaxed_mask,
    }
}

/// Uniform sample inside the margin-adjusted board area.
pub fn random_position(rng: &mut SimpleRng, bounds: Bounds) -> Point {
    let (x0, x1, y0, y1) = bounds.sampling_area();
    let x = rng.next_f32_range(x0, x1);
    let y = rng.next_f32_range(y0, y1);
    Point::new(x, y)
}

/// A candidate is valid when it keeps the minimum distance to every placed point.
pub fn is_position_valid(candidate: Point, placed: &[Point]) -> bool {
    placed
        .iter()
        .all(|p| candidate.distance(*p) >= MIN_TILE_DISTANCE)
}

/// Smallest distance between any two points (infinity for fewer than two).
pub fn min_pairwise_distance(points: &[Point]) -> f32 {
    let mut min = f32::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min = min.min(a.distance(*b));
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_inside_margins() {
        let bounds = Bounds::new(900.0, 600.0);
        let (x0, x1, y0, y1) = bounds.sampling_area();
        for seed in 1..100 {
            let layout = generate_positions(&mut SimpleRng::new(seed), bounds);
            for p in layout.positions {
                assert!(p.x >= x0 && p.x < x1, "x={} seed={seed}", p.x);
                assert!(p.y >= y0 && p.y < y1, "y={} seed={seed}", p.y);
            }
        }
    }

    #[test]
    fn test_roomy_board_is_always_spaced() {
        let bounds = Bounds::new(1600.0, 1000.0);
        for seed in 1..200 {
            let layout = generate_positions(&mut SimpleRng::new(seed), bounds);
            assert_eq!(layout.relaxed, 0, "seed {seed}");
            assert!(layout.is_spaced(), "seed {seed}");
        }
    }

    #[test]
    fn test_cramped_board_relaxes_instead_of_failing() {
        // 100x100 cannot fit ten points 80 units apart.
        let bounds = Bounds::new(100.0, 100.0);
        let layout = generate_positions(&mut SimpleRng::new(3), bounds);
        assert!(layout.relaxed > 0);
        assert!(!layout.is_spaced());
    }

    #[test]
    fn test_unrelaxed_points_keep_distance_to_earlier_points() {
        // Tight enough that most seeds relax a few points.
        let bounds = Bounds::new(300.0, 220.0);
        let mut saw_relaxed = false;
        for seed in 1..100 {
            let layout = generate_positions(&mut SimpleRng::new(seed), bounds);
            let marked = layout.relaxed_mask.iter().filter(|r| **r).count();
            assert_eq!(marked, layout.relaxed as usize, "seed {seed}");
            saw_relaxed |= layout.relaxed > 0;

            for j in 0..layout.positions.len() {
                if layout.is_relaxed(j) {
                    continue;
                }
                for i in 0..j {
                    let d = layout.positions[i].distance(layout.positions[j]);
                    assert!(d >= MIN_TILE_DISTANCE, "seed {seed}: {i}-{j} at {d}");
                }
            }
        }
        assert!(saw_relaxed);
    }

    #[test]
    fn test_first_point_is_never_relaxed() {
        let layout = generate_positions(&mut SimpleRng::new(5), Bounds::new(50.0, 50.0));
        assert!(!layout.is_relaxed(0));
        assert_eq!(layout.relaxed as usize, TILE_COUNT as usize - 1);
        assert_eq!(layout.min_unrelaxed_distance(), f32::INFINITY);
    }

    #[test]
    fn test_is_position_valid_boundary() {
        let placed = [Point::new(0.0, 0.0)];
        assert!(is_position_valid(Point::new(80.0, 0.0), &placed));
        assert!(!is_position_valid(Point::new(79.9, 0.0), &placed));
        assert!(is_position_valid(Point::new(1.0, 1.0), &[]));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let bounds = Bounds::default();
        let a = generate_positions(&mut SimpleRng::new(42), bounds);
        let b = generate_positions(&mut SimpleRng::new(42), bounds);
        assert_eq!(a, b);
    }
}
