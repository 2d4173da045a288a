//! Collision-avoidance spawn placement
//!
//! Rejection sampling over a strip above the visible screen. A candidate is
//! rejected when it lies within `min_separation` of any neighbour on BOTH
//! axes (Chebyshev distance). Sampling is bounded; when every attempt is
//! rejected the candidate with the most clearance wins.

use glam::Vec2;
use rand::Rng;

/// Where a spawn may land: `x` in `[0, max_x)`, `y` in `(-depth, 0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub max_x: f32,
    pub depth: f32,
}

impl SpawnRegion {
    pub fn new(max_x: f32, depth: f32) -> Self {
        Self {
            max_x: max_x.max(0.0),
            depth: depth.max(0.0),
        }
    }

    /// Uniform candidate inside the region
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let x = rng.random::<f32>() * self.max_x;
        let y = -rng.random::<f32>() * self.depth;
        Vec2::new(x, y)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.max_x && pos.y <= 0.0 && pos.y >= -self.depth
    }
}

/// Result of a placement query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    /// Candidates drawn
    pub attempts: u32,
    /// False when the fallback candidate was accepted
    pub separated: bool,
}

/// Chebyshev distance between two points
#[inline]
pub fn separation(a: Vec2, b: Vec2) -> f32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

/// True if `pos` is closer than `min_separation` to any neighbour
pub fn is_too_close(pos: Vec2, neighbours: &[Vec2], min_separation: f32) -> bool {
    neighbours
        .iter()
        .any(|&other| separation(pos, other) < min_separation)
}

/// Smallest separation from `pos` to any neighbour (infinite when alone)
fn clearance(pos: Vec2, neighbours: &[Vec2]) -> f32 {
    neighbours
        .iter()
        .map(|&other| separation(pos, other))
        .fold(f32::INFINITY, f32::min)
}

/// Pick a spawn point in `region` at least `min_separation` from every neighbour
pub fn place<R: Rng>(
    rng: &mut R,
    region: SpawnRegion,
    neighbours: &[Vec2],
    min_separation: f32,
    max_attempts: u32,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut best = region.sample(rng);
    let mut best_clearance = clearance(best, neighbours);

    for attempt in 1..=max_attempts {
        let candidate = if attempt == 1 { best } else { region.sample(rng) };
        let candidate_clearance = clearance(candidate, neighbours);

        if candidate_clearance >= min_separation {
            return Placement {
                pos: candidate,
                attempts: attempt,
                separated: true,
            };
        }
        if candidate_clearance > best_clearance {
            best = candidate;
            best_clearance = candidate_clearance;
        }
    }

    log::warn!(
        "No spawn point {} apart after {} attempts, using best ({:.1})",
        min_separation,
        max_attempts,
        best_clearance
    );
    Placement {
        pos: best,
        attempts: max_attempts,
        separated: false,
    }
}

/// Place `count` points one after another, each avoiding the ones before it
pub fn initial_layout<R: Rng>(
    rng: &mut R,
    region: SpawnRegion,
    count: u32,
    min_separation: f32,
    max_attempts: u32,
) -> Vec<Vec2> {
    let mut placed = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let placement = place(rng, region, &placed, min_separation, max_attempts);
        placed.push(placement.pos);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_separation_is_chebyshev() {
        assert_eq!(separation(Vec2::new(0.0, 0.0), Vec2::new(30.0, -50.0)), 50.0);
        assert!(is_too_close(Vec2::ZERO, &[Vec2::new(59.0, 59.0)], 60.0));
        assert!(!is_too_close(Vec2::ZERO, &[Vec2::new(10.0, 60.0)], 60.0));
    }

    #[test]
    fn test_place_without_neighbours_first_try() {
        let mut rng = Pcg32::seed_from_u64(1);
        let region = SpawnRegion::new(355.0, 100.0);
        let p = place(&mut rng, region, &[], 70.0, 32);
        assert!(p.separated);
        assert_eq!(p.attempts, 1);
        assert!(region.contains(p.pos));
    }

    #[test]
    fn test_place_falls_back_when_crowded() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Region is a single point occupied by a neighbour
        let region = SpawnRegion::new(0.0, 0.0);
        let p = place(&mut rng, region, &[Vec2::ZERO], 70.0, 5);
        assert!(!p.separated);
        assert_eq!(p.attempts, 5);
        assert_eq!(p.pos, Vec2::ZERO);
    }

    #[test]
    fn test_initial_layout_spacing() {
        let mut rng = Pcg32::seed_from_u64(42);
        let region = SpawnRegion::new(355.0, 500.0);
        let points = initial_layout(&mut rng, region, 6, 70.0, 256);
        assert_eq!(points.len(), 6);
        for (i, a) in points.iter().enumerate() {
            assert!(region.contains(*a));
            for b in &points[i + 1..] {
                assert!(separation(*a, *b) >= 70.0);
                // Chebyshev spacing implies Euclidean spacing
                assert!(a.distance(*b) >= 70.0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_placement_in_region_and_separated_when_flagged(
            seed in any::<u64>(),
            neighbours in prop::collection::vec((0.0f32..355.0, -100.0f32..0.0), 0..5),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let region = SpawnRegion::new(355.0, 100.0);
            let neighbours: Vec<Vec2> = neighbours.into_iter().map(|(x, y)| Vec2::new(x, y)).collect();
            let p = place(&mut rng, region, &neighbours, 60.0, 32);
            prop_assert!(region.contains(p.pos));
            prop_assert!(p.attempts >= 1 && p.attempts <= 32);
            if p.separated {
                for n in &neighbours {
                    let d = (p.pos - *n).abs();
                    prop_assert!(d.x >= 60.0 || d.y >= 60.0);
                }
            }
        }
    }
}
