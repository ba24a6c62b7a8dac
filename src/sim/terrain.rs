//! Ground profile
//!
//! The duel only needs to know where the ground surface is at a given x. The
//! classic arena is a flat strip; a bumpy profile can be generated by midpoint
//! displacement from a seed. Terrain is static once built.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Static ground surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Terrain {
    /// Level ground at `surface_y`
    Flat { surface_y: f32 },
    /// One surface y per integer x column, starting at x = 0
    HeightMap { surface: Vec<f32> },
}

impl Terrain {
    pub fn flat(surface_y: f32) -> Self {
        Terrain::Flat { surface_y }
    }

    /// Generate a bumpy profile with midpoint displacement
    ///
    /// `mean_y` is where both ends start on average, `displace` is the maximum
    /// deviation for the first pass, and each pass multiplies it by `roughness`.
    /// Every value is clamped into `[min_y, max_y]`.
    pub fn generate(
        width: usize,
        mean_y: f32,
        displace: f32,
        roughness: f32,
        bounds: (f32, f32),
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (min_y, max_y) = bounds;
        let power = width.max(2).next_power_of_two();
        let mut points = vec![mean_y; power + 1];
        let mut displace = displace.abs();

        points[0] = mean_y + jitter(&mut rng, displace);
        points[power] = mean_y + jitter(&mut rng, displace);
        displace *= roughness;

        let mut segments = 1;
        while segments < power {
            let span = power / segments;
            let half = span / 2;
            let mut mid = half;
            while mid < power {
                let avg = (points[mid - half] + points[mid + half]) / 2.0;
                points[mid] = avg + jitter(&mut rng, displace);
                mid += span;
            }
            displace *= roughness;
            segments *= 2;
        }

        points.truncate(width.max(1));
        for y in points.iter_mut() {
            *y = y.clamp(min_y, max_y);
        }
        Terrain::HeightMap { surface: points }
    }

    /// Surface y at horizontal position `x`, linearly interpolated between
    /// columns and held constant past either edge.
    pub fn surface_y(&self, x: f32) -> f32 {
        match self {
            Terrain::Flat { surface_y } => *surface_y,
            Terrain::HeightMap { surface } => {
                let last = surface.len().saturating_sub(1);
                if surface.is_empty() {
                    return 0.0;
                }
                if !(x > 0.0) {
                    return surface[0];
                }
                let x0 = x.floor() as usize;
                if x0 >= last {
                    return surface[last];
                }
                let t = x - x0 as f32;
                surface[x0] + (surface[x0 + 1] - surface[x0]) * t
            }
        }
    }
}

fn jitter(rng: &mut Pcg32, displace: f32) -> f32 {
    if displace <= 0.0 {
        0.0
    } else {
        rng.random_range(-displace..=displace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_surface() {
        let t = Terrain::flat(620.0);
        assert_eq!(t.surface_y(-50.0), 620.0);
        assert_eq!(t.surface_y(10_000.0), 620.0);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = Terrain::generate(300, 600.0, 60.0, 0.6, (0.0, 720.0), 7);
        let b = Terrain::generate(300, 600.0, 60.0, 0.6, (0.0, 720.0), 7);
        assert_eq!(a, b);
        let c = Terrain::generate(300, 600.0, 60.0, 0.6, (0.0, 720.0), 8);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_respects_width_and_bounds() {
        let t = Terrain::generate(300, 600.0, 500.0, 0.6, (400.0, 700.0), 42);
        let Terrain::HeightMap { surface } = &t else {
            panic!("expected a height map");
        };
        assert_eq!(surface.len(), 300);
        assert!(surface.iter().all(|y| (400.0..=700.0).contains(y)));
    }

    #[test]
    fn test_interpolates_and_clamps_edges() {
        let t = Terrain::HeightMap {
            surface: vec![100.0, 200.0, 300.0],
        };
        assert_eq!(t.surface_y(-3.0), 100.0);
        assert_eq!(t.surface_y(0.5), 150.0);
        assert_eq!(t.surface_y(1.25), 225.0);
        assert_eq!(t.surface_y(99.0), 300.0);
    }
}
