//! Fibonacci-sphere layout.
//!
//! Entry `i` of `N` sits at height `y = 1 - 2i/(N-1)` and azimuth
//! `i * golden_angle`, which spreads any number of points evenly over the
//! sphere with no repeating pattern. Position `i` depends only on `(i, N, R)`:
//! never on the entry itself. A filter change therefore re-runs the whole
//! layout and entries may move to new slots.

use rayon::prelude::*;

use crate::entry::{Entry, EntryId};
use crate::math::Vec3;

/// Collections at least this large are laid out on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Golden angle in radians: π(3 - √5).
#[inline(always)]
pub fn golden_angle() -> f32 {
    std::f32::consts::PI * (3.0 - 5.0_f32.sqrt())
}

/// A laid-out entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPoint {
    pub entry_id: EntryId,
    pub target_position: Vec3,
}

/// Position of point `i` out of `n` (requires `n >= 2`).
#[inline]
fn fibonacci_point(i: usize, n: usize, radius: f32, phi: f32) -> Vec3 {
    let y = 1.0 - (i as f32 / (n - 1) as f32) * 2.0;
    let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
    let theta = phi * i as f32;
    Vec3::new(
        theta.cos() * radius_at_y * radius,
        y * radius,
        theta.sin() * radius_at_y * radius,
    )
}

/// `n` evenly spread points on a sphere of `radius` centered at the origin.
pub fn fibonacci_sphere(n: usize, radius: f32) -> Vec<Vec3> {
    match n {
        0 => Vec::new(),
        // Single entry sits on the north pole; the general formula divides by n-1
        1 => vec![Vec3::new(0.0, radius, 0.0)],
        _ => {
            let phi = golden_angle();
            if n >= PARALLEL_THRESHOLD {
                (0..n)
                    .into_par_iter()
                    .map(|i| fibonacci_point(i, n, radius, phi))
                    .collect()
            } else {
                (0..n).map(|i| fibonacci_point(i, n, radius, phi)).collect()
            }
        }
    }
}

/// Sphere positions for `filtered`, index-aligned with it.
pub fn layout(filtered: &[&Entry], radius: f32) -> Vec<Vec3> {
    fibonacci_sphere(filtered.len(), radius)
}

/// Like [`layout`], paired with entry ids.
pub fn layout_points(filtered: &[&Entry], radius: f32) -> Vec<LayoutPoint> {
    filtered
        .iter()
        .zip(layout(filtered, radius))
        .map(|(e, p)| LayoutPoint {
            entry_id: e.id.clone(),
            target_position: p,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const R: f32 = 8.0;

    fn min_pairwise_distance(points: &[Vec3]) -> f32 {
        let mut best = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                best = best.min(points[i].distance(points[j]));
            }
        }
        best
    }

    #[test]
    fn empty_and_single() {
        assert!(fibonacci_sphere(0, R).is_empty());
        assert_eq!(fibonacci_sphere(1, R), vec![Vec3::new(0.0, R, 0.0)]);
    }

    #[test]
    fn points_lie_on_sphere() {
        for n in [0usize, 1, 2, 3, 5, 17, 100, 1000] {
            let pts = fibonacci_sphere(n, R);
            assert_eq!(pts.len(), n);
            for p in &pts {
                assert!((p.length() - R).abs() < 1e-4 * R, "n={n} |p|={}", p.length());
            }
        }
    }

    #[test]
    fn endpoints_are_poles() {
        let pts = fibonacci_sphere(7, R);
        assert!((pts[0].y - R).abs() < 1e-5);
        assert!((pts[6].y + R).abs() < 1e-5);
        assert!(pts[0].x.abs() < 1e-5 && pts[0].z.abs() < 1e-5);
    }

    #[test]
    fn deterministic_bit_for_bit() {
        let a = fibonacci_sphere(321, R);
        let b = fibonacci_sphere(321, R);
        let bits = |v: &[Vec3]| -> Vec<[u32; 3]> {
            v.iter().map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let n = PARALLEL_THRESHOLD + 17;
        let par = fibonacci_sphere(n, R);
        let phi = golden_angle();
        for (i, p) in par.iter().enumerate() {
            assert_eq!(*p, fibonacci_point(i, n, R, phi));
        }
    }

    #[test]
    fn no_duplicates_and_spread_shrinks_with_n() {
        let mut prev = f32::MAX;
        for n in [2usize, 10, 50, 200, 800] {
            let pts = fibonacci_sphere(n, R);
            let d = min_pairwise_distance(&pts);
            assert!(d > 0.0, "duplicate positions for n={n}");
            assert!(d < prev, "min distance did not shrink at n={n}");
            // Even spread: nearest-neighbour distance scales like 1/sqrt(n)
            let normalized = d * (n as f32).sqrt() / R;
            assert!((0.5..=4.0).contains(&normalized), "n={n} normalized={normalized}");
            prev = d;
        }
    }

    #[test]
    fn layout_depends_on_index_not_identity() {
        let t = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let a = Entry::new("a", "Joy", t);
        let b = Entry::new("b", "Calm", t);
        let forward = layout_points(&[&a, &b], R);
        let reversed = layout_points(&[&b, &a], R);
        assert_eq!(forward[0].target_position, reversed[0].target_position);
        assert_eq!(forward[0].entry_id, "a");
        assert_eq!(reversed[0].entry_id, "b");
    }
}
