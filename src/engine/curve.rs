//! Response curve
//!
//! Converts origin-relative pointer displacement into a scroll vector:
//! dead-zone subtraction, power-law magnitude scaling, axis decomposition,
//! plus the coarse 5-way direction classification used for overlay
//! feedback.

use crate::config::ScrollTuning;

/// Coarse direction bucket for overlay feedback.
///
/// Independent of the continuous scroll vector; scale-invariant in the
/// displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Inside the dead zone, no dominant axis
    #[default]
    Neutral,
    /// Dominant displacement toward the top of the screen
    Up,
    /// Dominant displacement toward the bottom of the screen
    Down,
    /// Dominant displacement to the left
    Left,
    /// Dominant displacement to the right
    Right,
}

impl Direction {
    /// Stable lowercase name, as serialized toward overlay consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Neutral => "neutral",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Result of evaluating the curve for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Scroll vector to inject, or `None` inside the dead zone.
    ///
    /// Sign convention: positive `x` scrolls right; dragging down
    /// (raw `dy > 0`) yields negative `y`, i.e. content scrolls down.
    pub scroll: Option<(f64, f64)>,
    /// Direction classification for this displacement
    pub direction: Direction,
}

/// Evaluate the response curve for displacement `(dx, dy)` from the
/// gesture origin.
///
/// `unit_scale` is the platform calibration constant mapping the
/// pixel-distance curve into host scroll units (see
/// [`crate::config::CalibrationConfig`]).
///
/// Tolerates out-of-range tuning without faulting: a dead zone larger
/// than the displacement emits nothing, a near-zero speed factor emits
/// near-zero scroll.
pub fn evaluate(tuning: &ScrollTuning, unit_scale: f64, dx: f64, dy: f64) -> TickOutput {
    let dx = if tuning.enable_horizontal { dx } else { 0.0 };
    let dist = dx.hypot(dy);

    let direction = classify(tuning.dead_zone, dist, dx, dy);

    // dist == 0 must short-circuit even with a zero dead zone, so the
    // axis decomposition below never divides by zero.
    if dist <= tuning.dead_zone || dist == 0.0 {
        return TickOutput {
            scroll: None,
            direction,
        };
    }

    let eff = dist - tuning.dead_zone;
    let magnitude = eff.powf(tuning.sensitivity) * unit_scale * tuning.speed_factor;

    TickOutput {
        scroll: Some((dx / dist * magnitude, dy / dist * magnitude * -1.0)),
        direction,
    }
}

fn classify(dead_zone: f64, dist: f64, dx: f64, dy: f64) -> Direction {
    if dist <= dead_zone || dist == 0.0 {
        Direction::Neutral
    } else if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const K: f64 = 0.00005;

    fn tuning() -> ScrollTuning {
        ScrollTuning {
            dead_zone: 20.0,
            sensitivity: 2.0,
            speed_factor: 2.0,
            enable_horizontal: true,
            overlay_size: 60.0,
        }
    }

    #[test]
    fn test_inside_dead_zone_emits_nothing() {
        for (dx, dy) in [(0.0, 0.0), (3.0, 4.0), (0.0, 20.0), (-14.0, -14.0)] {
            let out = evaluate(&tuning(), K, dx, dy);
            assert_eq!(out.scroll, None, "({}, {})", dx, dy);
            assert_eq!(out.direction, Direction::Neutral);
        }
    }

    #[test]
    fn test_vertical_drag_scenario() {
        // dist=40, eff=20, magnitude = 20^2 * K * 2.0
        let out = evaluate(&tuning(), K, 0.0, 40.0);
        let magnitude = 400.0 * K * 2.0;
        let (sx, sy) = out.scroll.unwrap();
        assert_eq!(sx, 0.0);
        assert!((sy + magnitude).abs() < 1e-12, "downward drag scrolls down");
        assert_eq!(out.direction, Direction::Down);
    }

    #[test]
    fn test_diagonal_drag_scenario() {
        // dist=50, eff=30
        let out = evaluate(&tuning(), K, 30.0, 40.0);
        let magnitude = 900.0 * K * 2.0;
        let (sx, sy) = out.scroll.unwrap();
        assert!((sx - 30.0 / 50.0 * magnitude).abs() < 1e-12);
        assert!((sy + 40.0 / 50.0 * magnitude).abs() < 1e-12);
        assert_eq!(out.direction, Direction::Down);
    }

    #[test]
    fn test_origin_with_zero_dead_zone() {
        let mut t = tuning();
        t.dead_zone = 0.0;
        let out = evaluate(&t, K, 0.0, 0.0);
        assert_eq!(out.scroll, None);
        assert_eq!(out.direction, Direction::Neutral);
    }

    #[test]
    fn test_horizontal_disabled_zeroes_scroll_x() {
        let mut t = tuning();
        t.enable_horizontal = false;
        let out = evaluate(&t, K, 500.0, 40.0);
        let (sx, sy) = out.scroll.unwrap();
        assert_eq!(sx, 0.0);
        assert!(sy < 0.0);
        // dist degenerates to |dy|, so dx never dominates
        assert_eq!(out.direction, Direction::Down);
    }

    #[test]
    fn test_horizontal_disabled_inside_dead_zone() {
        let mut t = tuning();
        t.enable_horizontal = false;
        // Large dx alone must not escape the dead zone
        let out = evaluate(&t, K, 500.0, 5.0);
        assert_eq!(out.scroll, None);
        assert_eq!(out.direction, Direction::Neutral);
    }

    #[test]
    fn test_four_quadrant_classification() {
        let t = tuning();
        assert_eq!(evaluate(&t, K, 0.0, -50.0).direction, Direction::Up);
        assert_eq!(evaluate(&t, K, 0.0, 50.0).direction, Direction::Down);
        assert_eq!(evaluate(&t, K, -50.0, 0.0).direction, Direction::Left);
        assert_eq!(evaluate(&t, K, 50.0, 0.0).direction, Direction::Right);
        // Ties go to the vertical axis
        assert_eq!(evaluate(&t, K, 50.0, 50.0).direction, Direction::Down);
    }

    #[test]
    fn test_oversized_dead_zone_degrades_gracefully() {
        let mut t = tuning();
        t.dead_zone = 1e9;
        let out = evaluate(&t, K, 300.0, 400.0);
        assert_eq!(out.scroll, None);
        assert_eq!(out.direction, Direction::Neutral);
    }

    proptest! {
        #[test]
        fn prop_magnitude_monotonic_in_distance(
            d1 in 21.0f64..500.0,
            d2 in 21.0f64..500.0,
            angle in 0.0f64..std::f64::consts::TAU,
        ) {
            let t = tuning();
            let (lo, hi) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
            prop_assume!(hi - lo > 1e-6);

            let mag = |d: f64| {
                let out = evaluate(&t, K, d * angle.cos(), d * angle.sin());
                let (sx, sy) = out.scroll.unwrap();
                sx.hypot(sy)
            };
            prop_assert!(mag(lo) < mag(hi));
        }

        #[test]
        fn prop_direction_scale_invariant(
            dx in -200.0f64..200.0,
            dy in -200.0f64..200.0,
            scale in 1.0f64..50.0,
        ) {
            let t = tuning();
            // Keep both points outside the dead zone so the comparison is
            // about axis dominance, not the neutral cutoff, and away from
            // exact axis ties where rounding could flip the bucket.
            prop_assume!(dx.hypot(dy) > t.dead_zone);
            prop_assume!((dx.abs() - dy.abs()).abs() > 1e-9);
            let base = evaluate(&t, K, dx, dy).direction;
            let scaled = evaluate(&t, K, dx * scale, dy * scale).direction;
            prop_assert_eq!(base, scaled);
        }

        #[test]
        fn prop_dead_zone_is_exactly_silent(
            radius in 0.0f64..=20.0,
            angle in 0.0f64..std::f64::consts::TAU,
        ) {
            // Sample the disk directly so every case lands inside the
            // dead zone, modulo hypot rounding at the rim.
            let t = tuning();
            let (dx, dy) = (radius * angle.cos(), radius * angle.sin());
            prop_assume!(dx.hypot(dy) <= t.dead_zone);
            let out = evaluate(&t, K, dx, dy);
            prop_assert_eq!(out.scroll, None);
            prop_assert_eq!(out.direction, Direction::Neutral);
        }
    }
}
