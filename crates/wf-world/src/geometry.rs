//! Positions and the scaling from world-space distance to travel time and
//! cost.

use serde::{Deserialize, Serialize};

use crate::danger::DangerTier;

/// Shortest possible travel duration, in days.
pub const MIN_TRAVEL_DAYS: u32 = 1;
/// Longest possible travel duration, in days.
pub const MAX_TRAVEL_DAYS: u32 = 5;

/// Base travel cost per day before the danger multiplier.
const COST_PER_DAY: f64 = 10.0;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Convert a world-space distance into a travel duration in days.
///
/// The distance is normalized against the map diagonal
/// (`sqrt(2) * world_width`), scaled to a 0–5 range, rounded, and clamped to
/// `[MIN_TRAVEL_DAYS, MAX_TRAVEL_DAYS]`. Negative or non-finite distances
/// clamp to the minimum; a non-positive width falls back to a unit diagonal,
/// so any real distance maxes the duration out.
pub fn days_for_distance(distance: f64, world_width: f64) -> u32 {
    let diagonal = world_width.max(1.0) * std::f64::consts::SQRT_2;
    let normalized = (distance / diagonal).clamp(0.0, 1.0);
    let days = (normalized * f64::from(MAX_TRAVEL_DAYS)).round() as u32;
    days.clamp(MIN_TRAVEL_DAYS, MAX_TRAVEL_DAYS)
}

/// Monetary cost of a journey: `round(days * 10 * danger multiplier)`.
pub fn cost_for_travel(days: u32, danger: DangerTier) -> u32 {
    (f64::from(days) * COST_PER_DAY * danger.multiplier()).round() as u32
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn distance_to_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_distance_takes_a_day() {
        assert_eq!(days_for_distance(0.0, 1000.0), 1);
    }

    #[test]
    fn full_diagonal_takes_five_days() {
        let width = 1000.0;
        let diagonal = width * std::f64::consts::SQRT_2;
        assert_eq!(days_for_distance(diagonal, width), 5);
    }

    #[test]
    fn degenerate_inputs_clamp_to_minimum() {
        assert_eq!(days_for_distance(-50.0, 1000.0), 1);
        assert_eq!(days_for_distance(f64::NAN, 1000.0), 1);
        assert_eq!(days_for_distance(100.0, 0.0), 5);
    }

    #[test]
    fn cost_applies_danger_multiplier() {
        assert_eq!(cost_for_travel(3, DangerTier::Safe), 30);
        assert_eq!(cost_for_travel(3, DangerTier::Risky), 45);
        assert_eq!(cost_for_travel(3, DangerTier::Dangerous), 60);
    }

    proptest! {
        #[test]
        fn days_always_in_range(distance in 0.0f64..1e9, width in 1.0f64..1e6) {
            let days = days_for_distance(distance, width);
            prop_assert!((MIN_TRAVEL_DAYS..=MAX_TRAVEL_DAYS).contains(&days));
        }

        #[test]
        fn days_monotonic_in_distance(
            a in 0.0f64..1e6,
            b in 0.0f64..1e6,
            width in 1.0f64..1e6,
        ) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(days_for_distance(near, width) <= days_for_distance(far, width));
        }

        #[test]
        fn cost_monotonic_in_days(days in 1u32..=5) {
            prop_assert!(
                cost_for_travel(days, DangerTier::Safe)
                    <= cost_for_travel(days + 1, DangerTier::Safe)
            );
            prop_assert!(
                cost_for_travel(days, DangerTier::Safe) < cost_for_travel(days, DangerTier::Risky)
            );
            prop_assert!(
                cost_for_travel(days, DangerTier::Risky)
                    < cost_for_travel(days, DangerTier::Dangerous)
            );
        }
    }
}
