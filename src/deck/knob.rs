//! Rotary knob input mapping. The dial sweeps 270 degrees, from -135 at the
//! minimum stop to +135 at the maximum, with 0 pointing straight up.

const SWEEP_DEG: f64 = 270.0;
const MIN_STOP_DEG: f64 = -135.0;
/// Overshoot past either stop, as a fraction of the unit range, that still
/// snaps to the stop instead of falling outside.
const SNAP_OVERSHOOT: f64 = 0.2;

/// Dial angle from 12 o'clock, clockwise positive, for a pointer offset from
/// the knob center. `dx`/`dy` are in screen coordinates (y grows downward).
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    dx.atan2(-dy).to_degrees()
}

/// Maps a pointer offset to the knob value in [0, 1].
pub fn value_from_pointer(dx: f64, dy: f64) -> f64 {
    let angle = pointer_angle(dx, dy);
    let mut raw = (angle - MIN_STOP_DEG) / SWEEP_DEG;

    if raw < 0.0 && raw > -SNAP_OVERSHOOT {
        raw = 0.0;
    }
    if raw > 1.0 && raw < 1.0 + SNAP_OVERSHOOT {
        raw = 1.0;
    }

    raw.clamp(0.0, 1.0)
}

/// Visual rotation of the dial for a given value.
pub fn rotation_for(value: f64) -> f64 {
    MIN_STOP_DEG + value * SWEEP_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer_at(dial_deg: f64) -> (f64, f64) {
        let rad = dial_deg.to_radians();
        // Unit offset at the given dial angle: up is (0, -1) on screen.
        (rad.sin(), -rad.cos())
    }

    #[test]
    fn extremes_map_to_documented_rotations() {
        let (dx, dy) = pointer_at(-135.0);
        assert!(value_from_pointer(dx, dy).abs() < 1e-9);
        let (dx, dy) = pointer_at(135.0);
        assert!((value_from_pointer(dx, dy) - 1.0).abs() < 1e-9);

        assert_eq!(rotation_for(0.0), -135.0);
        assert_eq!(rotation_for(1.0), 135.0);
        assert_eq!(rotation_for(0.5), 0.0);
    }

    #[test]
    fn value_is_monotonic_through_the_sweep() {
        let mut last = -1.0;
        let mut deg = -135.0;
        while deg <= 135.0 {
            let (dx, dy) = pointer_at(deg);
            let v = value_from_pointer(dx, dy);
            assert!(v >= last, "regressed at {deg} deg: {v} < {last}");
            last = v;
            deg += 1.0;
        }
    }

    #[test]
    fn small_overshoot_snaps_to_the_stops() {
        let (dx, dy) = pointer_at(-160.0); // just past the minimum stop
        assert_eq!(value_from_pointer(dx, dy), 0.0);
        let (dx, dy) = pointer_at(160.0); // just past the maximum stop
        assert_eq!(value_from_pointer(dx, dy), 1.0);
    }

    #[test]
    fn dead_zone_is_clamped_to_the_unit_range() {
        // Straight down, the middle of the unreachable arc.
        let v = value_from_pointer(0.0, 1.0);
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn full_circle_never_leaves_the_unit_range() {
        for step in 0..720 {
            let deg = f64::from(step) * 0.5 - 180.0;
            let (dx, dy) = pointer_at(deg);
            let v = value_from_pointer(dx, dy);
            assert!((0.0..=1.0).contains(&v), "out of range at {deg} deg");
        }
    }
}
