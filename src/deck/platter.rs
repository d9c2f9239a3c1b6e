//! Free-spin platter physics: playback-driven base rotation, drag scrubbing
//! with wraparound handling, and geometric inertia decay on release. Pure
//! per-frame stepping so the behavior is testable without a frame clock.

const FRICTION: f64 = 0.985;
const MIN_VELOCITY: f64 = 0.01;
const SEEK_SENSITIVITY: f64 = 0.0012;
const VELOCITY_SAMPLES: usize = 5;

/// Pointer angle around the platter center, in degrees. Matches the range
/// of `atan2` (-180, 180]; screen coordinates, y grows downward.
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

#[derive(Debug, Clone)]
pub struct Platter {
    rotation: f64,
    velocity: f64,
    dragging: bool,
    last_angle: f64,
    samples: Vec<f64>,
}

impl Default for Platter {
    fn default() -> Self {
        Self::new()
    }
}

impl Platter {
    pub fn new() -> Self {
        Self {
            rotation: 0.0,
            velocity: 0.0,
            dragging: false,
            last_angle: 0.0,
            samples: Vec::with_capacity(VELOCITY_SAMPLES),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// One animation frame while not dragging: base speed whenever playback
    /// runs, plus the decaying release velocity.
    pub fn step(&mut self, is_playing: bool, base_speed: f64) {
        if self.dragging {
            return;
        }

        self.velocity *= FRICTION;
        if self.velocity.abs() < MIN_VELOCITY {
            self.velocity = 0.0;
        }

        let base = if is_playing { base_speed } else { 0.0 };
        self.rotation = (self.rotation + base + self.velocity).rem_euclid(360.0);
    }

    pub fn begin_drag(&mut self, angle: f64) {
        self.dragging = true;
        self.last_angle = angle;
        self.velocity = 0.0;
        self.samples.clear();
    }

    /// Tracks a drag sample. The per-sample delta is wrapped into
    /// (-180, 180], so crossing the atan2 seam reads as a small move, and
    /// both the rotation and the scrub follow it. Returns the scrubbed
    /// progress clamped to [0, 1], or `None` when no drag is in flight.
    pub fn drag_to(&mut self, angle: f64, progress: f64) -> Option<f64> {
        if !self.dragging {
            return None;
        }

        let mut delta = angle - self.last_angle;
        if delta > 180.0 {
            delta -= 360.0;
        }
        if delta < -180.0 {
            delta += 360.0;
        }

        self.samples.push(delta);
        if self.samples.len() > VELOCITY_SAMPLES {
            self.samples.remove(0);
        }

        self.last_angle = angle;
        self.rotation += delta;

        Some((progress + delta * SEEK_SENSITIVITY).clamp(0.0, 1.0))
    }

    /// Release: the averaged recent deltas carry on as spin that `step`
    /// decays away.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if !self.samples.is_empty() {
            self.velocity = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        }
        self.rotation = self.rotation.rem_euclid(360.0);
    }
}
