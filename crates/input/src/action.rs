/// A high-level viewer action produced from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Tumble the camera around its pivot by pointer deltas.
    Orbit { dx: f32, dy: f32 },
    /// Slide the camera and pivot along the view plane.
    Pan { dx: f32, dy: f32 },
    /// Move towards (positive) or away from (negative) the pivot.
    Dolly(f32),
    /// Yaw the light about the world origin by a horizontal delta.
    OrbitLight(f32),
    /// Input that maps to nothing.
    Noop,
}

impl Action {
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_detection() {
        assert!(Action::Noop.is_noop());
        assert!(!Action::Dolly(1.0).is_noop());
        assert!(!Action::Orbit { dx: 0.0, dy: 0.0 }.is_noop());
    }
}
