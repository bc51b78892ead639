use glam::{Mat4, Vec3};

/// Light positioned in world space, shining towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-1.0, 1.0, 1.0),
        }
    }
}

impl DirectionalLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Yaw the light about the world origin by `-dx * 0.1` degrees.
    pub fn orbit(&mut self, dx: f32) {
        let yaw = Mat4::from_rotation_y((-dx * 0.1).to_radians());
        self.position = yaw.transform_point3(self.position);
    }

    /// Direction the light travels, as fed to the shader.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_at_origin() {
        let light = DirectionalLight::new(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(light.direction(), Vec3::NEG_Y);
    }

    #[test]
    fn orbit_keeps_height_and_radius() {
        let mut light = DirectionalLight::default();
        let before = light.position;
        light.orbit(900.0);
        assert!((light.position.length() - before.length()).abs() < 1e-5);
        assert!((light.position.y - before.y).abs() < 1e-6);
        // 90 degrees of yaw.
        assert!(light.position.dot(before.with_y(0.0)).abs() < 1e-5);
    }
}
