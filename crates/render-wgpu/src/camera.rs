use glam::{Mat4, Vec3, Vec4};

/// Degrees of rotation per unit of pointer movement.
const ORBIT_DEGREES_PER_UNIT: f32 = 0.1;
/// Fraction of the pivot distance moved per unit of pointer movement.
const PAN_SCALE: f32 = 0.001;
const DOLLY_IN: f32 = 0.9;
const DOLLY_OUT: f32 = 1.1;

/// Orbit/pan/dolly camera around a pivot point.
///
/// The transform's columns are right, up, forward and position. The basis
/// is rebuilt from cross products after every rotation, so it stays
/// orthonormal no matter how many edits accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    transform: Mat4,
    pivot: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(5.0, 5.0, -5.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Camera at `position` looking at `target`, which becomes the pivot.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).try_normalize().unwrap_or(Vec3::Z);
        let mut camera = Self {
            transform: Mat4::from_cols(
                Vec4::ZERO,
                Vec3::Y.extend(0.0),
                forward.extend(0.0),
                position.extend(1.0),
            ),
            pivot: target,
        };
        camera.orthonormalize();
        camera
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn right(&self) -> Vec3 {
        self.transform.x_axis.truncate()
    }

    pub fn up(&self) -> Vec3 {
        self.transform.y_axis.truncate()
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.z_axis.truncate()
    }

    pub fn distance_to_pivot(&self) -> f32 {
        self.position().distance(self.pivot)
    }

    /// Tumble around the pivot: yaw about world up, then pitch about the
    /// yawed right axis.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let yaw = Mat4::from_rotation_y((-dx * ORBIT_DEGREES_PER_UNIT).to_radians());
        let right = yaw.transform_vector3(self.right()).normalize();
        let pitch = Mat4::from_axis_angle(right, (dy * ORBIT_DEGREES_PER_UNIT).to_radians());

        let about_pivot =
            Mat4::from_translation(self.pivot) * pitch * yaw * Mat4::from_translation(-self.pivot);
        self.transform = about_pivot * self.transform;
        self.orthonormalize();
    }

    /// Slide camera and pivot together along the camera's right/up axes.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.distance_to_pivot() * PAN_SCALE;
        let offset = self.right() * (dx * scale) + self.up() * (dy * scale);
        self.transform = Mat4::from_translation(offset) * self.transform;
        self.pivot += offset;
    }

    /// Move 10% towards the pivot for positive `delta`, 10% away for
    /// negative. Orientation is untouched.
    pub fn dolly(&mut self, delta: f32) {
        let factor = if delta > 0.0 {
            DOLLY_IN
        } else if delta < 0.0 {
            DOLLY_OUT
        } else {
            return;
        };
        let position = self.pivot + (self.position() - self.pivot) * factor;
        self.transform.w_axis = position.extend(1.0);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let position = self.position();
        Mat4::look_at_rh(position, position + self.forward(), self.up())
    }

    fn orthonormalize(&mut self) {
        let forward = self.forward().normalize();
        let right = self.up().cross(forward).try_normalize().unwrap_or(Vec3::X);
        let up = forward.cross(right);
        self.transform.x_axis = right.extend(0.0);
        self.transform.y_axis = up.extend(0.0);
        self.transform.z_axis = forward.extend(0.0);
    }
}

/// Perspective projection with reversed depth (near maps to 1, far to 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        let reverse_depth = Mat4::from_cols(
            Vec4::X,
            Vec4::Y,
            Vec4::new(0.0, 0.0, -1.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
        );
        reverse_depth * Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_orthonormal(camera: &OrbitCamera) {
        let (x, y, z) = (camera.right(), camera.up(), camera.forward());
        for axis in [x, y, z] {
            assert!((axis.length() - 1.0).abs() < EPS, "axis {axis} not unit");
        }
        assert!(x.dot(y).abs() < EPS);
        assert!(y.dot(z).abs() < EPS);
        assert!(z.dot(x).abs() < EPS);
    }

    #[test]
    fn new_camera_faces_target() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.position(), Vec3::new(5.0, 5.0, -5.0));
        assert_eq!(camera.pivot(), Vec3::ZERO);
        let expected = (Vec3::ZERO - camera.position()).normalize();
        assert!(camera.forward().abs_diff_eq(expected, EPS));
        assert!(camera.up().y > 0.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn orbit_preserves_pivot_distance() {
        let mut camera = OrbitCamera::default();
        let distance = camera.distance_to_pivot();
        for (dx, dy) in [(10.0, 0.0), (0.0, -25.0), (123.0, 45.0), (-300.0, 80.0)] {
            camera.orbit(dx, dy);
            assert!((camera.distance_to_pivot() - distance).abs() < EPS);
        }
        assert_orthonormal(&camera);
    }

    #[test]
    fn orbit_around_moved_pivot() {
        let mut camera = OrbitCamera::default();
        camera.pan(400.0, -250.0);
        assert_ne!(camera.pivot(), Vec3::ZERO);
        let distance = camera.distance_to_pivot();

        camera.orbit(200.0, 60.0);

        assert!((camera.distance_to_pivot() - distance).abs() < EPS);
        let to_pivot = (camera.pivot() - camera.position()).normalize();
        assert!(camera.forward().abs_diff_eq(to_pivot, EPS));
    }

    #[test]
    fn yaw_only_orbit_keeps_height() {
        let mut camera = OrbitCamera::default();
        camera.orbit(900.0, 0.0);
        assert!((camera.position().y - 5.0).abs() < EPS);
        // -90 degrees about +Y takes (5, 5, -5) to (5, 5, 5).
        assert!(camera.position().abs_diff_eq(Vec3::new(5.0, 5.0, 5.0), EPS));
    }

    #[test]
    fn basis_stays_orthonormal_under_many_edits() {
        let mut camera = OrbitCamera::default();
        for i in 0..1000 {
            let f = i as f32;
            camera.orbit((f * 0.37).sin() * 20.0, (f * 0.11).cos() * 20.0);
            if i % 10 == 0 {
                camera.pan(3.0, -2.0);
                camera.dolly(if i % 20 == 0 { 1.0 } else { -1.0 });
            }
        }
        assert_orthonormal(&camera);
    }

    #[test]
    fn pan_moves_camera_and_pivot_together() {
        let mut camera = OrbitCamera::default();
        let distance = camera.distance_to_pivot();
        let right = camera.right();
        let before = camera.position();

        camera.pan(100.0, 0.0);

        let moved = camera.position() - before;
        assert!(moved.abs_diff_eq(right * (100.0 * distance * 0.001), EPS));
        assert!(camera.pivot().abs_diff_eq(moved, EPS));
        assert!((camera.distance_to_pivot() - distance).abs() < EPS);
    }

    #[test]
    fn dolly_scales_pivot_distance() {
        let mut camera = OrbitCamera::default();
        let distance = camera.distance_to_pivot();
        let forward = camera.forward();

        camera.dolly(120.0);
        assert!((camera.distance_to_pivot() - distance * 0.9).abs() < EPS);
        assert_eq!(camera.forward(), forward);

        let distance = camera.distance_to_pivot();
        camera.dolly(-3.0);
        assert!((camera.distance_to_pivot() - distance * 1.1).abs() < EPS);

        let before = camera;
        camera.dolly(0.0);
        assert_eq!(camera, before);
    }

    #[test]
    fn view_matrix_tracks_transform() {
        let mut camera = OrbitCamera::default();
        camera.orbit(50.0, 20.0);
        camera.pan(10.0, 10.0);
        let view = camera.view_matrix();

        assert!(view.transform_point3(camera.position()).abs_diff_eq(Vec3::ZERO, EPS));
        // The pivot sits straight ahead, down -Z in view space.
        let pivot = view.transform_point3(camera.pivot());
        assert!(pivot.truncate().abs_diff_eq(glam::Vec2::ZERO, EPS));
        assert!(pivot.z < 0.0);
    }

    #[test]
    fn projection_reverses_depth() {
        let projection = Projection {
            aspect: 1.0,
            ..Projection::default()
        };
        let m = projection.matrix();
        let near = m.project_point3(Vec3::new(0.0, 0.0, -projection.near));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -projection.far));
        assert!((near.z - 1.0).abs() < EPS);
        assert!(far.z.abs() < EPS);
    }

    #[test]
    fn projection_resize_sets_aspect() {
        let mut projection = Projection::default();
        projection.resize(800, 400);
        assert_eq!(projection.aspect, 2.0);
        projection.resize(800, 0);
        assert_eq!(projection.aspect, 800.0);
    }
}
