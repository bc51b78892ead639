use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Viewer settings, read from an optional JSON file.
///
/// Every field is optional in the file; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub light_position: Vec3,
    /// Uniform scale of the loaded model.
    pub model_scale: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: [f64; 4],
    pub textures_dir: PathBuf,
    pub fallback_diffuse: String,
    pub fallback_normal: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(5.0, 5.0, -5.0),
            camera_target: Vec3::ZERO,
            light_position: Vec3::new(-1.0, 1.0, 1.0),
            model_scale: 15.0,
            fov_y_degrees: 60.0,
            near: 0.01,
            far: 1000.0,
            clear_color: [0.13, 0.13, 0.13, 1.0],
            textures_dir: PathBuf::from("textures"),
            fallback_diffuse: "fallback_diffuse.png".into(),
            fallback_normal: "fallback_normal.png".into(),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn fallback_diffuse_path(&self) -> PathBuf {
        self.textures_dir.join(&self.fallback_diffuse)
    }

    pub fn fallback_normal_path(&self) -> PathBuf {
        self.textures_dir.join(&self.fallback_normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.model_scale, 15.0);
        assert_eq!(
            config.fallback_normal_path(),
            Path::new("textures").join("fallback_normal.png")
        );
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "camera_position": [0.0, 2.0, 10.0],
            "model_scale": 1.0,
            "textures_dir": "assets"
        }"#;
        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.camera_position, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(config.model_scale, 1.0);
        assert_eq!(config.fallback_diffuse_path(), Path::new("assets/fallback_diffuse.png"));
        assert_eq!(config.far, 1000.0);
    }

    #[test]
    fn load_reports_bad_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ViewerConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("viewer.json"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ViewerConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
