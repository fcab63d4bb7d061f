use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DWELL_MS, JPEG_QUALITY, ORIENTATION_THRESHOLD, STABILITY_TOLERANCE, STABILITY_WINDOW,
};

/// Tunable thresholds for an enrollment session.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentConfig {
    pub dwell_ms: u64,
    pub stability_window: usize,
    pub stability_tolerance: f64,
    pub orientation_threshold: f64,
    pub jpeg_quality: u8,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            dwell_ms: DWELL_MS,
            stability_window: STABILITY_WINDOW,
            stability_tolerance: STABILITY_TOLERANCE,
            orientation_threshold: ORIENTATION_THRESHOLD,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl EnrollmentConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.stability_window == 0 {
            return Err("stability_window must be at least 1".into());
        }
        if !(self.stability_tolerance > 0.0) {
            return Err(format!(
                "stability_tolerance must be positive, got {}",
                self.stability_tolerance
            ));
        }
        if !(self.orientation_threshold >= 0.0) {
            return Err(format!(
                "orientation_threshold must be non-negative, got {}",
                self.orientation_threshold
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EnrollmentConfig::default();
        assert_eq!(config.dwell(), Duration::from_millis(3000));
        assert_eq!(config.stability_window, 10);
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EnrollmentConfig = serde_json::from_str(r#"{"dwell_ms": 1500}"#).unwrap();
        assert_eq!(config.dwell_ms, 1500);
        assert_eq!(config.stability_window, STABILITY_WINDOW);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jpeg_quality": 0}}"#).unwrap();
        assert!(EnrollmentConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"stability_window": 5, "orientation_threshold": 0.2}}"#).unwrap();
        let config = EnrollmentConfig::load(file.path()).unwrap();
        assert_eq!(config.stability_window, 5);
        assert_eq!(config.orientation_threshold, 0.2);
    }

    #[test]
    fn test_zero_window_invalid() {
        let config = EnrollmentConfig {
            stability_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
