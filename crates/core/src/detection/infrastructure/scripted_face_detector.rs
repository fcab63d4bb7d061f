use std::path::Path;

use serde::Deserialize;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// One run of identical frames in a detection script.
///
/// `detection: null` stands for frames where no face is visible.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptSegment {
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    pub detection: Option<Detection>,
}

fn default_repeat() -> usize {
    1
}

/// Replays pre-recorded detections by frame index.
///
/// Stands in for the model when driving a session from a recorded or
/// hand-written timeline. Frames past the end of the script report no face.
pub struct ScriptedFaceDetector {
    /// Exclusive end frame of each segment, ascending.
    ends: Vec<usize>,
    detections: Vec<Option<Detection>>,
}

impl ScriptedFaceDetector {
    pub fn new(segments: Vec<ScriptSegment>) -> Self {
        let mut ends = Vec::with_capacity(segments.len());
        let mut detections = Vec::with_capacity(segments.len());
        let mut end = 0usize;
        for segment in segments.into_iter().filter(|s| s.repeat > 0) {
            end = end.saturating_add(segment.repeat);
            ends.push(end);
            detections.push(segment.detection);
        }
        Self { ends, detections }
    }

    /// Loads a JSON array of [`ScriptSegment`]s.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read script {}: {e}", path.display()))?;
        let segments: Vec<ScriptSegment> = serde_json::from_str(&json)?;
        Ok(Self::new(segments))
    }

    /// Total number of scripted frames.
    pub fn len(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn detection_at(&self, index: usize) -> Option<&Detection> {
        let segment = self.ends.partition_point(|&end| end <= index);
        self.detections.get(segment)?.as_ref()
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        Ok(self.detection_at(frame.index()).cloned().into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn frame(index: usize) -> Frame {
        Frame::blank(4, 4, index)
    }

    fn detection(x: f64) -> Detection {
        Detection::new(
            (x, 20.0),
            (x + 100.0, 140.0),
            vec![(x + 30.0, 60.0), (x + 70.0, 60.0), (x + 50.0, 90.0)],
        )
    }

    #[test]
    fn test_expands_repeats() {
        let mut detector = ScriptedFaceDetector::new(vec![
            ScriptSegment {
                repeat: 2,
                detection: Some(detection(10.0)),
            },
            ScriptSegment {
                repeat: 1,
                detection: None,
            },
            ScriptSegment {
                repeat: 1,
                detection: Some(detection(50.0)),
            },
        ]);

        assert_eq!(detector.len(), 4);
        assert_eq!(detector.detect(&frame(0)).unwrap(), vec![detection(10.0)]);
        assert_eq!(detector.detect(&frame(1)).unwrap(), vec![detection(10.0)]);
        assert!(detector.detect(&frame(2)).unwrap().is_empty());
        assert_eq!(detector.detect(&frame(3)).unwrap(), vec![detection(50.0)]);
    }

    #[test]
    fn test_past_end_reports_no_face() {
        let mut detector = ScriptedFaceDetector::new(vec![ScriptSegment {
            repeat: 1,
            detection: Some(detection(10.0)),
        }]);
        assert!(detector.detect(&frame(99)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_script() {
        let mut detector = ScriptedFaceDetector::new(vec![]);
        assert!(detector.is_empty());
        assert!(detector.detect(&frame(0)).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_file_defaults_repeat_to_one() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"repeat": 3, "detection": {{"top_left": [0, 0], "bottom_right": [100, 120],
                   "landmarks": [[30, 40], [70, 40], [50, 70]]}}}},
                {{"detection": null}}
            ]"#
        )
        .unwrap();

        let detector = ScriptedFaceDetector::from_json_file(file.path()).unwrap();
        assert_eq!(detector.len(), 4);
    }

    #[test]
    fn test_huge_repeat_is_not_expanded() {
        let mut detector = ScriptedFaceDetector::new(vec![
            ScriptSegment {
                repeat: 100_000_000,
                detection: Some(detection(10.0)),
            },
            ScriptSegment {
                repeat: 0,
                detection: Some(detection(90.0)),
            },
            ScriptSegment {
                repeat: 5,
                detection: None,
            },
        ]);

        assert_eq!(detector.len(), 100_000_005);
        assert_eq!(detector.detect(&frame(99_999_999)).unwrap(), vec![detection(10.0)]);
        assert!(detector.detect(&frame(100_000_000)).unwrap().is_empty());
        assert!(detector.detect(&frame(100_000_005)).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_file_missing_path_errors() {
        assert!(ScriptedFaceDetector::from_json_file(Path::new("/nonexistent/script.json")).is_err());
    }
}
