pub mod face_detector;
pub mod face_features;
pub mod orientation;
pub mod stability_gate;
