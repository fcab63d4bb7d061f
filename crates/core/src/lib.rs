//! Pose-guided face enrollment.
//!
//! A camera feed drives an [`enrollment::domain::enrollment_session::EnrollmentSession`]
//! through left, right and frontal head poses. Once the frontal pose is
//! confirmed, a frame can be captured as JPEG and submitted to the
//! `/save-face` persistence service.

pub mod capture;
pub mod detection;
pub mod enrollment;
pub mod pipeline;
pub mod shared;
