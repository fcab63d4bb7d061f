pub mod enrollment_record;
pub mod face_submitter;
pub mod frame_encoder;
pub mod save_face;
