pub mod http_face_submitter;
pub mod jpeg_frame_encoder;
pub mod submit_worker;
