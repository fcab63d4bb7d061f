pub mod enroll_face_use_case;
