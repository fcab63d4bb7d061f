pub mod clock;
pub mod dwell_timer;
pub mod enrollment_config;
pub mod enrollment_session;
pub mod enrollment_step;
pub mod status_message;
