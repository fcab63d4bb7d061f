use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use faceenroll_core::capture::domain::enrollment_record::EnrollmentRecord;
use faceenroll_core::capture::domain::frame_encoder::FrameEncoder;
use faceenroll_core::capture::infrastructure::http_face_submitter::{
    HttpFaceSubmitter, DEFAULT_TIMEOUT,
};
use faceenroll_core::capture::infrastructure::jpeg_frame_encoder::JpegFrameEncoder;
use faceenroll_core::capture::infrastructure::submit_worker::{self, RetryPolicy, SubmitMessage};
use faceenroll_core::detection::infrastructure::scripted_face_detector::ScriptedFaceDetector;
use faceenroll_core::enrollment::domain::clock::ManualClock;
use faceenroll_core::enrollment::domain::enrollment_config::EnrollmentConfig;
use faceenroll_core::enrollment::domain::enrollment_session::{
    EnrollmentEvent, EnrollmentSession, ResetReason,
};
use faceenroll_core::pipeline::enroll_face_use_case::EnrollFaceUseCase;
use faceenroll_core::shared::constants::{DEFAULT_SERVER_URL, IMAGE_EXTENSIONS};
use faceenroll_core::shared::frame::Frame;

/// Guided face enrollment tools.
#[derive(Parser)]
#[command(name = "faceenroll")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a detection timeline through an enrollment session.
    Simulate {
        /// JSON array of {"repeat": n, "detection": {...} | null} segments.
        #[arg(long)]
        script: PathBuf,

        /// Frame rate the timeline was recorded at.
        #[arg(long, default_value = "30")]
        fps: u32,

        /// JSON file overriding enrollment thresholds.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Encode an image as JPEG and post it to a save-face server.
    Submit {
        /// Image file (jpg, jpeg or png).
        #[arg(long)]
        image: PathBuf,

        /// Server root URL.
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Stored name without extension (default: face_<unix millis>).
        #[arg(long)]
        file_name: Option<String>,

        /// JSON file with enrollment settings; its jpeg_quality is used.
        #[arg(long)]
        config: Option<PathBuf>,

        /// JPEG quality (1-100), overriding the config.
        #[arg(long)]
        quality: Option<u8>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli.command)?;

    match cli.command {
        Command::Simulate {
            script,
            fps,
            config,
        } => run_simulate(&script, fps, config.as_deref()),
        Command::Submit {
            image,
            server,
            file_name,
            config,
            quality,
        } => run_submit(&image, &server, file_name, config.as_deref(), quality),
    }
}

fn run_simulate(
    script: &Path,
    fps: u32,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let detector = ScriptedFaceDetector::from_json_file(script)?;
    let total = detector.len();
    log::info!("Replaying {total} frames at {fps} fps");

    let clock = ManualClock::new();
    let mut use_case = EnrollFaceUseCase::new(
        Box::new(detector),
        EnrollmentSession::new(config),
        Box::new(clock.clone()),
    );

    let mut last_status = None;
    for index in 0..total {
        let at = frame_time(index, fps);
        clock.set(at);
        let outcome = use_case.process(&Frame::blank(1, 1, index));

        for event in &outcome.events {
            println!("[{:>6} ms] {}", at.as_millis(), describe(event));
        }
        if last_status != Some(outcome.status) {
            log::debug!("frame {index}: {}", outcome.status);
            last_status = Some(outcome.status);
        }
    }

    let session = use_case.session();
    println!("Final step: {}", session.step());
    println!("Status: {}", session.status());

    if session.step().is_done() && session.capture_enabled() {
        Ok(())
    } else {
        Err(format!("Enrollment did not complete (stopped at {})", session.step()).into())
    }
}

fn run_submit(
    image: &Path,
    server: &str,
    file_name: Option<String>,
    config: Option<&Path>,
    quality: Option<u8>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    if let Some(quality) = quality {
        config.jpeg_quality = quality;
    }
    let encoder = JpegFrameEncoder::from(&config);

    let frame = Frame::from(image::open(image)?.to_rgb8());
    let encoded = encoder.encode(&frame)?;
    log::info!(
        "Encoded {}x{} image to {} bytes at quality {}",
        frame.width(),
        frame.height(),
        encoded.len(),
        encoder.quality()
    );

    let record = match file_name {
        Some(name) => EnrollmentRecord::new(name, encoded),
        None => EnrollmentRecord::timestamped(encoded),
    };
    let submitter = Arc::new(HttpFaceSubmitter::new(server, DEFAULT_TIMEOUT)?);
    println!("Submitting to {}", submitter.endpoint());

    let rx = submit_worker::spawn(submitter, record, RetryPolicy::default());
    for message in rx.iter() {
        match &message {
            SubmitMessage::Started { file_name } => println!("{}: {file_name}", message.status()),
            SubmitMessage::Retrying { attempt, error } => {
                eprintln!("Attempt {attempt} failed ({error}), retrying")
            }
            SubmitMessage::Saved(reply) => println!("{} ({reply})", message.status()),
            SubmitMessage::Failed(e) => {
                return Err(format!("{}: {e}", message.status()).into());
            }
        }
    }
    Ok(())
}

fn validate(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Simulate { script, fps, .. } => {
            if !script.exists() {
                return Err(format!("Script file not found: {}", script.display()).into());
            }
            if *fps == 0 {
                return Err("FPS must be at least 1".into());
            }
        }
        Command::Submit {
            image,
            file_name,
            quality,
            ..
        } => {
            if !image.exists() {
                return Err(format!("Image file not found: {}", image.display()).into());
            }
            if !is_image(image) {
                return Err(format!(
                    "Unsupported image type: {} (expected one of: {})",
                    image.display(),
                    IMAGE_EXTENSIONS.join(", ")
                )
                .into());
            }
            if let Some(q) = quality {
                if !(1..=100).contains(q) {
                    return Err(format!("Quality must be between 1 and 100, got {q}").into());
                }
            }
            if matches!(file_name, Some(name) if name.is_empty()) {
                return Err("File name must not be empty".into());
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EnrollmentConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => EnrollmentConfig::load(path),
        None => Ok(EnrollmentConfig::default()),
    }
}

fn describe(event: &EnrollmentEvent) -> String {
    match event {
        EnrollmentEvent::StepCompleted { from, to } => format!("{from} complete -> {to}"),
        EnrollmentEvent::Reset(ResetReason::NoFace) => "reset: face lost".to_string(),
        EnrollmentEvent::Reset(ResetReason::Unstable) => "reset: face changed".to_string(),
    }
}

fn frame_time(index: usize, fps: u32) -> Duration {
    Duration::from_micros(index as u64 * 1_000_000 / u64::from(fps))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
