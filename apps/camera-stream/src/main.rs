use anyhow::{Context, Result};
use camera_probe::{
    report, stream, CameraKind, CancellationToken, FrameSource, StreamConfig, StreamError,
    StreamSummary, SyntheticCamera,
};
use clap::{Parser, ValueEnum};
use std::io::Write;
use tracing::{error, info};

mod signals;

#[derive(Parser, Debug)]
#[command(name = "stream", version, about = "Stream from camera")]
struct Cli {
    /// Path to camera device
    #[arg(long = "camera_path")]
    camera_path: String,

    /// Type of camera to use
    #[arg(long = "type", value_enum)]
    kind: CameraType,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CameraType {
    Raspberry,
    Webcam,
}

impl From<CameraType> for CameraKind {
    fn from(t: CameraType) -> Self {
        match t {
            CameraType::Raspberry => CameraKind::RaspberryPi,
            CameraType::Webcam => CameraKind::Webcam,
        }
    }
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let kind = CameraKind::from(cli.kind);
    let cancel = CancellationToken::new();
    signals::cancel_on_signal(cancel.clone()).context("failed to install signal handlers")?;

    let mut stdout = std::io::stdout().lock();
    let outcome = run_stream(&cli.camera_path, kind, &mut stdout, &cancel).await;

    match outcome {
        Ok(summary) => info!(frames = summary.frames, "done"),
        Err(e) => {
            error!(error = %e, "stream aborted");
            // stdout may be the thing that broke; nothing more to do if this fails too
            let _ = writeln!(stdout, "{}", report::stream_error_line(kind, &e));
            let _ = stdout.flush();
        }
    }
    Ok(())
}

async fn run_stream<W: Write>(
    camera_path: &str,
    kind: CameraKind,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<StreamSummary, StreamError> {
    let mut camera = SyntheticCamera::open(camera_path)?;
    stream(
        &mut camera,
        out,
        kind,
        camera_path,
        &StreamConfig::default(),
        cancel,
    )
    .await
}

fn setup_tracing() {
    // Best-effort; stdout carries the frame lines, so diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
