use anyhow::Result;
use camera_probe::{report, CameraKind, Detector};
use clap::{Parser, ValueEnum};
use std::io::Write;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "detect", version, about = "Detect camera devices")]
struct Cli {
    /// Type of camera to detect
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
    let kind = CameraKind::from(cli.kind);

    let line = match Detector::host().detect(kind) {
        Ok(result) => {
            debug!(found = result.is_found(), ?result, "probe finished");
            report::probe_line(kind, &result)
        }
        Err(e) => {
            warn!(error = %e, "probe failed; treating as not found");
            report::probe_error_line(kind, &e)
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

fn setup_tracing() {
    // Best-effort; stdout carries the result line, so diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn type_flag_is_required_and_restricted() {
        assert!(Cli::try_parse_from(["detect"]).is_err());
        assert!(Cli::try_parse_from(["detect", "--type", "usb"]).is_err());
        let cli = Cli::try_parse_from(["detect", "--type", "raspberry"]);
        assert!(matches!(cli, Ok(Cli { kind: CameraType::Raspberry })));
        let cli = Cli::try_parse_from(["detect", "--type", "webcam"]);
        assert!(matches!(cli, Ok(Cli { kind: CameraType::Webcam })));
    }
}
