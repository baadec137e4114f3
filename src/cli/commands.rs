//! CLI command implementations
//!
//! - init: create the data directory
//! - serve: boot from snapshot, process stdin, persist at EOF
//! - inspect: summarize the persisted snapshot

use std::fs;
use std::io::{self, BufRead, Write};

use serde_json::json;
use tracing::{info, warn};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::host::Host;
use super::io::{ok_response, write_line};
use crate::observability::{init_logging, Event};
use crate::snapshot::{load_registry, read_snapshot, write_snapshot};

/// Parse arguments, load config, start logging, dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load(cli.command.config_path())?;
    init_logging(&config.log_config())?;
    info!(
        event = Event::ConfigLoaded.as_str(),
        data_dir = %config.data_dir
    );
    run_command(cli.command, &config)
}

pub fn run_command(command: Command, config: &Config) -> CliResult<()> {
    match command {
        Command::Init { .. } => init(config),
        Command::Serve { .. } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            serve(config, stdin.lock(), stdout.lock())
        }
        Command::Inspect { .. } => inspect(config, io::stdout().lock()),
    }
}

/// Create the data directory. Refuses to run over an existing snapshot.
pub fn init(config: &Config) -> CliResult<()> {
    if config.snapshot_path().exists() {
        return Err(CliError::already_initialized());
    }
    fs::create_dir_all(config.data_path())
        .map_err(|e| CliError::io_error(format!("Failed to create data_dir: {}", e)))?;
    Ok(())
}

/// Boot from the snapshot, answer each request line, persist at EOF.
///
/// The snapshot is written whenever the loop ends, so a broken input or
/// output stream never discards requests that were already applied.
pub fn serve<R: BufRead, W: Write>(config: &Config, reader: R, mut writer: W) -> CliResult<()> {
    info!(event = Event::BootStart.as_str());

    if !config.data_path().is_dir() {
        return Err(CliError::not_initialized());
    }

    let snapshot_path = config.snapshot_path();
    let (registry, persisted_height) = load_registry(&snapshot_path)?;
    let mut host = Host::new(registry, persisted_height.unwrap_or(config.genesis_height));

    info!(event = Event::BootComplete.as_str(), height = host.height());

    let outcome = answer_requests(&mut host, reader, &mut writer);
    if let Err(e) = &outcome {
        warn!(height = host.height(), "Request loop stopped: {}", e);
    }

    write_snapshot(&snapshot_path, host.registry(), host.height())?;
    info!(event = Event::ShutdownComplete.as_str(), height = host.height());
    outcome
}

fn answer_requests<R: BufRead, W: Write>(
    host: &mut Host,
    reader: R,
    writer: &mut W,
) -> CliResult<()> {
    for raw in reader.split(b'\n') {
        let raw = raw?;
        let response = match std::str::from_utf8(&raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => host.handle_line(line),
            Err(e) => host.reject_line(&CliError::bad_request(format!(
                "Request is not valid UTF-8: {}",
                e
            ))),
        };
        write_line(writer, &response)?;
    }
    Ok(())
}

/// Print counts from the persisted snapshot.
pub fn inspect<W: Write>(config: &Config, mut writer: W) -> CliResult<()> {
    let path = config.snapshot_path();
    if !path.exists() {
        return Err(CliError::not_initialized());
    }

    let file = read_snapshot(&path)?;
    let summary = json!({
        "created_at": file.manifest.created_at.to_rfc3339(),
        "checksum": file.manifest.checksum,
        "height": file.manifest.height,
        "last_issued": file.image.sequence,
        "records": file.image.records.len(),
        "grants": file.image.grants.len(),
    });
    write_line(&mut writer, &ok_response(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp: &TempDir) -> Config {
        Config::from_json(
            &json!({ "data_dir": temp.path().join("data").to_string_lossy() }).to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_init_creates_dir_once() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        init(&config).unwrap();
        assert!(config.data_path().is_dir());

        serve(&config, io::empty(), Vec::new()).unwrap();
        let err = init(&config).unwrap_err();
        assert_eq!(err.code_str(), "AERO_REG_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_serve_requires_init() {
        let temp = TempDir::new().unwrap();
        let err = serve(&test_config(&temp), io::empty(), Vec::new()).unwrap_err();
        assert_eq!(err.code_str(), "AERO_REG_NOT_INITIALIZED");
    }

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_output_still_persists() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        init(&config).unwrap();

        let input = concat!(
            r#"{"op":"register","principal":"p1","display_name":"a","byte_size":1,"description":"d","classification_labels":["x"]}"#,
            "\n"
        );
        let err = serve(&config, input.as_bytes(), ClosedOutput).unwrap_err();
        assert_eq!(err.code_str(), "AERO_REG_IO_ERROR");

        let (registry, height) = load_registry(&config.snapshot_path()).unwrap();
        assert_eq!(registry.record_count().unwrap(), 1);
        assert_eq!(height, Some(1));
    }

    #[test]
    fn test_inspect_reports_counts() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        init(&config).unwrap();

        let input = concat!(
            r#"{"op":"register","principal":"p1","display_name":"a","byte_size":1,"description":"d","classification_labels":["x"]}"#,
            "\n",
            r#"{"op":"delete","principal":"p1","id":1}"#,
            "\n"
        );
        serve(&config, input.as_bytes(), Vec::new()).unwrap();

        let mut out = Vec::new();
        inspect(&config, &mut out).unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(summary["data"]["last_issued"], 1);
        assert_eq!(summary["data"]["records"], 0);
        assert_eq!(summary["data"]["grants"], 1);
        assert_eq!(summary["data"]["height"], 2);
    }
}
