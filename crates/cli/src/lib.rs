#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end for the `oc-mirror`
//! daemon. The surface is four positional arguments — source directory,
//! replica directory, synchronization interval in seconds, and the durable
//! log file path — validated before any filesystem work begins, after which
//! the crate wires up the tracing subscriber, the event log, and the
//! shutdown signal channel, and hands control to [`engine::run_forever`].
//!
//! # Design
//!
//! [`run`] is the primary entry point. It accepts an iterator of arguments
//! together with handles for standard output and error, so tests can drive
//! the frontend without spawning a process. A `clap` builder command parses
//! the positionals; everything that can be rejected statically (missing
//! operands, a non-numeric or zero interval) is rejected by the parser, and
//! the remaining checks (source must be an accessible directory, replica
//! must not alias source) run before the first pass.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as a non-zero return value with a
//!   diagnostic on the provided stderr handle.
//! - Invalid configuration is rejected before any synchronization begins;
//!   no filesystem mutation happens on the error paths.
//! - Diagnostic (tracing) output goes to the console only; the durable log
//!   file receives operation events and banner lines exclusively.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["oc-mirror"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 1);
//! assert!(!stderr.is_empty());
//! ```

use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Arg, Command, builder::OsStringValueParser, value_parser};
use logging::EventLog;
use tracing_subscriber::EnvFilter;

mod signal;

/// Invalid command-line configuration, surfaced before the daemon starts.
#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ConfigError {}

/// Validated daemon configuration.
#[derive(Debug)]
struct MirrorConfig {
    source: PathBuf,
    replica: PathBuf,
    interval: Duration,
    log_file: PathBuf,
}

/// Runs the frontend: parse, validate, then mirror until shutdown.
///
/// Returns the process exit code: `0` after a clean shutdown (or for
/// `--help`/`--version`), `1` for configuration errors and startup
/// failures.
#[must_use]
pub fn run<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let config = match parse_and_validate(args) {
        Ok(config) => config,
        Err(Directive::Display(rendered)) => {
            let _ = write!(stdout, "{rendered}");
            return 0;
        }
        Err(Directive::Reject(message)) => {
            let _ = writeln!(stderr, "oc-mirror: {message}");
            return 1;
        }
    };

    init_subscriber();

    let log = match EventLog::open(&config.log_file) {
        Ok(log) => log,
        Err(error) => {
            let _ = writeln!(
                stderr,
                "oc-mirror: cannot open log file '{}': {error}",
                config.log_file.display()
            );
            return 1;
        }
    };

    log.banner(&format!(
        "starting one-way mirror: '{}' -> '{}' every {}s",
        config.source.display(),
        config.replica.display(),
        config.interval.as_secs()
    ));

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
    if let Err(error) = signal::notify_on_shutdown(shutdown_tx) {
        let _ = writeln!(stderr, "oc-mirror: cannot install signal handlers: {error}");
        return 1;
    }

    engine::run_forever(
        &config.source,
        &config.replica,
        config.interval,
        &shutdown_rx,
        &log,
    );

    log.banner("shutting down");
    0
}

/// What the caller should do when `run` cannot proceed to the daemon loop.
#[derive(Debug)]
enum Directive {
    /// Help or version text to print on stdout with a zero exit code.
    Display(String),
    /// Configuration diagnostic to print on stderr with a non-zero exit code.
    Reject(String),
}

impl From<ConfigError> for Directive {
    fn from(error: ConfigError) -> Self {
        Self::Reject(error.to_string())
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("oc-mirror")
        .about("Maintains a one-way mirror of a source directory tree onto a replica tree.")
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .required(true)
                .value_parser(OsStringValueParser::new())
                .help("Directory tree treated as the single source of truth."),
        )
        .arg(
            Arg::new("replica")
                .value_name("REPLICA")
                .required(true)
                .value_parser(OsStringValueParser::new())
                .help("Directory tree kept as an exact mirror of SOURCE."),
        )
        .arg(
            Arg::new("interval")
                .value_name("INTERVAL_SECONDS")
                .required(true)
                .value_parser(value_parser!(u64).range(1..))
                .help("Seconds between synchronization passes (positive integer)."),
        )
        .arg(
            Arg::new("log-file")
                .value_name("LOG_FILE")
                .required(true)
                .value_parser(OsStringValueParser::new())
                .help("Append-only file receiving one line per performed operation."),
        )
}

fn parse_and_validate<I>(args: I) -> Result<MirrorConfig, Directive>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from("oc-mirror"));
    }

    let mut matches = match clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render().to_string();
            return Err(match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Directive::Display(rendered)
                }
                _ => Directive::Reject(rendered),
            });
        }
    };

    let source = PathBuf::from(
        matches
            .remove_one::<OsString>("source")
            .unwrap_or_default(),
    );
    let replica = PathBuf::from(
        matches
            .remove_one::<OsString>("replica")
            .unwrap_or_default(),
    );
    let interval_secs = matches.remove_one::<u64>("interval").unwrap_or(1);
    let log_file = PathBuf::from(
        matches
            .remove_one::<OsString>("log-file")
            .unwrap_or_default(),
    );

    let config = validate(MirrorConfig {
        source,
        replica,
        interval: Duration::from_secs(interval_secs),
        log_file,
    })?;
    Ok(config)
}

/// Rejects configurations the parser cannot: the source must be listable
/// and the replica must not alias it.
fn validate(config: MirrorConfig) -> Result<MirrorConfig, ConfigError> {
    if !config.source.is_dir() {
        return Err(ConfigError(format!(
            "source '{}' is not an accessible directory",
            config.source.display()
        )));
    }

    // The replica usually does not exist yet; only an existing replica can
    // alias the source.
    if config.replica.exists() {
        let source = config.source.canonicalize().map_err(|error| {
            ConfigError(format!(
                "cannot resolve source '{}': {error}",
                config.source.display()
            ))
        })?;
        let replica = config.replica.canonicalize().map_err(|error| {
            ConfigError(format!(
                "cannot resolve replica '{}': {error}",
                config.replica.display()
            ))
        })?;
        if source == replica {
            return Err(ConfigError(
                "replica must not be the same directory as source".to_owned(),
            ));
        }
    }

    Ok(config)
}

/// Installs the console-only diagnostic subscriber.
///
/// `RUST_LOG` selects the filter; the default keeps pass summaries visible
/// and per-level diff listings behind `debug`. Repeated initialisation (as
/// happens across tests) is ignored.
fn init_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<MirrorConfig, Directive> {
        parse_and_validate(args.iter().copied().map(OsString::from))
    }

    #[test]
    fn four_positionals_parse_into_a_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        std::fs::create_dir(&source).expect("create source");

        let config = parse(&[
            "oc-mirror",
            source.to_str().expect("utf-8 path"),
            temp.path().join("replica").to_str().expect("utf-8 path"),
            "30",
            temp.path().join("mirror.log").to_str().expect("utf-8 path"),
        ])
        .unwrap_or_else(|_| panic!("valid arguments must parse"));

        assert_eq!(config.source, source);
        assert_eq!(config.interval, Duration::from_secs(30));
        assert!(config.log_file.ends_with("mirror.log"));
    }

    #[test]
    fn missing_operands_are_rejected() {
        match parse(&["oc-mirror"]) {
            Err(Directive::Reject(message)) => {
                assert!(message.contains("SOURCE"), "diagnostic names the operand");
            }
            other => panic!("missing operands must be rejected: {other:?}"),
        }
    }

    #[test]
    fn zero_interval_is_rejected_by_the_parser() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        std::fs::create_dir(&source).expect("create source");

        let result = parse(&[
            "oc-mirror",
            source.to_str().expect("utf-8 path"),
            "replica",
            "0",
            "mirror.log",
        ]);
        assert!(matches!(result, Err(Directive::Reject(_))));
    }

    #[test]
    fn non_numeric_interval_is_rejected_by_the_parser() {
        let result = parse(&["oc-mirror", "source", "replica", "soon", "mirror.log"]);
        assert!(matches!(result, Err(Directive::Reject(_))));
    }

    #[test]
    fn nonexistent_source_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("missing");

        let result = parse(&[
            "oc-mirror",
            missing.to_str().expect("utf-8 path"),
            temp.path().join("replica").to_str().expect("utf-8 path"),
            "5",
            temp.path().join("mirror.log").to_str().expect("utf-8 path"),
        ]);
        match result {
            Err(Directive::Reject(message)) => {
                assert!(message.contains("not an accessible directory"));
            }
            other => panic!("missing source must be rejected: {other:?}"),
        }
    }

    #[test]
    fn replica_aliasing_source_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("tree");
        std::fs::create_dir(&source).expect("create dir");

        let result = parse(&[
            "oc-mirror",
            source.to_str().expect("utf-8 path"),
            source.to_str().expect("utf-8 path"),
            "5",
            temp.path().join("mirror.log").to_str().expect("utf-8 path"),
        ]);
        match result {
            Err(Directive::Reject(message)) => {
                assert!(message.contains("must not be the same directory"));
            }
            other => panic!("aliasing replica must be rejected: {other:?}"),
        }
    }

    #[test]
    fn help_flag_prints_to_stdout_and_exits_zero() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit_code = run(["oc-mirror", "--help"], &mut stdout, &mut stderr);

        assert_eq!(exit_code, 0);
        assert!(!stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[test]
    fn run_rejects_bad_arguments_without_touching_the_filesystem() {
        let temp = tempfile::tempdir().expect("tempdir");
        let log_file = temp.path().join("never-created.log");

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit_code = run(
            [
                OsString::from("oc-mirror"),
                temp.path().join("missing-source").into_os_string(),
                temp.path().join("replica").into_os_string(),
                OsString::from("5"),
                log_file.clone().into_os_string(),
            ],
            &mut stdout,
            &mut stderr,
        );

        assert_eq!(exit_code, 1);
        assert!(!stderr.is_empty());
        assert!(!log_file.exists(), "rejection must precede any file I/O");
        assert!(!temp.path().join("replica").exists());
    }
}
