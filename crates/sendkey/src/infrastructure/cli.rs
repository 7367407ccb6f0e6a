//! Command-line parsing.
//!
//! ```text
//! sendkey [OPTIONS]
//!
//! Options:
//!   -d, --dry-run   Do not inject events             [env: SENDKEY_DRY_RUN]
//!   -o, --echo      Also print events on stdout      [env: SENDKEY_ECHO]
//!   -p, --pretty    Pretty-print on stdout (implies -o) [env: SENDKEY_PRETTY]
//!   -s, --silent    Print no log or error messages   (not implemented)
//!   -v, --verbose   Increase verbosity               (not implemented)
//!   -h, --help      Print help
//!   -V, --version   Print version
//! ```
//!
//! The environment variables accept the usual boolean spellings (`1`/`0`,
//! `yes`/`no`, `on`/`off`, `true`/`false`).
//!
//! Parsing happens before any input is read.  Every failure is a
//! [`ConfigError`], which the binary reports as a critical diagnostic.

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

use crate::domain::{AgentConfig, ConfigError};

/// Inject keyboard events read from stdin.
///
/// Each input record is a JSON object such as
/// `{"type":"keydown","win_scancode":30}`.  Malformed or incomplete records
/// are reported on stderr and skipped.
#[derive(Debug, Parser)]
#[command(name = "sendkey", version)]
pub struct Cli {
    /// Dry run: do not inject events.
    #[arg(
        short = 'd',
        long,
        env = "SENDKEY_DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Also print events on stdout.
    #[arg(
        short = 'o',
        long,
        env = "SENDKEY_ECHO",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub echo: bool,

    /// Pretty-print events on stdout (implies --echo).
    #[arg(
        short = 'p',
        long,
        env = "SENDKEY_PRETTY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub pretty: bool,

    /// Silent: print no log or error messages.
    #[arg(short = 's', long)]
    pub silent: bool,

    /// Increase verbosity.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Converts the parsed flags into an [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotImplemented`] for `--silent` or `--verbose`.
    pub fn into_agent_config(self) -> Result<AgentConfig, ConfigError> {
        if self.silent {
            return Err(ConfigError::NotImplemented {
                option: "Silent option",
            });
        }
        if self.verbose {
            return Err(ConfigError::NotImplemented {
                option: "Verbose option",
            });
        }
        Ok(AgentConfig::from_flags(self.dry_run, self.echo, self.pretty))
    }
}

/// What the process should do after parsing its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Process stdin with this configuration.
    Run(AgentConfig),
    /// Print this text (help or version) to stdout and exit successfully.
    ShowInfo(String),
}

/// Parses process arguments (including `argv[0]`).
///
/// # Errors
///
/// Returns [`ConfigError`] for unknown flags, stray arguments, malformed
/// environment values, and recognised-but-unimplemented options.
pub fn parse_args<I, T>(args: I) -> Result<Startup, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.into_agent_config().map(Startup::Run),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(Startup::ShowInfo(e.render().to_string()))
        }
        Err(e) => Err(ConfigError::InvalidOption(first_line(&e.render().to_string()))),
    }
}

/// Reduces clap's multi-line report to its headline, without the `error:` tag.
fn first_line(report: &str) -> String {
    let line = report.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).trim().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sendkey_core::EchoMode;

    fn run_config(args: &[&str]) -> AgentConfig {
        match parse_args(std::iter::once("sendkey").chain(args.iter().copied())) {
            Ok(Startup::Run(cfg)) => cfg,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_no_flags_injects_without_echo() {
        assert_eq!(run_config(&[]), AgentConfig::default());
    }

    #[test]
    fn test_short_flags_combine() {
        let cfg = run_config(&["-do"]);
        assert!(cfg.dry_run);
        assert_eq!(cfg.echo_mode, EchoMode::Compact);
    }

    #[test]
    fn test_long_flags() {
        let cfg = run_config(&["--dry-run", "--pretty"]);
        assert!(cfg.dry_run);
        assert_eq!(cfg.echo_mode, EchoMode::Pretty);
    }

    #[test]
    fn test_pretty_overrides_echo() {
        assert_eq!(run_config(&["-o", "-p"]).echo_mode, EchoMode::Pretty);
    }

    #[test]
    fn test_silent_is_not_implemented() {
        let err = parse_args(["sendkey", "-s"]).unwrap_err();
        assert_eq!(err.classification(), "Silent option");
        assert_eq!(err.to_string(), "Not implemented");
    }

    #[test]
    fn test_verbose_is_not_implemented() {
        let err = parse_args(["sendkey", "--verbose"]).unwrap_err();
        assert_eq!(err.classification(), "Verbose option");
    }

    #[test]
    fn test_unknown_flag_is_invalid_option() {
        let err = parse_args(["sendkey", "-x"]).unwrap_err();
        assert_eq!(err.classification(), "Invalid option");
        assert!(err.to_string().contains("-x"), "{err}");
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_positional_argument_is_invalid_option() {
        let err = parse_args(["sendkey", "input.json"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption(_)));
    }

    #[test]
    fn test_help_is_shown_not_an_error() {
        match parse_args(["sendkey", "-h"]) {
            Ok(Startup::ShowInfo(text)) => {
                assert!(text.contains("--dry-run"));
                assert!(text.contains("--pretty"));
            }
            other => panic!("expected help text, got {other:?}"),
        }
    }

    #[test]
    fn test_version_is_shown() {
        assert!(matches!(
            parse_args(["sendkey", "--version"]),
            Ok(Startup::ShowInfo(_))
        ));
    }

    #[test]
    fn test_first_line_strips_error_prefix() {
        assert_eq!(
            first_line("error: unexpected argument '-x' found\n\nUsage: sendkey"),
            "unexpected argument '-x' found"
        );
    }
}
