#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Flags are matched by hand. Each flag also has a `SPARKSTACK_DEMO_*`
//! variable that sets its value when the flag is absent.

use std::env;
use std::path::PathBuf;
use std::process;

use sparkstack_style::Color;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
sparkstack demo: live sparkline groups in the terminal

USAGE:
    sparkstack-demo [OPTIONS]

OPTIONS:
    --lines=N            Number of sparklines in the group, 1-8 (default: 3)
    --tick-ms=N          Milliseconds between data points (default: 200)
    --exit-after-ms=N    Quit automatically after N milliseconds (default: off)
    --ascii              Draw with ASCII bars and borders
    --line-color=COLOR   Bar color for every line: a name or #rrggbb
    --log-file=PATH      Write tracing output to PATH
    -h, --help           Print this text and exit
    -V, --version        Print the version and exit

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    SPARKSTACK_DEMO_LINES           Override --lines
    SPARKSTACK_DEMO_TICK_MS         Override --tick-ms
    SPARKSTACK_DEMO_EXIT_AFTER_MS   Override --exit-after-ms
    SPARKSTACK_DEMO_ASCII           Set to 1 for --ascii
    SPARKSTACK_DEMO_COLOR           Override --line-color
    SPARKSTACK_LOG_FILE             Override --log-file
    RUST_LOG                        Log filter (default: info)";

/// Most lines the demo will stack.
pub const MAX_LINES: usize = 8;

/// Demo settings after env and flags are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Number of sparklines.
    pub lines: usize,
    /// Milliseconds between samples.
    pub tick_ms: u64,
    /// Quit on our own after this long; 0 runs until a quit key.
    pub exit_after_ms: u64,
    /// ASCII ramp and borders.
    pub ascii: bool,
    /// Replaces each series' own bar color.
    pub line_color: Option<Color>,
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            lines: 3,
            tick_ms: 200,
            exit_after_ms: 0,
            ascii: false,
            line_color: None,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Settings for this process.
    ///
    /// Flags beat `SPARKSTACK_DEMO_*` variables, which beat the defaults.
    /// `--help` and `--version` print and exit 0; a bad flag exits 1.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(|key| env::var(key).ok(), args) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("sparkstack-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("try `sparkstack-demo --help`");
                process::exit(1);
            }
        }
    }

    /// Parse from an explicit environment lookup and argument list.
    ///
    /// Malformed environment values are ignored; malformed flags are errors.
    pub fn parse_from<E, I>(env_var: E, args: I) -> Result<Command, String>
    where
        E: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        // Environment first so flags can override it.
        if let Some(val) = env_var("SPARKSTACK_DEMO_LINES")
            && let Ok(n) = val.parse()
        {
            opts.lines = n;
        }
        if let Some(val) = env_var("SPARKSTACK_DEMO_TICK_MS")
            && let Ok(n) = val.parse()
        {
            opts.tick_ms = n;
        }
        if let Some(val) = env_var("SPARKSTACK_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env_var("SPARKSTACK_DEMO_ASCII") {
            opts.ascii = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Some(val) = env_var("SPARKSTACK_DEMO_COLOR")
            && let Ok(color) = val.parse()
        {
            opts.line_color = Some(color);
        }
        if let Some(val) = env_var("SPARKSTACK_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--ascii" => opts.ascii = true,
                other => {
                    if let Some(val) = other.strip_prefix("--lines=") {
                        opts.lines = parse_number("--lines", val)?;
                    } else if let Some(val) = other.strip_prefix("--tick-ms=") {
                        opts.tick_ms = parse_number("--tick-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_number("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--line-color=") {
                        let color = val
                            .parse::<Color>()
                            .map_err(|e| format!("Invalid --line-color value: {e}"))?;
                        opts.line_color = Some(color);
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        opts.lines = opts.lines.clamp(1, MAX_LINES);
        opts.tick_ms = opts.tick_ms.max(10);
        Ok(Command::Run(opts))
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}
