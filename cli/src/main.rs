mod app;
mod commands;
mod config;
mod data;
mod input;
mod logging;
mod scheduler;
mod theme;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use config::{LogLevel, Settings};
use logging::LogMode;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Launch the live dashboard (default)
    #[command(alias = "tui")]
    Ui,

    /// Output snapshots in JSON format (suitable for piping)
    #[command(alias = "raw")]
    Pipe {
        /// Number of samples to output (0 = infinite)
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Sampling interval in milliseconds (defaults to --refresh-ms)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Compact JSON output (one line per sample)
        #[arg(short, long)]
        compact: bool,
    },

    /// Print the detected hardware profile and telemetry sources
    Detect,

    /// Print the effective settings
    Config,
}

#[derive(Debug, Parser)]
#[command(name = "pwrwatch")]
#[command(author, version, about = "Whole-system power draw and energy monitor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Refresh interval in milliseconds (250-10000)
    #[arg(short, long, global = true)]
    refresh_ms: Option<u64>,

    /// Total draw in watts above which an alert is raised
    #[arg(short, long, global = true)]
    alert_watts: Option<f32>,

    /// Disable desktop notifications
    #[arg(long, global = true)]
    no_notify: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_str(s).ok_or_else(|| format!("unknown log level '{}'", s))
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut settings = Settings::default();
    settings.merge_with_args(cli.refresh_ms, cli.alert_watts, cli.no_notify, cli.log_level);

    match cli.command {
        Some(Commands::Pipe {
            samples,
            interval,
            compact,
        }) => {
            let _guard = logging::init(settings.log_level, LogMode::Stderr);
            settings.merge_with_args(interval, None, false, None);
            commands::pipe::run(&settings, samples, compact)
        }
        Some(Commands::Detect) => {
            let _guard = logging::init(settings.log_level, LogMode::Stderr);
            commands::detect::run(&settings)
        }
        Some(Commands::Config) => {
            let _guard = logging::init(settings.log_level, LogMode::Stderr);
            commands::config::run(&settings)
        }
        Some(Commands::Ui) | None => {
            // The dashboard owns the terminal, so it only logs when asked to.
            let level = cli.log_level.unwrap_or(LogLevel::Off);
            let _guard = logging::init(level, LogMode::File);
            app::run_tui(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["pwrwatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_notify);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pwrwatch",
            "pipe",
            "-s",
            "3",
            "--alert-watts",
            "150",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.alert_watts, Some(150.0));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        match cli.command {
            Some(Commands::Pipe { samples, .. }) => assert_eq!(samples, 3),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["pwrwatch", "--log-level", "loud"]).is_err());
    }
}
