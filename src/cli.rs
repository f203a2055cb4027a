//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Launchboard - interactive launch-records dashboard
///
/// Serve a CSV of launch records as a small dashboard: a site dropdown,
/// a success/failure pie chart and a payload/outcome scatter chart.
///
/// Examples:
///   launchboard
///   launchboard --data data/launch_records.csv --addr 0.0.0.0:8080
///   launchboard --dry-run
///   launchboard --export snapshot.json --site "KSC LC-39A"
///   launchboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the launch records CSV file
    ///
    /// Can also be set via LAUNCHBOARD_DATA env var or .launchboard.toml config.
    #[arg(short, long, value_name = "FILE", env = "LAUNCHBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Address the dashboard listens on
    ///
    /// Can also be set via LAUNCHBOARD_ADDR env var or .launchboard.toml config.
    #[arg(short, long, value_name = "ADDR", env = "LAUNCHBOARD_ADDR")]
    pub addr: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .launchboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and validate the dataset, print its summary and exit
    ///
    /// Does not start the dashboard server.
    #[arg(long, conflicts_with = "export")]
    pub dry_run: bool,

    /// Write the chart specifications for one selection to a JSON file and exit
    ///
    /// Combine with --site, --payload-min and --payload-max to pick the
    /// selection; defaults to all sites over the observed payload span.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Site selection for --export ("ALL" or a site name)
    #[arg(long, value_name = "SITE", requires = "export")]
    pub site: Option<String>,

    /// Lower payload bound in kg for --export
    #[arg(long, value_name = "KG", requires = "export")]
    pub payload_min: Option<f64>,

    /// Upper payload bound in kg for --export
    #[arg(long, value_name = "KG", requires = "export")]
    pub payload_max: Option<f64>,

    /// Generate a default .launchboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate export payload bounds
        if let Some(min) = self.payload_min {
            if !min.is_finite() {
                return Err("--payload-min must be a finite number".to_string());
            }
        }
        if let Some(max) = self.payload_max {
            if !max.is_finite() {
                return Err("--payload-max must be a finite number".to_string());
            }
        }
        if let (Some(min), Some(max)) = (self.payload_min, self.payload_max) {
            if min > max {
                return Err(format!(
                    "--payload-min ({}) must not exceed --payload-max ({})",
                    min, max
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            addr: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            export: None,
            site: None,
            payload_min: None,
            payload_max: None,
            init_config: false,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_inverted_export_bounds() {
        let mut args = make_args();
        args.export = Some(PathBuf::from("snapshot.json"));
        args.payload_min = Some(5000.0);
        args.payload_max = Some(1000.0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_non_finite_bound() {
        let mut args = make_args();
        args.export = Some(PathBuf::from("snapshot.json"));
        args.payload_min = Some(f64::NAN);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_export_selection() {
        let args = Args::parse_from([
            "launchboard",
            "--export",
            "snapshot.json",
            "--site",
            "CCAFS LC-40",
            "--payload-min",
            "1000",
            "--payload-max",
            "6000",
        ]);

        assert_eq!(args.export, Some(PathBuf::from("snapshot.json")));
        assert_eq!(args.site.as_deref(), Some("CCAFS LC-40"));
        assert_eq!(args.payload_min, Some(1000.0));
        assert_eq!(args.payload_max, Some(6000.0));
    }

    #[test]
    fn test_site_requires_export() {
        let result = Args::try_parse_from(["launchboard", "--site", "CCAFS LC-40"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dry_run_conflicts_with_export() {
        let result = Args::try_parse_from(["launchboard", "--dry-run", "--export", "s.json"]);
        assert!(result.is_err());
    }
}
