//! CLI argument definitions for `preservation-calc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use preserve_core::TemperatureScale;
use preserve_tables::TableKind;

#[derive(Parser)]
#[command(
    name = "preservation-calc",
    version,
    about = "Preservation Index, EMC and mold risk for collection environments",
    long_about = "Evaluate storage conditions with the IPI dew point calculator tables.\n\n\
                  Run `generate` once to extract the lookup tables from the calculator\n\
                  script; every other command reads the generated artifact."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the lookup tables from the calculator script and write the artifact.
    Generate(GenerateArgs),

    /// Check a generated artifact and print its tables.
    Verify(VerifyArgs),

    /// Evaluate one temperature and relative humidity.
    Eval(EvalArgs),

    /// Dew point for a temperature and relative humidity.
    DewPoint(DewPointArgs),

    /// Print one metric at every integer point of the input domain as JSON lines.
    Grid(GridArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Calculator script URL.
    #[arg(long = "url", value_name = "URL", conflicts_with = "source")]
    pub url: Option<String>,

    /// Read the calculator script from a local file instead of the network.
    #[arg(long = "source", value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Artifact destination (default: $PRESERVATION_TABLES or tables/dp_tables.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Download timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Artifact to verify (default: the configured artifact path).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Options shared by commands that read the tables.
#[derive(Args)]
pub struct TablesArg {
    /// Generated table artifact (default: the configured artifact path).
    #[arg(long = "tables", value_name = "PATH")]
    pub tables: Option<PathBuf>,
}

#[derive(Args)]
pub struct EvalArgs {
    /// Temperature, in the unit given by --scale.
    #[arg(long = "temp", allow_negative_numbers = true)]
    pub temp: f64,

    /// Relative humidity in percent.
    #[arg(long = "rh")]
    pub rh: f64,

    #[arg(long = "scale", value_enum, default_value = "c")]
    pub scale: ScaleArg,

    #[command(flatten)]
    pub tables: TablesArg,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct DewPointArgs {
    /// Temperature, in the unit given by --scale.
    #[arg(long = "temp", allow_negative_numbers = true)]
    pub temp: f64,

    /// Relative humidity in percent.
    #[arg(long = "rh")]
    pub rh: f64,

    /// Unit of --temp and of the printed dew point.
    #[arg(long = "scale", value_enum, default_value = "c")]
    pub scale: ScaleArg,
}

#[derive(Args)]
pub struct GridArgs {
    #[arg(long = "metric", value_enum)]
    pub metric: MetricArg,

    #[command(flatten)]
    pub tables: TablesArg,
}

/// Temperature unit choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ScaleArg {
    #[value(alias = "celsius")]
    C,
    #[value(alias = "fahrenheit")]
    F,
    #[value(alias = "kelvin")]
    K,
}

impl From<ScaleArg> for TemperatureScale {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::C => TemperatureScale::Celsius,
            ScaleArg::F => TemperatureScale::Fahrenheit,
            ScaleArg::K => TemperatureScale::Kelvin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Pi,
    Emc,
    Mold,
}

impl From<MetricArg> for TableKind {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Pi => TableKind::Pi,
            MetricArg::Emc => TableKind::Emc,
            MetricArg::Mold => TableKind::Mold,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn eval_accepts_negative_temperatures() {
        let cli = Cli::try_parse_from([
            "preservation-calc",
            "eval",
            "--temp",
            "-12.5",
            "--rh",
            "24",
            "--scale",
            "fahrenheit",
        ])
        .unwrap();
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.temp, -12.5);
        assert!(matches!(args.scale, ScaleArg::F));
        assert!(args.tables.tables.is_none());
    }

    #[test]
    fn generate_rejects_url_with_source() {
        let result = Cli::try_parse_from([
            "preservation-calc",
            "generate",
            "--url",
            "http://example.invalid/dp.js",
            "--source",
            "dp.js",
        ]);
        assert!(result.is_err());
    }
}
