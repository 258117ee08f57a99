use std::io::{self, BufWriter};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use preserve_cli::grid::write_grid;
use preserve_cli::summary::{print_artifact_report, print_evaluation, print_generate_report};
use preserve_core::{
    Calculator, TemperatureScale, default_calculator, dew_point, from_celsius, to_celsius,
};
use preserve_tables::{GenerateConfig, default_artifact_path, generate, verify_artifact};

use crate::cli::{
    DewPointArgs, EvalArgs, GenerateArgs, GridArgs, OutputFormatArg, TablesArg, VerifyArgs,
};

pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let mut config = GenerateConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(url) = &args.url {
        config = config.with_url(url.clone());
    }
    if let Some(path) = &args.source {
        config = config.with_source_path(path.clone());
    }
    if let Some(path) = &args.output {
        config = config.with_output(path.clone());
    }
    let report = generate(&config).context("generate lookup tables")?;
    print_generate_report(&report);
    Ok(())
}

pub fn run_verify(args: &VerifyArgs) -> Result<()> {
    let path = args.path.clone().unwrap_or_else(default_artifact_path);
    let report = verify_artifact(&path)?;
    print_artifact_report(&report);
    Ok(())
}

pub fn run_eval(args: &EvalArgs) -> Result<()> {
    let scale = TemperatureScale::from(args.scale);
    let celsius = to_celsius(args.temp, scale)?;
    let span = info_span!("eval", t = celsius, rh = args.rh);
    let _guard = span.enter();
    let calculator = load_calculator(&args.tables)?;
    let evaluation = calculator.evaluate(celsius, args.rh)?;
    info!(overall = %evaluation.overall(), "evaluated conditions");
    match args.format {
        OutputFormatArg::Table => print_evaluation(&evaluation),
        OutputFormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&evaluation).context("encode evaluation")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_dew_point(args: &DewPointArgs) -> Result<()> {
    let scale = TemperatureScale::from(args.scale);
    let celsius = to_celsius(args.temp, scale)?;
    let td = dew_point(celsius, args.rh)?;
    println!("Dew point: {:.1} {}", from_celsius(td, scale), scale.symbol());
    Ok(())
}

pub fn run_grid(args: &GridArgs) -> Result<()> {
    let calculator = load_calculator(&args.tables)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let lines = write_grid(&calculator, args.metric.into(), &mut out)?;
    info!(lines, "wrote grid");
    Ok(())
}

fn load_calculator(arg: &TablesArg) -> Result<Calculator> {
    match &arg.tables {
        Some(path) => Ok(Calculator::from_artifact(path)?),
        None => Ok(default_calculator()?.clone()),
    }
}
