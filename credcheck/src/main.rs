#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use credcheck_config::Config;
use verifier::{Report, Runner, all_passed};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // `.env` may carry CREDCHECK_CONFIG and CREDCHECK_LOG, so it goes before
    // argument parsing and logging setup
    let dotenv = credcheck_config::load_dotenv();

    let args = Args::parse();

    credcheck_telemetry::init(args.log.as_deref(), args.log_format.into())?;

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    if let Some(dir) = args.output_dir {
        config.probe.output_dir = dir;
    }

    tracing::debug!(
        suite = %args.suite,
        timeout = ?config.probe.timeout,
        output_dir = %config.probe.output_dir.display(),
        "starting credcheck"
    );

    let runner = Runner::from_config(&config, args.suite)?;

    let mut report = Report::new(std::io::stdout().lock());
    report.heading(&format!("Starting credential checks ({})...", args.suite))?;

    let results = runner.run(&mut report).await?;

    if args.strict && !all_passed(&results) {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
