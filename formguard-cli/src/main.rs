use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use formdom::{Document, SubmitRequest};
use formguard_lib::config::CheckConfig;
use formguard_lib::validation::{ValidationResult, attach_events, error_labels};
use formguard_lib::{AvailabilityClient, signup};
use log::{debug, info};
use serde::Serialize;
use simplelog::{Config, WriteLogger};

mod args;

use args::{Cli, OutputFormat};

#[derive(Debug, Serialize)]
struct Report {
    submitted: bool,
    result: ValidationResult,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = WriteLogger::init(cli.log_level, Config::default(), std::io::stderr());

    match run(cli).await {
        Ok(report) if report.submitted => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Report> {
    let mut config = CheckConfig::new().with_base_url(&cli.check_url);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = AvailabilityClient::new(&config).context("invalid check configuration")?;

    let document = Document::new(signup::form(&cli.form_id));
    let rules = signup::rules(client);
    let binding = attach_events(&rules, &document, &cli.form_id, cli.skip_checks)?;
    debug!("bound fields: {:?}", binding.fields);

    for (name, value) in &cli.fields {
        if document.control(name).is_none() {
            bail!("unknown field {name:?}");
        }
        document.input(name, value.as_str()).settled().await;
    }

    match document.request_submit(&cli.form_id) {
        SubmitRequest::Dispatched(dispatch) => dispatch.settled().await,
        SubmitRequest::Blocked(invalid) => debug!("native validation blocked: {invalid:?}"),
        SubmitRequest::NotFound => bail!("form {:?} not found", cli.form_id),
    }

    let report = Report {
        submitted: document.submissions(&cli.form_id) > 0,
        result: ValidationResult::from_errors(error_labels(&document, &cli.form_id)),
    };
    info!("submitted: {}", report.submitted);
    print_report(&report, cli.format)?;
    Ok(report)
}

fn print_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            for error in report.result.errors() {
                println!("{error}");
            }
            println!("{}", if report.submitted { "submitted" } else { "blocked" });
        }
    }
    Ok(())
}
