//! Project triage entrypoint for a single workflow event.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use project_triage::outputs::sink_for;
use project_triage::{
    EventContext, OctocrabProjectGateway, OutputSink, PersonalAccessToken, ProjectTriage,
    TriageConfig, TriageError, TriagePlan, logging, plan,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // The runner turns `::error::` lines into workflow annotations.
            let line = if std::env::var_os("GITHUB_ACTIONS").is_some() {
                format!("::error::{error}")
            } else {
                error.to_string()
            };
            if writeln!(io::stderr().lock(), "{line}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), TriageError> {
    let config = load_config()?;
    logging::init(config.json_logs());

    let event = EventContext::load(&config.resolve_event_path()?)?;
    let filters = config.filter_config();
    let project_url = config.require_project_url()?;

    let triage_plan = plan(&event, &filters, &project_url)?;
    let TriagePlan::Apply { locator, .. } = &triage_plan else {
        return Ok(());
    };

    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let gateway = OctocrabProjectGateway::for_token(&token, locator)?;
    let outcome = ProjectTriage::new(&gateway).run(&triage_plan, &event).await?;

    if let Some(output) = outcome.output() {
        let output_path = config.resolve_output_path();
        sink_for(output_path.as_deref()).write(&output)?;
    }
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TriageError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TriageConfig, TriageError> {
    TriageConfig::load().map_err(|error| TriageError::Configuration {
        message: error.to_string(),
    })
}
