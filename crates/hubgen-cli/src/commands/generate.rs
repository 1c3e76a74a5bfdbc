//! Implementation of the `hubgen generate` command.
//!
//! Responsibility: read the model file, make sure the project skeleton
//! exists, call the scaffold service, and display the report. No business
//! logic lives here.

use tracing::{info, instrument};

use hubgen_core::{
    application::TemplateService,
    domain::DomainValidator,
    error::HubgenError,
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute the `hubgen generate` command.
///
/// 1. Read, parse and validate the model file
/// 2. Resolve project root/name and load the template bundle
/// 3. Warn about templates the page needs but the bundle lacks
/// 4. Initialise the project first if allowed, else stop
/// 5. Generate and print the report
#[instrument(skip_all, fields(model = %args.model.display()))]
pub fn execute(
    args: GenerateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let model = super::read_model(&args.model)?;
    // Reject a bad model before `--init` writes anything.
    DomainValidator::validate_model(&model.page, &model.entities).map_err(HubgenError::from)?;
    let project = super::resolve_project(&args.project, &config)?;

    let dir = super::templates_dir(args.project.templates.as_ref(), &config);
    let renderer = super::load_renderer(dir.as_deref())?;

    let bundle = TemplateService::new(renderer.clone());
    super::warn_missing_templates(&bundle.missing(&model.page), &output)?;

    let service = super::build_service(renderer, args.overwrite, &config, output.is_quiet())?;

    if !model.page.ui_only && !service.is_initialized(&project.root) {
        if !args.init {
            if output.is_quiet() || !prompt::is_interactive() {
                return Err(CliError::NotInitialized { root: project.root });
            }
            let question = format!(
                "{} is not initialised. Initialise it now?",
                project.root.display()
            );
            if !prompt::confirm(&question) {
                return Err(CliError::Cancelled);
            }
        }

        output.info(&format!("Initialising {}", project.root.display()))?;
        super::warn_missing_templates(&bundle.missing_bootstrap(), &output)?;
        let init_report = service.init_project(&project)?;
        if output.format() != OutputFormat::Json {
            output.report(&init_report)?;
        }
        super::report_result(&init_report)?;
    }

    output.header(&format!(
        "Generating page '{}' into {}",
        model.page.name,
        project.root.display()
    ))?;
    let report = service.generate(&project, &model.page, &model.entities)?;
    output.report(&report)?;

    info!(
        run = %report.run_id,
        written = report.count("written"),
        failed = report.count("failed"),
        "generate finished"
    );
    super::report_result(&report)?;

    output.success(&format!("Page '{}' generated", model.page.name))?;
    Ok(())
}
