//! `hubgen init`: write the project skeleton.

use tracing::instrument;

use hubgen_core::application::TemplateService;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Write the hub files and bootstrap files under the project root.
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project = super::resolve_project(&args.project, &config)?;
    let dir = super::templates_dir(args.project.templates.as_ref(), &config);
    let renderer = super::load_renderer(dir.as_deref())?;
    let missing = TemplateService::new(renderer.clone()).missing_bootstrap();
    super::warn_missing_templates(&missing, &output)?;
    let service = super::build_service(renderer, args.overwrite, &config, output.is_quiet())?;

    output.header(&format!(
        "Initialising '{}' in {}",
        project.name,
        project.root.display()
    ))?;
    let report = service.init_project(&project)?;
    output.report(&report)?;
    super::report_result(&report)?;

    output.success(&format!("Project '{}' initialised", project.name))?;
    Ok(())
}
