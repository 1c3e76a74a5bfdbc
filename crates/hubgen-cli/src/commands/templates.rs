//! Implementation of the `hubgen templates` command.

use serde::Serialize;

use hubgen_adapters::BundleSource;
use hubgen_core::application::{ApplicationError, TemplateService};

use crate::{
    cli::{ListFormat, TemplatesArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = super::templates_dir(args.templates.as_ref(), &config);
    let renderer = super::load_renderer(dir.as_deref())?;
    let source = match renderer.source() {
        BundleSource::Builtin => "built-in".to_owned(),
        BundleSource::Directory(dir) => format!("built-in + {}", dir.display()),
    };
    let service = TemplateService::new(renderer);

    if let Some(model_path) = args.check {
        let model = super::read_model(&model_path)?;
        let missing = service.missing(&model.page);
        if missing.is_empty() {
            output.success(&format!(
                "Bundle ({source}) covers page '{}'",
                model.page.name
            ))?;
            return Ok(());
        }
        return Err(CliError::Core(
            ApplicationError::TemplateMissing {
                name: missing.join(", "),
            }
            .into(),
        ));
    }

    let templates = service.list();
    match args.format {
        ListFormat::Table => {
            output.header(&format!("Templates ({source}):"))?;
            output.templates(&templates)?;
            output.print("")?;
            output.print("  * not used by generate or init")?;
        }
        ListFormat::List => {
            for t in &templates {
                output.data(&t.name)?;
            }
        }
        ListFormat::Json => {
            let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
            output.data(&to_json(&names)?)?;
        }
    }

    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Internal {
        message: format!("Failed to serialise template list: {e}"),
        source: Some(Box::new(e)),
    })
}
