//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Build the shared template context from the page
//! 2. Render and materialize leaf files (entities, repositories, state)
//! 3. Patch the hub files for the page's primary entity
//! 4. Render and materialize the feature files
//!
//! Every file is settled on its own. A failed render or write is recorded
//! in the report and the run moves on; only fatal errors stop it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileStore, OverwritePrompt, TemplateRenderer},
        services::{hub_patcher::HubPatcher, materializer::FileMaterializer},
    },
    domain::{
        DomainValidator as validator, EntitySpec, FileOutcome, FileRole, GenerationReport,
        HubFile, PageSpec, ProjectLayout, ReportEntry, RunPhase, SKELETON_DIRS, StateFile,
        TemplateContext, layout::templates,
    },
    error::{HubgenError, HubgenResult},
};

/// The project a run writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    /// Package name used in generated import paths.
    pub name: String,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    renderer: Arc<dyn TemplateRenderer>,
    store: Box<dyn FileStore>,
    prompt: Box<dyn OverwritePrompt>,
    layout: ProjectLayout,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use hubgen_core::application::{ScaffoldService, ports::*};
    ///
    /// let service = ScaffoldService::new(
    ///     renderer, // Arc<impl TemplateRenderer>
    ///     store,    // impl FileStore
    ///     prompt,   // impl OverwritePrompt
    /// );
    /// ```
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        store: Box<dyn FileStore>,
        prompt: Box<dyn OverwritePrompt>,
    ) -> Self {
        Self {
            renderer,
            store,
            prompt,
            layout: ProjectLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// The skeleton directories exist under `root`.
    pub fn is_initialized(&self, root: &Path) -> bool {
        SKELETON_DIRS
            .iter()
            .all(|dir| self.store.exists(&root.join(dir)))
    }

    /// Generate the files for one page.
    ///
    /// Returns `Err` only when the model is invalid. Everything else ends up
    /// in the report, including a fatal stop (`RunState::Failed`).
    #[instrument(
        skip_all,
        fields(
            page = %page.name,
            project = %project.name,
            root = %project.root.display()
        )
    )]
    pub fn generate(
        &self,
        project: &Project,
        page: &PageSpec,
        entities: &[EntitySpec],
    ) -> HubgenResult<GenerationReport> {
        validator::validate_identifier("project", &project.name)?;
        validator::validate_model(page, entities)?;

        let mut report = GenerationReport::start(&project.root);
        let run = Run {
            service: self,
            project,
            materializer: FileMaterializer::new(self.store.as_ref(), self.prompt.as_ref()),
        };

        match run.generate(&mut report, page, entities) {
            Ok(()) => {
                info!(
                    written = report.count("written"),
                    failed = report.count("failed"),
                    "generation finished"
                );
                Ok(report.finish())
            }
            Err(err) => {
                warn!(error = %err, phase = ?report.phase(), "generation stopped");
                Ok(report.fail(err.to_string()))
            }
        }
    }

    /// Write the project skeleton: the four hub files plus the bootstrap
    /// files every generated page relies on.
    #[instrument(skip_all, fields(project = %project.name, root = %project.root.display()))]
    pub fn init_project(&self, project: &Project) -> HubgenResult<GenerationReport> {
        validator::validate_identifier("project", &project.name)?;

        let mut report = GenerationReport::start(&project.root);
        let run = Run {
            service: self,
            project,
            materializer: FileMaterializer::new(self.store.as_ref(), self.prompt.as_ref()),
        };

        match run.init(&mut report) {
            Ok(()) => Ok(report.finish()),
            Err(err) => Ok(report.fail(err.to_string())),
        }
    }
}

/// State shared by the steps of one run. `Err` from a step means the run
/// must stop; per-file failures are already in the report.
struct Run<'a> {
    service: &'a ScaffoldService,
    project: &'a Project,
    materializer: FileMaterializer<'a>,
}

impl Run<'_> {
    fn layout(&self) -> &ProjectLayout {
        &self.service.layout
    }

    fn generate(
        &self,
        report: &mut GenerationReport,
        page: &PageSpec,
        entities: &[EntitySpec],
    ) -> HubgenResult<()> {
        report.enter(RunPhase::BuildingContext);
        let shared = TemplateContext::for_page(&self.project.name, page);

        let primary = match page.primary_in(entities) {
            Some(primary) if !page.ui_only => primary,
            _ => {
                report.enter(RunPhase::EmittingFeatureFiles);
                return self.emit_features(report, page, &shared);
            }
        };

        if !self.service.is_initialized(&self.project.root) {
            return Err(ApplicationError::NotInitialized {
                root: self.project.root.clone(),
            }
            .into());
        }
        let context = shared.for_entity(primary);

        report.enter(RunPhase::EmittingLeafFiles);
        for entity in entities {
            let entity_ctx = shared.for_entity(entity);
            self.emit(
                report,
                self.layout().entity_data(entity),
                templates::ENTITY_DATA,
                &entity_ctx,
                FileRole::Leaf,
            )?;
        }
        let persisted: Vec<&EntitySpec> = entities.iter().filter(|e| e.persist).collect();
        if !persisted.is_empty() {
            self.patch_hub(report, HubFile::DatabaseClient, &persisted)?;
        }

        self.emit(
            report,
            self.layout().repository(primary),
            templates::REPOSITORY,
            &context,
            FileRole::Leaf,
        )?;
        if primary.persist {
            self.emit(
                report,
                self.layout().repository_db(primary),
                templates::REPOSITORY_DB,
                &context,
                FileRole::Leaf,
            )?;
        }
        for kind in StateFile::ALL {
            self.emit(
                report,
                self.layout().state_file(primary, kind),
                kind.template(),
                &context,
                FileRole::Leaf,
            )?;
        }

        report.enter(RunPhase::PatchingHubFiles);
        for hub in HubFile::STATE_HUBS {
            self.patch_hub(report, hub, &[primary])?;
        }

        report.enter(RunPhase::EmittingFeatureFiles);
        self.emit_features(report, page, &context)
    }

    fn init(&self, report: &mut GenerationReport) -> HubgenResult<()> {
        report.enter(RunPhase::BuildingContext);
        let context = TemplateContext::for_project(&self.project.name);
        let store = self.service.store.as_ref();
        for dir in SKELETON_DIRS {
            store.create_dir_all(&self.project.root.join(dir))?;
        }

        report.enter(RunPhase::EmittingLeafFiles);
        for hub in HubFile::ALL {
            let path = hub.path(self.layout());
            self.emit(report, path, hub.template(), &context, FileRole::Hub)?;
        }
        let layout = self.layout();
        for (path, template) in [
            (layout.main(), templates::MAIN),
            (layout.page_data(), templates::PAGE_DATA),
            (layout.action_report(), templates::ACTION_REPORT),
            (layout.pubspec(), templates::PUBSPEC),
        ] {
            self.emit(report, path, template, &context, FileRole::Bootstrap)?;
        }
        Ok(())
    }

    fn emit_features(
        &self,
        report: &mut GenerationReport,
        page: &PageSpec,
        context: &TemplateContext,
    ) -> HubgenResult<()> {
        self.emit(
            report,
            self.layout().feature_view_model(page),
            templates::VIEW_MODEL,
            context,
            FileRole::Feature,
        )?;
        self.emit(
            report,
            self.layout().feature_view(page),
            templates::VIEW,
            context,
            FileRole::Feature,
        )
    }

    fn emit(
        &self,
        report: &mut GenerationReport,
        rel: PathBuf,
        template: &str,
        context: &TemplateContext,
        role: FileRole,
    ) -> HubgenResult<()> {
        let path = self.project.root.join(&rel);
        let result = self
            .service
            .renderer
            .render(template, context)
            .and_then(|content| self.materializer.materialize(&path, &content));
        settle(report, rel, role, result.map(|outcome| (outcome, Vec::new())))
    }

    /// Patch `hub` once for all `entities`, in order, recording one entry.
    fn patch_hub(
        &self,
        report: &mut GenerationReport,
        hub: HubFile,
        entities: &[&EntitySpec],
    ) -> HubgenResult<()> {
        let rel = hub.path(self.layout());
        let patches: Vec<_> = entities
            .iter()
            .flat_map(|entity| hub.patches_for(self.layout(), &self.project.name, entity))
            .collect();
        let result = HubPatcher::new(self.service.store.as_ref())
            .patch(&self.project.root.join(&rel), &patches)
            .map(|r| (r.outcome, r.notes));
        settle(report, rel, FileRole::Hub, result)
    }
}

/// Record the outcome for one file. Only a fatal error escapes.
fn settle(
    report: &mut GenerationReport,
    rel: PathBuf,
    role: FileRole,
    result: HubgenResult<(FileOutcome, Vec<String>)>,
) -> Result<(), HubgenError> {
    match result {
        Ok((outcome, notes)) => {
            report.record(ReportEntry::new(rel, role, outcome).with_notes(notes));
            Ok(())
        }
        Err(err) => {
            warn!(path = %rel.display(), error = %err, "file failed");
            report.record(ReportEntry::new(
                rel,
                role,
                FileOutcome::Failed {
                    error: err.to_string(),
                },
            ));
            if err.is_fatal() { Err(err) } else { Ok(()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFileStore, MockTemplateRenderer};
    use crate::domain::{DomainError, FieldSpec, RunState};

    fn renderer() -> Arc<dyn TemplateRenderer> {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|name, _| Ok(format!("// {name}\n")));
        Arc::new(renderer)
    }

    fn todo() -> EntitySpec {
        EntitySpec::new("Todo")
            .field(FieldSpec::new("id", "int"))
            .unique("id", "int")
            .persisted()
    }

    fn project() -> Project {
        Project::new("/p", "app")
    }

    fn no(_: &Path) -> bool {
        false
    }

    #[test]
    fn invalid_model_is_an_error() {
        let service = ScaffoldService::new(
            renderer(),
            Box::new(MockFileStore::new()),
            Box::new(no),
        );
        let result = service.generate(&project(), &PageSpec::new("Todos"), &[todo()]);
        assert!(matches!(result, Err(HubgenError::Domain(_))));
    }

    #[test]
    fn invalid_project_name_is_rejected_before_any_write() {
        let service = ScaffoldService::new(
            renderer(),
            Box::new(MockFileStore::new()),
            Box::new(no),
        );
        let result = service.generate(
            &Project::new("/p", "my-app"),
            &PageSpec::new("About").ui_only(),
            &[],
        );
        assert!(matches!(
            result,
            Err(HubgenError::Domain(DomainError::InvalidName { kind: "project", .. }))
        ));
    }

    #[test]
    fn ui_only_page_writes_two_feature_files() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store.expect_create_dir_all().returning(|_| Ok(()));
        store.expect_write_file().times(2).returning(|_, _| Ok(()));

        let service = ScaffoldService::new(renderer(), Box::new(store), Box::new(no));
        let report = service
            .generate(&project(), &PageSpec::new("About").ui_only(), &[])
            .unwrap();

        assert!(report.state.is_done());
        let paths: Vec<_> = report.entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("features/about/about_view_model.dart"),
                PathBuf::from("features/about/about_view.dart"),
            ]
        );
    }

    #[test]
    fn uninitialised_project_fails_while_building_context() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store.expect_write_file().never();

        let service = ScaffoldService::new(renderer(), Box::new(store), Box::new(no));
        let report = service
            .generate(&project(), &PageSpec::new("Todos").primary("Todo"), &[todo()])
            .unwrap();

        assert!(matches!(
            report.state,
            RunState::Failed {
                phase: RunPhase::BuildingContext,
                ..
            }
        ));
        assert!(report.entries.is_empty());
    }

    #[test]
    fn missing_template_fails_one_file_only() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|name, _| {
            if name == templates::VIEW {
                Err(ApplicationError::TemplateMissing { name: name.into() }.into())
            } else {
                Ok(String::new())
            }
        });
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store.expect_create_dir_all().returning(|_| Ok(()));
        store.expect_write_file().times(1).returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Arc::new(renderer), Box::new(store), Box::new(no));
        let report = service
            .generate(&project(), &PageSpec::new("About").ui_only(), &[])
            .unwrap();

        assert!(report.state.is_done());
        assert_eq!(report.count("written"), 1);
        assert_eq!(report.count("failed"), 1);
    }

    #[test]
    fn lock_poisoning_stops_the_run() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store.expect_create_dir_all().returning(|_| Ok(()));
        store
            .expect_write_file()
            .times(1)
            .returning(|_, _| Err(ApplicationError::StoreLockError.into()));

        let service = ScaffoldService::new(renderer(), Box::new(store), Box::new(no));
        let report = service
            .generate(&project(), &PageSpec::new("About").ui_only(), &[])
            .unwrap();

        assert!(report.state.is_failed());
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn is_initialized_checks_every_skeleton_dir() {
        let mut store = MockFileStore::new();
        store
            .expect_exists()
            .returning(|p| !p.ends_with("features"));
        let service = ScaffoldService::new(renderer(), Box::new(store), Box::new(no));
        assert!(!service.is_initialized(Path::new("/p")));
    }
}
