use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::commands::OdoCommand;
use crate::config::Config;
use crate::dispatch::cli::ProcessExecutor;
use crate::dispatch::{CommandExecutor, CommandLine, ExecOptions, ExecutionResult};
use crate::parsers::OutputParser;
use crate::parsers::catalog::{ComponentCatalogEntry, ComponentCatalogParser};
use crate::parsers::services::{ServiceCatalogParser, ServiceTemplateEntry};
use crate::parsers::version::VersionParser;

static SHARED: Lazy<OdoAdapter> = Lazy::new(|| OdoAdapter::new(Config::load()));

/// Typed front door to the odo CLI.
///
/// Every operation runs one subprocess and parses its stdout. Nothing is
/// cached between calls, so operations may run concurrently.
#[derive(Clone)]
pub struct OdoAdapter {
    executor: Arc<dyn CommandExecutor>,
    program: String,
    options: ExecOptions,
    version_parser: VersionParser,
}

impl std::fmt::Debug for OdoAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdoAdapter")
            .field("program", &self.program)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl OdoAdapter {
    /// Adapter that spawns real odo processes.
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Arc::new(ProcessExecutor::new()))
    }

    pub fn with_executor(config: Config, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            version_parser: VersionParser::new(config.banner_name.clone()),
            options: config.exec_options(),
            program: config.odo_path,
        }
    }

    /// Process-wide instance, built from [`Config::load`] on first use.
    pub fn shared() -> &'static OdoAdapter {
        &SHARED
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run an arbitrary command line with this adapter's options.
    pub async fn execute(&self, command: &CommandLine) -> ExecutionResult {
        self.executor.execute(command, &self.options).await
    }

    async fn run(&self, command: OdoCommand) -> ExecutionResult {
        let result = self
            .execute(&command.to_command_line(&self.program))
            .await;
        if let Some(ref e) = result.error {
            tracing::warn!(command = ?command, "odo reported an error: {e}");
        }
        result
    }

    /// Installed odo version, or `0.0.0` when the banner can't be read.
    pub async fn version(&self) -> String {
        self.version_with_result().await.0
    }

    /// Like [`Self::version`], plus the raw run so callers can tell a
    /// missing tool from an unreadable banner.
    pub async fn version_with_result(&self) -> (String, ExecutionResult) {
        let result = self.run(OdoCommand::Version).await;
        let version = self.version_parser.parse(&result.stdout);
        tracing::debug!(version = %version, "odo version");
        (version, result)
    }

    /// Full rows of the component catalog.
    pub async fn component_catalog(&self) -> Vec<ComponentCatalogEntry> {
        self.component_catalog_with_result().await.0
    }

    pub async fn component_catalog_with_result(
        &self,
    ) -> (Vec<ComponentCatalogEntry>, ExecutionResult) {
        let result = self.run(OdoCommand::ListComponentCatalog).await;
        (ComponentCatalogParser.parse(&result.stdout), result)
    }

    /// Component type names in catalog order.
    pub async fn component_types(&self) -> Vec<String> {
        self.component_types_with_result().await.0
    }

    pub async fn component_types_with_result(&self) -> (Vec<String>, ExecutionResult) {
        let result = self.run(OdoCommand::ListComponentCatalog).await;
        let types = ComponentCatalogParser::names(&result.stdout);
        tracing::debug!(rows = types.len(), "component types");
        (types, result)
    }

    /// Tags for `type_name`. Unknown types yield an empty list.
    pub async fn component_type_versions(&self, type_name: &str) -> Vec<String> {
        self.component_type_versions_with_result(type_name).await.0
    }

    pub async fn component_type_versions_with_result(
        &self,
        type_name: &str,
    ) -> (Vec<String>, ExecutionResult) {
        let result = self.run(OdoCommand::ListComponentCatalog).await;
        (
            ComponentCatalogParser::tags_for(&result.stdout, type_name),
            result,
        )
    }

    pub async fn service_catalog(&self) -> Vec<ServiceTemplateEntry> {
        self.service_catalog_with_result().await.0
    }

    pub async fn service_catalog_with_result(
        &self,
    ) -> (Vec<ServiceTemplateEntry>, ExecutionResult) {
        let result = self.run(OdoCommand::ListServiceCatalog).await;
        (ServiceCatalogParser.parse(&result.stdout), result)
    }

    pub async fn service_templates(&self) -> Vec<String> {
        self.service_templates_with_result().await.0
    }

    pub async fn service_templates_with_result(&self) -> (Vec<String>, ExecutionResult) {
        let result = self.run(OdoCommand::ListServiceCatalog).await;
        let templates = ServiceCatalogParser::names(&result.stdout);
        tracing::debug!(rows = templates.len(), "service templates");
        (templates, result)
    }

    /// Plans for `template_name` in listed order. Unknown templates yield an empty list.
    pub async fn service_template_plans(&self, template_name: &str) -> Vec<String> {
        self.service_template_plans_with_result(template_name).await.0
    }

    pub async fn service_template_plans_with_result(
        &self,
        template_name: &str,
    ) -> (Vec<String>, ExecutionResult) {
        let result = self.run(OdoCommand::ListServiceCatalog).await;
        (
            ServiceCatalogParser::plans_for(&result.stdout, template_name),
            result,
        )
    }
}
