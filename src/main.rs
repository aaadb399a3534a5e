use std::time::Instant;

use clap::{Parser, Subcommand};
use serde_json::json;

use odo_adapter::adapter::OdoAdapter;
use odo_adapter::config::Config;
use odo_adapter::dispatch::CommandLine;
use odo_adapter::parsers::version::SENTINEL_VERSION;
use odo_adapter::response::AdapterResponse;

#[derive(Parser)]
#[command(name = "odo-adapter")]
#[command(about = "Typed JSON view of odo CLI output", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// odo executable (name on PATH or full path)
    #[arg(long, env = "ODO_PATH")]
    odo: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Installed odo version
    Version,
    /// Component types from the catalog
    ComponentTypes,
    /// Tags available for one component type
    ComponentVersions {
        /// Component type name, e.g. nodejs
        type_name: String,
    },
    /// Full component catalog rows
    Catalog,
    /// Service templates from the catalog
    Services,
    /// Plans available for one service template
    Plans {
        /// Service template name
        template_name: String,
    },
    /// Run odo with raw arguments and report the captured result
    Exec {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(odo) = cli.odo {
        config.odo_path = odo;
    }
    let adapter = OdoAdapter::new(config);
    tracing::debug!(program = adapter.program(), "odo-adapter starting");

    let start = Instant::now();
    let line = match cli.command {
        Commands::Version => {
            let (version, result) = adapter.version_with_result().await;
            let elapsed = start.elapsed().as_secs_f64();
            if version == SENTINEL_VERSION {
                AdapterResponse::error("version", version, elapsed).to_json_line()
            } else {
                AdapterResponse::for_result("version", version, &result, elapsed).to_json_line()
            }
        }
        Commands::ComponentTypes => {
            let (types, result) = adapter.component_types_with_result().await;
            let elapsed = start.elapsed().as_secs_f64();
            AdapterResponse::for_result("component-types", types, &result, elapsed).to_json_line()
        }
        Commands::ComponentVersions { type_name } => {
            let (tags, result) = adapter
                .component_type_versions_with_result(&type_name)
                .await;
            let elapsed = start.elapsed().as_secs_f64();
            AdapterResponse::for_result("component-versions", tags, &result, elapsed)
                .to_json_line()
        }
        Commands::Catalog => {
            let (rows, result) = adapter.component_catalog_with_result().await;
            let elapsed = start.elapsed().as_secs_f64();
            AdapterResponse::for_result("catalog", rows, &result, elapsed).to_json_line()
        }
        Commands::Services => {
            let (templates, result) = adapter.service_templates_with_result().await;
            let elapsed = start.elapsed().as_secs_f64();
            AdapterResponse::for_result("services", templates, &result, elapsed).to_json_line()
        }
        Commands::Plans { template_name } => {
            let (plans, result) = adapter
                .service_template_plans_with_result(&template_name)
                .await;
            let elapsed = start.elapsed().as_secs_f64();
            AdapterResponse::for_result("plans", plans, &result, elapsed).to_json_line()
        }
        Commands::Exec { args } => {
            let command = CommandLine::new(adapter.program()).args(args);
            let result = adapter.execute(&command).await;
            let elapsed = start.elapsed().as_secs_f64();
            let data = json!({
                "command": command.to_string(),
                "stdout": result.stdout,
                "stderr": result.stderr,
                "exit_code": result.exit_code,
                "error": result.error.as_ref().map(|e| e.user_message()),
            });
            AdapterResponse::for_result("exec", data, &result, elapsed).to_json_line()
        }
    };

    println!("{line}");
    Ok(())
}
