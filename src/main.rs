//! bfsa CLI entrypoint.
//!
//! This is the main entrypoint for the bfsa command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use bigfix_sa::bigfix::{ActionWatcher, BigFixClient};
use bigfix_sa::cli::{Cli, Commands, OutputFormatter};
use bigfix_sa::config::{
    ClientConfig, ConfigParser, ConfigValidator, Credentials, LogFormat, LoggingConfig,
    find_config_file,
};
use bigfix_sa::error::{ApiError, BigFixError, Result};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the log filter: `--verbose` wins, then `RUST_LOG`, then `level`.
fn log_filter(level: &str, verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

/// Initializes the logging system.
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&logging.level, verbose))
        .with_target(false)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

/// Text subscriber used until the configured logging is known.
fn startup_logger<W>(verbose: bool, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&LoggingConfig::default().level, verbose))
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    // The logging section lives in the config itself.
    let config = tracing::subscriber::with_default(
        startup_logger(cli.verbose, std::io::stderr),
        || load_config(cli.config.as_ref()),
    )?;
    init_logging(&config.logging, cli.verbose);

    let validation = ConfigValidator::new().validate(&config)?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    let client = BigFixClient::new(&config, Credentials::from_env()?)?;
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        None => {
            let plan_id = config.run.plan_id;
            cmd_run(&client, &config, plan_id, None, config.run.watch, &formatter).await
        }
        Some(Commands::Plans) => cmd_plans(&client, &formatter).await,
        Some(Commands::Template { plan_id, out }) => {
            cmd_template(&client, plan_id, out.as_deref()).await
        }
        Some(Commands::Run {
            plan_id,
            template,
            watch,
        }) => {
            let plan_id = plan_id.unwrap_or(config.run.plan_id);
            let watch = watch || config.run.watch;
            cmd_run(&client, &config, plan_id, template.as_deref(), watch, &formatter).await
        }
        Some(Commands::Status {
            action_id,
            watch,
            interval,
            max_polls,
        }) => {
            let interval = interval.unwrap_or(config.run.poll_interval_secs);
            let max_polls = max_polls.unwrap_or(config.run.max_polls);
            if watch {
                let watcher = ActionWatcher::new(&client, Duration::from_secs(interval), max_polls);
                let outcome = watcher.watch(&action_id).await?;
                emit(&formatter.format_watch(&outcome))
            } else {
                let status = client.get_status_action(&action_id).await?;
                emit(&formatter.format_status(&action_id, status.as_deref()))
            }
        }
    }
}

/// List plans and their templates.
async fn cmd_plans(client: &BigFixClient, formatter: &OutputFormatter) -> Result<()> {
    debug!("Plan query: {}", client.query());
    let plans = client.list_automation_plans().await?;
    emit(&formatter.format_plans(&plans))
}

/// Fetch a template to a file or stdout.
async fn cmd_template(client: &BigFixClient, plan_id: u64, out: Option<&Path>) -> Result<()> {
    let template = client
        .get_automation_plan_template(plan_id)
        .await?
        .ok_or(ApiError::TemplateUnavailable { plan_id })?;

    if let Some(path) = out {
        std::fs::write(path, &template)?;
        eprintln!("Template written to {}", path.display());
        Ok(())
    } else {
        emit(&template)
    }
}

/// Execute a plan, optionally watching the created action.
async fn cmd_run(
    client: &BigFixClient,
    config: &ClientConfig,
    plan_id: u64,
    template: Option<&Path>,
    watch: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let completed_template = match template {
        Some(path) => {
            info!("Submitting completed template from: {}", path.display());
            Some(std::fs::read_to_string(path)?)
        }
        None => None,
    };

    let action_id = client.execute_plan(plan_id, completed_template).await?;
    emit(&formatter.format_action(plan_id, action_id.as_deref()))?;

    let Some(action_id) = action_id else {
        return Err(BigFixError::internal(format!("Plan {plan_id} was not executed")));
    };

    if watch {
        let outcome = ActionWatcher::from_config(client, &config.run)
            .watch(&action_id)
            .await?;
        emit(&formatter.format_watch(&outcome))?;
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads configuration from the given file, a discovered file, or defaults.
fn load_config(config_path: Option<&PathBuf>) -> Result<ClientConfig> {
    let config_file = config_path.cloned().or_else(|| find_config_file("."));

    let base = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    let parser = ConfigParser::new().with_base_path(base);
    parser.load_dotenv()?;

    parser.load_with_env(config_file.as_deref())
}

/// Writes command output to stdout.
fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}
