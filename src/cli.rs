//! Command-line interface for restcheck.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::builders::{
    build_user_data, build_user_for_scenario, Fill, Scenario, Template, UserOverrides,
};
use crate::client::ReqwestContext;
use crate::config::{self, Config};
use crate::report;
use crate::suite::{SuiteKind, SuiteRunner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// End-to-end checks for the JSONPlaceholder REST API.
///
/// Runs CRUD checks against the posts and users resources, using fixed
/// payloads and named user scenarios (admin, guest, missing email, invalid
/// email, long username, deactivated).
#[derive(Parser)]
#[command(name = "restcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the check suites against the service
    #[command(visible_alias = "check")]
    Run(RunArgs),
    /// List the available user scenarios
    Scenarios,
    /// Print the user payload a scenario produces
    User(UserArgs),
    /// Write a default config file
    Init(InitArgs),
}

/// Arguments for the run command.
#[derive(Parser)]
pub struct RunArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the service (overrides config)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Suite to run: posts or users (repeatable; overrides config)
    #[arg(short, long = "suite")]
    pub suites: Vec<String>,

    /// Only run checks whose name matches this glob (repeatable)
    #[arg(long)]
    pub only: Vec<String>,

    /// Per-request timeout in milliseconds (overrides config)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the user command.
#[derive(Parser)]
pub struct UserArgs {
    /// Scenario name (admin, guest, missingEmail, invalidEmail,
    /// longUsername, deactivated, random, custom)
    pub scenario: String,

    /// Fill with random values instead of the scenario template
    #[arg(short, long)]
    pub random: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "restcheck.yaml")]
    pub output: PathBuf,
}

/// Install the tracing subscriber. Logs go to stderr.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_filter = if verbose { "warn,restcheck=debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Load the config from an explicit path, a discovered file, or defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::parse_file(p),
        None => match config::discover() {
            Some(p) => {
                tracing::debug!(path = %p.display(), "using discovered config");
                Config::parse_file(&p)
            }
            None => Ok(Config::default()),
        },
    }
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(mut config: Config, args: &RunArgs) -> anyhow::Result<Config> {
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = args.timeout_ms {
        config.timeout_ms = timeout;
    }
    if !args.suites.is_empty() {
        config.suites = args
            .suites
            .iter()
            .map(|s| s.parse::<SuiteKind>())
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if !args.only.is_empty() {
        config.only = args.only.clone();
    }
    Ok(config)
}

/// Run the run command.
pub fn run_checks(args: &RunArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = match apply_overrides(config, args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let runner = SuiteRunner::new(config.base_url.clone()).with_filter(&config.only)?;
    let context = ReqwestContext::new(config.timeout(), &config.user_agent)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(runner.run(&config.suites, &context));
    context.dispose();
    let suite_report = result?;

    match args.format.as_str() {
        "json" => report::write_json(&suite_report)?,
        _ => report::write_pretty(&suite_report),
    }

    if suite_report.passed() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the scenarios command.
pub fn list_scenarios() -> anyhow::Result<i32> {
    println!("Available scenarios:");
    println!();

    for template in Template::ALL {
        println!("  {:<16} {}", template.as_str(), template.description());
    }
    println!("  {:<16} {}", "custom", "placeholder user with caller overrides");

    println!();
    println!("Usage:");
    println!("  restcheck user <scenario> [--random]");

    Ok(EXIT_SUCCESS)
}

/// Run the user command.
pub fn print_user(args: &UserArgs) -> anyhow::Result<i32> {
    let scenario = match args.scenario.parse::<Scenario>() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'restcheck scenarios' to see available scenarios");
            return Ok(EXIT_ERROR);
        }
    };

    let user = if args.random {
        build_user_data(UserOverrides::default(), Fill::Random)
    } else {
        // the CLI has no way to pass overrides, so custom means placeholder defaults
        let custom = matches!(scenario, Scenario::Custom).then(UserOverrides::default);
        build_user_for_scenario(scenario, custom)?
    };

    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    let content = Config::default().to_yaml()?;
    if let Err(e) = std::fs::write(&args.output, content) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to point at your service", args.output.display());
    println!("  2. Run: restcheck run --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args() -> RunArgs {
        RunArgs {
            config: None,
            base_url: None,
            suites: Vec::new(),
            only: Vec::new(),
            timeout_ms: None,
            format: "pretty".to_string(),
        }
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::parse_from([
            "restcheck",
            "run",
            "--base-url",
            "http://localhost:3000",
            "--suite",
            "users",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:3000"));
                assert_eq!(args.suites, vec!["users".to_string()]);
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = RunArgs {
            base_url: Some("http://localhost:3000".to_string()),
            suites: vec!["posts".to_string()],
            timeout_ms: Some(500),
            ..run_args()
        };
        let config = apply_overrides(Config::default(), &args).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.suites, vec![SuiteKind::Posts]);
        assert_eq!(config.timeout_ms, 500);
    }

    #[test]
    fn test_unknown_suite_override_is_error() {
        let args = RunArgs {
            suites: vec!["albums".to_string()],
            ..run_args()
        };
        assert!(apply_overrides(Config::default(), &args).is_err());
    }

    #[test]
    fn test_invalid_format_exits_with_error() {
        let args = RunArgs {
            format: "xml".to_string(),
            ..run_args()
        };
        assert_eq!(run_checks(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("restcheck.yaml");
        let args = InitArgs {
            output: output.clone(),
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        let config = Config::parse_file(&output).unwrap();
        assert_eq!(config, Config::default());

        // refuses to overwrite
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_unknown_scenario_exits_with_error() {
        let args = UserArgs {
            scenario: "superuser".to_string(),
            random: false,
        };
        assert_eq!(print_user(&args).unwrap(), EXIT_ERROR);
    }
}
