use holehe_maltego::cli::{Cli, Commands, ConfigAction};
use holehe_maltego::config::{Config, ConfigOverrides};
use holehe_maltego::entities::TransformResponse;
use holehe_maltego::error::{HoleheError, Result};
use holehe_maltego::input;
use holehe_maltego::transform;
use holehe_maltego::transport::{self, OutputFormat};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // stdout is reserved for the response document
    init_logging(cli.verbose);

    match cli.command {
        Commands::Local { ref email, .. } => {
            let identifier = input::resolve_identifier(None, email.as_deref());
            cmd_transform(&cli, &identifier, None)?;
        }
        Commands::Trx { ref email } => {
            let request = read_stdin_request();
            let identifier = input::resolve_identifier(request.as_deref(), email.as_deref());
            cmd_transform(&cli, &identifier, None)?;
        }
        Commands::Parse {
            ref email,
            ref file,
        } => {
            let captured = read_captured(file.as_deref())?;
            cmd_transform(&cli, email, Some(&captured))?;
        }
        Commands::Config { ref action } => {
            cmd_config(cli.config.clone(), action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "holehe_maltego=debug"
    } else {
        "holehe_maltego=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the pipeline and write exactly one response document to stdout
///
/// With `captured`, holehe is not run and the given output is classified.
fn cmd_transform(cli: &Cli, identifier: &str, captured: Option<&str>) -> Result<()> {
    let config = load_config(cli);
    let format = match &config {
        Ok(config) => config.output.format,
        Err(_) => cli.format.unwrap_or_default(),
    };

    let response = transform::response_for(config.as_ref(), identifier, captured);

    write_response(&response, format)
}

fn write_response(response: &TransformResponse, format: OutputFormat) -> Result<()> {
    let document = transport::render(response, format)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| HoleheError::Io {
            source: e,
            context: "Failed to write response".to_string(),
        })
}

/// Load configuration with command-line overrides applied
fn load_config(cli: &Cli) -> Result<Config> {
    let overrides = ConfigOverrides {
        binary: cli.binary.clone(),
        timeout_secs: cli.timeout,
        format: cli.format,
    };

    Config::load_with_overrides(cli.config.as_deref(), &overrides)
}

/// Body of the TRX request, if stdin is not a terminal and not empty
fn read_stdin_request() -> Option<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    let mut request = String::new();
    match stdin.read_to_string(&mut request) {
        Ok(_) if !request.trim().is_empty() => Some(request),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Failed to read request from stdin: {}", e);
            None
        }
    }
}

fn read_captured(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| HoleheError::Io {
            source: e,
            context: format!("Failed to read captured output: {:?}", path),
        }),
        None => {
            let mut captured = String::new();
            std::io::stdin()
                .read_to_string(&mut captured)
                .map_err(|e| HoleheError::Io {
                    source: e,
                    context: "Failed to read captured output from stdin".to_string(),
                })?;
            Ok(captured)
        }
    }
}

fn cmd_config(config_path: Option<PathBuf>, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default(config_path.as_deref())?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| HoleheError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;

            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file.clone().or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            match config.resolve_binary() {
                Ok(binary) if binary.exists() => println!("  holehe: {}", binary.display()),
                Ok(binary) => println!("  holehe: {} (missing)", binary.display()),
                Err(e) => println!("  holehe: cannot resolve ({})", e),
            }
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| HoleheError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
