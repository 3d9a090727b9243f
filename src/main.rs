use stackprobe::cli::commands::{CliArgs, Commands};
use stackprobe::cli::handlers::{handle_detect, handle_platforms, EXIT_CONFIG};
use stackprobe::util::logging::{init_default, init_logging, parse_level, LoggingConfig};
use stackprobe::{ProbeConfig, VERSION};

use clap::Parser;
use tracing::{debug, error, Level};

fn main() {
    let args = CliArgs::parse();

    let config = match ProbeConfig::from_env().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            init_default();
            error!("Invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    init_logging(logging_config_from_args(&args, &config));

    debug!("stackprobe v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!(config = ?config, "Configuration loaded");

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, config, args.quiet),
        Commands::Platforms(platforms_args) => handle_platforms(platforms_args, config),
    };

    std::process::exit(exit_code);
}

/// `--log-level` beats `-v`/`-q`, which beat `STACKPROBE_LOG_LEVEL`
fn logging_config_from_args(args: &CliArgs, config: &ProbeConfig) -> LoggingConfig {
    let mut logging = config.logging_config();

    if let Some(level_str) = &args.log_level {
        let configured = logging.level;
        logging.level = parse_level(level_str).unwrap_or_else(|| {
            eprintln!(
                "Invalid log level '{}', keeping {}. Valid levels: trace, debug, info, warn, error",
                level_str, configured
            );
            configured
        });
    } else if args.verbose {
        logging.level = Level::DEBUG;
    } else if args.quiet {
        logging.level = Level::ERROR;
    }

    logging
}
