use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Platform detection and production-readiness recommendations
#[derive(Parser, Debug)]
#[command(
    name = "stackprobe",
    about = "Detect a project's platforms and recommend production-readiness enhancements",
    version,
    long_about = "stackprobe scans a project's files, dependency manifests, build descriptors \
                  and environment templates, scores every known platform on that evidence and \
                  ranks production-readiness recommendations for the detected platforms."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect platforms in a project",
        long_about = "Collects evidence from the project directory, scores every registered \
                      platform and prints the ranking with prioritized recommendations.\n\n\
                      Examples:\n  \
                      stackprobe detect\n  \
                      stackprobe detect /path/to/project\n  \
                      stackprobe detect --format json --maturity 60"
    )]
    Detect(DetectArgs),

    #[command(
        about = "List registered platforms",
        long_about = "Prints the platforms known to the registry with their pattern counts.\n\n\
                      Examples:\n  \
                      stackprobe platforms\n  \
                      stackprobe platforms --registry ./platforms.toml --format yaml"
    )]
    Platforms(PlatformsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'm',
        long,
        value_name = "SCORE",
        value_parser = parse_maturity,
        help = "Project maturity estimate 0-100 (estimated from the project when omitted)"
    )]
    pub maturity: Option<f64>,

    #[arg(long, value_name = "FILE", help = "Platform registry TOML file")]
    pub registry: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Recommendation catalog TOML file")]
    pub catalog: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlatformsArgs {
    #[arg(long, value_name = "FILE", help = "Platform registry TOML file")]
    pub registry: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_maturity(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid maturity: {}. Expected a number from 0 to 100", s))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("Maturity {} is outside 0-100", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_detect_args() {
        let args = CliArgs::parse_from(["stackprobe", "detect"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Human);
                assert!(detect_args.project_path.is_none());
                assert!(detect_args.maturity.is_none());
                assert!(detect_args.registry.is_none());
                assert!(detect_args.catalog.is_none());
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_detect_with_options() {
        let args = CliArgs::parse_from([
            "stackprobe",
            "detect",
            "/tmp/project",
            "--format",
            "json",
            "--maturity",
            "42.5",
            "--registry",
            "platforms.toml",
        ]);

        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.project_path, Some(PathBuf::from("/tmp/project")));
                assert_eq!(detect_args.format, OutputFormatArg::Json);
                assert_eq!(detect_args.maturity, Some(42.5));
                assert_eq!(detect_args.registry, Some(PathBuf::from("platforms.toml")));
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_maturity_out_of_range_is_rejected() {
        assert!(CliArgs::try_parse_from(["stackprobe", "detect", "--maturity", "120"]).is_err());
        assert!(CliArgs::try_parse_from(["stackprobe", "detect", "--maturity", "high"]).is_err());
    }

    #[test]
    fn test_platforms_command() {
        let args = CliArgs::parse_from(["stackprobe", "platforms", "--format", "yaml"]);
        match args.command {
            Commands::Platforms(platforms_args) => {
                assert_eq!(platforms_args.format, OutputFormatArg::Yaml);
                assert!(platforms_args.registry.is_none());
            }
            _ => panic!("Expected Platforms command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["stackprobe", "-v", "detect"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["stackprobe", "--log-level", "debug", "platforms"]);
        assert_eq!(args.log_level, Some("debug".to_string()));

        assert!(CliArgs::try_parse_from(["stackprobe", "-v", "-q", "detect"]).is_err());
    }
}
