pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, OutputFormatArg, PlatformsArgs};
pub use output::{DetectionReport, OutputFormat, OutputFormatter, PlatformSummary};
