//! Command handlers; each returns the process exit code

use super::commands::{DetectArgs, PlatformsArgs};
use super::output::{DetectionReport, OutputFormatter, PlatformSummary};
use crate::config::ProbeConfig;
use crate::detection::detect_platforms;
use crate::evidence::{estimate_maturity, EvidenceCollector};
use crate::recommend::recommend;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

/// Runs `detect` with the environment configuration; command-line paths win
pub fn handle_detect(args: &DetectArgs, mut config: ProbeConfig, quiet: bool) -> i32 {
    if let Some(registry) = &args.registry {
        config.registry_path = Some(registry.clone());
    }
    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.clone());
    }

    let loaded = config
        .load_registry()
        .and_then(|registry| Ok((registry, config.load_catalog()?)));
    let (registry, catalog) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load catalogs: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_CONFIG;
        }
    };
    for unknown in catalog.unknown_platforms(&registry) {
        warn!(platform = %unknown, "Recommendation catalog references a platform the registry does not define");
    }

    let project = args
        .project_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let result = (|| -> Result<String> {
        let evidence = EvidenceCollector::with_config(&registry, config.collector_config())
            .collect(&project)
            .with_context(|| format!("Failed to collect evidence from {}", project.display()))?;

        let detection = detect_platforms(&evidence, &registry);
        let maturity = args
            .maturity
            .unwrap_or_else(|| estimate_maturity(&evidence));
        debug!(maturity, explicit = args.maturity.is_some(), "Maturity estimate");

        let recommendations = recommend(detection.multi_platform(), maturity, &catalog);
        let report = DetectionReport {
            project: project.clone(),
            detection,
            recommendations,
        };

        OutputFormatter::new(args.format.into()).format_report(&report)
    })();

    match result {
        Ok(rendered) => match write_output(&rendered, args.output.as_deref(), quiet) {
            Ok(()) => EXIT_OK,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILURE
            }
        },
        Err(e) => {
            error!("Detection failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

pub fn handle_platforms(args: &PlatformsArgs, mut config: ProbeConfig) -> i32 {
    if let Some(registry) = &args.registry {
        config.registry_path = Some(registry.clone());
    }

    let registry = match config.load_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG;
        }
    };

    let summaries = PlatformSummary::from_registry(&registry);
    match OutputFormatter::new(args.format.into()).format_platforms(registry.version(), &summaries) {
        Ok(rendered) => {
            println!("{}", rendered);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn write_output(rendered: &str, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                eprintln!("Report written to {}", path.display());
            }
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
