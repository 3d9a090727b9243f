//! Output formatting for detection reports and registry listings
//!
//! JSON and YAML serialize the report structures as-is; the human format is a
//! compact text rendering for terminals.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

use crate::detection::{ConfidenceTier, Detection, PlatformScore};
use crate::recommend::RecommendationSet;
use crate::stack::{PlatformRegistry, SignalCategory};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Everything `stackprobe detect` reports for one project
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub project: PathBuf,
    pub detection: Detection,
    pub recommendations: RecommendationSet,
}

/// One registry entry as listed by `stackprobe platforms`
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub id: String,
    pub name: String,
    pub framework_files: usize,
    pub dependencies: usize,
    pub build_configs: usize,
    pub environment: usize,
}

impl PlatformSummary {
    pub fn from_registry(registry: &PlatformRegistry) -> Vec<Self> {
        registry
            .definitions()
            .iter()
            .map(|p| Self {
                id: p.id.to_string(),
                name: p.name.clone(),
                framework_files: p.pattern_count(SignalCategory::FrameworkFile),
                dependencies: p.pattern_count(SignalCategory::Dependency),
                build_configs: p.pattern_count(SignalCategory::BuildConfig),
                environment: p.pattern_count(SignalCategory::Environment),
            })
            .collect()
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &DetectionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize detection report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize detection report to YAML")
            }
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_platforms(&self, version: &str, platforms: &[PlatformSummary]) -> Result<String> {
        let listing = serde_json::json!({
            "registry_version": version,
            "platforms": platforms,
        });
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&listing)
                .context("Failed to serialize platform listing to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&listing)
                .context("Failed to serialize platform listing to YAML"),
            OutputFormat::Human => Ok(self.format_platforms_human(version, platforms)),
        }
    }

    fn format_report_human(&self, report: &DetectionReport) -> String {
        let mut output = String::new();
        let detection = &report.detection;

        match detection.top() {
            Some(top) if top.confidence_tier == ConfidenceTier::High => {
                output.push_str("\u{2713} Platform Detection Result\n");
            }
            Some(_) => output.push_str("\u{26A0} Platform Detection Result (Uncertain)\n"),
            None => output.push_str("\u{2717} Platform Detection Result\n"),
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        let _ = writeln!(output, "Project:   {}", report.project.display());
        let _ = writeln!(output, "Registry:  {}", detection.registry_version);
        let _ = writeln!(output);

        if detection.is_undetermined() {
            output.push_str("Platform undetermined: no registered platform matched the evidence.\n");
        } else {
            if detection.is_ambiguous() {
                let ids: Vec<String> = detection
                    .multi_platform()
                    .iter()
                    .map(|s| s.platform_id.to_string())
                    .collect();
                let _ = writeln!(output, "Multiple platforms: {}\n", ids.join(", "));
            }

            output.push_str("Platforms:\n");
            let multi = detection.multi_platform().len();
            for (i, score) in detection.ranked.iter().enumerate() {
                let marker = if i < multi { "\u{25B6}" } else { " " };
                write_platform(&mut output, marker, score);
            }
        }

        let recommendations = &report.recommendations;
        let _ = writeln!(
            output,
            "\nRecommendations (maturity {:.0}){}:",
            recommendations.maturity_estimate,
            if recommendations.provisional {
                " \u{26A0} provisional"
            } else {
                ""
            }
        );
        if recommendations.is_empty() {
            output.push_str("  (none)\n");
        }
        for (i, rec) in recommendations.recommendations.iter().enumerate() {
            let _ = writeln!(
                output,
                "{:>3}. [{:>5.1}] {} ({}, effort: {})",
                i + 1,
                rec.priority_score,
                rec.title,
                rec.category,
                rec.estimated_effort
            );
            let _ = writeln!(output, "            {}", rec.rationale);
        }

        output
    }

    fn format_platforms_human(&self, version: &str, platforms: &[PlatformSummary]) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Platform Registry {}", version);
        output.push_str(RULE);
        output.push_str("\n\n");
        let _ = writeln!(
            output,
            "{:<14} {:<16} {:>6} {:>6} {:>6} {:>6}",
            "ID", "NAME", "FILES", "DEPS", "BUILD", "ENV"
        );
        for p in platforms {
            let _ = writeln!(
                output,
                "{:<14} {:<16} {:>6} {:>6} {:>6} {:>6}",
                p.id, p.name, p.framework_files, p.dependencies, p.build_configs, p.environment
            );
        }
        output
    }
}

fn score_bar(score: f64) -> String {
    let filled = ((score / 10.0).round() as usize).min(10);
    "\u{2588}".repeat(filled) + &"\u{2591}".repeat(10 - filled)
}

fn write_platform(output: &mut String, marker: &str, score: &PlatformScore) {
    let _ = writeln!(
        output,
        "{} {:<16} {} {:>6.2} ({})",
        marker,
        score.name,
        score_bar(score.aggregate_score),
        score.aggregate_score,
        score.confidence_tier
    );
    let breakdown: Vec<String> = SignalCategory::ALL
        .iter()
        .map(|&c| format!("{} {:.0}", c, score.category_score(c)))
        .collect();
    let _ = writeln!(output, "  \u{2514}\u{2500} {}", breakdown.join(", "));
}
