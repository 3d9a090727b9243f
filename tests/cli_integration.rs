//! CLI integration tests
//!
//! These tests run the built binary and verify:
//! - Command parsing and help output
//! - Report formats
//! - Exit codes for configuration and runtime errors

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn stackprobe_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stackprobe"))
}

fn run(args: &[&str]) -> Output {
    run_with_env(args, &[])
}

fn run_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(stackprobe_bin());
    command
        .args(args)
        .env_remove("STACKPROBE_REGISTRY")
        .env_remove("STACKPROBE_CATALOG")
        .env_remove("STACKPROBE_MAX_FILES")
        .env_remove("STACKPROBE_LOG_LEVEL")
        .env_remove("STACKPROBE_LOG_JSON")
        .env_remove("RUST_LOG");
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output().expect("Failed to execute stackprobe")
}

fn create_django_repo(dir: &TempDir) -> PathBuf {
    let repo_path = dir.path().to_path_buf();
    fs::write(repo_path.join("manage.py"), "import django\n").expect("Failed to write manage.py");
    fs::write(repo_path.join("requirements.txt"), "Django>=5.0\n")
        .expect("Failed to write requirements.txt");
    repo_path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stackprobe"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("platforms"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_detect_json_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);

    let output = run(&["detect", path_arg(&repo), "--format", "json", "--maturity", "40"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");

    let top = &report["detection"]["ranked"][0];
    assert_eq!(top["platform_id"], "django");
    assert_eq!(top["confidence_tier"], "medium");
    assert_eq!(top["aggregate_score"], 70.0);
    assert_eq!(report["recommendations"]["provisional"], false);
    assert_eq!(report["recommendations"]["maturity_estimate"], 40.0);
    assert!(!report["recommendations"]["recommendations"]
        .as_array()
        .expect("recommendation list")
        .is_empty());
}

#[test]
fn test_detect_yaml_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);

    let output = run(&["detect", path_arg(&repo), "--format", "yaml"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("platform_id: django"));
}

#[test]
fn test_detect_human_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);

    let output = run(&["detect", path_arg(&repo)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Django"));
    assert!(stdout.contains("medium"));
}

#[test]
fn test_detect_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);
    let out_dir = TempDir::new().unwrap();
    let out_file = out_dir.path().join("report.json");

    let output = run(&[
        "detect",
        path_arg(&repo),
        "--format",
        "json",
        "--output",
        path_arg(&out_file),
    ]);

    assert!(output.status.success());
    let written = fs::read_to_string(&out_file).expect("report written");
    assert!(written.contains("\"django\""));
}

#[test]
fn test_detect_empty_project_is_undetermined() {
    let dir = TempDir::new().unwrap();

    let output = run(&["detect", path_arg(dir.path()), "--format", "json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["detection"]["ranked"].as_array().map(Vec::len), Some(0));
    assert_eq!(report["recommendations"]["provisional"], true);
}

#[test]
fn test_detect_missing_path_fails() {
    let output = run(&["detect", "/nonexistent/stackprobe/project"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_detect_invalid_registry_is_config_error() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);
    let registry = dir.path().join("broken.toml");
    fs::write(&registry, "version = \"1\"\n[[platform]]\nid = \"\"\n").unwrap();

    let output = run(&["detect", path_arg(&repo), "--registry", path_arg(&registry)]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_detect_rejects_out_of_range_maturity() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);

    let output = run(&["detect", path_arg(&repo), "--maturity", "150"]);

    assert!(!output.status.success());
}

#[test]
fn test_platforms_listing() {
    let output = run(&["platforms", "--format", "json"]);

    assert!(output.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = listing["platforms"]
        .as_array()
        .expect("platform array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert!(ids.contains(&"django"));
    assert!(ids.contains(&"spring-boot"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let output = run(&["-v", "-q", "platforms"]);
    assert!(!output.status.success());
}

#[test]
fn test_platforms_reads_registry_from_environment() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("platforms.toml");
    fs::write(
        &registry,
        r#"version = "custom-1"

[[platform]]
id = "tinyweb"
name = "TinyWeb"
framework_files = [{ pattern = "tinyweb.conf", strength = 1.0 }]
dependencies = []
build_configs = []
environment = []
"#,
    )
    .unwrap();

    let output = run_with_env(
        &["platforms", "--format", "json"],
        &[("STACKPROBE_REGISTRY", path_arg(&registry))],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = listing["platforms"]
        .as_array()
        .expect("platform array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["tinyweb"]);
}

#[test]
fn test_platforms_flag_overrides_environment_registry() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "version = \"1\"\n[[platform]]\nid = \"\"\n").unwrap();
    let valid = dir.path().join("valid.toml");
    fs::write(
        &valid,
        concat!(
            "version = \"2\"\n[[platform]]\nid = \"tinyweb\"\nname = \"TinyWeb\"\n",
            "framework_files = [{ pattern = \"tinyweb.conf\" }]\n",
            "dependencies = []\nbuild_configs = []\nenvironment = []\n",
        ),
    )
    .unwrap();

    let from_env = run_with_env(&["platforms"], &[("STACKPROBE_REGISTRY", path_arg(&broken))]);
    assert_eq!(from_env.status.code(), Some(2));

    let output = run_with_env(
        &["platforms", "--format", "json", "--registry", path_arg(&valid)],
        &[("STACKPROBE_REGISTRY", path_arg(&broken))],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("tinyweb"));
}

#[test]
fn test_invalid_environment_log_level_is_config_error() {
    for command in [&["platforms"][..], &["detect", "."][..]] {
        let output = run_with_env(command, &[("STACKPROBE_LOG_LEVEL", "loud")]);
        assert_eq!(output.status.code(), Some(2), "command {:?}", command);
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
    }
}

#[test]
fn test_environment_log_level_reaches_subscriber() {
    let dir = TempDir::new().unwrap();
    let repo = create_django_repo(&dir);

    let quiet = run(&["detect", path_arg(&repo), "--format", "json"]);
    assert!(quiet.status.success());
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("DEBUG"));

    let chatty = run_with_env(
        &["detect", path_arg(&repo), "--format", "json"],
        &[("STACKPROBE_LOG_LEVEL", "debug")],
    );
    assert!(chatty.status.success());
    assert!(String::from_utf8_lossy(&chatty.stderr).contains("DEBUG"));

    // -q outranks the environment
    let silenced = run_with_env(
        &["-q", "detect", path_arg(&repo), "--format", "json"],
        &[("STACKPROBE_LOG_LEVEL", "debug")],
    );
    assert!(silenced.status.success());
    assert!(!String::from_utf8_lossy(&silenced.stderr).contains("DEBUG"));
}
