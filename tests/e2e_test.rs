/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(relative: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
        .to_string_lossy()
        .into_owned()
}

/// Arguments for the fixture shop model, writing into `output_dir`
fn shop_args(output_dir: &Path) -> Vec<String> {
    vec![
        "--config-file".to_string(),
        fixture("shop/config.yaml"),
        "--resources-file".to_string(),
        fixture("shop/resources.yaml"),
        "--defaults-file".to_string(),
        fixture("shop/defaults.yaml"),
        "--security-checks-file".to_string(),
        fixture("shop/security_checks.yaml"),
        "--output-dir".to_string(),
        output_dir.to_string_lossy().into_owned(),
        "--no-render".to_string(),
    ]
}

/// Files written into `dir`, sorted by name
fn artefacts(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read_artefact(dir: &Path, extension: &str) -> String {
    let name = artefacts(dir)
        .into_iter()
        .find(|name| name.starts_with("report-") && name.ends_with(extension))
        .unwrap_or_else(|| panic!("no report-*{} in {}", extension, dir.display()));
    fs::read_to_string(dir.join(name)).unwrap()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("tmac")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--fail-on-severity"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("tmac")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("tmac").arg("--invalid-option").assert().code(2);
    }

    /// Exit code 2: Invalid snapshot format value
    #[test]
    fn test_exit_code_invalid_snapshot_format() {
        cargo_bin_cmd!("tmac")
            .args(["--demo", "--snapshot-format", "xml"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Required inputs missing and no dotfile
    #[test]
    fn test_exit_code_missing_inputs() {
        let cwd = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .current_dir(cwd.path())
            .args(["--config-file", "config.yaml"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--resources-file"));
    }

    /// Exit code 1: Findings at or above the gate
    #[test]
    fn test_exit_code_findings_detected() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .args(["--fail-on-severity", "1"])
            .assert()
            .code(1);
    }

    /// Exit code 0: Findings below the gate
    #[test]
    fn test_exit_code_findings_below_gate() {
        let out = TempDir::new().unwrap();
        let mut args = shop_args(out.path());
        let checks = args
            .iter()
            .position(|a| a == "--security-checks-file")
            .unwrap();
        args[checks + 1] = fixture("checks/clean.yaml");

        cargo_bin_cmd!("tmac")
            .args(args)
            .args(["--fail-on-severity", "4"])
            .assert()
            .code(0);
    }

    /// Exit code 3: Output directory does not exist
    #[test]
    fn test_exit_code_missing_output_dir() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(&out.path().join("missing")))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid output directory"));
    }
}

mod artefact_tests {
    use super::*;

    #[test]
    fn test_report_and_yaml_snapshot_written() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .assert()
            .success()
            .stderr(predicate::str::contains("Report written to"));

        let names = artefacts(out.path());
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("report-") && names[0].ends_with(".md"));
        assert!(names[1].ends_with(".yaml"));

        let report = read_artefact(out.path(), ".md");
        assert!(report.starts_with("# Fixture Shop\n"));
        assert!(report.contains("```plantuml\n@startuml report-"));
        assert!(!report.contains("![Diagram]"));
        assert!(report.contains("| Unauthenticated access | portal |"));

        let snapshot: serde_json::Value =
            serde_yaml_ng::from_str(&read_artefact(out.path(), ".yaml")).unwrap();
        assert_eq!(snapshot["users"]["alice"]["company_device"], false);
        assert_eq!(snapshot["networks"]["office"]["has_wifi"], true);
        assert!(snapshot["containers"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_json_snapshot() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .args(["--snapshot-format", "json"])
            .assert()
            .success();

        let snapshot: serde_json::Value =
            serde_json::from_str(&read_artefact(out.path(), ".json")).unwrap();
        let categories: Vec<_> = snapshot.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            categories,
            vec!["networks", "users", "databases", "systems", "containers"]
        );
    }

    #[test]
    fn test_swagger_import() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .args(["--swagger-file", &fixture("shop/swagger.json")])
            .assert()
            .success();

        let report = read_artefact(out.path(), ".md");
        assert!(report.contains("\tContainer(_api_login, \"/api/login\", \"Starts a session\")"));
    }

    #[test]
    fn test_stdout_writes_no_files() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .arg("--stdout")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("# Fixture Shop\n"))
            .stdout(predicate::str::contains("# Findings"));

        assert!(artefacts(out.path()).is_empty());
    }

    #[test]
    fn test_demo_mode() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(["--demo", "--no-render", "--stdout"])
            .assert()
            .success()
            .stdout(predicate::str::contains("# Demo Online Shop"))
            .stdout(predicate::str::contains("Container(_api_user, \"/api/user\""));

        assert!(artefacts(out.path()).is_empty());
    }

    #[test]
    fn test_missing_renderer_is_a_warning() {
        let out = TempDir::new().unwrap();
        let mut args = shop_args(out.path());
        args.retain(|a| a != "--no-render");

        cargo_bin_cmd!("tmac")
            .env("PATH", "")
            .args(args)
            .assert()
            .success()
            .stderr(predicate::str::contains("plantuml was not found"));

        assert!(!read_artefact(out.path(), ".md").contains("![Diagram]"));
    }
}

mod failure_tests {
    use super::*;

    fn with_checks(output_dir: &Path, checks: &str) -> Vec<String> {
        let mut args = shop_args(output_dir);
        let position = args
            .iter()
            .position(|a| a == "--security-checks-file")
            .unwrap();
        args[position + 1] = fixture(checks);
        args
    }

    #[test]
    fn test_missing_attribute_aborts_without_artefacts() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(with_checks(out.path(), "checks/missing_attribute.yaml"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Security check 'firewall' failed on resource 'office'"));

        assert!(artefacts(out.path()).is_empty());
    }

    #[test]
    fn test_missing_attribute_lenient() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(with_checks(out.path(), "checks/missing_attribute.yaml"))
            .arg("--lenient-missing-attributes")
            .assert()
            .success();

        assert!(read_artefact(out.path(), ".md").contains("| Missing firewall | office |"));
    }

    #[test]
    fn test_invalid_query_is_rule_definition_error() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(with_checks(out.path(), "checks/invalid_query.yaml"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid security check 'broken'"));
    }

    #[test]
    fn test_duplicate_resource_names() {
        let out = TempDir::new().unwrap();
        let mut args = shop_args(out.path());
        let position = args.iter().position(|a| a == "--resources-file").unwrap();
        args[position + 1] = fixture("invalid/duplicate_resources.yaml");

        cargo_bin_cmd!("tmac")
            .args(args)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("duplicate resource name 'portal'"));

        assert!(artefacts(out.path()).is_empty());
    }

    #[test]
    fn test_missing_container_defaults_with_import() {
        let out = TempDir::new().unwrap();
        let mut args = shop_args(out.path());
        let position = args.iter().position(|a| a == "--defaults-file").unwrap();
        args[position + 1] = fixture("invalid/no_containers_defaults.yaml");

        cargo_bin_cmd!("tmac")
            .args(args)
            .args(["--swagger-file", &fixture("shop/swagger.json")])
            .assert()
            .code(3)
            .stderr(predicate::str::contains(
                "No defaults defined for resource category 'containers'",
            ));
    }

    #[test]
    fn test_empty_swagger_paths() {
        let out = TempDir::new().unwrap();
        cargo_bin_cmd!("tmac")
            .args(shop_args(out.path()))
            .args(["--swagger-file", &fixture("invalid/empty_paths.json")])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("'paths' mapping is empty"));
    }
}
