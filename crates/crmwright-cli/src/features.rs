//! Feature catalog: scenarios, tags and execution mode
//!
//! Parses every `.feature` file below a directory with the Gherkin parser
//! bundled in `cucumber`, without running anything.

use crate::error::{CliError, CliResult};
use crmwright::{ExecutionMode, Tag, TagExpression};
use cucumber::gherkin::{Feature, GherkinEnv, Scenario};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One scenario found in a feature file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioEntry {
    /// Feature title
    pub feature: String,
    /// Feature file
    pub path: PathBuf,
    /// Scenario title
    pub name: String,
    /// Line of the scenario keyword
    pub line: usize,
    /// Effective tags (feature, rule and scenario), without `@`
    pub tags: Vec<String>,
    /// How the runner schedules it
    pub mode: ExecutionMode,
}

impl ScenarioEntry {
    /// Whether the scenario runs in serial mode
    #[must_use]
    pub const fn is_serial(&self) -> bool {
        self.mode.is_serial()
    }
}

/// Every `.feature` file below `dir`, sorted
pub fn discover(dir: &Path) -> CliResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::invalid_argument(format!(
            "feature directory not found: {}",
            dir.display()
        )));
    }
    let pattern = dir.join("**").join("*.feature");
    let pattern = pattern.to_string_lossy();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| CliError::invalid_argument(e.to_string()))?
        .filter_map(Result::ok)
        .collect();
    files.sort();
    Ok(files)
}

/// Scenarios of one feature file, in file order
pub fn scenarios_in(path: &Path) -> CliResult<Vec<ScenarioEntry>> {
    let feature =
        Feature::parse_path(path, GherkinEnv::default()).map_err(|e| CliError::FeatureParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut entries = Vec::new();
    for scenario in &feature.scenarios {
        entries.push(entry(&feature, path, &[], scenario));
    }
    for rule in &feature.rules {
        for scenario in &rule.scenarios {
            entries.push(entry(&feature, path, &rule.tags, scenario));
        }
    }
    entries.sort_by_key(|e| e.line);
    Ok(entries)
}

fn entry(feature: &Feature, path: &Path, rule_tags: &[String], scenario: &Scenario) -> ScenarioEntry {
    let mut tags: Vec<String> = Vec::new();
    for tag in feature.tags.iter().chain(rule_tags).chain(&scenario.tags) {
        let name = Tag::new(tag).name().to_string();
        if !tags.contains(&name) {
            tags.push(name);
        }
    }
    let mode = ExecutionMode::from_tags(&feature.tags, &tags);
    ScenarioEntry {
        feature: feature.name.clone(),
        path: path.to_path_buf(),
        name: scenario.name.clone(),
        line: scenario.position.line,
        tags,
        mode,
    }
}

/// All scenarios below `dir`, filtered by an optional tag expression
pub fn catalog(dir: &Path, filter: Option<&str>) -> CliResult<Vec<ScenarioEntry>> {
    let filter = filter.map(str::parse::<TagExpression>).transpose()?;
    let mut all = Vec::new();
    for file in discover(dir)? {
        all.extend(scenarios_in(&file)?);
    }
    if let Some(filter) = filter {
        all.retain(|e| filter.matches(&e.tags));
    }
    tracing::debug!(dir = %dir.display(), count = all.len(), "scenarios catalogued");
    Ok(all)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ACCOUNTS: &str = "\
@accounts
Feature: Accounts

  @smoke
  Scenario: Create an account
    Given I am logged in
    When I create a new \"Account\" with:
      | Name | Acme |

  @wip
  Scenario: Draft account
    Given I am logged in
";

    const CASES: &str = "\
@mode:serial @cases
Feature: Case lifecycle

  Scenario: Open a case
    Given I am logged in

  Scenario: Close the case
    Given I am logged in
";

    fn features_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("accounts.feature"), ACCOUNTS).unwrap();
        std::fs::create_dir(dir.path().join("service")).unwrap();
        std::fs::write(dir.path().join("service/cases.feature"), CASES).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a feature").unwrap();
        dir
    }

    mod discover_tests {
        use super::*;

        #[test]
        fn test_finds_nested_feature_files() {
            let dir = features_dir();
            let files = discover(dir.path()).unwrap();
            assert_eq!(files.len(), 2);
            assert!(files.iter().all(|f| f.extension().unwrap() == "feature"));
        }

        #[test]
        fn test_missing_dir_is_invalid_argument() {
            let err = discover(Path::new("/definitely/not/here")).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn test_tags_are_merged_and_stripped() {
            let dir = features_dir();
            let entries = scenarios_in(&dir.path().join("accounts.feature")).unwrap();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].name, "Create an account");
            assert_eq!(entries[0].tags, vec!["accounts", "smoke"]);
            assert!(!entries[0].is_serial());
            assert!(entries[0].line < entries[1].line);
        }

        #[test]
        fn test_serial_feature_marks_every_scenario() {
            let dir = features_dir();
            let entries = scenarios_in(&dir.path().join("service/cases.feature")).unwrap();
            assert_eq!(entries.len(), 2);
            assert!(entries.iter().all(ScenarioEntry::is_serial));
            assert_eq!(entries[0].feature, "Case lifecycle");
        }

        #[test]
        fn test_parse_error_names_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("broken.feature");
            std::fs::write(&path, "this is not gherkin\n  at all |").unwrap();
            let err = scenarios_in(&path).unwrap_err();
            assert!(err.to_string().contains("broken.feature"));
        }
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn test_unfiltered() {
            let dir = features_dir();
            assert_eq!(catalog(dir.path(), None).unwrap().len(), 4);
        }

        #[test]
        fn test_filter_by_expression() {
            let dir = features_dir();
            let smoke = catalog(dir.path(), Some("@smoke")).unwrap();
            assert_eq!(smoke.len(), 1);

            let not_wip = catalog(dir.path(), Some("not @wip")).unwrap();
            assert_eq!(not_wip.len(), 3);

            let serial = catalog(dir.path(), Some("@mode:serial and @cases")).unwrap();
            assert_eq!(serial.len(), 2);
        }

        #[test]
        fn test_bad_expression() {
            let dir = features_dir();
            for bad in ["@a and", "smoke"] {
                let err = catalog(dir.path(), Some(bad)).unwrap_err();
                assert!(matches!(err, CliError::Crm(_)), "{bad:?} gave {err}");
            }
        }

        #[test]
        fn test_serializes_to_json() {
            let dir = features_dir();
            let entries = catalog(dir.path(), Some("@smoke")).unwrap();
            let json = serde_json::to_string(&entries).unwrap();
            assert!(json.contains("\"mode\":\"parallel\""));
            assert_eq!(entries[0].mode, ExecutionMode::Parallel);
        }
    }
}
