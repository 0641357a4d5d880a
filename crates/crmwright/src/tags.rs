//! Scenario tags, execution mode and tag filter expressions.
//!
//! Tags carry no meaning beyond string matching, with one exception:
//! `@mode:serial` (or `@serial`) makes a scenario run on its own, in file
//! order, sharing its feature's browser page.

use crate::result::{CrmError, CrmResult};
use cucumber::gherkin::tagexpr::TagOperation;
use cucumber::tag::Ext as _;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Tag that requests serial execution
pub const SERIAL_TAG: &str = "mode:serial";

/// A scenario or feature tag, stored without its leading `@`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Create a tag, with or without the leading `@`
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().trim_start_matches('@').to_string())
    }

    /// Tag name without `@`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this tag requests serial execution
    #[must_use]
    pub fn is_serial(&self) -> bool {
        self.0 == SERIAL_TAG || self.0 == "serial"
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// How a scenario is scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Alone, in file order, on the feature's shared page
    Serial,
    /// Concurrently with other parallel scenarios, on a fresh page
    #[default]
    Parallel,
}

impl ExecutionMode {
    /// Mode from the tags of a feature and one of its scenarios
    #[must_use]
    pub fn from_tags<F, S>(feature_tags: &[F], scenario_tags: &[S]) -> Self
    where
        F: AsRef<str>,
        S: AsRef<str>,
    {
        let serial = feature_tags
            .iter()
            .map(AsRef::as_ref)
            .chain(scenario_tags.iter().map(AsRef::as_ref))
            .any(|t| Tag::new(t).is_serial());
        if serial {
            Self::Serial
        } else {
            Self::Parallel
        }
    }

    /// Whether this is serial mode
    #[must_use]
    pub const fn is_serial(self) -> bool {
        matches!(self, Self::Serial)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.pad("serial"),
            Self::Parallel => f.pad("parallel"),
        }
    }
}

/// Boolean filter over tags, e.g. `@smoke and not (@slow or @wip)`.
///
/// Same dialect as the runner's `--tags`: every tag needs its `@`, keywords
/// are lowercase.
#[derive(Debug, Clone)]
pub struct TagExpression {
    source: String,
    operation: TagOperation,
}

impl TagExpression {
    /// Parse an expression
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::TagExpression`] for empty or malformed input
    pub fn parse(expression: &str) -> CrmResult<Self> {
        let source = expression.trim();
        let operation = source
            .parse::<TagOperation>()
            .map_err(|e| CrmError::TagExpression {
                expression: expression.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            operation,
        })
    }

    /// Evaluate against a scenario's tags (with or without `@`)
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.operation
            .eval(tags.iter().map(|t| Tag::new(t.as_ref()).0))
    }
}

impl FromStr for TagExpression {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod tag_tests {
        use super::*;

        #[test]
        fn test_at_prefix_is_optional() {
            assert_eq!(Tag::new("@smoke"), Tag::new("smoke"));
            assert_eq!(Tag::new("smoke").to_string(), "@smoke");
        }

        #[test]
        fn test_serial_tags() {
            assert!(Tag::new("@mode:serial").is_serial());
            assert!(Tag::new("serial").is_serial());
            assert!(!Tag::new("@mode:parallel").is_serial());
        }
    }

    mod mode_tests {
        use super::*;

        #[test]
        fn test_serial_from_scenario_tag() {
            let mode = ExecutionMode::from_tags(&["regression"], &["@mode:serial"]);
            assert_eq!(mode, ExecutionMode::Serial);
        }

        #[test]
        fn test_serial_from_feature_tag() {
            let none: [&str; 0] = [];
            let mode = ExecutionMode::from_tags(&["mode:serial"], &none);
            assert!(mode.is_serial());
        }

        #[test]
        fn test_parallel_by_default() {
            let mode = ExecutionMode::from_tags(&["@smoke"], &["@accounts"]);
            assert_eq!(mode, ExecutionMode::Parallel);
            assert_eq!(mode.to_string(), "parallel");
        }
    }

    mod expression_tests {
        use super::*;

        #[test]
        fn test_single_tag() {
            let expr = TagExpression::parse("@smoke").unwrap();
            assert!(expr.matches(&["smoke"]));
            assert!(expr.matches(&["@smoke"]));
            assert!(!expr.matches(&["regression"]));
        }

        #[test]
        fn test_and_not() {
            let expr: TagExpression = "@accounts and not @wip".parse().unwrap();
            assert!(expr.matches(&["@accounts", "@smoke"]));
            assert!(!expr.matches(&["@accounts", "@wip"]));
            assert!(!expr.matches(&["@contacts"]));
            assert_eq!(expr.to_string(), "@accounts and not @wip");
        }

        #[test]
        fn test_parentheses() {
            let expr = TagExpression::parse("(@a or @b) and not @wip").unwrap();
            assert!(expr.matches(&["@b"]));
            assert!(!expr.matches(&["@b", "@wip"]));
            assert!(!expr.matches(&["@c"]));
        }

        #[test]
        fn test_namespaced_tag() {
            let expr = TagExpression::parse("@mode:serial").unwrap();
            assert!(expr.matches(&["mode:serial"]));
        }

        #[test]
        fn test_errors() {
            for bad in ["", "smoke", "@a and", "(@a or @b"] {
                let err = TagExpression::parse(bad).unwrap_err();
                assert!(
                    matches!(err, CrmError::TagExpression { .. }),
                    "{bad:?} gave {err}"
                );
            }
        }
    }

    mod mode_format_tests {
        use super::*;

        #[test]
        fn test_mode_pads_and_serializes() {
            assert_eq!(format!("{:<8}|", ExecutionMode::Serial), "serial  |");
            let yaml = serde_yaml_ng::to_string(&ExecutionMode::Parallel).unwrap();
            assert_eq!(yaml.trim(), "parallel");
        }
    }

    proptest! {
        #[test]
        fn prop_not_inverts(tag in "[a-z]{1,8}", present in any::<bool>()) {
            let tags: Vec<String> = if present { vec![tag.clone()] } else { vec![] };
            let plain = TagExpression::parse(&format!("@{tag}")).unwrap();
            let negated = TagExpression::parse(&format!("not @{tag}")).unwrap();
            prop_assert_eq!(plain.matches(&tags), present);
            prop_assert_eq!(negated.matches(&tags), !present);
        }
    }
}
