//! Test plan selection state and the directives that shape it.
//!
//! A plan starts from the full discovered package universe and is narrowed
//! by an ordered directive chain; later directives override earlier ones
//! for the same package or test.

use crate::planner::error::PlanError;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// One plan-shaping step. Patterns are anchored at the start of the package
/// name (the catalog appends `$` where a full match is wanted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Include(String),
    Exclude(String),
    IncludeTests(String, Vec<String>),
    ExcludeTests(String, Vec<String>),
}

/// Per-package selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Whole package, minus any tests excluded afterwards.
    All { excluded_tests: Vec<String> },
    /// Only these tests.
    Tests(Vec<String>),
}

impl Selection {
    fn whole() -> Self {
        Selection::All {
            excluded_tests: Vec::new(),
        }
    }

    /// True when no test would run for this entry.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Tests(tests) if tests.is_empty())
    }
}

/// A named package/test selection under construction.
#[derive(Debug, Clone)]
pub struct TestPlan {
    universe: BTreeSet<String>,
    entries: BTreeMap<String, Selection>,
}

impl TestPlan {
    /// Start from the full package set, every package selected whole.
    pub fn new<S: AsRef<str>>(packages: &[S]) -> Self {
        let universe: BTreeSet<String> =
            packages.iter().map(|p| p.as_ref().to_string()).collect();
        let entries = universe
            .iter()
            .map(|p| (p.clone(), Selection::whole()))
            .collect();
        Self { universe, entries }
    }

    pub fn apply(&mut self, directive: &Directive) -> Result<(), PlanError> {
        match directive {
            Directive::Include(pattern) => self.include(pattern),
            Directive::Exclude(pattern) => self.exclude(pattern),
            Directive::IncludeTests(package, tests) => {
                self.include_tests(package, tests);
                Ok(())
            }
            Directive::ExcludeTests(package, tests) => {
                self.exclude_tests(package, tests);
                Ok(())
            }
        }
    }

    /// Select every known package matching `pattern` as a whole package,
    /// resetting any earlier per-test filtering for it.
    pub fn include(&mut self, pattern: &str) -> Result<(), PlanError> {
        let re = anchored(pattern)?;
        for package in &self.universe {
            if re.is_match(package) {
                self.entries.insert(package.clone(), Selection::whole());
            }
        }
        Ok(())
    }

    /// Drop every selected package matching `pattern`.
    pub fn exclude(&mut self, pattern: &str) -> Result<(), PlanError> {
        let re = anchored(pattern)?;
        self.entries.retain(|package, _| !re.is_match(package));
        Ok(())
    }

    /// Restrict `package` to exactly `tests`. Unions with an existing
    /// per-test restriction; ignores packages outside the universe.
    pub fn include_tests(&mut self, package: &str, tests: &[impl AsRef<str>]) {
        if !self.universe.contains(package) {
            log::debug!("include_tests: unknown package {package}, ignored");
            return;
        }
        let incoming = tests.iter().map(|t| t.as_ref().to_string());
        match self.entries.get_mut(package) {
            Some(Selection::Tests(existing)) => {
                for test in incoming {
                    if !existing.contains(&test) {
                        existing.push(test);
                    }
                }
            }
            _ => {
                let mut selected = Vec::new();
                for test in incoming {
                    if !selected.contains(&test) {
                        selected.push(test);
                    }
                }
                self.entries
                    .insert(package.to_string(), Selection::Tests(selected));
            }
        }
    }

    /// Remove `tests` from `package`'s selection, keeping the rest, even if
    /// the package was included whole. No-op for unselected packages.
    pub fn exclude_tests(&mut self, package: &str, tests: &[impl AsRef<str>]) {
        let Some(selection) = self.entries.get_mut(package) else {
            return;
        };
        match selection {
            Selection::All { excluded_tests } => {
                for test in tests {
                    let test = test.as_ref().to_string();
                    if !excluded_tests.contains(&test) {
                        excluded_tests.push(test);
                    }
                }
            }
            Selection::Tests(selected) => {
                selected.retain(|t| !tests.iter().any(|x| x.as_ref() == t.as_str()));
            }
        }
    }

    /// Selected entries in package-name order, skipping packages whose
    /// selection ended up empty.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.entries
            .iter()
            .filter(|(_, sel)| !sel.is_empty())
            .map(|(pkg, sel)| (pkg.as_str(), sel))
    }

    pub fn selection(&self, package: &str) -> Option<&Selection> {
        self.entries.get(package).filter(|sel| !sel.is_empty())
    }

    pub fn is_selected(&self, package: &str) -> bool {
        self.selection(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn anchored(pattern: &str) -> Result<Regex, PlanError> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|source| PlanError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packages() -> Vec<&'static str> {
        vec![
            "android.app",
            "android.net",
            "android.performance",
            "android.performance2",
            "com.android.cts.browserbench",
        ]
    }

    #[test]
    fn test_new_plan_selects_everything_whole() {
        let plan = TestPlan::new(&packages());
        assert_eq!(plan.len(), 5);
        assert!(matches!(
            plan.selection("android.app"),
            Some(Selection::All { excluded_tests }) if excluded_tests.is_empty()
        ));
    }

    #[test]
    fn test_exclude_drops_matching_packages() {
        let mut plan = TestPlan::new(&packages());
        plan.exclude(r"android\.performance.*").unwrap();
        assert!(!plan.is_selected("android.performance"));
        assert!(!plan.is_selected("android.performance2"));
        assert!(plan.is_selected("android.app"));
    }

    #[test]
    fn test_include_then_exclude_same_pattern_is_empty() {
        let mut plan = TestPlan::new(&packages());
        plan.exclude(".*").unwrap();
        plan.include(r"android\.net").unwrap();
        plan.exclude(r"android\.net").unwrap();
        assert!(!plan.is_selected("android.net"));

        // Reversed order re-adds the package.
        let mut plan = TestPlan::new(&packages());
        plan.exclude(r"android\.net").unwrap();
        plan.include(r"android\.net").unwrap();
        assert!(plan.is_selected("android.net"));
    }

    #[test]
    fn test_patterns_anchor_at_start() {
        let mut plan = TestPlan::new(&["android.net", "wifi.android.net"]);
        plan.exclude(r"android\.net").unwrap();
        assert!(!plan.is_selected("android.net"));
        assert!(plan.is_selected("wifi.android.net"));
    }

    #[test]
    fn test_dollar_suffix_requires_full_match() {
        let mut plan = TestPlan::new(&["android.media", "android.mediastress"]);
        plan.exclude(".*").unwrap();
        plan.include(r"android\.media$").unwrap();
        assert!(plan.is_selected("android.media"));
        assert!(!plan.is_selected("android.mediastress"));
    }

    #[test]
    fn test_exclude_tests_on_whole_package() {
        let mut plan = TestPlan::new(&packages());
        plan.exclude_tests("android.net", &["cts.DnsTest#testDnsWorks"]);
        match plan.selection("android.net") {
            Some(Selection::All { excluded_tests }) => {
                assert_eq!(excluded_tests, &["cts.DnsTest#testDnsWorks"]);
            }
            other => panic!("unexpected selection: {other:?}"),
        }
    }

    #[test]
    fn test_exclude_tests_on_restricted_package_removes_only_those() {
        let mut plan = TestPlan::new(&packages());
        plan.include_tests("android.net", &["a#1", "a#2", "a#3"]);
        plan.exclude_tests("android.net", &["a#2"]);
        assert_eq!(
            plan.selection("android.net"),
            Some(&Selection::Tests(vec!["a#1".to_string(), "a#3".to_string()]))
        );
    }

    #[test]
    fn test_empty_test_selection_is_omitted() {
        let mut plan = TestPlan::new(&packages());
        plan.include_tests("android.net", &["a#1"]);
        plan.exclude_tests("android.net", &["a#1"]);
        assert!(!plan.is_selected("android.net"));
        assert!(plan.entries().all(|(pkg, _)| pkg != "android.net"));
    }

    #[test]
    fn test_unknown_package_directives_are_noops() {
        let mut plan = TestPlan::new(&packages());
        plan.include_tests("does.not.exist", &["a#1"]);
        plan.exclude_tests("does.not.exist", &["a#1"]);
        assert_eq!(plan.len(), 5);
    }

    #[test]
    fn test_include_resets_test_restriction() {
        let mut plan = TestPlan::new(&packages());
        plan.include_tests("android.net", &["a#1"]);
        plan.include(r"android\.net$").unwrap();
        assert!(matches!(
            plan.selection("android.net"),
            Some(Selection::All { excluded_tests }) if excluded_tests.is_empty()
        ));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut plan = TestPlan::new(&packages());
        let err = plan.include("[unclosed").unwrap_err();
        assert!(matches!(err, PlanError::Pattern { .. }));
    }
}
