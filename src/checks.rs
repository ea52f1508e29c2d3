//! The validation checks.
//!
//! Each property is a pure function from a [`ModuleTree`] to a
//! [`PropertyResult`]. Checks never share state and never abort: a failing
//! property, or an unreadable file, does not stop the next property from
//! running.

use std::path::Path;

use tracing::instrument;

use crate::{Check, ModuleTree, PropertyResult, Report, storage::scanner};

/// Heading parity, cross-language links and required lesson sections.
pub mod content;
/// Exercise instructions, back-references, criteria and layout.
pub mod exercises;
/// Previous/next/home links between lessons.
pub mod navigation;
/// Lesson naming and bilingual pairing.
pub mod structure;

/// Runs every property of `check`.
#[instrument(level = "debug", skip(tree))]
pub fn run(check: Check, tree: &ModuleTree) -> Vec<PropertyResult> {
    let results = match check {
        Check::Structure => structure::check(tree),
        Check::Content => content::check(tree),
        Check::Exercises => exercises::check(tree),
        Check::Navigation => navigation::check(tree),
    };

    for result in &results {
        tracing::info!(
            property = %result.property,
            checked = result.checked,
            violations = result.violations.len(),
            warnings = result.warnings.len(),
            "property checked"
        );
    }

    results
}

/// Runs `checks` in order and collects every result.
#[must_use]
pub fn run_all(checks: &[Check], tree: &ModuleTree) -> Report {
    let mut report = Report::default();
    for check in checks {
        report.extend(run(*check, tree));
    }
    report
}

/// Reads a document, recording a warning on `result` if it cannot be read.
fn read_document(tree: &ModuleTree, path: &Path, result: &mut PropertyResult) -> Option<String> {
    let text = scanner::read_text(path);
    if text.is_none() {
        result.warning(tree.display(path), "could not be read; skipped");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Property,
        testing::{ModuleBuilder, lesson_doc, lesson_doc_id},
    };

    fn healthy_module() -> ModuleBuilder {
        ModuleBuilder::new()
            .pair(
                "01-intro",
                &lesson_doc("Intro", None, Some("02-next")),
                &lesson_doc_id("Intro", None, Some("02-next")),
            )
            .pair(
                "02-next",
                &lesson_doc("Next", Some("01-intro"), None),
                &lesson_doc_id("Lanjut", Some("01-intro"), None),
            )
            .pair(
                "exercises/01-intro-practice",
                "# Practice\n\n[ID](README_ID.md) Based on 01-intro.\n\n## Validation Criteria\n\n- ✅ works\n",
                "# Latihan\n\n[EN](README.md) Berdasarkan 01-intro.\n\n## Kriteria Validasi\n\n- ✅ berhasil\n",
            )
            .dir("exercises/01-intro-practice/starter/src")
            .dir("exercises/01-intro-practice/solution/src")
            .file("exercises/01-intro-practice/starter/src/main.rs", "fn main() {}\n")
            .file("exercises/01-intro-practice/solution/src/main.rs", "fn main() {}\n")
    }

    #[test]
    fn healthy_module_passes_every_property() {
        let module = healthy_module();
        let report = run_all(&Check::ALL, &module.tree());

        let failures: Vec<String> = report
            .results()
            .iter()
            .flat_map(|r| r.violations.iter().map(move |v| format!("{}: {v}", r.property)))
            .collect();
        assert!(failures.is_empty(), "unexpected violations: {failures:#?}");
        assert_eq!(report.results().len(), Property::ALL.len());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn failing_property_does_not_stop_the_rest() {
        let module = healthy_module().dir("1-broken");
        let report = run_all(&Check::ALL, &module.tree());

        assert!(!report.passed());
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.results().len(), Property::ALL.len());
    }

    #[test]
    fn single_check_runs_only_its_properties() {
        let module = healthy_module();
        let results = run(Check::Navigation, &module.tree());
        let properties: Vec<Property> = results.iter().map(|r| r.property).collect();
        assert_eq!(properties, Check::Navigation.properties());
    }

    #[test]
    fn unreadable_document_is_skipped_with_a_warning() {
        let module = healthy_module().file("02-next/README_ID.md", [0xff_u8, 0xfe, 0x00, 0x80]);
        let report = run_all(&Check::ALL, &module.tree());

        assert_eq!(report.results().len(), Property::ALL.len());
        assert!(report.passed(), "{report:#?}");

        let skipped: Vec<Property> = report
            .results()
            .iter()
            .filter(|r| {
                r.warnings.iter().any(|w| {
                    w.subject == "02-next/README_ID.md" && w.message == "could not be read; skipped"
                })
            })
            .map(|r| r.property)
            .collect();
        assert_eq!(
            skipped,
            [
                Property::HeadingParity,
                Property::CrossLanguageLinks,
                Property::RequiredSections,
                Property::NavigationCompleteness,
                Property::NavigationConsistency,
            ]
        );
    }
}
