use std::fmt;

use serde::Serialize;

/// A group of related properties run together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Directory naming and bilingual file pairing.
    Structure,
    /// Heading parity, cross-language links and required sections.
    Content,
    /// Exercise instructions, back-references and validation criteria.
    Exercises,
    /// Previous/next/home links between lessons.
    Navigation,
}

impl Check {
    /// Every check, in execution order.
    pub const ALL: [Self; 4] = [
        Self::Structure,
        Self::Content,
        Self::Exercises,
        Self::Navigation,
    ];

    /// The properties this check enforces, in execution order.
    #[must_use]
    pub fn properties(self) -> Vec<Property> {
        Property::ALL
            .into_iter()
            .filter(|property| property.check() == self)
            .collect()
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structure => "structure",
            Self::Content => "content",
            Self::Exercises => "exercises",
            Self::Navigation => "navigation",
        };
        f.write_str(name)
    }
}

/// A single invariant enforced over the module tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Top-level lesson directories are named `NN-topic-name`.
    LessonNaming,
    /// `README.md` exists iff `README_ID.md` exists, in every directory.
    BilingualPairing,
    /// Both documents of a pair have the same heading level sequence.
    HeadingParity,
    /// Each document of a pair links to its counterpart.
    CrossLanguageLinks,
    /// Lesson documents carry every required section heading.
    RequiredSections,
    /// Every exercise ships instructions in both languages.
    ExerciseInstructions,
    /// Exercise documents reference at least one lesson.
    ExerciseBackReference,
    /// Exercise documents declare how a solution is judged.
    ExerciseCriteria,
    /// Advisory: exercises carry `starter/` and `solution/` crates.
    ExerciseLayout,
    /// Lessons link to their previous and next lesson.
    NavigationCompleteness,
    /// Previous/next links agree in both directions.
    NavigationConsistency,
}

impl Property {
    /// Every property, in execution order.
    pub const ALL: [Self; 11] = [
        Self::LessonNaming,
        Self::BilingualPairing,
        Self::HeadingParity,
        Self::CrossLanguageLinks,
        Self::RequiredSections,
        Self::ExerciseInstructions,
        Self::ExerciseBackReference,
        Self::ExerciseCriteria,
        Self::ExerciseLayout,
        Self::NavigationCompleteness,
        Self::NavigationConsistency,
    ];

    /// The check this property belongs to.
    #[must_use]
    pub const fn check(self) -> Check {
        match self {
            Self::LessonNaming | Self::BilingualPairing => Check::Structure,
            Self::HeadingParity | Self::CrossLanguageLinks | Self::RequiredSections => {
                Check::Content
            }
            Self::ExerciseInstructions
            | Self::ExerciseBackReference
            | Self::ExerciseCriteria
            | Self::ExerciseLayout => Check::Exercises,
            Self::NavigationCompleteness | Self::NavigationConsistency => Check::Navigation,
        }
    }

    /// Short human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::LessonNaming => "Lesson directory naming",
            Self::BilingualPairing => "Bilingual file pairing",
            Self::HeadingParity => "Parallel heading structure",
            Self::CrossLanguageLinks => "Cross-language navigation",
            Self::RequiredSections => "Required lesson sections",
            Self::ExerciseInstructions => "Exercise bilingual instructions",
            Self::ExerciseBackReference => "Exercise lesson back-reference",
            Self::ExerciseCriteria => "Exercise validation criteria",
            Self::ExerciseLayout => "Exercise starter/solution layout",
            Self::NavigationCompleteness => "Lesson navigation completeness",
            Self::NavigationConsistency => "Lesson navigation consistency",
        }
    }

    /// Curriculum requirement IDs this property validates.
    #[must_use]
    pub const fn requirements(self) -> &'static [&'static str] {
        match self {
            Self::LessonNaming => &["1.1", "1.4"],
            Self::BilingualPairing => &["1.2", "1.3"],
            Self::HeadingParity => &["2.1"],
            Self::CrossLanguageLinks => &["2.2", "2.3"],
            Self::RequiredSections => &["3.1", "3.2", "3.3"],
            Self::ExerciseInstructions => &["4.1"],
            Self::ExerciseBackReference => &["4.2"],
            Self::ExerciseCriteria => &["4.3"],
            Self::ExerciseLayout => &["4.4"],
            Self::NavigationCompleteness => &["5.1", "5.2"],
            Self::NavigationConsistency => &["5.3"],
        }
    }

    /// Advisory properties only ever produce warnings.
    #[must_use]
    pub const fn is_advisory(self) -> bool {
        matches!(self, Self::ExerciseLayout)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One broken rule, attached to the entity that broke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Directory or file the finding is about, relative to the module root.
    pub subject: String,
    /// What is wrong.
    pub message: String,
}

impl Violation {
    /// Creates a finding about `subject`.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// The outcome of checking one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyResult {
    /// The property checked.
    pub property: Property,
    /// Number of entities (directories, documents, lessons) examined.
    pub checked: usize,
    /// Failures. Any violation fails the property.
    pub violations: Vec<Violation>,
    /// Non-failing findings.
    pub warnings: Vec<Violation>,
}

impl PropertyResult {
    /// An empty result for `property`.
    #[must_use]
    pub const fn new(property: Property) -> Self {
        Self {
            property,
            checked: 0,
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records a violation.
    ///
    /// For advisory properties the finding is downgraded to a warning.
    pub fn violation(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let finding = Violation::new(subject, message);
        if self.property.is_advisory() {
            self.warnings.push(finding);
        } else {
            self.violations.push(finding);
        }
    }

    /// Records a warning.
    pub fn warning(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Violation::new(subject, message));
    }

    /// Returns `true` if no violations were recorded.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// The aggregated results of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    results: Vec<PropertyResult>,
}

impl Report {
    /// Appends results to the report.
    pub fn extend(&mut self, results: impl IntoIterator<Item = PropertyResult>) {
        self.results.extend(results);
    }

    /// The individual property results.
    #[must_use]
    pub fn results(&self) -> &[PropertyResult] {
        &self.results
    }

    /// Returns `true` if every property passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.iter().all(PropertyResult::passed)
    }

    /// Number of properties that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    /// Total violations across all properties.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.results.iter().map(|r| r.violations.len()).sum()
    }

    /// Total warnings across all properties.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.warnings.len()).sum()
    }
}

impl FromIterator<PropertyResult> for Report {
    fn from_iter<I: IntoIterator<Item = PropertyResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_check_owns_its_properties() {
        let owned: usize = Check::ALL.iter().map(|c| c.properties().len()).sum();
        assert_eq!(owned, Property::ALL.len());
        assert_eq!(
            Check::Structure.properties(),
            vec![Property::LessonNaming, Property::BilingualPairing]
        );
    }

    #[test]
    fn violations_fail_and_warnings_do_not() {
        let mut result = PropertyResult::new(Property::BilingualPairing);
        result.warning("01-intro", "could not read directory");
        assert!(result.passed());

        result.violation("01-intro", "missing README_ID.md");
        assert!(!result.passed());
    }

    #[test]
    fn advisory_property_never_fails() {
        let mut result = PropertyResult::new(Property::ExerciseLayout);
        result.violation("exercises/01-intro", "missing starter/");
        assert!(result.passed());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn report_aggregates_counts() {
        let mut failing = PropertyResult::new(Property::LessonNaming);
        failing.violation("1-intro", "bad name");
        failing.violation("Intro", "bad name");
        let mut passing = PropertyResult::new(Property::HeadingParity);
        passing.warning("README.md", "unreadable");

        let report: Report = [failing, passing].into_iter().collect();

        assert!(!report.passed());
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.violation_count(), 2);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn empty_report_passes() {
        assert!(Report::default().passed());
    }
}
