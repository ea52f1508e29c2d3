//! Bilingual keyword tables.
//!
//! Every English/Indonesian phrase the checks look for lives here, grouped by
//! the concept it stands for. Control flow elsewhere only asks whether a
//! category matches; extending a language list never touches the checks.

use std::sync::LazyLock;

use regex::RegexSet;
use serde::Serialize;

/// A heading category every lesson document must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    /// Overview / Gambaran Umum
    Overview,
    /// Learning Objectives / Tujuan Pembelajaran
    LearningObjectives,
    /// Prerequisites / Prasyarat
    Prerequisites,
    /// Best Practices or Common Mistakes (either satisfies it)
    BestPracticesOrCommonMistakes,
    /// Next Steps / Langkah Selanjutnya
    NextSteps,
    /// Source Attribution / Atribusi Sumber
    SourceAttribution,
}

impl SectionCategory {
    /// All required categories, in the order lessons usually present them.
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::LearningObjectives,
        Self::Prerequisites,
        Self::BestPracticesOrCommonMistakes,
        Self::NextSteps,
        Self::SourceAttribution,
    ];

    /// Human-readable label used in violation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview (Gambaran Umum)",
            Self::LearningObjectives => "Learning Objectives (Tujuan Pembelajaran)",
            Self::Prerequisites => "Prerequisites (Prasyarat)",
            Self::BestPracticesOrCommonMistakes => {
                "Best Practices or Common Mistakes (Praktik Terbaik atau Kesalahan Umum)"
            }
            Self::NextSteps => "Next Steps (Langkah Selanjutnya)",
            Self::SourceAttribution => "Source Attribution (Atribusi Sumber)",
        }
    }

    /// Heading patterns accepted for this category.
    #[must_use]
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Overview => &[r"(?i)\boverview\b", r"(?i)\bgambaran umum\b", r"(?i)\bikhtisar\b"],
            Self::LearningObjectives => &[
                r"(?i)\blearning objectives?\b",
                r"(?i)\btujuan pembelajaran\b",
            ],
            Self::Prerequisites => &[r"(?i)\bprerequisites?\b", r"(?i)\bprasyarat\b"],
            Self::BestPracticesOrCommonMistakes => &[
                r"(?i)\bbest practices?\b",
                r"(?i)\bcommon mistakes?\b",
                r"(?i)\bcommon pitfalls?\b",
                r"(?i)\bpraktik terbaik\b",
                r"(?i)\bkesalahan umum\b",
            ],
            Self::NextSteps => &[
                r"(?i)\bnext steps?\b",
                r"(?i)\blangkah selanjutnya\b",
                r"(?i)\blangkah berikutnya\b",
            ],
            Self::SourceAttribution => &[
                r"(?i)\bsource attribution\b",
                r"(?i)\battribution\b",
                r"(?i)\batribusi sumber\b",
                r"(?i)\batribusi\b",
            ],
        }
    }

    /// Returns `true` if `heading` names this category in either language.
    #[must_use]
    pub fn matches(self, heading: &str) -> bool {
        SECTION_SETS[self as usize].is_match(heading)
    }
}

static SECTION_SETS: LazyLock<Vec<RegexSet>> = LazyLock::new(|| {
    SectionCategory::ALL
        .iter()
        .map(|category| compile(category.patterns()))
        .collect()
});

/// Headings that announce validation criteria in an exercise.
pub const CRITERIA_HEADINGS: &[&str] = &[
    r"(?i)\bvalidation criteria\b",
    r"(?i)\bkriteria validasi\b",
    r"(?i)\bsuccess criteria\b",
    r"(?i)\bkriteria keberhasilan\b",
    r"(?i)\bexpected output\b",
    r"(?i)\boutput yang diharapkan\b",
    r"(?i)\brequirements\b",
    r"(?i)\bpersyaratan\b",
];

/// Body phrases or glyphs that count as validation criteria in an exercise.
pub const CRITERIA_PHRASES: &[&str] = &[
    r"(?i)validation criteria",
    r"(?i)kriteria validasi",
    r"(?i)your solution is correct when",
    r"(?i)solusi anda benar jika",
    r"(?i)expected output",
    r"(?i)output yang diharapkan",
    r"(?i)should produce",
    r"(?i)harus menghasilkan",
    r"✅",
    r"✓",
];

static CRITERIA_HEADING_SET: LazyLock<RegexSet> = LazyLock::new(|| compile(CRITERIA_HEADINGS));
static CRITERIA_PHRASE_SET: LazyLock<RegexSet> = LazyLock::new(|| compile(CRITERIA_PHRASES));

/// Returns `true` if `heading` announces validation criteria.
#[must_use]
pub fn is_criteria_heading(heading: &str) -> bool {
    CRITERIA_HEADING_SET.is_match(heading)
}

/// Returns `true` if `text` contains a validation-criteria phrase or marker.
#[must_use]
pub fn has_criteria_phrase(text: &str) -> bool {
    CRITERIA_PHRASE_SET.is_match(text)
}

/// Label of a navigation link between lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavLabel {
    /// Previous / Sebelumnya
    Previous,
    /// Next / Selanjutnya
    Next,
    /// Module Home / Beranda Modul
    ModuleHome,
}

impl NavLabel {
    /// Every label, in the order they usually appear in a navigation footer.
    pub const ALL: [Self; 3] = [Self::Previous, Self::Next, Self::ModuleHome];

    /// Human-readable label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::ModuleHome => "Module Home",
        }
    }

    /// Alternation of the words that introduce this link in either language.
    #[must_use]
    pub const fn keywords(self) -> &'static str {
        match self {
            Self::Previous => r"previous|sebelumnya",
            Self::Next => r"next|selanjutnya|berikutnya",
            Self::ModuleHome => r"module home|beranda modul",
        }
    }
}

fn compile(patterns: &[&str]) -> RegexSet {
    RegexSet::new(patterns).expect("keyword patterns are valid")
}
