use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

/// A single markdown heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Number of leading `#` characters (1-6).
    pub level: u8,
    /// Trimmed heading text.
    pub text: String,
    /// 1-based line number in the source document.
    pub line: usize,
}

/// The ordered headings of a markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingOutline(Vec<Heading>);

impl HeadingOutline {
    /// Extracts every ATX heading from `markdown`.
    ///
    /// When `ignore_fenced_code` is set, lines inside ```` ``` ```` or `~~~`
    /// fences are skipped, so shell comments in code samples are not headings.
    #[must_use]
    pub fn parse(markdown: &str, ignore_fenced_code: bool) -> Self {
        let mut headings = Vec::new();
        let mut fence = FenceTracker::default();

        for (index, line) in markdown.lines().enumerate() {
            if fence.observe(line) && ignore_fenced_code {
                continue;
            }
            if let Some(captures) = HEADING.captures(line) {
                let text = captures[2].trim();
                if text.is_empty() {
                    continue;
                }
                headings.push(Heading {
                    level: u8::try_from(captures[1].len()).unwrap_or(u8::MAX),
                    text: text.to_string(),
                    line: index + 1,
                });
            }
        }

        Self(headings)
    }

    /// The heading depths, in document order.
    #[must_use]
    pub fn levels(&self) -> Vec<u8> {
        self.0.iter().map(|h| h.level).collect()
    }

    /// Number of headings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the document has no headings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the headings in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Heading> {
        self.0.iter()
    }

    /// Returns `true` if any heading text satisfies `predicate`.
    pub fn any_text(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.0.iter().any(|h| predicate(&h.text))
    }

    /// Compares the level sequence of two outlines, ignoring heading text.
    ///
    /// Returns the first point where they diverge, or `None` when both have
    /// the same number of headings at the same depths in the same order.
    #[must_use]
    pub fn compare_levels(&self, other: &Self) -> Option<Divergence> {
        let mismatch = self
            .0
            .iter()
            .zip(&other.0)
            .enumerate()
            .find(|(_, (left, right))| left.level != right.level);

        if let Some((index, (left, right))) = mismatch {
            return Some(Divergence::Level {
                position: index + 1,
                left: left.clone(),
                right: right.clone(),
            });
        }

        (self.len() != other.len()).then(|| Divergence::Length {
            left: self.len(),
            right: other.len(),
        })
    }
}

impl<'a> IntoIterator for &'a HeadingOutline {
    type Item = &'a Heading;
    type IntoIter = std::slice::Iter<'a, Heading>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where two heading outlines stop agreeing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// The headings at `position` (1-based) have different levels.
    Level {
        /// 1-based index of the first mismatching heading.
        position: usize,
        /// Heading from the first outline.
        left: Heading,
        /// Heading from the second outline.
        right: Heading,
    },
    /// Every shared position agrees but the heading counts differ.
    Length {
        /// Heading count of the first outline.
        left: usize,
        /// Heading count of the second outline.
        right: usize,
    },
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level {
                position,
                left,
                right,
            } => write!(
                f,
                "heading #{position} is H{} \"{}\" (line {}) vs H{} \"{}\" (line {})",
                left.level, left.text, left.line, right.level, right.text, right.line
            ),
            Self::Length { left, right } => {
                write!(f, "{left} headings vs {right} headings")
            }
        }
    }
}

/// Tracks whether the current line sits inside a fenced code block.
#[derive(Debug, Default)]
struct FenceTracker {
    open: Option<&'static str>,
}

impl FenceTracker {
    /// Feeds one line; returns `true` if the line is part of a fence
    /// (including the opening and closing markers).
    fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = if trimmed.starts_with("```") {
            Some("```")
        } else if trimmed.starts_with("~~~") {
            Some("~~~")
        } else {
            None
        };

        match (self.open, marker) {
            (Some(open), Some(marker)) if open == marker => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, Some(marker)) => {
                self.open = Some(marker);
                true
            }
            (None, None) => false,
        }
    }
}

/// Returns an iterator over the lines of `markdown` that are neither headings
/// nor inside fenced code, paired with their 1-based line numbers.
pub fn prose_lines(markdown: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut fence = FenceTracker::default();
    markdown
        .lines()
        .enumerate()
        .filter(move |(_, line)| !fence.observe(line) && !HEADING.is_match(line))
        .map(|(index, line)| (index + 1, line))
}
