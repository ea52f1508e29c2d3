//! Prev/next/home navigation links between lessons.
//!
//! Two link shapes are recognised, in either language:
//!
//! - label outside the link: `**Previous**: [Ownership](../02-ownership/README.md)`
//!   or the bare reference form `Next: [03]`
//! - label inside the link text: `[← Sebelumnya: Kepemilikan](../02-ownership/README_ID.md)`
//!
//! Heading lines, fenced code and in-page anchors (`#...`) are never
//! navigation links.

use std::{collections::HashMap, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

use super::{heading::prose_lines, lesson::LessonName, patterns::NavLabel};

struct LabelPatterns {
    outside: Regex,
    inside: Regex,
}

static LABEL_PATTERNS: LazyLock<HashMap<NavLabel, LabelPatterns>> = LazyLock::new(|| {
    NavLabel::ALL
        .iter()
        .map(|label| {
            let keywords = label.keywords();
            // Only punctuation, emphasis and arrows may sit between the label
            // and the link; any letter means this is prose, not navigation.
            let outside = format!(
                r"(?i)(?:^|[^\p{{L}}])(?:{keywords})[^\p{{L}}\p{{N}}\[\n]*\[([^\]]*)\](?:\(([^)]*)\))?"
            );
            // The label must open the link text (after arrows or emoji) and be
            // a word of its own: `[Next.js]` or `[the previous chapter]` are prose.
            let inside = format!(
                r"(?i)\[([^\p{{L}}\p{{N}}\]]*(?:{keywords})(?:[^\p{{L}}\p{{N}}.\]][^\]]*)?)\]\(([^)]*)\)"
            );
            let patterns = LabelPatterns {
                outside: Regex::new(&outside).expect("navigation pattern is valid"),
                inside: Regex::new(&inside).expect("navigation pattern is valid"),
            };
            (*label, patterns)
        })
        .collect()
});

static TWO_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{2})(?:[^0-9]|$)").expect("ordinal pattern is valid")
});

/// The state of one navigation link in a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkTarget {
    /// No link with this label was found.
    #[default]
    Missing,
    /// A labelled link exists but points nowhere (`[Next]()`).
    Empty,
    /// A labelled link with a usable target.
    Present(NonEmptyString),
}

impl LinkTarget {
    /// The target string, if the link is present and non-empty.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Present(target) => Some(target.as_str()),
            Self::Missing | Self::Empty => None,
        }
    }
}

/// The navigation links detected in one lesson document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationLinkSet {
    /// "Previous" / "Sebelumnya"
    pub previous: LinkTarget,
    /// "Next" / "Selanjutnya"
    pub next: LinkTarget,
    /// "Module Home" / "Beranda Modul"
    pub home: LinkTarget,
}

impl NavigationLinkSet {
    /// Scans `markdown` for labelled navigation links.
    ///
    /// A Previous or Next candidate that resolves to one of `lessons` beats
    /// one that does not; otherwise the first candidate in the document wins.
    #[must_use]
    pub fn parse(markdown: &str, lessons: &[LessonName]) -> Self {
        let mut links = Self::default();

        for label in NavLabel::ALL {
            let mut candidates =
                prose_lines(markdown).flat_map(|(_, line)| find_links(label, line));
            let chosen = match label {
                NavLabel::ModuleHome => candidates.next(),
                NavLabel::Previous | NavLabel::Next => {
                    let candidates: Vec<LinkTarget> = candidates.collect();
                    candidates
                        .iter()
                        .find(|link| {
                            link.target()
                                .and_then(|target| resolve_lesson(target, lessons))
                                .is_some()
                        })
                        .or_else(|| candidates.first())
                        .cloned()
                }
            };
            *links.slot_mut(label) = chosen.unwrap_or_default();
        }

        links
    }

    /// The link recorded for `label`.
    #[must_use]
    pub const fn get(&self, label: NavLabel) -> &LinkTarget {
        match label {
            NavLabel::Previous => &self.previous,
            NavLabel::Next => &self.next,
            NavLabel::ModuleHome => &self.home,
        }
    }

    const fn slot_mut(&mut self, label: NavLabel) -> &mut LinkTarget {
        match label {
            NavLabel::Previous => &mut self.previous,
            NavLabel::Next => &mut self.next,
            NavLabel::ModuleHome => &mut self.home,
        }
    }
}

/// Every labelled link on `line`, label-inside form first.
fn find_links(label: NavLabel, line: &str) -> Vec<LinkTarget> {
    let patterns = &LABEL_PATTERNS[&label];

    let inside = patterns
        .inside
        .captures_iter(line)
        .map(|c| (c[1].to_string(), Some(c[2].to_string())));
    let outside = patterns.outside.captures_iter(line).map(|c| {
        (
            c[1].to_string(),
            c.get(2).map(|target| target.as_str().to_string()),
        )
    });

    inside
        .chain(outside)
        .filter(|(_, target)| !target.as_deref().is_some_and(is_anchor))
        .map(|(text, target)| to_link_target(&text, target))
        .collect()
}

fn is_anchor(target: &str) -> bool {
    target.trim_start().starts_with('#')
}

fn to_link_target(text: &str, target: Option<String>) -> LinkTarget {
    // Reference-style links (`Next: [03]`) have no target; the text is the target.
    let raw = target.unwrap_or_else(|| text.to_string());
    NonEmptyString::new(raw.trim().to_string()).map_or(LinkTarget::Empty, LinkTarget::Present)
}

/// Maps a raw link target onto one of `lessons`.
///
/// A path segment equal to a lesson name resolves to that lesson, so
/// `../exercises/02-ownership-practice/` never resolves to `02-ownership`.
/// A target that is not a path, such as `[03]` or `Lesson 03`, resolves by
/// its standalone two-digit ordinal.
#[must_use]
pub fn resolve_lesson<'a>(target: &str, lessons: &'a [LessonName]) -> Option<&'a LessonName> {
    let by_segment = target
        .split(['/', '\\', '#', '?'])
        .find_map(|segment| lessons.iter().find(|lesson| lesson.as_str() == segment));
    if by_segment.is_some() || target.contains(['/', '\\']) {
        return by_segment;
    }

    let ordinal = TWO_DIGITS.captures(target)?.get(1)?.as_str();
    lessons.iter().find(|lesson| lesson.ordinal() == ordinal)
}
