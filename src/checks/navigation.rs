use std::path::PathBuf;

use tracing::instrument;

use super::read_document;
use crate::{
    LessonName, ModuleTree, Property, PropertyResult,
    domain::{
        LinkTarget, NavLabel, NavigationLinkSet,
        navigation::resolve_lesson,
    },
    storage::Language,
};

/// Runs the navigation properties.
#[must_use]
pub fn check(tree: &ModuleTree) -> Vec<PropertyResult> {
    vec![completeness(tree), consistency(tree)]
}

/// The parsed navigation of one lesson document.
struct LessonLinks {
    name: LessonName,
    path: PathBuf,
    links: NavigationLinkSet,
}

/// Every lesson links to its neighbours.
///
/// Lesson order is the sorted order of the lesson directory names. The first
/// lesson is exempt from needing a Previous link and the last from needing a
/// Next link; that is decided by position alone, never by document content.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn completeness(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::NavigationCompleteness);
    let names = lesson_names(tree);
    let last = names.len().saturating_sub(1);

    for language in Language::ALL {
        let entries = lesson_links(tree, language, &names, &mut result);
        for (index, entry) in entries.into_iter().enumerate() {
            let Some(lesson) = entry else {
                continue;
            };
            result.checked += 1;
            let subject = tree.display(&lesson.path);

            if index > 0 {
                require(&mut result, &subject, NavLabel::Previous, &lesson.links, &names);
            }
            if index < last {
                require(&mut result, &subject, NavLabel::Next, &lesson.links, &names);
            }
            check_home(tree, &mut result, &subject, &lesson.links.home);
        }
    }

    result
}

/// If lesson A's Next link points to lesson B, then B's Previous link points
/// back to A.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn consistency(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::NavigationConsistency);
    let names = lesson_names(tree);

    for language in Language::ALL {
        let entries = lesson_links(tree, language, &names, &mut result);

        for a in entries.iter().flatten() {
            let Some(b_name) = a.links.next.target().and_then(|t| resolve_lesson(t, &names))
            else {
                continue;
            };
            let Some(b) = names
                .iter()
                .position(|name| name == b_name)
                .and_then(|index| entries[index].as_ref())
            else {
                continue;
            };

            result.checked += 1;
            let back = b
                .links
                .previous
                .target()
                .and_then(|t| resolve_lesson(t, &names));

            if back != Some(&a.name) {
                let file = a
                    .path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let found = back.map_or_else(
                    || "no lesson".to_string(),
                    |lesson| lesson.to_string(),
                );
                result.violation(
                    format!("{} → {} ({file})", a.name, b.name),
                    format!(
                        "{} links Next to {}, but {} links Previous to {found}",
                        a.name, b.name, b.name
                    ),
                );
            }
        }
    }

    result
}

fn lesson_names(tree: &ModuleTree) -> Vec<LessonName> {
    tree.lessons().into_iter().map(|lesson| lesson.name).collect()
}

/// Parses the `language` document of every lesson, indexed by lesson order.
///
/// Lessons without a readable document in that language are `None`.
fn lesson_links(
    tree: &ModuleTree,
    language: Language,
    names: &[LessonName],
    result: &mut PropertyResult,
) -> Vec<Option<LessonLinks>> {
    tree.lessons()
        .into_iter()
        .map(|lesson| {
            let path = tree.document_pair(&lesson.path).get(language)?.to_path_buf();
            let text = read_document(tree, &path, result)?;
            Some(LessonLinks {
                name: lesson.name,
                links: NavigationLinkSet::parse(&text, names),
                path,
            })
        })
        .collect()
}

fn require(
    result: &mut PropertyResult,
    subject: &str,
    label: NavLabel,
    links: &NavigationLinkSet,
    lessons: &[LessonName],
) {
    match links.get(label) {
        LinkTarget::Missing => {
            result.violation(subject, format!("missing {} link", label.label()));
        }
        LinkTarget::Empty => {
            result.violation(subject, format!("{} link has an empty target", label.label()));
        }
        LinkTarget::Present(target) => {
            if resolve_lesson(target.as_str(), lessons).is_none() {
                result.warning(
                    subject,
                    format!(
                        "{} link target '{target}' does not point to a known lesson",
                        label.label()
                    ),
                );
            }
        }
    }
}

fn check_home(tree: &ModuleTree, result: &mut PropertyResult, subject: &str, link: &LinkTarget) {
    let problem = match link {
        LinkTarget::Missing => "missing Module Home link",
        LinkTarget::Empty => "Module Home link has an empty target",
        LinkTarget::Present(_) => return,
    };
    if tree.config().require_module_home {
        result.violation(subject, problem);
    } else {
        result.warning(subject, problem);
    }
}
