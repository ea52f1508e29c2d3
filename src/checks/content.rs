use tracing::instrument;

use super::read_document;
use crate::{
    ModuleTree, Property, PropertyResult,
    domain::{HeadingOutline, SectionCategory},
    storage::Language,
};

/// Runs the content properties.
#[must_use]
pub fn check(tree: &ModuleTree) -> Vec<PropertyResult> {
    vec![
        heading_parity(tree),
        cross_language_links(tree),
        required_sections(tree),
    ]
}

/// Both documents of every complete pair share one heading level sequence.
///
/// Heading text is ignored since translations differ textually.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn heading_parity(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::HeadingParity);
    let ignore_fenced_code = tree.config().ignore_fenced_code;

    for pair in tree.document_pairs() {
        let (Some(english), Some(translated)) = (&pair.english, &pair.translated) else {
            continue;
        };
        let (Some(english_text), Some(translated_text)) = (
            read_document(tree, english, &mut result),
            read_document(tree, translated, &mut result),
        ) else {
            continue;
        };

        result.checked += 1;
        let english_outline = HeadingOutline::parse(&english_text, ignore_fenced_code);
        let translated_outline = HeadingOutline::parse(&translated_text, ignore_fenced_code);

        if let Some(divergence) = english_outline.compare_levels(&translated_outline) {
            result.violation(
                format!("{} / {}", tree.display(english), tree.display(translated)),
                format!("heading structure differs: {divergence}"),
            );
        }
    }

    result
}

/// Each document of a complete pair mentions its counterpart's file name.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn cross_language_links(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::CrossLanguageLinks);
    let config = tree.config();

    for pair in tree.document_pairs().iter().filter(|p| p.is_complete()) {
        for (language, path) in pair.documents() {
            let counterpart = match language {
                Language::English => config.translated_document(),
                Language::Indonesian => config.english_document(),
            };
            let Some(text) = read_document(tree, path, &mut result) else {
                continue;
            };

            result.checked += 1;
            if !text.contains(counterpart) {
                result.violation(
                    tree.display(path),
                    format!("no link or reference to {counterpart}"),
                );
            }
        }
    }

    result
}

/// Every lesson document has a heading for each required section category.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn required_sections(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::RequiredSections);
    let ignore_fenced_code = tree.config().ignore_fenced_code;

    for lesson in tree.lessons() {
        let pair = tree.document_pair(&lesson.path);
        for (_, path) in pair.documents() {
            let Some(text) = read_document(tree, path, &mut result) else {
                continue;
            };

            result.checked += 1;
            let outline = HeadingOutline::parse(&text, ignore_fenced_code);
            for category in missing_sections(&outline) {
                result.violation(
                    tree.display(path),
                    format!("missing required section: {}", category.label()),
                );
            }
        }
    }

    result
}

/// The required categories with no matching heading in `outline`.
#[must_use]
pub fn missing_sections(outline: &HeadingOutline) -> Vec<SectionCategory> {
    SectionCategory::ALL
        .into_iter()
        .filter(|category| !outline.any_text(|text| category.matches(text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ModuleBuilder, lesson_doc, lesson_doc_id};

    #[test]
    fn matching_level_sequences_pass() {
        let module = ModuleBuilder::new().pair(
            "01-intro",
            "# Intro\n## Overview\n### Detail\n",
            "# Pengantar\n## Gambaran Umum\n### Rincian\n",
        );

        let result = heading_parity(&module.tree());

        assert!(result.passed());
        assert_eq!(result.checked, 1);
    }

    #[test]
    fn level_mismatch_names_both_files_and_position() {
        let module = ModuleBuilder::new().pair(
            "01-intro",
            "# A\n## B\n## C\n### D\n",
            "# A\n## B\n### D\n",
        );

        let result = heading_parity(&module.tree());

        assert_eq!(result.violations.len(), 1);
        let violation = &result.violations[0];
        assert_eq!(violation.subject, "01-intro/README.md / 01-intro/README_ID.md");
        assert!(violation.message.contains("heading #3 is H2"));
        assert!(violation.message.contains("vs H3"));
    }

    #[test]
    fn incomplete_pairs_are_left_to_the_pairing_check() {
        let module = ModuleBuilder::new().file("01-intro/README.md", "# A\n## B\n");

        let result = heading_parity(&module.tree());

        assert!(result.passed());
        assert_eq!(result.checked, 0);
    }

    #[test]
    fn cross_links_are_required_in_both_directions() {
        let module = ModuleBuilder::new()
            .pair(
                "01-intro",
                "# Intro\n\n[Baca dalam Bahasa Indonesia](README_ID.md)\n",
                "# Pengantar\n\nTidak ada tautan.\n",
            );

        let result = cross_language_links(&module.tree());

        assert_eq!(result.checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].subject, "01-intro/README_ID.md");
        assert!(result.violations[0].message.contains("README.md"));
    }

    #[test]
    fn plain_text_mention_counts_as_a_cross_link() {
        let module = ModuleBuilder::new().pair(
            "01-intro",
            "# Intro\n\nIndonesian version: README_ID.md\n",
            "# Pengantar\n\nVersi Inggris: `README.md`\n",
        );

        assert!(cross_language_links(&module.tree()).passed());
    }

    #[test]
    fn complete_lessons_have_every_section() {
        let module = ModuleBuilder::new().pair(
            "01-intro",
            &lesson_doc("Intro", None, None),
            &lesson_doc_id("Pengantar", None, None),
        );

        let result = required_sections(&module.tree());

        assert!(result.passed());
        assert_eq!(result.checked, 2);
    }

    #[test]
    fn either_best_practices_or_common_mistakes_is_enough() {
        let doc = "# T\n## Overview\n## Learning Objectives\n## Prerequisites\n\
                   ## Common Mistakes\n## Next Steps\n## Source Attribution\n";
        let outline = HeadingOutline::parse(doc, true);
        assert!(missing_sections(&outline).is_empty());
    }

    #[test]
    fn missing_categories_are_each_reported() {
        let module = ModuleBuilder::new().file(
            "02-ownership/README.md",
            "# Ownership\n## Overview\n## Learning Objectives\n## Prerequisites\n## Next Steps\n",
        );

        let result = required_sections(&module.tree());

        let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("Best Practices or Common Mistakes"));
        assert!(messages[1].contains("Source Attribution"));
        assert!(result.violations.iter().all(|v| v.subject == "02-ownership/README.md"));
    }

    #[test]
    fn non_lesson_documents_need_no_sections() {
        let module = ModuleBuilder::new()
            .file("README.md", "# Module\n")
            .file("exercises/01-practice/README.md", "# Practice\n");

        let result = required_sections(&module.tree());

        assert!(result.passed());
        assert_eq!(result.checked, 0);
    }
}
