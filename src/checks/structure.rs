use tracing::instrument;

use crate::{
    ModuleTree, Property, PropertyResult,
    domain::lesson::{LESSON_NAME_PATTERN, is_lesson_name},
    storage::DocumentPair,
};

/// Runs the structure properties.
#[must_use]
pub fn check(tree: &ModuleTree) -> Vec<PropertyResult> {
    vec![lesson_naming(tree), bilingual_pairing(tree)]
}

/// Every top-level directory intended as a lesson is named `NN-topic-name`.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn lesson_naming(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::LessonNaming);

    for name in tree.lesson_candidates() {
        result.checked += 1;
        if !is_lesson_name(&name) {
            result.violation(
                name.as_str(),
                format!("directory name does not match {LESSON_NAME_PATTERN}"),
            );
        }
    }

    result
}

/// `README.md` exists in a directory if and only if `README_ID.md` does.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn bilingual_pairing(tree: &ModuleTree) -> PropertyResult {
    let mut result = PropertyResult::new(Property::BilingualPairing);

    for dir in tree.directories() {
        result.checked += 1;
        let pair = tree.document_pair(&dir);
        check_pair(tree, &pair, &mut result);
    }

    result
}

/// Checks both directions of the pairing biconditional for one directory.
pub(super) fn check_pair(tree: &ModuleTree, pair: &DocumentPair, result: &mut PropertyResult) {
    let config = tree.config();
    let subject = tree.display(&pair.dir);

    match (&pair.english, &pair.translated) {
        (Some(_), None) => result.violation(
            subject,
            missing(config.english_document(), config.translated_document()),
        ),
        (None, Some(_)) => result.violation(
            subject,
            missing(config.translated_document(), config.english_document()),
        ),
        (Some(_), Some(_)) | (None, None) => {}
    }
}

fn missing(present: &str, absent: &str) -> String {
    format!("has {present} but is missing {absent}")
}
