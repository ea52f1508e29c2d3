use std::path::Path;

use tracing::instrument;

use super::{read_document, structure::check_pair};
use crate::{
    ModuleTree, Property, PropertyResult,
    domain::{
        HeadingOutline,
        lesson::find_lesson_reference,
        patterns::{has_criteria_phrase, is_criteria_heading},
    },
    storage::ExerciseDirectory,
};

/// Runs the exercise properties.
#[must_use]
pub fn check(tree: &ModuleTree) -> Vec<PropertyResult> {
    let exercises = tree.exercises();
    vec![
        instructions(tree, &exercises),
        back_reference(tree, &exercises),
        criteria(tree, &exercises),
        layout(tree, &exercises),
    ]
}

/// Every exercise has instructions in both languages.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn instructions(tree: &ModuleTree, exercises: &[ExerciseDirectory]) -> PropertyResult {
    let mut result = PropertyResult::new(Property::ExerciseInstructions);
    let root = tree.exercises_root();

    if !root.is_dir() {
        result.warning(
            tree.display(&root),
            "no exercises directory; exercise checks skipped",
        );
        return result;
    }

    for name in tree.misnamed_exercises() {
        result.warning(
            tree.display(&root.join(&name)),
            "not an exercise directory (name does not follow NN-topic-name); skipped",
        );
    }

    for exercise in exercises {
        result.checked += 1;
        if exercise.documents.is_empty() {
            let config = tree.config();
            result.violation(
                tree.display(&exercise.lesson.path),
                format!(
                    "has no instructions ({} and {} are both missing)",
                    config.english_document(),
                    config.translated_document()
                ),
            );
        } else {
            check_pair(tree, &exercise.documents, &mut result);
        }
    }

    result
}

/// Every exercise document references a lesson by its directory name.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn back_reference(tree: &ModuleTree, exercises: &[ExerciseDirectory]) -> PropertyResult {
    let mut result = PropertyResult::new(Property::ExerciseBackReference);

    for_each_document(tree, exercises, &mut result, |text, result, subject| {
        if let Some(reference) = find_lesson_reference(text) {
            tracing::debug!("{subject} references {reference}");
        } else {
            result.violation(
                subject,
                "does not reference any lesson (expected a name like 03-structs-enums)",
            );
        }
    });

    result
}

/// Every exercise document states how a solution is judged.
///
/// Either a criteria heading or a criteria phrase/checkmark in the body
/// satisfies the property.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn criteria(tree: &ModuleTree, exercises: &[ExerciseDirectory]) -> PropertyResult {
    let mut result = PropertyResult::new(Property::ExerciseCriteria);
    let ignore_fenced_code = tree.config().ignore_fenced_code;

    for_each_document(tree, exercises, &mut result, |text, result, subject| {
        let outline = HeadingOutline::parse(text, ignore_fenced_code);
        if !outline.any_text(is_criteria_heading) && !has_criteria_phrase(text) {
            result.violation(
                subject,
                "no validation criteria (heading such as \"Validation Criteria\", \
                 phrase such as \"expected output\", or ✅ markers)",
            );
        }
    });

    result
}

/// Advisory: exercises ship `starter/` and `solution/` crates.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn layout(tree: &ModuleTree, exercises: &[ExerciseDirectory]) -> PropertyResult {
    let mut result = PropertyResult::new(Property::ExerciseLayout);

    for exercise in exercises {
        result.checked += 1;
        let subject = tree.display(&exercise.lesson.path);

        for (name, dir) in [
            ("starter", &exercise.starter),
            ("solution", &exercise.solution),
        ] {
            match dir {
                None => result.warning(subject.as_str(), format!("has no {name}/ directory")),
                Some(dir) if !is_crate_skeleton(dir) => result.warning(
                    tree.display(dir),
                    "has no Cargo.toml, src/main.rs or src/lib.rs",
                ),
                Some(_) => {}
            }
        }
    }

    result
}

fn is_crate_skeleton(dir: &Path) -> bool {
    ["Cargo.toml", "src/main.rs", "src/lib.rs"]
        .iter()
        .any(|file| dir.join(file).is_file())
}

/// Applies `check` to the text of every readable exercise document.
fn for_each_document(
    tree: &ModuleTree,
    exercises: &[ExerciseDirectory],
    result: &mut PropertyResult,
    mut check: impl FnMut(&str, &mut PropertyResult, String),
) {
    for exercise in exercises {
        for (_, path) in exercise.documents.documents() {
            let Some(text) = read_document(tree, path, result) else {
                continue;
            };
            result.checked += 1;
            check(&text, result, tree.display(path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ModuleBuilder;

    const GOOD_EN: &str = "# Ownership Practice\n\nBased on [lesson 02](../../02-ownership/README.md).\n\n\
                           ## Validation Criteria\n\n- ✅ compiles\n";
    const GOOD_ID: &str = "# Latihan Kepemilikan\n\nBerdasarkan [pelajaran 02](../../02-ownership/README_ID.md).\n\n\
                           ## Kriteria Validasi\n\n- ✅ berhasil dikompilasi\n";

    fn run(
        module: &ModuleBuilder,
        property: fn(&ModuleTree, &[ExerciseDirectory]) -> PropertyResult,
    ) -> PropertyResult {
        let tree = module.tree();
        let exercises = tree.exercises();
        property(&tree, &exercises)
    }

    #[test]
    fn complete_exercise_passes_everything() {
        let module = ModuleBuilder::new()
            .pair("exercises/02-ownership-practice", GOOD_EN, GOOD_ID)
            .file("exercises/02-ownership-practice/starter/Cargo.toml", "[package]\n")
            .file("exercises/02-ownership-practice/solution/src/main.rs", "fn main() {}\n");
        let tree = module.tree();

        for result in check(&tree) {
            assert!(result.passed(), "{} failed: {:?}", result.property, result.violations);
            assert!(result.warnings.is_empty(), "{}: {:?}", result.property, result.warnings);
        }
    }

    #[test]
    fn missing_translation_is_a_violation() {
        let module = ModuleBuilder::new().file("exercises/01-variables/README.md", GOOD_EN);

        let result = run(&module, instructions);

        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].message.contains("missing README_ID.md"));
    }

    #[test]
    fn exercise_without_any_instructions_is_a_violation() {
        let module = ModuleBuilder::new().dir("exercises/01-variables/solution");

        let result = run(&module, instructions);

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].subject, "exercises/01-variables");
    }

    #[test]
    fn module_without_exercises_only_warns() {
        let module = ModuleBuilder::new().dir("01-intro");

        let result = run(&module, instructions);

        assert!(result.passed());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn prose_lesson_number_is_not_a_back_reference() {
        let module = ModuleBuilder::new().pair(
            "exercises/03-structs",
            "# Structs\n\nSee Lesson 3.\n\n## Validation Criteria\n",
            "# Struct\n\nLihat 03-structs-enums.\n\n## Kriteria Validasi\n",
        );

        let result = run(&module, back_reference);

        assert_eq!(result.checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].subject, "exercises/03-structs/README.md");
    }

    #[test]
    fn criteria_heading_with_checkmarks_passes() {
        let module = ModuleBuilder::new().pair(
            "exercises/04-errors",
            "# Errors\n\n## Validation Criteria\n\n- ✅ returns Result\n- ✅ no unwrap\n",
            "# Galat\n\n## Kriteria Validasi\n\n- ✅ mengembalikan Result\n",
        );

        assert!(run(&module, criteria).passed());
    }

    #[test]
    fn criteria_phrase_in_body_passes() {
        let module = ModuleBuilder::new().pair(
            "exercises/04-errors",
            "# Errors\n\nYour solution is correct when every test passes.\n",
            "# Galat\n\nProgram harus menghasilkan output berikut.\n",
        );

        assert!(run(&module, criteria).passed());
    }

    #[test]
    fn exercise_without_criteria_fails() {
        let module = ModuleBuilder::new().pair(
            "exercises/04-errors",
            "# Errors\n\n## Hints\n\nUse the ? operator.\n",
            "# Galat\n\n## Petunjuk\n\nGunakan operator ?.\n",
        );

        let result = run(&module, criteria);

        assert_eq!(result.violations.len(), 2);
    }

    #[test]
    fn missing_starter_is_only_a_warning() {
        let module = ModuleBuilder::new()
            .pair("exercises/01-variables", GOOD_EN, GOOD_ID)
            .dir("exercises/01-variables/solution/notes");

        let result = run(&module, layout);

        assert!(result.passed());
        let messages: Vec<&str> = result.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            ["has no starter/ directory", "has no Cargo.toml, src/main.rs or src/lib.rs"]
        );
    }
}
