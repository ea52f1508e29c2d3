mod module_tree;
/// Fault-tolerant, read-only filesystem access.
pub mod scanner;

pub use module_tree::{
    DocumentPair, ExerciseDirectory, Language, LessonDirectory, ModuleTree, ModuleTreeError,
};
