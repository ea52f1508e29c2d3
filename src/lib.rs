//! Structural validation for bilingual markdown curriculum modules.
//!
//! A module is a directory of numbered lessons (`01-fundamentals`, ...), each
//! documented in English (`README.md`) and Indonesian (`README_ID.md`), plus
//! an `exercises/` directory. The checks in [`checks`] verify naming, file
//! pairing, heading parity, required sections, exercise contracts and
//! lesson-to-lesson navigation, and report every finding as data.

pub mod domain;
pub use domain::{
    CONFIG_FILE_NAME, Check, Config, LessonName, Property, PropertyResult, Report, Violation,
};

/// Filesystem access for curriculum modules.
pub mod storage;
pub use storage::{ModuleTree, ModuleTreeError};

pub mod checks;
pub use checks::{run, run_all};

#[cfg(test)]
mod testing;
