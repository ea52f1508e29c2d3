//! A curriculum module on disk.
//!
//! The [`ModuleTree`] is the only entry point the checks use to look at the
//! filesystem. Everything it returns is derived fresh on each call; nothing
//! is cached or written back.

use std::path::{Path, PathBuf};

use crate::{
    domain::{Config, LessonName},
    storage::scanner,
};

/// The root of a curriculum module under validation.
#[derive(Debug, Clone)]
pub struct ModuleTree {
    root: PathBuf,
    config: Config,
}

impl ModuleTree {
    /// Opens the module rooted at `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` does not exist or is not a directory. This is the one
    /// fatal condition: no check can run without a module to scan.
    pub fn open(root: impl Into<PathBuf>, config: Config) -> Result<Self, ModuleTreeError> {
        let root = root.into();
        if !root.exists() {
            return Err(ModuleTreeError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ModuleTreeError::NotADirectory(root));
        }
        Ok(Self { root, config })
    }

    /// The module root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Renders `path` relative to the module root for reporting.
    #[must_use]
    pub fn display(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }

    /// Names of the top-level directories intended as lessons.
    ///
    /// Hidden, ignored and configured non-lesson directories are left out;
    /// everything else must follow the lesson naming convention.
    #[must_use]
    pub fn lesson_candidates(&self) -> Vec<String> {
        scanner::list_directories(&self.root)
            .into_iter()
            .filter(|name| !self.config.is_ignored(name))
            .filter(|name| {
                let skip = self.config.is_non_lesson(name);
                if skip {
                    tracing::debug!("'{name}' is not a lesson directory");
                }
                !skip
            })
            .collect()
    }

    /// The well-named lesson directories, in lesson order.
    #[must_use]
    pub fn lessons(&self) -> Vec<LessonDirectory> {
        lesson_directories(&self.root, self.lesson_candidates())
    }

    /// Every directory in the module, including the root, honouring
    /// `ignored_dirs` and `max_depth`.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        scanner::walk_directories(&self.root, self.config.max_depth, |name| {
            self.config.is_ignored(name)
        })
    }

    /// The English/Indonesian documents present in `dir`.
    #[must_use]
    pub fn document_pair(&self, dir: &Path) -> DocumentPair {
        let files = scanner::list_files(dir);
        let has = |name: &str| files.iter().any(|f| f == name);

        DocumentPair {
            dir: dir.to_path_buf(),
            english: has(self.config.english_document())
                .then(|| dir.join(self.config.english_document())),
            translated: has(self.config.translated_document())
                .then(|| dir.join(self.config.translated_document())),
        }
    }

    /// The document pairs of every directory holding at least one document.
    #[must_use]
    pub fn document_pairs(&self) -> Vec<DocumentPair> {
        self.directories()
            .iter()
            .map(|dir| self.document_pair(dir))
            .filter(|pair| !pair.is_empty())
            .collect()
    }

    /// The exercise root, e.g. `<module>/exercises`.
    #[must_use]
    pub fn exercises_root(&self) -> PathBuf {
        self.root.join(self.config.exercises_dir())
    }

    /// Names under the exercise root that are not well-formed exercise names.
    #[must_use]
    pub fn misnamed_exercises(&self) -> Vec<String> {
        scanner::list_directories(&self.exercises_root())
            .into_iter()
            .filter(|name| !self.config.is_ignored(name))
            .filter(|name| LessonName::try_from(name.as_str()).is_err())
            .collect()
    }

    /// The exercise directories, in lesson order.
    ///
    /// Empty if the module has no exercise root.
    #[must_use]
    pub fn exercises(&self) -> Vec<ExerciseDirectory> {
        let root = self.exercises_root();
        if !root.is_dir() {
            return Vec::new();
        }

        let candidates = scanner::list_directories(&root)
            .into_iter()
            .filter(|name| !self.config.is_ignored(name))
            .collect();

        lesson_directories(&root, candidates)
            .into_iter()
            .map(|lesson| {
                let subdirs = scanner::list_directories(&lesson.path);
                let sub = |name: &str| {
                    subdirs
                        .iter()
                        .any(|d| d == name)
                        .then(|| lesson.path.join(name))
                };
                ExerciseDirectory {
                    documents: self.document_pair(&lesson.path),
                    starter: sub("starter"),
                    solution: sub("solution"),
                    lesson,
                }
            })
            .collect()
    }
}

fn lesson_directories(parent: &Path, names: Vec<String>) -> Vec<LessonDirectory> {
    let mut lessons: Vec<LessonDirectory> = names
        .into_iter()
        .filter_map(|name| {
            let path = parent.join(&name);
            LessonName::new(name)
                .map(|name| LessonDirectory { name, path })
                .ok()
        })
        .collect();
    lessons.sort_by(|a, b| a.name.cmp(&b.name));
    lessons
}

/// Errors opening a module.
#[derive(Debug, thiserror::Error)]
pub enum ModuleTreeError {
    /// The module root does not exist.
    #[error("Module root {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The module root is a file.
    #[error("Module root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// A numbered lesson (or exercise) directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDirectory {
    /// The validated directory name.
    pub name: LessonName,
    /// Absolute path of the directory.
    pub path: PathBuf,
}

/// The language of one document in a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// The `README.md` side.
    English,
    /// The `README_ID.md` side.
    Indonesian,
}

impl Language {
    /// Both languages, English first.
    pub const ALL: [Self; 2] = [Self::English, Self::Indonesian];
}

/// The English and Indonesian documents of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    /// Directory holding the documents.
    pub dir: PathBuf,
    /// Path of the English document, if present.
    pub english: Option<PathBuf>,
    /// Path of the Indonesian document, if present.
    pub translated: Option<PathBuf>,
}

impl DocumentPair {
    /// Returns `true` if both documents exist.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.english.is_some() && self.translated.is_some()
    }

    /// Returns `true` if neither document exists.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.english.is_none() && self.translated.is_none()
    }

    /// The document for `language`, if present.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&Path> {
        match language {
            Language::English => self.english.as_deref(),
            Language::Indonesian => self.translated.as_deref(),
        }
    }

    /// The documents that exist, with their language.
    pub fn documents(&self) -> impl Iterator<Item = (Language, &Path)> {
        Language::ALL
            .into_iter()
            .filter_map(|language| self.get(language).map(|path| (language, path)))
    }
}

/// A coding exercise under the exercise root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDirectory {
    /// The exercise directory itself.
    pub lesson: LessonDirectory,
    /// Its instruction documents.
    pub documents: DocumentPair,
    /// `starter/`, if present.
    pub starter: Option<PathBuf>,
    /// `solution/`, if present.
    pub solution: Option<PathBuf>,
}
