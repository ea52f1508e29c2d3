//! Fixture curriculum modules for tests.

use std::fs;

use tempfile::TempDir;

use crate::{Config, ModuleTree};

/// Builds a module tree inside a temporary directory.
///
/// The directory is removed when the builder is dropped, so keep it alive for
/// as long as the [`ModuleTree`] is in use.
pub struct ModuleBuilder {
    tmp: TempDir,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Creates a directory (and its parents).
    pub fn dir(self, path: &str) -> Self {
        fs::create_dir_all(self.tmp.path().join(path)).expect("failed to create fixture dir");
        self
    }

    /// Writes a file, creating its parent directories.
    pub fn file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        let path = self.tmp.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(path, content).expect("failed to write fixture file");
        self
    }

    /// Writes `README.md` and `README_ID.md` into `dir`.
    pub fn pair(self, dir: &str, english: &str, indonesian: &str) -> Self {
        self.file(&format!("{dir}/README.md"), english)
            .file(&format!("{dir}/README_ID.md"), indonesian)
    }

    pub fn tree(&self) -> ModuleTree {
        self.tree_with(Config::default())
    }

    pub fn tree_with(&self, config: Config) -> ModuleTree {
        ModuleTree::open(self.tmp.path(), config).expect("fixture root exists")
    }
}

/// A lesson document carrying every required section and a navigation footer.
pub fn lesson_doc(title: &str, previous: Option<&str>, next: Option<&str>) -> String {
    let mut doc = format!(
        "# {title}\n\n[Bahasa Indonesia](README_ID.md)\n\n## Overview\n\nText.\n\n\
         ## Learning Objectives\n\n- one\n\n## Prerequisites\n\nNone.\n\n\
         ## Best Practices\n\n- two\n\n## Next Steps\n\nKeep going.\n\n\
         ## Source Attribution\n\nOriginal.\n\n---\n\n"
    );
    let mut footer = Vec::new();
    if let Some(previous) = previous {
        footer.push(format!("**Previous**: [Back](../{previous}/README.md)"));
    }
    footer.push("**Module Home**: [Home](../README.md)".to_string());
    if let Some(next) = next {
        footer.push(format!("**Next**: [Forward](../{next}/README.md)"));
    }
    doc.push_str(&footer.join(" | "));
    doc.push('\n');
    doc
}

/// The Indonesian counterpart of [`lesson_doc`].
pub fn lesson_doc_id(title: &str, previous: Option<&str>, next: Option<&str>) -> String {
    let mut doc = format!(
        "# {title}\n\n[English](README.md)\n\n## Gambaran Umum\n\nTeks.\n\n\
         ## Tujuan Pembelajaran\n\n- satu\n\n## Prasyarat\n\nTidak ada.\n\n\
         ## Kesalahan Umum\n\n- dua\n\n## Langkah Selanjutnya\n\nLanjutkan.\n\n\
         ## Atribusi Sumber\n\nAsli.\n\n---\n\n"
    );
    let mut footer = Vec::new();
    if let Some(previous) = previous {
        footer.push(format!("**Sebelumnya**: [Kembali](../{previous}/README_ID.md)"));
    }
    footer.push("**Beranda Modul**: [Beranda](../README_ID.md)".to_string());
    if let Some(next) = next {
        footer.push(format!("**Selanjutnya**: [Lanjut](../{next}/README_ID.md)"));
    }
    doc.push_str(&footer.join(" | "));
    doc.push('\n');
    doc
}
