//! Domain models for curriculum validation.
//!
//! This module contains the core domain types: lesson names, heading
//! outlines, navigation links, the bilingual keyword tables, configuration,
//! and the result model every check reports through.

mod config;
pub use config::{CONFIG_FILE_NAME, Config, ConfigError};

/// Markdown heading extraction and structural comparison.
pub mod heading;
pub use heading::{Divergence, Heading, HeadingOutline};

/// Lesson directory naming.
pub mod lesson;
pub use lesson::{InvalidLessonNameError, LessonName};

pub mod navigation;
pub use navigation::{LinkTarget, NavigationLinkSet};

pub mod patterns;
pub use patterns::{NavLabel, SectionCategory};

mod report;
pub use report::{Check, Property, PropertyResult, Report, Violation};
