use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

/// Anchored pattern a lesson directory name must match in full.
pub const LESSON_NAME_PATTERN: &str = r"^[0-9]{2}-[a-z-]+$";

/// Unanchored pattern used to find references to lessons inside prose.
pub const LESSON_REFERENCE_PATTERN: &str = r"[0-9]{2}-[a-z-]+";

static LESSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LESSON_NAME_PATTERN).expect("lesson name pattern is valid"));

static LESSON_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(LESSON_REFERENCE_PATTERN).expect("lesson reference pattern is valid")
});

/// A validated lesson directory name (`NN-topic-name`).
///
/// Exactly two leading ASCII digits, a hyphen, then lowercase letters and hyphens
/// only. The two-digit prefix makes lexicographic order equal to numeric
/// order for up to 99 lessons, so the derived [`Ord`] is the lesson order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LessonName(NonEmptyString);

impl LessonName {
    /// Creates a new `LessonName`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLessonNameError`] if the name does not match
    /// [`LESSON_NAME_PATTERN`].
    pub fn new(name: String) -> Result<Self, InvalidLessonNameError> {
        if !is_lesson_name(&name) {
            return Err(InvalidLessonNameError(name));
        }
        NonEmptyString::new(name)
            .map(Self)
            .map_err(InvalidLessonNameError)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The two-digit ordinal prefix, e.g. `"03"` for `03-structs-enums`.
    #[must_use]
    pub fn ordinal(&self) -> &str {
        self.as_str().get(..2).unwrap_or_default()
    }
}

/// Returns `true` if `name` is a well-formed lesson directory name.
#[must_use]
pub fn is_lesson_name(name: &str) -> bool {
    LESSON_NAME.is_match(name)
}

/// Returns the first substring of `text` that looks like a lesson reference.
#[must_use]
pub fn find_lesson_reference(text: &str) -> Option<&str> {
    LESSON_REFERENCE.find(text).map(|m| m.as_str())
}

impl TryFrom<String> for LessonName {
    type Error = InvalidLessonNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LessonName {
    type Error = InvalidLessonNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for LessonName {
    type Err = InvalidLessonNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for LessonName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for LessonName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for LessonName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a directory name is not a valid lesson name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "Invalid lesson name '{0}': expected two digits, a hyphen, then lowercase letters and hyphens"
)]
pub struct InvalidLessonNameError(String);
