//! Validated text primitives shared by the triage crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The trimmed input exceeded the permitted number of characters
    #[error("Text exceeds maximum length of {max} characters (got {len})")]
    TooLong { max: usize, len: usize },
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a new `NonEmptyText`, additionally bounding the trimmed length in characters.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::TooLong` when the trimmed
    /// input has more than `max_chars` characters.
    pub fn bounded(input: impl AsRef<str>, max_chars: usize) -> Result<Self, TextError> {
        let text = Self::new(input)?;
        let len = text.0.chars().count();
        if len > max_chars {
            return Err(TextError::TooLong {
                max: max_chars,
                len,
            });
        }
        Ok(text)
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical lookup form of a symptom phrase: trimmed, lowercased, never empty.
///
/// Knowledge-base keys and every comparison made against them use this form, so matching is
/// case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymptomKey(String);

impl SymptomKey {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        Ok(Self(text.as_str().to_lowercase()))
    }

    /// Builds a key from a literal in a compiled-in table.
    ///
    /// Literals are trusted to be non-blank; this is checked in debug builds only.
    pub fn from_static(literal: &'static str) -> Self {
        debug_assert!(!literal.trim().is_empty(), "blank static symptom key");
        Self(literal.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring containment in either direction.
    pub fn overlaps(&self, other: &str) -> bool {
        self.0.contains(other) || other.contains(self.0.as_str())
    }
}

impl std::fmt::Display for SymptomKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SymptomKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SymptomKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SymptomKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SymptomKey::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  chest pain \n").expect("valid text");
        assert_eq!(text.as_str(), "chest pain");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert_eq!(NonEmptyText::new("   ").expect_err("blank"), TextError::Empty);
    }

    #[test]
    fn bounded_text_rejects_long_input() {
        let err = NonEmptyText::bounded("abcdef", 5).expect_err("too long");
        assert_eq!(err, TextError::TooLong { max: 5, len: 6 });
        assert!(NonEmptyText::bounded("  abcde  ", 5).is_ok());
    }

    #[test]
    fn symptom_key_is_lowercased() {
        let key = SymptomKey::new(" Shortness Of Breath ").expect("valid key");
        assert_eq!(key.as_str(), "shortness of breath");
    }

    #[test]
    fn static_symptom_key_matches_validated_key() {
        assert_eq!(
            SymptomKey::from_static(" Severe Headache "),
            SymptomKey::new("severe headache").expect("valid key")
        );
    }

    #[test]
    fn symptom_key_overlaps_in_both_directions() {
        let key = SymptomKey::new("cough").expect("valid key");
        assert!(key.overlaps("persistent cough"));
        assert!(key.overlaps("cou"));
        assert!(!key.overlaps("fever"));
    }

    #[test]
    fn symptom_key_deserialize_rejects_blank() {
        let err = serde_json::from_str::<SymptomKey>("\"  \"").expect_err("blank key");
        assert!(err.to_string().contains("empty"));
    }
}
