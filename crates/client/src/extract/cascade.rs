//! First-non-empty field selection.
//!
//! Every field with fallbacks is resolved through a [`Cascade`]: attempts run
//! lazily in the order they were added and the first one yielding a
//! non-blank string wins. An exhausted cascade is an absent field, not an error.

type Attempt<'a> = Box<dyn FnOnce() -> Option<String> + 'a>;

/// Ordered list of extraction attempts for one field.
#[derive(Default)]
pub struct Cascade<'a> {
    attempts: Vec<Attempt<'a>>,
}

impl<'a> Cascade<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lazily evaluated attempt.
    pub fn attempt(mut self, attempt: impl FnOnce() -> Option<String> + 'a) -> Self {
        self.attempts.push(Box::new(attempt));
        self
    }

    /// Append an already computed candidate.
    pub fn candidate(self, value: Option<String>) -> Self {
        self.attempt(move || value)
    }

    /// Run the attempts in order and return the first non-blank, trimmed result.
    pub fn resolve(self) -> Option<String> {
        self.attempts.into_iter().find_map(|attempt| non_blank(attempt()?))
    }
}

/// `Some(trimmed)` unless the text is blank.
pub fn non_blank(text: impl AsRef<str>) -> Option<String> {
    let trimmed = text.as_ref().trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
