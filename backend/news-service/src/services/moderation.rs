/// Forbidden-word filter applied to comment text before it is stored
use crate::error::{AppError, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_FORBIDDEN_WORDS: [&str; 2] = ["редиска", "негодяй"];

pub const DEFAULT_WARNING: &str = "Не ругайтесь!";

/// Outcome of checking a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationResult {
    Clean,
    Forbidden { word: String },
}

impl ModerationResult {
    pub fn is_clean(&self) -> bool {
        matches!(self, ModerationResult::Clean)
    }
}

/// Case-sensitive substring matcher over a fixed list of banned words
#[derive(Debug, Clone)]
pub struct ForbiddenWordFilter {
    words: Vec<String>,
    warning: String,
}

impl Default for ForbiddenWordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_WORDS, DEFAULT_WARNING)
    }
}

impl ForbiddenWordFilter {
    /// Empty entries are dropped: an empty pattern would match every text.
    pub fn new<I, S>(words: I, warning: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self {
            words: Vec::new(),
            warning: warning.into(),
        };
        filter.extend(words);
        filter
    }

    /// Add words, skipping blanks and duplicates
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let word = word.into();
            if !word.is_empty() && !self.words.contains(&word) {
                self.words.push(word);
            }
        }
    }

    /// Load additional words from a file: one per line, blank lines and
    /// `#` comments ignored. Case is preserved.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Config(format!(
                "Failed to load forbidden words from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let words: Vec<String> = content
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.to_string())
            .collect();

        tracing::info!(
            count = words.len(),
            path = %path.as_ref().display(),
            "Loaded forbidden words"
        );
        self.extend(words);
        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn warning(&self) -> &str {
        &self.warning
    }

    /// Reject text containing any banned word anywhere, case-sensitively
    pub fn check(&self, text: &str) -> ModerationResult {
        match self.words.iter().find(|word| text.contains(word.as_str())) {
            Some(word) => ModerationResult::Forbidden { word: word.clone() },
            None => ModerationResult::Clean,
        }
    }
}
