//! Snippet registry.
//!
//! A thin typed facade over the store's snippet commands: it normalizes
//! form input (default language, free-text tag parsing) before anything
//! reaches the reducer. Constructed around an explicit store handle.

use crate::error::CoreError;
use crate::store::{Command, Snippet, SnippetPatch, Store};

/// Language tags offered by the editor dropdown.
pub const LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "go",
    "rust",
    "html",
    "css",
    "sql",
    "bash",
    "other",
];

/// Language applied when the user leaves the field untouched.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Form input for a new snippet.
#[derive(Debug, Clone, Default)]
pub struct SnippetDraft {
    pub title: String,
    pub code: String,
    /// Falls back to [`DEFAULT_LANGUAGE`] when `None`.
    pub language: Option<String>,
    /// Comma-separated free text, e.g. "react, hooks , ,react".
    pub tags_text: String,
}

/// Parse free-text tags: split on commas, trim, drop empties, keep the
/// first occurrence of each tag (the collection is an ordered set).
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Snippet CRUD over an injected store handle.
pub struct SnippetRegistry<'a> {
    store: &'a mut Store,
}

impl<'a> SnippetRegistry<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Create a snippet from form input.
    ///
    /// # Errors
    /// Rejects an empty title or empty code before any mutation.
    pub fn create(&mut self, draft: SnippetDraft) -> Result<(), CoreError> {
        let language = draft
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        self.store.dispatch(Command::AddSnippet {
            title: draft.title,
            code: draft.code,
            language,
            tags: parse_tags(&draft.tags_text),
        })
    }

    /// Update any subset of fields; `updated_at` is refreshed.
    pub fn update(&mut self, id: &str, patch: SnippetPatch) -> Result<(), CoreError> {
        self.store.dispatch(Command::UpdateSnippet {
            id: id.to_string(),
            patch,
        })
    }

    /// Remove a snippet. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Result<(), CoreError> {
        self.store.dispatch(Command::RemoveSnippet { id: id.to_string() })
    }

    pub fn all(&self) -> &[Snippet] {
        &self.store.snapshot().snippets
    }
}
