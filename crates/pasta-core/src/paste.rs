use crate::paste_id::PasteId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A stored text snippet.
///
/// Every field is fixed at creation time; there is no edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    /// Generated identifier, unique for the lifetime of the system.
    pub id: PasteId,
    /// When the paste was created. Orders the archive listing.
    pub timestamp: Timestamp,
    /// The text body.
    pub content: String,
    /// Identity of the creator. Only this identity may delete the paste.
    pub email: String,
    /// Optional display label.
    pub title: Option<String>,
    /// Optional language hint, stored as given and never interpreted.
    pub language: Option<String>,
}

impl Paste {
    /// Returns `true` if `identity` is the creator of this paste.
    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.email == identity.as_str()
    }

    /// Projects the paste onto the fields shown in the archive.
    pub fn summary(&self) -> PasteSummary {
        PasteSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            email: self.email.clone(),
        }
    }
}

/// The archive projection of a [`Paste`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteSummary {
    pub id: PasteId,
    pub title: Option<String>,
    pub email: String,
}

/// User-supplied fields for a new paste.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPaste {
    pub content: String,
    pub title: Option<String>,
    pub language: Option<String>,
}

impl NewPaste {
    /// Creates a new paste request, normalising blank optional fields to `None`.
    pub fn new(
        content: impl Into<String>,
        title: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            content: content.into(),
            title: non_blank(title),
            language: non_blank(language),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// The authenticated principal acting on a request.
///
/// An `Identity` is never empty; an unauthenticated caller is represented
/// by the absence of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from a principal string.
    ///
    /// Returns `None` if the value is empty after trimming.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
