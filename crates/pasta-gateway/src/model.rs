use pasta_core::NewPaste;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Body of the submission form on the index page.
#[derive(Debug, Default, Deserialize)]
pub struct PasteForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl From<PasteForm> for NewPaste {
    fn from(form: PasteForm) -> Self {
        NewPaste::new(form.contents, form.title, form.language)
    }
}
