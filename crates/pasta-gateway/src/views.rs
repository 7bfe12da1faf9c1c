use crate::error::Result;
use askama::Template;
use axum::response::Html;
use pasta_core::{Paste, PasteSummary};

const UNTITLED: &str = "Untitled";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

pub struct PasteView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub email: String,
    pub language: String,
    pub created: String,
}

impl From<Paste> for PasteView {
    fn from(paste: Paste) -> Self {
        Self {
            id: paste.id.to_string(),
            title: paste.title.unwrap_or_else(|| UNTITLED.to_string()),
            created: paste.timestamp.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
            content: paste.content,
            email: paste.email,
            language: paste.language.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "paste.html")]
pub struct PasteTemplate {
    pub paste: PasteView,
}

pub struct ArchiveRow {
    pub href: String,
    pub title: String,
    pub email: String,
}

impl From<PasteSummary> for ArchiveRow {
    fn from(summary: PasteSummary) -> Self {
        Self {
            href: summary.id.to_path(),
            title: summary.title.unwrap_or_else(|| UNTITLED.to_string()),
            email: summary.email,
        }
    }
}

#[derive(Template)]
#[template(path = "archive.html")]
pub struct ArchiveTemplate {
    pub rows: Vec<ArchiveRow>,
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use pasta_core::PasteId;

    #[test]
    fn paste_page_escapes_content() {
        let page = PasteTemplate {
            paste: PasteView::from(Paste {
                id: PasteId::new_unchecked("abc"),
                timestamp: Timestamp::UNIX_EPOCH,
                content: "<script>alert(1)</script>".to_string(),
                email: "a@x.com".to_string(),
                title: None,
                language: None,
            }),
        };

        let html = page.render().unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&#60;script&#62;"));
        assert!(html.contains(UNTITLED));
        assert!(html.contains("1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn archive_lists_rows_in_order() {
        let page = ArchiveTemplate {
            rows: ["first", "second"]
                .into_iter()
                .map(|id| {
                    ArchiveRow::from(PasteSummary {
                        id: PasteId::new_unchecked(id),
                        title: Some(format!("title {id}")),
                        email: "a@x.com".to_string(),
                    })
                })
                .collect(),
        };

        let html = page.render().unwrap();

        let first = html.find("title first").unwrap();
        let second = html.find("title second").unwrap();
        assert!(first < second);
    }
}
