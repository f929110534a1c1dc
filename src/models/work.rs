//! Serde models for OpenAlex work payloads.
//!
//! Every nested object is optional so that partially populated works decode
//! without errors; each access site chooses its own default. Unknown fields
//! are ignored, which also lets API error bodies decode into an empty work
//! (no `cited_by_api_url`), matching the skip-seed behavior.

use chrono::NaiveDate;
use serde::Deserialize;

/// A single work as returned by `GET /works/{id}` and in citation pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Work {
    /// Identifier URL, e.g. `https://openalex.org/W2741809807`.
    pub id: Option<String>,
    pub title: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub primary_location: Option<PrimaryLocation>,
    pub open_access: Option<OpenAccess>,
    pub language: Option<String>,
    pub cited_by_count: Option<i64>,
    /// Field-Weighted Citation Impact; absent for very recent works.
    pub fwci: Option<f64>,
    pub is_retracted: Option<bool>,
    pub authorships: Vec<Authorship>,
    /// Identifier URLs of works this work cites.
    pub referenced_works: Vec<String>,
    /// Query endpoint returning the works that cite this one.
    pub cited_by_api_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrimaryLocation {
    pub landing_page_url: Option<String>,
    pub source: Option<SourceInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceInfo {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenAccess {
    pub is_oa: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Authorship {
    pub author: Option<AuthorRef>,
    pub institutions: Vec<Institution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorRef {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Institution {
    pub display_name: Option<String>,
}

/// One page of a cited-by query.
///
/// `meta` is required: a citation page without a result count is malformed
/// and fails the run, unlike absent fields inside individual works.
#[derive(Debug, Clone, Deserialize)]
pub struct CitingPage {
    pub meta: PageMeta,
    #[serde(default)]
    pub results: Vec<Work>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    /// Total result count across all pages.
    pub count: u64,
}

impl Work {
    /// Canonical short id: the last path segment of the identifier URL.
    /// `https://openalex.org/works/W123` becomes `W123`.
    pub fn short_id(&self) -> String {
        last_path_segment(self.id.as_deref().unwrap_or(""))
    }

    /// Landing page URL from the primary location, if any.
    pub fn landing_page_url(&self) -> Option<&str> {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.landing_page_url.as_deref())
    }

    /// Display name of the primary location's source, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.source.as_ref())
            .and_then(|src| src.display_name.as_deref())
    }

    /// Open-access flag, if reported.
    pub fn is_open_access(&self) -> Option<bool> {
        self.open_access.as_ref().and_then(|oa| oa.is_oa)
    }
}

impl Authorship {
    /// Canonical author id, or None when the authorship carries no author.
    pub fn author_short_id(&self) -> Option<String> {
        self.author
            .as_ref()
            .and_then(|a| a.id.as_deref())
            .map(last_path_segment)
    }

    /// Display name of the first listed institution, if any.
    pub fn first_institution(&self) -> Option<&str> {
        self.institutions
            .first()
            .and_then(|inst| inst.display_name.as_deref())
    }
}

/// Extract the last path segment of an identifier URL.
pub fn last_path_segment(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_last_path_segment() {
        let work = Work {
            id: Some("https://openalex.org/works/W123".to_string()),
            ..Default::default()
        };
        assert_eq!(work.short_id(), "W123");
        assert_eq!(last_path_segment("https://openalex.org/W2741809807"), "W2741809807");
        assert_eq!(last_path_segment("W99"), "W99");
    }

    #[test]
    fn decodes_sparse_work() {
        let work: Work = serde_json::from_str(r#"{"id": "https://openalex.org/W1"}"#).unwrap();
        assert_eq!(work.short_id(), "W1");
        assert!(work.landing_page_url().is_none());
        assert!(work.source_name().is_none());
        assert!(work.is_open_access().is_none());
        assert!(work.fwci.is_none());
        assert!(work.authorships.is_empty());
    }

    #[test]
    fn decodes_nested_location_and_access() {
        let raw = r#"{
            "id": "https://openalex.org/W2",
            "publication_date": "2019-07-01",
            "primary_location": {
                "landing_page_url": "https://doi.org/10.1000/xyz",
                "source": {"display_name": "Nature"}
            },
            "open_access": {"is_oa": true}
        }"#;
        let work: Work = serde_json::from_str(raw).unwrap();
        assert_eq!(work.landing_page_url(), Some("https://doi.org/10.1000/xyz"));
        assert_eq!(work.source_name(), Some("Nature"));
        assert_eq!(work.is_open_access(), Some(true));
        assert_eq!(
            work.publication_date,
            Some(NaiveDate::from_ymd_opt(2019, 7, 1).unwrap())
        );
    }

    #[test]
    fn null_nested_objects_decode_as_absent() {
        let raw = r#"{"id": "https://openalex.org/W3", "primary_location": null, "open_access": null}"#;
        let work: Work = serde_json::from_str(raw).unwrap();
        assert!(work.landing_page_url().is_none());
        assert!(work.is_open_access().is_none());
    }

    #[test]
    fn authorship_helpers() {
        let raw = r#"{
            "author": {"id": "https://openalex.org/A5017898742", "display_name": "A. Nash"},
            "institutions": [{"display_name": "Princeton University"}, {"display_name": "MIT"}]
        }"#;
        let authorship: Authorship = serde_json::from_str(raw).unwrap();
        assert_eq!(authorship.author_short_id().as_deref(), Some("A5017898742"));
        assert_eq!(authorship.first_institution(), Some("Princeton University"));

        let empty: Authorship = serde_json::from_str("{}").unwrap();
        assert!(empty.author_short_id().is_none());
        assert!(empty.first_institution().is_none());
    }

    #[test]
    fn error_body_decodes_without_cited_by_endpoint() {
        let raw = r#"{"error": "Not Found", "message": "no such work"}"#;
        let work: Work = serde_json::from_str(raw).unwrap();
        assert!(work.cited_by_api_url.is_none());
    }
}
