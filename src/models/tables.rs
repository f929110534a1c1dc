//! Relational snapshot tables built up during a harvest.
//!
//! Each table is an append-only `Vec` of row structs; the workbook is
//! produced once at the end of the run rather than by incremental
//! concatenation. Author uniqueness is tracked with a membership set so the
//! existence check stays O(1) per authorship.

use std::collections::HashSet;

use chrono::NaiveDate;

/// A citing work that passed the quality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRow {
    pub paper_id: String,
    pub title: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub url: Option<String>,
    pub open_access: Option<bool>,
    pub source: Option<String>,
    pub language: Option<String>,
    pub cited_by_count: i64,
    pub fwci: f64,
}

/// An author observed for the first time across all processed papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    pub author_id: String,
    pub name: Option<String>,
    pub organization: Option<String>,
}

/// Many-to-many join between papers and authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorshipRow {
    pub paper_id: String,
    pub author_id: String,
}

/// Outbound reference edge: paper -> older work it cites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    pub paper_id: String,
    pub referenced_work_id: String,
}

/// Citation edge: seed work -> paper discovered citing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRow {
    pub seed_id: String,
    pub paper_id: String,
}

/// The five tables of a harvest, shared across both traversal phases.
#[derive(Debug, Default)]
pub struct Dataset {
    pub papers: Vec<PaperRow>,
    pub authors: Vec<AuthorRow>,
    pub authorships: Vec<AuthorshipRow>,
    pub references: Vec<ReferenceRow>,
    pub citations: Vec<CitationRow>,
    known_authors: HashSet<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paper row. Rows are never deduplicated or mutated; a work
    /// discovered through two different seeds appears twice.
    pub fn push_paper(&mut self, paper: PaperRow) {
        self.papers.push(paper);
    }

    /// Append an author row unless this author_id has already been seen.
    /// Returns true if the row was inserted.
    pub fn push_author(&mut self, author: AuthorRow) -> bool {
        if self.known_authors.contains(&author.author_id) {
            return false;
        }
        self.known_authors.insert(author.author_id.clone());
        self.authors.push(author);
        true
    }

    pub fn push_authorship(&mut self, paper_id: &str, author_id: &str) {
        self.authorships.push(AuthorshipRow {
            paper_id: paper_id.to_string(),
            author_id: author_id.to_string(),
        });
    }

    pub fn push_reference(&mut self, paper_id: &str, referenced_work_id: &str) {
        self.references.push(ReferenceRow {
            paper_id: paper_id.to_string(),
            referenced_work_id: referenced_work_id.to_string(),
        });
    }

    pub fn push_citation(&mut self, seed_id: &str, paper_id: &str) {
        self.citations.push(CitationRow {
            seed_id: seed_id.to_string(),
            paper_id: paper_id.to_string(),
        });
    }

    /// Distinct, non-empty paper ids from the citation table in first-seen
    /// order. These become the seeds for the second traversal phase.
    pub fn citing_paper_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.citations
            .iter()
            .filter(|row| !row.paper_id.is_empty())
            .filter(|row| seen.insert(row.paper_id.as_str()))
            .map(|row| row.paper_id.clone())
            .collect()
    }

    /// Total number of rows across all five tables.
    pub fn row_count(&self) -> usize {
        self.papers.len()
            + self.authors.len()
            + self.authorships.len()
            + self.references.len()
            + self.citations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str) -> PaperRow {
        PaperRow {
            paper_id: id.to_string(),
            title: None,
            publication_date: None,
            url: None,
            open_access: None,
            source: None,
            language: None,
            cited_by_count: 0,
            fwci: 0.0,
        }
    }

    #[test]
    fn author_insertion_is_idempotent() {
        let mut dataset = Dataset::new();
        let row = AuthorRow {
            author_id: "A1".to_string(),
            name: Some("First Last".to_string()),
            organization: None,
        };
        assert!(dataset.push_author(row.clone()));
        assert!(!dataset.push_author(row));
        assert_eq!(dataset.authors.len(), 1);
    }

    #[test]
    fn papers_are_not_deduplicated() {
        let mut dataset = Dataset::new();
        dataset.push_paper(paper("W1"));
        dataset.push_paper(paper("W1"));
        assert_eq!(dataset.papers.len(), 2);
    }

    #[test]
    fn citing_paper_ids_are_distinct_in_first_seen_order() {
        let mut dataset = Dataset::new();
        dataset.push_citation("S1", "W2");
        dataset.push_citation("S1", "W1");
        dataset.push_citation("S2", "W2");
        dataset.push_citation("S2", "");
        assert_eq!(dataset.citing_paper_ids(), vec!["W2", "W1"]);
    }

    #[test]
    fn row_count_sums_all_tables() {
        let mut dataset = Dataset::new();
        dataset.push_paper(paper("W1"));
        dataset.push_authorship("W1", "A1");
        dataset.push_reference("W1", "W0");
        dataset.push_citation("S1", "W1");
        assert_eq!(dataset.row_count(), 4);
    }
}
