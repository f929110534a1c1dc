//! Workbook export for a harvested dataset.
//!
//! Writes the five tables into one `.xlsx` workbook, one sheet per table,
//! header row plus one row per entry, no index column. The workbook is
//! produced in a single pass at the end of the run.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::HarvestError;
use crate::models::Dataset;

const PAPER_COLUMNS: [&str; 9] = [
    "paper_id",
    "title",
    "publication_date",
    "url",
    "open_access",
    "source",
    "language",
    "cited_by_count",
    "fwci",
];

/// Write the dataset to an xlsx workbook at `path`.
pub fn write_workbook(dataset: &Dataset, path: &Path) -> Result<(), HarvestError> {
    let workbook_err = |source: XlsxError| HarvestError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = build_workbook(dataset).map_err(workbook_err)?;
    workbook.save(path).map_err(workbook_err)
}

fn build_workbook(dataset: &Dataset) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Papers")?;
    write_header(sheet, &PAPER_COLUMNS)?;
    for (i, paper) in dataset.papers.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &paper.paper_id)?;
        write_opt_string(sheet, row, 1, paper.title.as_deref())?;
        if let Some(date) = paper.publication_date {
            sheet.write_string(row, 2, date.format("%Y-%m-%d").to_string())?;
        }
        write_opt_string(sheet, row, 3, paper.url.as_deref())?;
        if let Some(open_access) = paper.open_access {
            sheet.write_boolean(row, 4, open_access)?;
        }
        write_opt_string(sheet, row, 5, paper.source.as_deref())?;
        write_opt_string(sheet, row, 6, paper.language.as_deref())?;
        sheet.write_number(row, 7, paper.cited_by_count as f64)?;
        sheet.write_number(row, 8, paper.fwci)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Authors")?;
    write_header(sheet, &["author_id", "name", "organization"])?;
    for (i, author) in dataset.authors.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &author.author_id)?;
        write_opt_string(sheet, row, 1, author.name.as_deref())?;
        write_opt_string(sheet, row, 2, author.organization.as_deref())?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Author-Paper Bridge")?;
    write_header(sheet, &["paper_id", "author_id"])?;
    for (i, bridge) in dataset.authorships.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &bridge.paper_id)?;
        sheet.write_string(row, 1, &bridge.author_id)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("References")?;
    write_header(sheet, &["paper_id", "referenced_work_id"])?;
    for (i, reference) in dataset.references.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &reference.paper_id)?;
        sheet.write_string(row, 1, &reference.referenced_work_id)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Citations")?;
    write_header(sheet, &["seed_id", "paper_id"])?;
    for (i, citation) in dataset.citations.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &citation.seed_id)?;
        sheet.write_string(row, 1, &citation.paper_id)?;
    }

    Ok(workbook)
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

fn write_opt_string(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorRow, PaperRow};

    #[test]
    fn writes_workbook_with_five_sheets() {
        let mut dataset = Dataset::new();
        dataset.push_paper(PaperRow {
            paper_id: "W1".to_string(),
            title: Some("A study".to_string()),
            publication_date: None,
            url: None,
            open_access: Some(true),
            source: None,
            language: Some("en".to_string()),
            cited_by_count: 12,
            fwci: 2.4,
        });
        dataset.push_author(AuthorRow {
            author_id: "A1".to_string(),
            name: Some("First Last".to_string()),
            organization: None,
        });
        dataset.push_authorship("W1", "A1");
        dataset.push_reference("W1", "W0");
        dataset.push_citation("S1", "W1");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("research_data.xlsx");
        write_workbook(&dataset, &path).unwrap();

        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn empty_dataset_still_produces_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_workbook(&Dataset::new(), &path).unwrap();
        assert!(path.exists());
    }
}
