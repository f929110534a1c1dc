//! Two-hop citation graph traversal.
//!
//! The collector expands each seed work into its paginated cited-by result
//! set, applies the quality filter, and appends qualifying records to the
//! five relational tables. The two-phase driver realizes the depth-2
//! expansion: seeds -> direct citers -> citers-of-citers.

use tracing::{info, warn};

use crate::error::HarvestError;
use crate::models::{last_path_segment, AuthorRow, Dataset, PaperRow, Work};
use crate::openalex::{work_url, WorkFetcher};

/// Fixed page size of the cited-by endpoint.
pub const PAGE_SIZE: u64 = 25;

/// Minimum citation count for a work to be kept.
pub const MIN_CITED_BY: i64 = 6;

/// FWCI must be strictly above this for a work to be kept.
pub const MIN_FWCI: f64 = 1.0;

/// Quality filter for citing works. Works with absent `cited_by_count` or
/// `fwci` are excluded; a missing retraction flag counts as not retracted.
pub fn passes_quality_filter(work: &Work) -> bool {
    let cited_enough = work.cited_by_count.is_some_and(|count| count >= MIN_CITED_BY);
    let impactful = work.fwci.is_some_and(|fwci| fwci > MIN_FWCI);
    let retracted = work.is_retracted.unwrap_or(false);
    cited_enough && impactful && !retracted
}

/// Crawls cited-by result sets and materializes relational rows.
pub struct CitationGraphCollector<F> {
    fetcher: F,
}

impl<F: WorkFetcher> CitationGraphCollector<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Expand every seed locator into the shared tables.
    ///
    /// A seed without a cited-by endpoint is skipped with a warning. Any
    /// failure on a paginated citation request propagates and aborts the
    /// run; in-memory progress for the run is discarded by the caller.
    pub async fn process(
        &self,
        seed_urls: &[String],
        dataset: &mut Dataset,
    ) -> Result<(), HarvestError> {
        for seed_url in seed_urls {
            let seed = self.fetcher.fetch_work(seed_url).await?;

            let Some(citing_url) = seed.cited_by_api_url else {
                warn!("No citation endpoint found for {}", seed_url);
                continue;
            };
            let seed_id = last_path_segment(seed_url);

            // Page 1 is always fetched; it carries the total count from
            // which the page span is derived.
            let mut page: u32 = 1;
            let mut total_pages: u32 = 1;

            while page <= total_pages {
                let citing = self.fetcher.fetch_citing_page(&citing_url, page).await?;

                if page == 1 {
                    let total_records = citing.meta.count;
                    total_pages = total_records.div_ceil(PAGE_SIZE) as u32;
                    info!(
                        "Found {} total citations across {} pages for {}",
                        total_records, total_pages, seed_id
                    );
                }

                for work in &citing.results {
                    if passes_quality_filter(work) {
                        append_work(dataset, work, &seed_id);
                    }
                }

                info!("Processed page {} of {}", page, total_pages);
                page += 1;
            }
        }

        Ok(())
    }
}

/// Append one qualifying work: its paper row first, then the dependent
/// authorship, reference, and citation rows, so dependent tables never
/// reference a paper_id that is not present in the paper table.
fn append_work(dataset: &mut Dataset, work: &Work, seed_id: &str) {
    let paper_id = work.short_id();

    dataset.push_paper(PaperRow {
        paper_id: paper_id.clone(),
        title: work.title.clone(),
        publication_date: work.publication_date,
        url: work.landing_page_url().map(str::to_string),
        open_access: work.is_open_access(),
        source: work.source_name().map(str::to_string),
        language: work.language.clone(),
        cited_by_count: work.cited_by_count.unwrap_or(0),
        fwci: work.fwci.unwrap_or(0.0),
    });

    for authorship in &work.authorships {
        // Authorships without an author id carry nothing to join on.
        let Some(author_id) = authorship.author_short_id() else {
            continue;
        };

        dataset.push_author(AuthorRow {
            author_id: author_id.clone(),
            name: authorship
                .author
                .as_ref()
                .and_then(|a| a.display_name.clone()),
            organization: authorship.first_institution().map(str::to_string),
        });
        dataset.push_authorship(&paper_id, &author_id);
    }

    for referenced in &work.referenced_works {
        dataset.push_reference(&paper_id, &last_path_segment(referenced));
    }

    dataset.push_citation(seed_id, &paper_id);
}

/// Run the full two-hop expansion for a set of seed work ids.
///
/// Phase 1 expands the seeds themselves; phase 2 expands every distinct
/// paper discovered in phase 1's citation table, accumulating into the same
/// tables.
pub async fn collect_two_hop<F: WorkFetcher>(
    fetcher: F,
    seed_ids: &[String],
) -> Result<Dataset, HarvestError> {
    let collector = CitationGraphCollector::new(fetcher);
    let mut dataset = Dataset::new();

    let seed_urls: Vec<String> = seed_ids.iter().map(|id| work_url(id)).collect();
    collector.process(&seed_urls, &mut dataset).await?;

    let second_hop: Vec<String> = dataset
        .citing_paper_ids()
        .iter()
        .map(|id| work_url(id))
        .collect();
    info!(
        "Expanding second hop across {} citing papers",
        second_hop.len()
    );
    collector.process(&second_hop, &mut dataset).await?;

    Ok(dataset)
}
