//! citeharvest - citation graph acquisition and research dataset builder.
//!
//! Crawls the OpenAlex citation graph from seed publications, two hops
//! deep, filters citing works by a quality predicate, and materializes a
//! relational snapshot (papers, authors, authorship links, references,
//! citations) into a five-sheet workbook.

pub mod cli;
pub mod collector;
pub mod error;
pub mod export;
pub mod models;
pub mod openalex;

pub use collector::{collect_two_hop, CitationGraphCollector};
pub use error::HarvestError;
pub use export::write_workbook;
pub use models::Dataset;
pub use openalex::{OpenAlexClient, WorkFetcher};
