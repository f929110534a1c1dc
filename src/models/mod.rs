//! Data models for citeharvest.

mod tables;
mod work;

pub use tables::{AuthorRow, AuthorshipRow, CitationRow, Dataset, PaperRow, ReferenceRow};
pub use work::{
    last_path_segment, AuthorRef, Authorship, CitingPage, Institution, OpenAccess, PageMeta,
    PrimaryLocation, SourceInfo, Work,
};
