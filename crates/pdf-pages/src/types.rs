use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No valid page ranges")]
    NoValidRanges,
    #[error("No pages to extract")]
    NoPages,
    #[error("Page {page} does not exist (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
