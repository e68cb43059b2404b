use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Crawling not allowed for: {0}. Set the ignore flag to crawl anyway.")]
    PermissionDenied(String),

    #[error("The selector you are trying to scrape with is invalid. Selector: {0}")]
    BadSelector(String),
    #[error("Expected at least 3 tables on the page, found {found}.")]
    NotEnoughTables { found: usize },
    #[error("Data row {row} is missing the '{column}' column.")]
    MissingField { column: String, row: usize },

    #[error("Couldn't make sense of url: {0}")]
    BadUrl(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("The server is not available, try again later. {0}")]
    Unavailable(#[from] reqwest::Error),
}
