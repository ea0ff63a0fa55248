use thiserror::Error;

/// Rejected preconditions of [Searcher::find](crate::Searcher::find). Not finding a path is not an
/// error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("target ({x}, {y}) lies outside the {width}x{height} grid")]
    TargetOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

pub type SearchResult<T> = Result<T, SearchError>;
