use std::path::PathBuf;

/// Convenience result type used across gridgif.
pub type GridGifResult<T> = Result<T, GridGifError>;

/// Top-level error taxonomy for parsing, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum GridGifError {
    /// A data line contained a token that is not an integer.
    #[error("format error at line {line}: \"{token}\" is not an integer")]
    Format {
        /// 1-based line number in the input.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A row's length differs from the first row of its grid.
    #[error(
        "ragged grid {grid}: row {row}{} has {found} columns, expected {expected}",
        at_line(.line)
    )]
    RaggedGrid {
        /// 0-based index of the grid within its sequence.
        grid: usize,
        /// 0-based row index within the grid.
        row: usize,
        /// 1-based input line, when the grid came from text.
        line: Option<usize>,
        /// Column count of the grid's first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },

    /// A cell value has no palette entry.
    #[error("palette lookup error: grid {grid} row {row} col {col} has value {value} with no palette entry")]
    PaletteLookup {
        /// 0-based grid index.
        grid: usize,
        /// 0-based row index.
        row: usize,
        /// 0-based column index.
        col: usize,
        /// The unmapped cell value.
        value: i64,
    },

    /// The input yielded zero grids.
    #[error("empty input: no grids found")]
    EmptyInput,

    /// Invalid configuration or data shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure inside the image codec.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure on a specific path.
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" (line {l})"),
        None => String::new(),
    }
}

impl GridGifError {
    /// Build a [`GridGifError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridGifError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GridGifError::Io`] value for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
