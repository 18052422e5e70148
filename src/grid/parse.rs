use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::foundation::error::{GridGifError, GridGifResult};
use crate::grid::model::{Grid, GridSequence};

/// Marker prefix written by the cellular-automaton drivers.
pub const ITERATION_MARKER: &str = "Iteration";
/// Marker prefix written by the neuron-grid driver.
pub const STEP_MARKER: &str = "Grid state after step";

/// Line prefixes that separate one grid from the next.
///
/// A line is a marker when its trimmed content starts with any prefix in the set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerSet {
    prefixes: Vec<String>,
}

impl MarkerSet {
    /// Build a marker set. At least one non-blank prefix is required.
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> GridGifResult<Self> {
        let mut out: Vec<String> = Vec::new();
        for p in prefixes {
            let p = p.into();
            let p = p.trim();
            if p.is_empty() {
                return Err(GridGifError::validation("marker prefix must not be blank"));
            }
            if !out.iter().any(|existing| existing == p) {
                out.push(p.to_owned());
            }
        }
        if out.is_empty() {
            return Err(GridGifError::validation(
                "at least one marker prefix is required",
            ));
        }
        Ok(Self { prefixes: out })
    }

    /// Single-prefix marker set.
    pub fn single(prefix: impl Into<String>) -> GridGifResult<Self> {
        let prefix: String = prefix.into();
        Self::new([prefix])
    }

    /// Configured prefixes, in insertion order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// `true` when `line` is an iteration boundary.
    pub fn matches(&self, line: &str) -> bool {
        let line = line.trim();
        self.prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            prefixes: vec![ITERATION_MARKER.to_owned(), STEP_MARKER.to_owned()],
        }
    }
}

/// Rows accumulated since the last marker.
#[derive(Debug, Default)]
struct RowBuffer {
    cells: Vec<i64>,
    cols: usize,
    rows: usize,
}

impl RowBuffer {
    fn push(&mut self, row: Vec<i64>, line: usize, grid: usize) -> GridGifResult<()> {
        if self.rows == 0 {
            self.cols = row.len();
        } else if row.len() != self.cols {
            return Err(GridGifError::RaggedGrid {
                grid,
                row: self.rows,
                line: Some(line),
                expected: self.cols,
                found: row.len(),
            });
        }
        self.cells.extend(row);
        self.rows += 1;
        Ok(())
    }

    fn take(&mut self) -> Option<Grid> {
        if self.rows == 0 {
            return None;
        }
        let cells = std::mem::take(&mut self.cells);
        let grid = Grid::from_flat(self.rows, self.cols, cells);
        self.rows = 0;
        self.cols = 0;
        Some(grid)
    }
}

fn parse_row(line: &str, line_no: usize) -> GridGifResult<Vec<i64>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map_err(|_| GridGifError::Format {
                line: line_no,
                token: tok.to_owned(),
            })
        })
        .collect()
}

/// Streaming grid parser over a line-oriented reader.
///
/// Yields one [`Grid`] per marker-delimited block in a single forward pass. The first error
/// ends the stream.
pub struct GridReader<R> {
    lines: std::io::Lines<R>,
    markers: MarkerSet,
    origin: PathBuf,
    line_no: usize,
    buf: RowBuffer,
    emitted: usize,
    done: bool,
}

impl<R: BufRead> GridReader<R> {
    /// Wrap `reader`, splitting grids on `markers`.
    pub fn new(reader: R, markers: MarkerSet) -> Self {
        Self {
            lines: reader.lines(),
            markers,
            origin: PathBuf::from("<input>"),
            line_no: 0,
            buf: RowBuffer::default(),
            emitted: 0,
            done: false,
        }
    }

    /// Name used for the input in IO errors.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }

    fn finish_grid(&mut self) -> Option<Grid> {
        let grid = self.buf.take()?;
        self.emitted += 1;
        tracing::trace!(
            grid = self.emitted - 1,
            rows = grid.rows(),
            cols = grid.cols(),
            "grid parsed"
        );
        Some(grid)
    }

    fn fail(&mut self, err: GridGifError) -> Option<GridGifResult<Grid>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for GridReader<R> {
    type Item = GridGifResult<Grid>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                None => {
                    self.done = true;
                    return self.finish_grid().map(Ok);
                }
                Some(Err(e)) => {
                    let err = GridGifError::io(self.origin.clone(), e);
                    return self.fail(err);
                }
                Some(Ok(line)) => line,
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if self.markers.matches(trimmed) {
                if let Some(grid) = self.finish_grid() {
                    return Some(Ok(grid));
                }
                continue;
            }

            let row = match parse_row(trimmed, self.line_no) {
                Ok(row) => row,
                Err(e) => return self.fail(e),
            };
            if let Err(e) = self.buf.push(row, self.line_no, self.emitted) {
                return self.fail(e);
            }
        }
    }
}

/// Parse a whole reader into a [`GridSequence`].
pub fn parse_reader<R: BufRead>(reader: R, markers: &MarkerSet) -> GridGifResult<GridSequence> {
    GridReader::new(reader, markers.clone()).collect()
}

/// Parse in-memory text.
pub fn parse_str(text: &str, markers: &MarkerSet) -> GridGifResult<GridSequence> {
    parse_reader(text.as_bytes(), markers)
}

/// Open and parse a log file.
pub fn parse_path(path: impl AsRef<Path>, markers: &MarkerSet) -> GridGifResult<GridSequence> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| GridGifError::io(path, e))?;
    GridReader::new(BufReader::new(f), markers.clone())
        .with_origin(path)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/grid/parse.rs"]
mod tests;
