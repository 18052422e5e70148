use crate::foundation::error::{GridGifError, GridGifResult};

/// One iteration's cell states as a rectangular integer matrix.
///
/// Cells are stored row-major in a flat buffer. A grid always has at least one row and one
/// column; construct it through [`Grid::from_rows`] or the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Grid {
    /// Build a grid from row vectors, rejecting empty and ragged input.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> GridGifResult<Self>
    where
        R: AsRef<[i64]>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut n = 0usize;
        for (row_idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match cols {
                None => {
                    if row.is_empty() {
                        return Err(GridGifError::validation("grid rows must not be empty"));
                    }
                    cols = Some(row.len());
                }
                Some(expected) if expected != row.len() => {
                    return Err(GridGifError::RaggedGrid {
                        grid: 0,
                        row: row_idx,
                        line: None,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            cells.extend_from_slice(row);
            n += 1;
        }

        let Some(cols) = cols else {
            return Err(GridGifError::validation("grid must have at least one row"));
        };
        Ok(Self {
            rows: n,
            cols,
            cells,
        })
    }

    /// Caller guarantees `cells.len() == rows * cols` and both are non-zero.
    pub(crate) fn from_flat(rows: usize, cols: usize, cells: Vec<i64>) -> Self {
        debug_assert_eq!(rows * cols, cells.len());
        Self { rows, cols, cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell value at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> Option<&[i64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        self.cells.chunks_exact(self.cols)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Copy out as nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.iter_rows().map(<[i64]>::to_vec).collect()
    }
}

/// Ordered grids from one input, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridSequence {
    grids: Vec<Grid>,
}

impl GridSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a grid at the end.
    pub fn push(&mut self, grid: Grid) {
        self.grids.push(grid);
    }

    /// Number of grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// `true` when no grid was parsed.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Borrow grids in order.
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Iterate grids in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.grids.iter()
    }

    /// Take ownership of the grids.
    pub fn into_grids(self) -> Vec<Grid> {
        self.grids
    }
}

impl From<Vec<Grid>> for GridSequence {
    fn from(grids: Vec<Grid>) -> Self {
        Self { grids }
    }
}

impl FromIterator<Grid> for GridSequence {
    fn from_iter<T: IntoIterator<Item = Grid>>(iter: T) -> Self {
        Self {
            grids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GridSequence {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.grids.iter()
    }
}

impl IntoIterator for GridSequence {
    type Item = Grid;
    type IntoIter = std::vec::IntoIter<Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.grids.into_iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
