use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::foundation::error::{GridGifError, GridGifResult};
use crate::grid::model::{Grid, GridSequence};

/// Reject headers that a reader could not tell apart from data.
fn check_marker(marker: &str) -> GridGifResult<()> {
    let Some(first) = marker.split_whitespace().next() else {
        return Err(GridGifError::validation("log marker must not be blank"));
    };
    if first.parse::<i64>().is_ok() {
        return Err(GridGifError::validation(format!(
            "log marker \"{marker}\" starts with an integer and would read as a grid row"
        )));
    }
    Ok(())
}

fn write_grids<W: Write>(mut w: W, seq: &GridSequence, marker: &str) -> std::io::Result<()> {
    let marker = marker.trim();
    for (n, grid) in seq.iter().enumerate() {
        writeln!(w, "{marker} {n}")?;
        write_grid(&mut w, grid)?;
        writeln!(w)?;
    }
    w.flush()
}

fn write_grid<W: Write>(w: &mut W, grid: &Grid) -> std::io::Result<()> {
    for row in grid.iter_rows() {
        let mut first = true;
        for v in row {
            if !first {
                w.write_all(b" ")?;
            }
            write!(w, "{v}")?;
            first = false;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write grids in the simulator log layout: a `"{marker} {n}"` header, then one line of
/// space-separated values per row, then a blank line.
///
/// The marker must be non-blank and must not start with an integer.
pub fn write_sequence<W: Write>(w: W, seq: &GridSequence, marker: &str) -> GridGifResult<()> {
    check_marker(marker)?;
    write_grids(w, seq, marker).map_err(|e| GridGifError::io("<writer>", e))
}

/// Render a sequence as log text.
pub fn to_log_string(seq: &GridSequence, marker: &str) -> GridGifResult<String> {
    let mut out = Vec::new();
    write_sequence(&mut out, seq, marker)?;
    String::from_utf8(out).map_err(|e| GridGifError::Other(e.into()))
}

/// Write a log file, creating parent directories as needed.
pub fn write_log_file(
    path: impl AsRef<Path>,
    seq: &GridSequence,
    marker: &str,
) -> GridGifResult<()> {
    let path = path.as_ref();
    check_marker(marker)?;
    crate::encode::gif::ensure_parent_dir(path)?;
    let f = File::create(path).map_err(|e| GridGifError::io(path, e))?;
    write_grids(BufWriter::new(f), seq, marker).map_err(|e| GridGifError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/grid/write.rs"]
mod tests;
