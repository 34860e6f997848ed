//! Material counts, console summary and coordinate export.

use crate::grid::Grid;
use crate::matcher::Matches;
use crate::{McPixelateError, Result};
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// How many of each palette block the mural needs, in palette order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockCounts {
    counts: Vec<BlockCount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockCount {
    pub name: String,
    pub count: u64,
}

impl BlockCounts {
    pub fn from_matches(matches: &Matches) -> Self {
        let mut counts: Vec<BlockCount> = matches
            .palette()
            .iter()
            .map(|entry| BlockCount { name: entry.name.clone(), count: 0 })
            .collect();
        for &index in matches.indices().cells() {
            counts[index].count += 1;
        }
        Self { counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Entries that are actually used.
    pub fn used(&self) -> impl Iterator<Item = &BlockCount> {
        self.counts.iter().filter(|c| c.count > 0)
    }
}

/// `name: count` lines for used blocks, a blank line, then the total.
impl fmt::Display for BlockCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.used() {
            writeln!(f, "{}: {}", c.name, c.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", self.total())
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    width_blocks: u32,
    height_blocks: u32,
    total: u64,
    blocks: Vec<&'a BlockCount>,
}

/// Used blocks and grid size as pretty JSON.
pub fn write_summary_json<W: Write>(
    mut writer: W,
    counts: &BlockCounts,
    width_blocks: u32,
    height_blocks: u32,
) -> Result<()> {
    let summary = Summary {
        width_blocks,
        height_blocks,
        total: counts.total(),
        blocks: counts.used().collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &summary).map_err(|e| {
        // write failures are I/O errors, same as the CSV path
        if e.io_error_kind().is_some() {
            McPixelateError::Io(e.into())
        } else {
            McPixelateError::Json(e)
        }
    })?;
    writer.flush()?;
    Ok(())
}

/// Build coordinate for a grid cell. Y counts down from the top row.
pub fn block_coordinate(col: u32, row: u32, origin: (i64, i64)) -> (i64, i64) {
    (origin.0 + col as i64, origin.1 - row as i64)
}

/// `X,Y,Block` rows in row-major order.
pub fn write_coordinates<W: Write>(
    mut writer: W,
    names: &Grid<&str>,
    origin: (i64, i64),
) -> std::io::Result<()> {
    writeln!(writer, "X,Y,Block")?;
    for (col, row, name) in names.enumerate() {
        let (x, y) = block_coordinate(col, row, origin);
        writeln!(writer, "{},{},{}", x, y, escape_field(name))?;
    }
    writer.flush()
}

fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}
