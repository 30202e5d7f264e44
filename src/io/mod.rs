/*!
# IO

Whole-object snapshots of in-memory graphs.

A snapshot stores the complete state of a [`MemoryGraph`]: labels in id order, the edge sequence
as currently laid out, weights (for the weighted variant) and the optimization flag. Loading a
snapshot yields a graph whose queries return exactly what the saved graph returned.

## Format

All integers are little-endian.

| field | encoding |
|---|---|
| magic | the 8 bytes `FLATGRPH` |
| version | `u8`, currently `1` |
| flags | `u8`; bit 0: weighted, bit 1: optimized |
| node count | `u64` |
| labels | `node count` times [`SnapshotLabel`] |
| edge count | `u64` |
| edges | `edge count` times `(i32 source, i32 destination)` |
| weights | only if weighted: `edge count` times the `u64` bit pattern of an `f64` |

## Traits

- [`SnapshotWrite`] and [`SnapshotRead`] save/load to any [`Write`]/[`Read`] or directly to files.
- Malformed input is reported as [`GraphError::Storage`] wrapping an
  [`ErrorKind::InvalidData`] error.
*/

mod label;
mod snapshot;

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use crate::prelude::*;

pub use label::*;
pub use snapshot::*;

/// Types that can be saved as a snapshot
pub trait SnapshotWrite {
    /// Writes a snapshot of `self` into `writer`.
    ///
    /// # Errors
    /// Returns [`GraphError::Storage`] if writing fails.
    fn try_write_snapshot<W>(&self, writer: W) -> GraphResult<()>
    where
        W: Write;

    /// Writes a snapshot of `self` into a (newly created or truncated) file.
    ///
    /// Internally wraps the file in a buffered writer.
    fn try_write_snapshot_file<P>(&self, path: P) -> GraphResult<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_snapshot(BufWriter::new(File::create(path)?))
    }
}

/// Types that can be restored from a snapshot
pub trait SnapshotRead: Sized {
    /// Reads a snapshot from `reader`.
    ///
    /// # Errors
    /// Returns [`GraphError::Storage`] if reading fails or the input is not a valid snapshot of
    /// this type.
    fn try_read_snapshot<R>(reader: R) -> GraphResult<Self>
    where
        R: Read;

    /// Reads a snapshot from a file.
    ///
    /// Internally wraps the file in a buffered reader.
    fn try_read_snapshot_file<P>(path: P) -> GraphResult<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_read_snapshot(BufReader::new(File::open(path)?))
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning an IO-error early when a condition fails.
/// The error is converted into the return type of the surrounding function.
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info).into());
        }
    };
}

use io_error;
use raise_error_unless;
