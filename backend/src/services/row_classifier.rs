//! Seat row classification from a detection's normalized top edge.

use serde::{Deserialize, Serialize};

/// One of the four seat rows, front row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RowBucket {
    Row1,
    Row2,
    Row3,
    Row4,
}

impl RowBucket {
    pub const ALL: [RowBucket; 4] = [
        RowBucket::Row1,
        RowBucket::Row2,
        RowBucket::Row3,
        RowBucket::Row4,
    ];

    /// Row number, 1 to 4.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Zero-based position, 0 to 3.
    pub fn index(&self) -> usize {
        match self {
            RowBucket::Row1 => 0,
            RowBucket::Row2 => 1,
            RowBucket::Row3 => 2,
            RowBucket::Row4 => 3,
        }
    }

    pub fn label(&self) -> String {
        format!("Row {}", self.number())
    }
}

/// Map a normalized vertical position to its seat row.
///
/// Boundaries sit at 0.25, 0.5 and 0.75. Anything below 0.25, including
/// negative values, is row 1; anything from 0.75 up, including values past
/// 1.0 and NaN, is row 4.
pub fn classify_row(y1: f64) -> RowBucket {
    if y1 < 0.25 {
        RowBucket::Row1
    } else if y1 < 0.5 {
        RowBucket::Row2
    } else if y1 < 0.75 {
        RowBucket::Row3
    } else {
        RowBucket::Row4
    }
}
