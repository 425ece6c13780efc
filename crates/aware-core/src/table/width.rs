//! Column width balancing.
//!
//! Converts the widths the content asks for into widths that exactly fill the
//! space the terminal offers. Two closed-form passes: clamp wide columns down
//! to an even share, then spread whatever is left over evenly.

use unicode_width::UnicodeWidthStr;

use super::{Column, Row};

/// Narrowest width a column asks for before balancing.
pub const DEFAULT_MIN_WIDTH: usize = 10;

/// Widths each column would need to show its title and every cell untruncated.
///
/// A title gets one extra cell of breathing room. Widths are floored at `min_width`.
pub fn desired_widths(columns: &[Column], rows: &[Row], min_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| (col.title.width() + 1).max(min_width))
        .collect();

    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    widths
}

/// Balances column widths so that they sum to `available`.
///
/// Columns wider than `available / columns.len()` are clamped to that share;
/// the remaining shortfall is then added evenly, with the leftover units going
/// one each to the leading columns.
pub fn balance(columns: &[Column], rows: &[Row], available: usize, min_width: usize) -> Vec<usize> {
    let count = columns.len();
    match count {
        0 => return Vec::new(),
        1 => return vec![available],
        _ => {}
    }

    let mut widths = desired_widths(columns, rows, min_width);

    if widths.iter().sum::<usize>() > available {
        let even = available / count;
        for width in widths.iter_mut().filter(|w| **w > even) {
            *width = even;
        }
    }

    let used: usize = widths.iter().sum();
    if used < available {
        let shortfall = available - used;
        let add = shortfall / count;
        let extra = shortfall % count;
        for (i, width) in widths.iter_mut().enumerate() {
            *width += add + usize::from(i < extra);
        }
    }

    widths
}
