//! A1-style cell addressing. Rows and columns are 1-based throughout, the
//! way the file formats we read and write count them.

/// Excel's hard sheet limits (XFD1048576). References beyond them are
/// rejected by the parsers here and truncated by the importer.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLS: usize = 16_384;

/// Convert a 1-based column index to letters (1 -> "A", 27 -> "AA").
pub fn column_letter(col: usize) -> String {
    debug_assert!(col >= 1);
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert column letters to a 1-based index ("A" -> 1, "aa" -> 27).
/// A real column is at most 3 letters and at most XFD; anything past that
/// is `None`, which also keeps arbitrary input from overflowing the fold.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut col = 0usize;
    for ch in letters.chars() {
        let ch = ch.to_ascii_uppercase();
        if !ch.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (ch as usize - 'A' as usize + 1);
    }
    (col <= MAX_COLS).then_some(col)
}

/// Format a (row, col) pair as an A1 reference ("B3" for row 3, col 2).
pub fn cell_name(row: usize, col: usize) -> String {
    format!("{}{}", column_letter(col), row)
}

/// Parse an A1 reference into a 1-based (row, col) pair. References outside
/// Excel's grid are rejected.
pub fn parse_cell_name(name: &str) -> Option<(usize, usize)> {
    let name = name.trim();
    let split = name.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = name.split_at(split);
    let col = column_index(letters)?;
    let row: usize = digits.parse().ok()?;
    if row == 0 || row > MAX_ROWS {
        return None;
    }
    Some((row, col))
}

// ---------------------------------------------------------------------------
