//! Redaction wrapper for values that must not reach production logs verbatim.
//!
//! Raw database errors can embed row contents (transcripts carry user speech),
//! so adapters log them through `Redacted` which truncates aggressively.

use std::fmt;

const MAX_VISIBLE: usize = 120;

/// Wraps a displayable value and truncates its rendering in log output.
pub struct Redacted<T>(pub T);

impl<T: fmt::Display> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = self.0.to_string();
        if full.len() <= MAX_VISIBLE {
            f.write_str(&full)
        } else {
            // Back off to a char boundary so truncation never splits UTF-8.
            let mut cut = MAX_VISIBLE;
            while !full.is_char_boundary(cut) {
                cut -= 1;
            }
            write!(f, "{}… [{} bytes redacted]", &full[..cut], full.len())
        }
    }
}
