//! UI helper functions for terminal output formatting.

use std::io::Write;

use tilematch_engine::symbol::Symbol;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Renders symbol ids as right-aligned rows of `cols` cells.
pub fn format_grid(cards: &[Symbol], cols: usize) -> Vec<String> {
    let cols = cols.max(1);
    let width = cards
        .iter()
        .map(|s| s.to_string().len())
        .max()
        .unwrap_or(1);
    cards
        .chunks(cols)
        .map(|row| {
            row.iter()
                .map(|s| format!("{:>width$}", s.id(), width = width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
