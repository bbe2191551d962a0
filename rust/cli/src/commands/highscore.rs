//! Highscore command handler.
//!
//! Shows the stored best score, or resets it to zero with `--reset`.

use crate::error::CliError;
use crate::ui;
use std::io::Write;
use tilematch_engine::highscore::{HighscoreStore, JsonFileStore};

pub fn handle_highscore_command(
    file: &str,
    reset: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut store = JsonFileStore::new(file);

    if reset {
        store.save(0)?;
        writeln!(out, "Highscore reset: {}", store.path().display())?;
        return Ok(());
    }

    // load() hides the reason a record reads as 0; tell the user about it
    if let Err(e) = store.read_record() {
        ui::display_warning(err, &e.to_string())?;
    }
    writeln!(out, "Highscore: {}", store.load())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_zero_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        let mut out = Vec::new();
        let mut err = Vec::new();

        handle_highscore_command(path.to_str().unwrap(), false, &mut out, &mut err).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Highscore: 0\n");
        assert!(err.is_empty());
    }

    #[test]
    fn reset_overwrites_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        std::fs::write(&path, r#"{"highscore": 77}"#).unwrap();
        let path = path.to_str().unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();

        handle_highscore_command(path, true, &mut out, &mut err).unwrap();
        assert_eq!(JsonFileStore::new(path).load(), 0);
    }

    #[test]
    fn corrupt_record_warns_and_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hs.json");
        std::fs::write(&path, "{oops").unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();

        handle_highscore_command(path.to_str().unwrap(), false, &mut out, &mut err).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Highscore: 0\n");
        assert!(String::from_utf8(err).unwrap().starts_with("WARNING:"));
    }
}
