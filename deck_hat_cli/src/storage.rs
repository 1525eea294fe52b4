use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::error::StorageError;
use crate::roster::Roster;

pub const DEFAULT_ROSTER_FILE: &str = "players.json";

pub fn read_roster<R: Read>(reader: R) -> Result<Roster, StorageError> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            StorageError::Io(e.into())
        } else {
            StorageError::Malformed(e)
        }
    })
}

/// Writes pretty-printed JSON with two-space indentation and a trailing newline.
pub fn write_roster<W: Write>(mut writer: W, roster: &Roster) -> Result<(), StorageError> {
    serde_json::to_writer_pretty(&mut writer, roster)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn load_roster(path: &Path) -> Result<Roster, StorageError> {
    let file = File::open(path)?;
    let roster = read_roster(BufReader::new(file))?;
    info!("loaded {} participant(s) from {}", roster.len(), path.display());
    Ok(roster)
}

pub fn save_roster(path: &Path, roster: &Roster) -> Result<(), StorageError> {
    let file = File::create(path)?;
    write_roster(BufWriter::new(file), roster)?;
    info!("saved {} participant(s) to {}", roster.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::roster::sample;

    #[test]
    fn writes_indented_json() {
        let roster = sample(&[("Alice", &["Deck A1", "Deck A2"]), ("Bob", &["Deck B1"])]);
        let mut buf = Vec::new();
        write_roster(&mut buf, &roster).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n  \"Alice\": [\n    \"Deck A1\",\n    \"Deck A2\"\n  ],\n  \"Bob\": [\n    \"Deck B1\"\n  ]\n}\n"
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let roster = sample(&[
            ("Dana", &["Deck D1", "Deck D2", "Deck D3"]),
            ("Alice", &["Deck A1", "Deck A1", "Deck A3"]),
            ("Charlie", &["Deck C1", "Deck C2", "Deck C3"]),
        ]);
        let path = env::temp_dir().join(format!("deck_hat_roundtrip_{}.json", process::id()));
        save_roster(&path, &roster).unwrap();
        let loaded = load_roster(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), roster);
    }

    #[test]
    fn malformed_and_missing_files() {
        let err = read_roster(r#"{"Alice": "Deck A1"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
        assert!(!err.is_not_found());

        let err = read_roster("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));

        let missing = env::temp_dir().join(format!("deck_hat_missing_{}.json", process::id()));
        assert!(load_roster(&missing).unwrap_err().is_not_found());
    }
}
