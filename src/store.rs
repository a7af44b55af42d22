//! Saved-tuning persistence.
//!
//! Tunings are stored as offset sets in a small plain-text file, one per
//! line: `name: o1 o2 o3 o4 o5 o6`. Offsets are clamped on both save and
//! load so a hand-edited file can never smuggle an out-of-range tuning
//! into a session.

use anyhow::{anyhow, Context, Result};
use fretwork_core::types::tuning::STRING_COUNT;
use fretwork_core::types::Tuning;
use std::fs;
use std::path::{Path, PathBuf};

/// Where saved tunings come from and go. The REPL only sees this trait,
/// so tests can substitute an in-memory store.
pub trait TuningStore {
    /// All saved tunings, in file order
    fn load_all(&self) -> Result<Vec<(String, [i8; STRING_COUNT])>>;

    /// Save or overwrite one named tuning
    fn save(&self, name: &str, offsets: [i8; STRING_COUNT]) -> Result<()>;
}

/// Text-file store in the user's home directory
#[derive(Debug, Clone)]
pub struct FileTuningStore {
    path: PathBuf,
}

impl FileTuningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTuningStore { path: path.into() }
    }

    /// `$HOME/.fretwork_tunings`, or the working directory when HOME is unset
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fretwork_tunings")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up one saved tuning by name, case-insensitive
    pub fn load(&self, name: &str) -> Result<Tuning> {
        self.load_all()?
            .into_iter()
            .find(|(saved, _)| saved.eq_ignore_ascii_case(name))
            .map(|(_, offsets)| Tuning::with_offsets(offsets))
            .ok_or_else(|| anyhow!("No saved tuning named '{}'", name))
    }

    fn write_all(&self, entries: &[(String, [i8; STRING_COUNT])]) -> Result<()> {
        let mut out = String::new();
        for (name, offsets) in entries {
            let fields: Vec<String> = offsets.iter().map(|o| o.to_string()).collect();
            out.push_str(&format!("{}: {}\n", name, fields.join(" ")));
        }
        fs::write(&self.path, out)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl Default for FileTuningStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TuningStore for FileTuningStore {
    fn load_all(&self) -> Result<Vec<(String, [i8; STRING_COUNT])>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, rest) = line
                .rsplit_once(':')
                .ok_or_else(|| anyhow!("Malformed tuning on line {}: {}", line_no + 1, line))?;

            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.len() != STRING_COUNT {
                return Err(anyhow!(
                    "Expected {} offsets on line {}, got {}",
                    STRING_COUNT,
                    line_no + 1,
                    fields.len()
                ));
            }

            let mut offsets = [0i8; STRING_COUNT];
            for (slot, field) in offsets.iter_mut().zip(&fields) {
                let parsed: i8 = field
                    .parse()
                    .with_context(|| format!("Bad offset '{}' on line {}", field, line_no + 1))?;
                *slot = Tuning::clamp_offset(parsed);
            }
            entries.push((name.trim().to_string(), offsets));
        }
        Ok(entries)
    }

    fn save(&self, name: &str, offsets: [i8; STRING_COUNT]) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Tuning name must not be empty"));
        }
        if name.contains(':') {
            return Err(anyhow!("Tuning name must not contain ':'"));
        }

        let mut clamped = [0i8; STRING_COUNT];
        for (slot, &offset) in clamped.iter_mut().zip(&offsets) {
            *slot = Tuning::clamp_offset(offset);
        }

        let mut entries = self.load_all()?;
        match entries
            .iter_mut()
            .find(|(saved, _)| saved.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = clamped,
            None => entries.push((name.to_string(), clamped)),
        }
        self.write_all(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FileTuningStore {
        let path = std::env::temp_dir().join(format!(
            "fretwork-store-{}-{}.txt",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        FileTuningStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = temp_store("roundtrip");
        store.save("my drop d", [-2, 0, 0, 0, 0, 0]).unwrap();
        store.save("whole step", [-2, -2, -2, -2, -2, -2]).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ("my drop d".to_string(), [-2, 0, 0, 0, 0, 0]));

        let tuning = store.load("My Drop D").unwrap();
        assert_eq!(tuning.pitch(0), 2); // D

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_save_overwrites_by_name() {
        let store = temp_store("overwrite");
        store.save("slot", [1, 0, 0, 0, 0, 0]).unwrap();
        store.save("Slot", [2, 0, 0, 0, 0, 0]).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].1[0], 2);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_offsets_clamped_on_save_and_load() {
        let store = temp_store("clamp");
        store.save("wild", [100, -100, 0, 0, 0, 0]).unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all[0].1, [8, -8, 0, 0, 0, 0]);

        fs::write(store.path(), "edited: -20 20 0 0 0 0\n").unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all[0].1, [-8, 8, 0, 0, 0, 0]);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_rejects_bad_names_and_lines() {
        let store = temp_store("bad");
        assert!(store.save("", [0; STRING_COUNT]).is_err());
        assert!(store.save("a:b", [0; STRING_COUNT]).is_err());

        fs::write(store.path(), "no offsets here\n").unwrap();
        assert!(store.load_all().is_err());

        fs::write(store.path(), "short: 1 2 3\n").unwrap();
        assert!(store.load_all().is_err());

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_missing_name_errors() {
        let store = temp_store("lookup");
        assert!(store.load("nothing").is_err());
    }
}
