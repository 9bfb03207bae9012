//! Parsing of exported WhatsApp chat text.
//!
//! The export is scanned line by line for music-related entries. This parser
//! is not wired into the pipeline yet; the watcher still runs with empty
//! metadata.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// One music-related line from a chat export, split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub title: String,
    pub composer: String,
    pub raga: String,
    pub tala: String,
    pub group_name: String,
    pub teacher: String,
    pub session_type: String,
}

fn music_keywords() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:song|raga|tala)s?\b").unwrap())
}

/// Whether the line carries music-related information.
fn is_music_related(line: &str) -> bool {
    music_keywords().is_match(line)
}

/// Split a music-related line into a [`SessionEntry`]. Lines with fewer than
/// seven comma-separated fields are rejected.
fn parse_entry(line: &str) -> Option<SessionEntry> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 7 {
        return None;
    }
    Some(SessionEntry {
        title: parts[0].to_string(),
        composer: parts[1].to_string(),
        raga: parts[2].to_string(),
        tala: parts[3].to_string(),
        group_name: parts[4].to_string(),
        teacher: parts[5].to_string(),
        session_type: parts[6].to_string(),
    })
}

/// Parse an exported chat text file, returning the music-related entries.
pub fn parse_chat_export(path: &Path) -> io::Result<Vec<SessionEntry>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if is_music_related(&line) {
            if let Some(entry) = parse_entry(&line) {
                entries.push(entry);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_music_related() {
        assert!(is_music_related("new song taught today"));
        assert!(is_music_related("covered two ragas"));
        assert!(is_music_related("tala exercise"));
        assert!(!is_music_related("see you next week"));
        // Word match, not substring: "singalong" should not trip "song".
        assert!(!is_music_related("talapoin monkeys"));
    }

    #[test]
    fn test_parse_chat_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "10:02 - hello everyone").unwrap();
        writeln!(
            file,
            "song Vatapi, Dikshitar, Hamsadhwani, Adi, Saturday Class, Guru, virtual"
        )
        .unwrap();
        writeln!(file, "song practice reminder").unwrap();
        drop(file);

        let entries = parse_chat_export(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "song Vatapi");
        assert_eq!(entries[0].raga, "Hamsadhwani");
        assert_eq!(entries[0].session_type, "virtual");
    }

    #[test]
    fn test_parse_chat_export_missing_file() {
        assert!(parse_chat_export(Path::new("/nonexistent/chat.txt")).is_err());
    }
}
