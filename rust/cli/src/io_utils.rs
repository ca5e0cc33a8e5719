//! File and stdin helpers: interactive line input and dictionary loading.
//!
//! Dictionaries are chosen by file extension:
//! - `.json`: array of strings or `{"word", "reading"}` objects
//! - `.yaml` / `.yml`: the same sequence shapes, or a mapping of word to reading
//! - anything else: one word per line, optionally `word<TAB>reading`; blank lines
//!   and lines starting with `#` are skipped
//!
//! Every loader feeds [`Dictionary::from_entries`], which trims, drops entries that
//! are not two characters long and removes duplicates.

use std::io::BufRead;
use std::path::Path;

use jukugo_engine::dictionary::{Dictionary, WordEntry};
use serde::Deserialize;

use crate::error::CliError;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims whitespace from the input and returns `None` on EOF or read errors.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use jukugo_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &Path) -> Result<String, String> {
    let mut content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Word(String),
    Entry(WordEntry),
}

impl From<RawEntry> for WordEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Word(word) => WordEntry::new(word),
            RawEntry::Entry(entry) => entry,
        }
    }
}

/// Load a dictionary file, picking the format from the extension.
///
/// # Example
///
/// ```rust,no_run
/// # use jukugo_cli::io_utils::load_dictionary;
/// let dict = load_dictionary(std::path::Path::new("words.yaml")).unwrap();
/// assert!(!dict.is_empty());
/// ```
pub fn load_dictionary(path: &Path) -> Result<Dictionary, CliError> {
    let text = read_text(path).map_err(CliError::InvalidInput)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let entries = match ext.as_deref() {
        Some("json") => parse_json(&text),
        Some("yaml") | Some("yml") => parse_yaml(&text),
        _ => Ok(parse_lines(&text)),
    }
    .map_err(|e| CliError::InvalidInput(format!("{}: {}", path.display(), e)))?;

    let dict = Dictionary::from_entries(entries)
        .map_err(|e| CliError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), words = dict.len(), "dictionary loaded");
    Ok(dict)
}

/// The file at `path` when given, otherwise the bundled word list.
pub fn resolve_dictionary(path: Option<&str>) -> Result<Dictionary, CliError> {
    match path {
        Some(p) => load_dictionary(Path::new(p)),
        None => Ok(Dictionary::builtin()),
    }
}

fn parse_json(text: &str) -> Result<Vec<WordEntry>, String> {
    let raw: Vec<RawEntry> = serde_json::from_str(text).map_err(|e| e.to_string())?;
    Ok(raw.into_iter().map(WordEntry::from).collect())
}

fn parse_yaml(text: &str) -> Result<Vec<WordEntry>, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    match value {
        serde_yaml::Value::Sequence(_) => {
            let raw: Vec<RawEntry> = serde_yaml::from_value(value).map_err(|e| e.to_string())?;
            Ok(raw.into_iter().map(WordEntry::from).collect())
        }
        serde_yaml::Value::Mapping(map) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| {
                let word = k.as_str()?.to_string();
                Some(match v.as_str() {
                    Some(reading) => WordEntry::with_reading(word, reading),
                    None => WordEntry::new(word),
                })
            })
            .collect()),
        _ => Err("expected a sequence of words or a mapping of word to reading".into()),
    }
}

fn parse_lines(text: &str) -> Vec<WordEntry> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|line| match line.split_once('\t') {
            Some((word, reading)) if !reading.trim().is_empty() => {
                WordEntry::with_reading(word.trim(), reading.trim())
            }
            Some((word, _)) => WordEntry::new(word.trim()),
            None => WordEntry::new(line),
        })
        .collect()
}

/// Strip UTF-8 BOM (Byte Order Mark) from the beginning of a string if present.
fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_valid_input() {
        let mut cursor = Cursor::new("花火\n".as_bytes());
        assert_eq!(read_stdin_line(&mut cursor), Some("花火".to_string()));
    }

    #[test]
    fn test_read_stdin_line_empty_after_trim() {
        let mut cursor = Cursor::new(b"   \n");
        assert_eq!(read_stdin_line(&mut cursor), Some("".to_string()));
    }

    #[test]
    fn test_read_stdin_line_eof() {
        let mut cursor = Cursor::new(b"");
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}花火".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "花火");
    }

    #[test]
    fn text_lines_with_readings() {
        let entries = parse_lines("# comment\n花火\tはなび\n\n山火\n");
        assert_eq!(
            entries,
            vec![WordEntry::with_reading("花火", "はなび"), WordEntry::new("山火")]
        );
    }

    #[test]
    fn json_accepts_strings_and_objects() {
        let entries = parse_json(r#"["花火", {"word": "花見", "reading": "はなみ"}]"#)
            .expect("json");
        assert_eq!(entries[0], WordEntry::new("花火"));
        assert_eq!(entries[1].reading.as_deref(), Some("はなみ"));
    }

    #[test]
    fn yaml_sequence_and_mapping() {
        let seq = parse_yaml("- 花火\n- 山火\n").expect("sequence");
        assert_eq!(seq.len(), 2);

        let map = parse_yaml("花火: はなび\n山火: 1\n").expect("mapping");
        assert_eq!(map[0], WordEntry::with_reading("花火", "はなび"));
        assert_eq!(map[1], WordEntry::new("山火"));

        assert!(parse_yaml("42").is_err());
    }

    #[test]
    fn load_dictionary_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "\u{feff}花火\n花火\n長い言葉\n山火\n").expect("write");
        let dict = load_dictionary(&path).expect("dictionary");
        assert_eq!(dict.words().collect::<Vec<_>>(), vec!["花火", "山火"]);
    }

    #[test]
    fn empty_dictionary_is_invalid_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"["三文字語"]"#).expect("write");
        let err = load_dictionary(&path).expect_err("empty");
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = resolve_dictionary(Some("no/such/words.txt")).expect_err("missing");
        assert!(err.to_string().contains("no/such/words.txt"));
        assert!(resolve_dictionary(None).is_ok());
    }
}
