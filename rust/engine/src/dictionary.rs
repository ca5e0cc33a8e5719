use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of characters in a relay word.
pub const WORD_LENGTH: usize = 2;

/// A single dictionary entry: the compound itself and an optional reading.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    /// The two-character compound
    pub word: String,
    /// Kana reading, when the provider supplies one
    #[serde(default)]
    pub reading: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reading: None,
        }
    }

    pub fn with_reading(word: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reading: Some(reading.into()),
        }
    }
}

/// Ordered, de-duplicated list of relay words.
///
/// Insertion order is the canonical index order used by [`WordPool`](crate::pool::WordPool).
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    entries: Vec<WordEntry>,
}

impl Dictionary {
    /// Build from raw strings, keeping only two-character words and the first
    /// occurrence of each.
    pub fn from_words<I, S>(words: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(words.into_iter().map(WordEntry::new))
    }

    /// Build from entries with the same normalisation as [`Dictionary::from_words`].
    pub fn from_entries<I>(entries: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let mut kept: Vec<WordEntry> = Vec::new();
        for mut entry in entries {
            entry.word = entry.word.trim().to_string();
            if entry.word.chars().count() != WORD_LENGTH {
                continue;
            }
            if kept.iter().any(|e| e.word == entry.word) {
                continue;
            }
            kept.push(entry);
        }
        if kept.is_empty() {
            return Err(GameError::EmptyDictionary);
        }
        Ok(Self { entries: kept })
    }

    /// Small bundled word list for demos and tests.
    pub fn builtin() -> Self {
        let entries = BUILTIN_WORDS.iter().map(|w| WordEntry::new(*w)).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }
}

const BUILTIN_WORDS: &[&str] = &[
    "花火", "花見", "花束", "花瓶", "花道", "火山", "火花", "火事", "山火", "山道", "山水",
    "山頂", "水道", "水車", "水面", "水中", "中国", "中心", "中学", "大学", "大人", "大事",
    "人生", "人間", "人口", "生活", "生命", "学生", "学校", "先生", "先月", "月見", "日本",
    "本日", "本山", "本心", "心中", "外国", "外見", "国道", "国民", "民間", "時間", "時代",
    "自然", "自動", "自分", "分野", "野山", "野火", "見物", "見本", "本物", "人物", "物事",
    "事故", "故国", "天国", "天気", "電気", "電車", "気分", "気体",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_words_are_two_characters_and_unique() {
        let dict = Dictionary::builtin();
        assert!(dict.words().all(|w| w.chars().count() == WORD_LENGTH));
        let normalised = Dictionary::from_words(dict.words().map(str::to_string)).unwrap();
        assert_eq!(normalised.len(), dict.len());
    }

    #[test]
    fn from_words_drops_wrong_length_and_duplicates() {
        let dict = Dictionary::from_words(["花火", "花", "花火", " 山火 ", "三文字語"]).unwrap();
        let words: Vec<&str> = dict.words().collect();
        assert_eq!(words, vec!["花火", "山火"]);
    }

    #[test]
    fn empty_after_cleaning_is_an_error() {
        let err = Dictionary::from_words(["あ", "いうえ"]).unwrap_err();
        assert_eq!(err, GameError::EmptyDictionary);
    }

    #[test]
    fn readings_survive_normalisation() {
        let dict = Dictionary::from_entries([
            WordEntry::with_reading("花火", "はなび"),
            WordEntry::new("花火"),
        ])
        .unwrap();
        assert_eq!(dict.entries()[0].reading.as_deref(), Some("はなび"));
    }
}
