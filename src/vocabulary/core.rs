use include_dir::{include_dir, Dir};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::from_str;
use std::error::Error;

static DATA_DIR: Dir = include_dir!("src/data");

/// Word difficulty, ordered so ranges can be expressed as `min..=max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Accepts "easy" / "medium" / "hard"; anything else falls back to medium so a
/// single bad row never sinks the whole document.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match raw.to_lowercase().as_str() {
        "easy" => Difficulty::Easy,
        "hard" => Difficulty::Hard,
        _ => Difficulty::Medium,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    pub translation: String,
    pub part_of_speech: String,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberEntry {
    pub value: i64,
    #[serde(alias = "bisaya")]
    pub word: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyDoc {
    pub vocabulary: Vec<WordEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumbersDoc {
    pub numbers: Vec<NumberEntry>,
}

/// Immutable vocabulary snapshot handed to the game engines. The engines only
/// ever observe "empty" vs "populated"; partial loads never reach them.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub words: Vec<WordEntry>,
    pub numbers: Vec<NumberEntry>,
}

impl Vocabulary {
    pub fn new(words: Vec<WordEntry>, numbers: Vec<NumberEntry>) -> Self {
        Self { words, numbers }
    }

    /// Load the word and number lists bundled into the binary.
    pub fn bundled() -> Self {
        let words = read_embedded("vocabulary.json")
            .map(|doc: VocabularyDoc| doc.vocabulary)
            .unwrap_or_default();
        let numbers = read_embedded("numbers.json")
            .map(|doc: NumbersDoc| doc.numbers)
            .unwrap_or_default();
        Self { words, numbers }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.numbers.is_empty()
    }

    pub fn number_by_value(&self, value: i64) -> Option<&NumberEntry> {
        self.numbers.iter().find(|n| n.value == value)
    }

    pub fn number_by_word(&self, word: &str) -> Option<&NumberEntry> {
        self.numbers
            .iter()
            .find(|n| n.word.eq_ignore_ascii_case(word))
    }
}

fn read_embedded<T: serde::de::DeserializeOwned>(file_name: &str) -> Result<T, Box<dyn Error>> {
    let file = DATA_DIR
        .get_file(file_name)
        .ok_or_else(|| format!("embedded data file not found: {file_name}"))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| format!("embedded data file is not utf-8: {file_name}"))?;
    Ok(from_str(contents)?)
}

pub fn parse_vocabulary(json: &str) -> Result<Vec<WordEntry>, serde_json::Error> {
    from_str::<VocabularyDoc>(json).map(|doc| doc.vocabulary)
}

pub fn parse_numbers(json: &str) -> Result<Vec<NumberEntry>, serde_json::Error> {
    from_str::<NumbersDoc>(json).map(|doc| doc.numbers)
}
