use crate::app_dirs::AppDirs;
use crate::vocabulary::core::{parse_numbers, parse_vocabulary, Vocabulary};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

const VOCABULARY_FILE: &str = "vocabulary.json";
const NUMBERS_FILE: &str = "numbers.json";

/// Loads vocabulary documents from a directory of JSON files and mirrors what
/// it finds into the cache directory. Either document may be absent; only a
/// directory with neither is an error. Engines never see these errors, they
/// just get whatever snapshot the host ends up with.
#[derive(Debug, Clone)]
pub struct VocabularyLoader {
    cache_dir: Option<PathBuf>,
}

impl VocabularyLoader {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            cache_dir: AppDirs::vocabulary_cache_dir(),
        }
    }

    pub fn with_cache_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            cache_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Load both documents from `dir`, caching whatever parses cleanly.
    pub fn load_from_dir(&self, dir: &Path) -> Result<Vocabulary, Box<dyn Error>> {
        let mut vocab = Vocabulary::default();
        let mut found = false;

        let vocab_path = dir.join(VOCABULARY_FILE);
        if vocab_path.exists() {
            let contents = fs::read_to_string(&vocab_path)?;
            vocab.words = parse_vocabulary(&contents)
                .map_err(|e| format!("{}: {e}", vocab_path.display()))?;
            self.cache_document(VOCABULARY_FILE, &contents);
            found = true;
        }

        let numbers_path = dir.join(NUMBERS_FILE);
        if numbers_path.exists() {
            let contents = fs::read_to_string(&numbers_path)?;
            vocab.numbers = parse_numbers(&contents)
                .map_err(|e| format!("{}: {e}", numbers_path.display()))?;
            self.cache_document(NUMBERS_FILE, &contents);
            found = true;
        }

        if !found {
            return Err(format!(
                "no {VOCABULARY_FILE} or {NUMBERS_FILE} found in {}",
                dir.display()
            )
            .into());
        }

        Ok(vocab)
    }

    /// Restore the most recently cached snapshot. Missing or unparseable cache
    /// files yield the empty parts of the snapshot rather than an error.
    pub fn load_cached(&self) -> Vocabulary {
        let mut vocab = Vocabulary::default();
        let Some(dir) = &self.cache_dir else {
            return vocab;
        };

        if let Ok(contents) = fs::read_to_string(dir.join(VOCABULARY_FILE)) {
            if let Ok(words) = parse_vocabulary(&contents) {
                vocab.words = words;
            }
        }
        if let Ok(contents) = fs::read_to_string(dir.join(NUMBERS_FILE)) {
            if let Ok(numbers) = parse_numbers(&contents) {
                vocab.numbers = numbers;
            }
        }

        vocab
    }

    fn cache_document(&self, name: &str, contents: &str) {
        // Cache writes are best effort; a read-only disk should not block play
        if let Some(dir) = &self.cache_dir {
            if fs::create_dir_all(dir).is_ok() {
                let _ = fs::write(dir.join(name), contents);
            }
        }
    }
}
