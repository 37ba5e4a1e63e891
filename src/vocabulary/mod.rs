pub mod core;
pub mod loader;

// Re-export the main types for convenience
pub use core::{Difficulty, NumberEntry, Vocabulary, WordEntry};
pub use loader::VocabularyLoader;
