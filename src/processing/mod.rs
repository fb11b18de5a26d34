//! Text processing, competency extraction and scoring

pub mod document;
pub mod lemmatizer;
pub mod lexical;
pub mod matcher;
pub mod profile;
pub mod scoring;
pub mod skill_extractor;
pub mod stop_words;
pub mod text_processor;
pub mod vector_space;
pub mod vocabulary;

pub use document::{CandidateInput, MatchRecord, ScreeningBatch};
pub use matcher::{FittedMatcher, Matcher};
pub use scoring::Decision;
pub use vocabulary::Vocabulary;
