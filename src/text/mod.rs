//! Title text processing: tokenizing, stemming and keyword salience.

pub mod keywords;
pub mod tokenize;

pub use keywords::{CandidateExtractor, KeywordExtractor, StopWordExtractor};
pub use tokenize::{TitleTokenizer, Token};
