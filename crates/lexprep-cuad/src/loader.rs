//! Reader for CUAD annotations in SQuAD format.
//!
//! The file is a `data` array of documents. Each document has a title and
//! paragraphs, each paragraph a context and question/answer pairs. Loading
//! flattens this into one [`CuadEntry`] per question.

use lexprep_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Title used for documents without one.
pub const UNKNOWN_TITLE: &str = "unknown_title";

/// One question about one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuadEntry {
    /// Contract title
    pub doc: String,
    /// Question text
    pub question: String,
    /// First annotated answer, empty when there is none
    pub answer: String,
    /// Character offset of the answer in `context`, -1 when there is none
    pub answer_start: i64,
    /// Contract text the question refers to
    pub context: String,
}

impl CuadEntry {
    /// True when the question has an annotated answer.
    #[must_use]
    pub fn has_answer(&self) -> bool {
        self.answer_start >= 0
    }
}

#[derive(Deserialize)]
struct SquadFile {
    data: Vec<SquadDocument>,
}

#[derive(Deserialize)]
struct SquadDocument {
    title: Option<String>,
    #[serde(default)]
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Deserialize)]
struct SquadParagraph {
    #[serde(default)]
    context: String,
    #[serde(default)]
    qas: Vec<SquadQuestion>,
}

#[derive(Deserialize)]
struct SquadQuestion {
    question: String,
    /// Absent and `null` both mean no answer.
    #[serde(default)]
    answers: Option<Vec<SquadAnswer>>,
}

#[derive(Deserialize)]
struct SquadAnswer {
    text: String,
    answer_start: i64,
}

/// Parse CUAD JSON text.
pub fn parse_cuad(json: &str) -> Result<Vec<CuadEntry>> {
    let file: SquadFile = serde_json::from_str(json)?;

    let mut entries = Vec::new();
    for document in file.data {
        let title = document.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        for paragraph in document.paragraphs {
            for qa in paragraph.qas {
                let first = qa.answers.unwrap_or_default().into_iter().next();
                let (answer, answer_start) = match first {
                    Some(first) => (first.text, first.answer_start),
                    None => (String::new(), -1),
                };
                entries.push(CuadEntry {
                    doc: title.clone(),
                    question: qa.question,
                    answer,
                    answer_start,
                    context: paragraph.context.clone(),
                });
            }
        }
    }

    Ok(entries)
}

/// Load a CUAD JSON file.
pub fn load_cuad(path: &Path) -> Result<Vec<CuadEntry>> {
    let json = std::fs::read_to_string(path)?;
    let entries = parse_cuad(&json)?;
    debug!("Loaded {} CUAD entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// The first `n` entries as `(question, answer, context)`.
#[must_use]
pub fn sample_entries(entries: &[CuadEntry], n: usize) -> Vec<(&str, &str, &str)> {
    entries
        .iter()
        .take(n)
        .map(|e| (e.question.as_str(), e.answer.as_str(), e.context.as_str()))
        .collect()
}
