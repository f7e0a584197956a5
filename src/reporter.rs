/**
Reports of the scorer runs. Every report prints as plain text and serializes to JSON.
*/
use crate::entity::Entity;
use crate::error::Error;
use crate::metrics::Scores;
use crate::scorer::{DocumentScore, Tally};
use serde::Serialize;
use std::fmt::{self, Display};
use std::path::PathBuf;

/// A document left out of a run because it could not be read or written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub name: String,
    pub reason: String,
}

impl FileFailure {
    pub(crate) fn new(name: impl Into<String>, error: &Error) -> Self {
        FileFailure {
            name: name.into(),
            reason: error.to_string(),
        }
    }
}

impl Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There was an IO error on file {}: {}", self.name, self.reason)
    }
}

/// Outcome of the scoring of a whole corpus against the gold standard.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    pub documents: Vec<DocumentScore>,
    pub failures: Vec<FileFailure>,
    pub tally: Tally,
    pub scores: Scores,
}

/// Outcome of the date recognition run over a directory.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    /// Directory where the recognized dates were written.
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentScore>,
    pub failures: Vec<FileFailure>,
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, entities: &[Entity]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "Found {} entities:", entities.len())?;
    for entity in entities {
        writeln!(f, "{}", entity)?;
    }
    writeln!(f)
}

impl Display for DocumentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        write_section(f, "MARKED ENTITIES", &self.gold)?;
        write_section(f, "UNMARKED ENTITIES", &self.results)?;
        write_section(f, "COMMON ENTITIES", &self.found)?;
        write_section(f, "ENTITIES NOT FOUND", &self.not_found)?;
        write_section(f, "UNMARKED ENTITIES FOUND", &self.unmatched_results)
    }
}

impl Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for document in &self.documents {
            write!(f, "{}", document)?;
            writeln!(f, "Recall: {}", percent(document.recall()))?;
            writeln!(f, "Precision: {}", percent(document.precision()))?;
            writeln!(f)?;
        }
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        writeln!(f, "TOTAL STATISTICS")?;
        writeln!(
            f,
            "Entities: {} marked, {} predicted, {} correct, {} unmatched predictions",
            self.tally.possible, self.tally.found, self.tally.correct, self.tally.unmatched
        )?;
        writeln!(f, "Total Recall: {}", percent(self.scores.recall))?;
        writeln!(f, "Total Precision: {}", percent(self.scores.precision))?;
        writeln!(f, "F-Measure: {}", percent(self.scores.f_measure))?;
        write!(f, "Types: {}", self.tally.types().join(", "))
    }
}

impl Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for document in &self.documents {
            write!(f, "{}", document)?;
            writeln!(
                f,
                "Dates written to {}",
                self.output_dir.join(&document.name).display()
            )?;
            writeln!(f)?;
        }
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        write!(
            f,
            "{} documents processed, {} skipped",
            self.documents.len(),
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::Entities;
    use rstest::rstest;

    fn sample_document() -> DocumentScore {
        let gold: Entities = vec![Entity::gold("John", "PER", 0, 4)].into();
        let results: Entities = vec![
            Entity::with_span("John", "PER", 0, 4, 0.9),
            Entity::with_span("Mary", "PER", 9, 13, 0.8),
        ]
        .into();
        DocumentScore::evaluate("doc.txt", gold, results)
    }

    fn sample_report() -> CorpusReport {
        let documents = vec![sample_document()];
        let tally = documents.iter().fold(Tally::default(), Tally::record);
        let scores = tally.scores();
        CorpusReport {
            documents,
            failures: vec![FileFailure {
                name: String::from("missing.txt"),
                reason: String::from("not found"),
            }],
            tally,
            scores,
        }
    }

    #[rstest]
    #[case(1.0, "100.00%")]
    #[case(0.5, "50.00%")]
    #[case(2.0 / 3.0, "66.67%")]
    #[case(0.0, "0.00%")]
    fn test_percent(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(percent(value), expected)
    }

    #[test]
    fn test_document_sections() {
        let shown = sample_document().to_string();
        assert!(shown.starts_with("doc.txt\nMARKED ENTITIES\nFound 1 entities:\n"));
        assert!(shown.contains("UNMARKED ENTITIES\nFound 2 entities:\n"));
        assert!(shown.contains("COMMON ENTITIES\nFound 1 entities:\nOffset: 0-4; Word: John"));
        assert!(shown.contains("ENTITIES NOT FOUND\nFound 0 entities:\n"));
        assert!(shown.contains("UNMARKED ENTITIES FOUND\nFound 1 entities:\nOffset: 9-13"));
    }

    #[test]
    fn test_corpus_report() {
        let shown = sample_report().to_string();
        assert!(shown.contains("Recall: 100.00%\nPrecision: 50.00%"));
        assert!(shown.contains("There was an IO error on file missing.txt: not found"));
        assert!(shown.contains("TOTAL STATISTICS"));
        assert!(shown.contains("Total Recall: 100.00%"));
        assert!(shown.contains("Total Precision: 50.00%"));
        assert!(shown.contains("F-Measure: 66.67%"));
        assert!(shown.ends_with("Types: PER"));
    }

    #[test]
    fn test_corpus_report_serializes_without_type_set() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["scores"]["recall"], 1.0);
        assert_eq!(json["tally"]["types"][0], "PER");
        assert!(json["tally"].get("seen_types").is_none());
        assert_eq!(json["failures"][0]["name"], "missing.txt");
    }

    #[test]
    fn test_process_report() {
        let report = ProcessReport {
            output_dir: PathBuf::from("corpus/results"),
            documents: vec![sample_document()],
            failures: vec![],
        };
        let shown = report.to_string();
        assert!(shown.contains("Dates written to corpus/results/doc.txt"));
        assert!(shown.ends_with("1 documents processed, 0 skipped"));
    }
}
