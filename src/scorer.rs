/**
This module scores a corpus: every document of the gold standard is paired with the classifier
output of the same name, their entities are matched both ways and the counts are accumulated into
a `Tally`, from which the corpus-wide recall, precision and F-measure are computed.
*/
use crate::classifier::parse_classifier_output;
use crate::config::ScorerConfig;
use crate::dates::recognize_dates;
use crate::entity::{Entities, Entity};
use crate::error::{Error, Result};
use crate::markup::extract_marked;
use crate::matcher::match_entities;
use crate::metrics::{ratio, Scores};
use crate::reporter::{CorpusReport, FileFailure, ProcessReport};
use ahash::AHashSet;
use itertools::Itertools;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of the comparison of the entities of a single document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentScore {
    /// File name of the document.
    pub name: String,
    /// Reference entities.
    pub gold: Entities,
    /// Entities under evaluation.
    pub results: Entities,
    /// Reference entities that were found in the results.
    pub found: Entities,
    /// Reference entities missing from the results.
    pub not_found: Entities,
    /// Results that match no reference entity.
    pub unmatched_results: Entities,
}

impl DocumentScore {
    /// Matches `results` against `gold`, then `gold` against `results`.
    pub fn evaluate(name: impl Into<String>, gold: Entities, results: Entities) -> Self {
        let forward = match_entities(&gold, &results);
        let backward = match_entities(&results, &gold);
        DocumentScore {
            name: name.into(),
            gold,
            results,
            found: forward.found,
            not_found: forward.not_found,
            unmatched_results: backward.not_found,
        }
    }

    /// Fraction of the reference entities that were found, 0 without reference entities.
    pub fn recall(&self) -> f64 {
        ratio(self.found.len(), self.gold.len())
    }

    /// Fraction of the results that are correct, 0 without results.
    pub fn precision(&self) -> f64 {
        ratio(self.found.len(), self.results.len())
    }
}

/// Running counts of a corpus. The tally is threaded through the documents, one `record` per
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tally {
    /// Reference entities seen so far.
    pub possible: usize,
    /// Results seen so far.
    pub found: usize,
    /// Reference entities found in the results.
    pub correct: usize,
    /// Results matching no reference entity.
    pub unmatched: usize,
    /// Types of the reference entities, in order of first appearance.
    types: Vec<String>,
    #[serde(skip)]
    seen_types: AHashSet<String>,
}

impl Tally {
    pub fn record(mut self, document: &DocumentScore) -> Self {
        self.possible += document.gold.len();
        self.found += document.results.len();
        self.correct += document.found.len();
        self.unmatched += document.unmatched_results.len();
        for entity in document.gold.iter() {
            if self.seen_types.insert(entity.entity_type().to_string()) {
                self.types.push(entity.entity_type().to_string());
            }
        }
        self
    }

    pub fn scores(&self) -> Scores {
        Scores::from_counts(self.correct, self.possible, self.found)
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }
}

/// Lists the regular files of `dir`, sorted by name.
pub(crate) fn list_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::read_dir(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read_dir(dir, e))?;
        match entry.file_type() {
            Ok(file_type) if file_type.is_file() => files.push((
                entry.file_name().to_string_lossy().into_owned(),
                entry.path(),
            )),
            _ => debug!(path = %entry.path().display(), "Skipping entry that is not a file"),
        }
    }
    Ok(files.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)).collect())
}

pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Scores classifier outputs against the gold standard, one directory at a time.
#[derive(Debug, Clone, Default)]
pub struct CorpusScorer {
    config: ScorerConfig,
}

impl CorpusScorer {
    pub fn new(config: ScorerConfig) -> Self {
        CorpusScorer { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Compares the annotations of `gold_text` with the classifier output `results_text`.
    pub fn score_document(
        &self,
        name: impl Into<String>,
        gold_text: &str,
        results_text: &str,
    ) -> DocumentScore {
        let gold = extract_marked(gold_text);
        let results = parse_classifier_output(results_text, self.config.threshold);
        DocumentScore::evaluate(name, gold, results)
    }

    fn score_pair(&self, name: &str, gold: &Path, results: &Path) -> Result<DocumentScore> {
        let gold_text = read_document(gold)?;
        let results_text = read_document(results)?;
        Ok(self.score_document(name, &gold_text, &results_text))
    }

    /// Scores every document of `gold_dir` against the file of the same name in `results_dir`.
    ///
    /// A document that cannot be read is reported in `CorpusReport::failures` and left out of the
    /// totals; the other documents are still scored. Only a gold directory that cannot be listed
    /// is an error.
    pub fn check(
        &self,
        gold_dir: impl AsRef<Path>,
        results_dir: impl AsRef<Path>,
    ) -> Result<CorpusReport> {
        let (gold_dir, results_dir) = (gold_dir.as_ref(), results_dir.as_ref());
        info!(
            gold = %gold_dir.display(),
            results = %results_dir.display(),
            threshold = self.config.threshold,
            "Scoring corpus"
        );
        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for (name, gold_path) in list_files(gold_dir)? {
            match self.score_pair(&name, &gold_path, &results_dir.join(&name)) {
                Ok(document) => {
                    debug!(
                        document = %name,
                        recall = document.recall(),
                        precision = document.precision(),
                        "Scored document"
                    );
                    documents.push(document)
                }
                Err(err) => {
                    warn!(document = %name, error = %err, "Skipping unreadable document");
                    failures.push(FileFailure::new(name, &err));
                }
            }
        }
        let tally = documents.iter().fold(Tally::default(), Tally::record);
        let scores = tally.scores();
        info!(
            documents = documents.len(),
            failures = failures.len(),
            recall = scores.recall,
            precision = scores.precision,
            f_measure = scores.f_measure,
            "Corpus scored"
        );
        Ok(CorpusReport {
            documents,
            failures,
            tally,
            scores,
        })
    }

    /// Compares the dates recognized in a document with its annotations.
    pub fn date_document(&self, name: impl Into<String>, text: &str) -> DocumentScore {
        DocumentScore::evaluate(name, extract_marked(text), recognize_dates(text).collect())
    }

    fn process_file(&self, name: &str, path: &Path, output_dir: &Path) -> Result<DocumentScore> {
        let text = read_document(path)?;
        let document = self.date_document(name, &text);
        let output = output_dir.join(name);
        fs::write(&output, render_entities(&document.results))
            .map_err(|e| Error::io(&output, e))?;
        Ok(document)
    }

    /// Recognizes the dates of every document of `dir`, compares them with the annotations and
    /// writes them, one entity per line, to the file of the same name in the results
    /// subdirectory of `dir`.
    ///
    /// A document that cannot be read or whose dates cannot be written is reported in
    /// `ProcessReport::failures` and skipped. When the results subdirectory cannot be created,
    /// every document fails on its own write. Only a directory that cannot be listed is an error.
    pub fn process(&self, dir: impl AsRef<Path>) -> Result<ProcessReport> {
        let dir = dir.as_ref();
        let output_dir = dir.join(&self.config.results_subdir);
        info!(dir = %dir.display(), output = %output_dir.display(), "Processing directory");
        if let Err(err) = fs::create_dir_all(&output_dir) {
            warn!(output = %output_dir.display(), error = %err, "Could not create the results directory");
        }
        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for (name, path) in list_files(dir)? {
            match self.process_file(&name, &path, &output_dir) {
                Ok(document) => documents.push(document),
                Err(err) => {
                    warn!(document = %name, error = %err, "Skipping document");
                    failures.push(FileFailure::new(name, &err));
                }
            }
        }
        Ok(ProcessReport {
            output_dir,
            documents,
            failures,
        })
    }

    /// Processes every directory of `dirs` independently. A directory that cannot be listed
    /// does not stop the others; its error takes its place in the returned list.
    pub fn process_all<P: AsRef<Path>>(
        &self,
        dirs: impl IntoIterator<Item = P>,
    ) -> Vec<Result<ProcessReport>> {
        dirs.into_iter()
            .map(|dir| {
                let report = self.process(&dir);
                if let Err(err) = &report {
                    warn!(dir = %dir.as_ref().display(), error = %err, "Skipping directory");
                }
                report
            })
            .collect()
    }
}

/// One entity per line, in the classifier output format.
fn render_entities(entities: &[Entity]) -> String {
    entities.iter().map(|e| format!("{}\n", e)).collect()
}
