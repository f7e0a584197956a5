/**
Scores a classifier that assigns one label per line. Both files start with a header line; on every
following line the first whitespace-delimited token is the label, and line *i* of the predicted
file is the prediction for line *i* of the gold file.
*/
use crate::config::ScorerConfig;
use crate::error::{Error, Result};
use crate::metrics::{ratio, Scores};
use crate::scorer::read_document;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;
use tracing::info;

/// Counts and scores of one gold class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassScore {
    pub label: String,
    /// Occurrences of the class in the gold file.
    pub total: usize,
    /// Number of times the class was predicted.
    pub predicted: usize,
    pub correct: usize,
    pub recall: f64,
    pub precision: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelReport {
    /// One entry per gold class, ordered by label.
    pub classes: Vec<ClassScore>,
    pub excluded_label: String,
    /// Micro-average over every class except the excluded one. `None` when no such class occurs
    /// in the gold file.
    pub micro_average: Option<Scores>,
}

/// Reads the labels of a label file, skipping its header line.
pub fn read_labels<'t>(text: &'t str, path: &Path) -> Result<Vec<&'t str>> {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(index, line)| {
            line.split_whitespace()
                .next()
                .ok_or_else(|| Error::MissingLabel {
                    path: path.to_path_buf(),
                    line: index + 1,
                })
        })
        .collect()
}

/// Compares aligned sequences of gold and predicted labels.
pub fn score_labels(gold: &[&str], predicted: &[&str], excluded_label: &str) -> Result<LabelReport> {
    if gold.len() != predicted.len() {
        return Err(Error::MisalignedLabels {
            gold: gold.len(),
            predicted: predicted.len(),
        });
    }
    let predicted_counts = predicted.iter().copied().counts();
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (&target, &prediction) in gold.iter().zip(predicted) {
        let (total, correct) = totals.entry(target).or_default();
        *total += 1;
        if target == prediction {
            *correct += 1;
        }
    }
    let classes: Vec<ClassScore> = totals
        .into_iter()
        .map(|(label, (total, correct))| {
            let predicted = predicted_counts.get(label).copied().unwrap_or(0);
            ClassScore {
                label: label.to_string(),
                total,
                predicted,
                correct,
                recall: ratio(correct, total),
                precision: ratio(correct, predicted),
            }
        })
        .collect();
    let (correct, total, predicted) = classes
        .iter()
        .filter(|class| class.label != excluded_label)
        .fold((0, 0, 0), |(c, t, p), class| {
            (c + class.correct, t + class.total, p + class.predicted)
        });
    let micro_average = (total > 0).then(|| Scores::from_counts(correct, total, predicted));
    Ok(LabelReport {
        classes,
        excluded_label: excluded_label.to_string(),
        micro_average,
    })
}

/// Scores the predicted label file against the gold label file.
pub fn score_label_files(
    gold: impl AsRef<Path>,
    predicted: impl AsRef<Path>,
    config: &ScorerConfig,
) -> Result<LabelReport> {
    let (gold, predicted) = (gold.as_ref(), predicted.as_ref());
    info!(gold = %gold.display(), predicted = %predicted.display(), "Scoring labels");
    let gold_text = read_document(gold)?;
    let predicted_text = read_document(predicted)?;
    score_labels(
        &read_labels(&gold_text, gold)?,
        &read_labels(&predicted_text, predicted)?,
        &config.excluded_label,
    )
}

impl Display for LabelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            writeln!(
                f,
                "Class {} R = {:.2}% P = {:.2}%",
                class.label,
                class.recall * 100.0,
                class.precision * 100.0
            )?;
        }
        match &self.micro_average {
            Some(scores) => write!(
                f,
                "micro-averaged excluding class {}: R = {:.2}% P = {:.2}%",
                self.excluded_label,
                scores.recall * 100.0,
                scores.precision * 100.0
            ),
            None => write!(f, "No class other than {} to average", self.excluded_label),
        }
    }
}
