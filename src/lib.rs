/*!
This library evaluates named entity recognizers against a gold standard annotated with MUC-style
inline markup. It is built around a single comparison: two entities are the same when they have
the same token, the same type and the same offsets in the text stripped of its markup.

# SOURCES OF ENTITIES
Entities can come from three places:
* The gold standard: the `<ENAMEX>`, `<TIMEX>` and `<NUMEX>` annotations of a document. Their type
    is the full opening tag, such as `<ENAMEX TYPE="PERSON">`.
* A classifier output: one entity per line, in the format
    `Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE="PERSON">; Probability: 0.93`.
    Predictions below the probability threshold are discarded.
* The date recognizer: a set of regular expressions finding dates such as `3rd March 2008`.

The confidence of an entity tells them apart: `-2` for gold entities, `-1` for rule-derived ones
and the probability in `[0, 1]` for predicted ones. See `Provenance`.

# Terminology
* The offsets of an entity are character positions in the de-tagged text: every substring
    matching `<.+?>` is removed before counting.
* Possible: the number of gold entities. Found: the number of predicted entities. Correct: the
    number of gold entities having a matching prediction.
* Recall is `correct / possible`, precision is `correct / found`. Both are 0 when their denominator
    is 0.
*/

mod classifier;
mod config;
mod dates;
mod entity;
mod error;
mod labels;
mod markup;
mod matcher;
mod metrics;
mod reporter;
mod scorer;
mod span;
mod strip;

// The public api starts here
pub use entity::{Entities, Entity, Provenance, GOLD_CONFIDENCE, RULE_CONFIDENCE};

pub use span::{offset_of, SpanLocator};

pub use dates::{recognize_dates, DateShape, Dates, DATE_TYPE};

pub use markup::{
    extract_marked, marked_entities, MarkedEntities, MarkedEntity, TagFamily, UnknownTagFamily,
};

pub use classifier::parse_classifier_output;

pub use matcher::{match_entities, MatchOutcome};

pub use metrics::{f_measure, ratio, Scores};

pub use scorer::{CorpusScorer, DocumentScore, Tally};

pub use reporter::{CorpusReport, FileFailure, ProcessReport};

pub use labels::{read_labels, score_label_files, score_labels, ClassScore, LabelReport};

pub use strip::{strip_directory, strip_document_tags, StripReport};

pub use config::{ScorerConfig, ScorerConfigBuilder};

pub use error::{Error, Result};

use std::path::Path;

/// Main entrypoint of the library. Every document of `gold_dir` is compared with the classifier
/// output of the same name in `results_dir`. The returned report holds the per-document results,
/// the documents that could not be read and the corpus-wide recall, precision and F-measure.
///
/// * `gold_dir`: Directory of annotated documents.
/// * `results_dir`: Directory of classifier outputs.
/// * `config`: Probability threshold and other parameters.
///
/// #Example
/// ```rust,no_run
/// use nerscore::{score_corpus_conf, ScorerConfigBuilder};
///
/// let config = ScorerConfigBuilder::default().threshold(0.5).build();
/// let report = score_corpus_conf("corpus/gold", "corpus/results", config).unwrap();
/// println!("{}", report);
/// ```
pub fn score_corpus_conf(
    gold_dir: impl AsRef<Path>,
    results_dir: impl AsRef<Path>,
    config: ScorerConfig,
) -> Result<CorpusReport> {
    CorpusScorer::new(config).check(gold_dir, results_dir)
}

/// Scores a single document. The offsets of both sides are compared in the de-tagged text, so the
/// gold document may carry any amount of markup.
///
/// #Example
/// ```rust
/// use nerscore::{score_document, ScorerConfig};
///
/// let gold = "<ENAMEX TYPE=\"PERSON\">John</ENAMEX> met Mary.";
/// let results = "\
/// Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: 0.9
/// Offset: 9-13; Word: Mary; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: 0.8";
///
/// let document = score_document(gold, results, &ScorerConfig::default());
/// assert_eq!(document.recall(), 1.0);
/// assert_eq!(document.precision(), 0.5);
/// ```
pub fn score_document(gold_text: &str, results_text: &str, config: &ScorerConfig) -> DocumentScore {
    CorpusScorer::new(config.clone()).score_document("", gold_text, results_text)
}
