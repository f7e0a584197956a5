/**
Reads the entities predicted by the classifier. The classifier writes one entity per line:

```text
Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE="PERSON">; Probability: 0.93
```
*/
use crate::entity::{Entities, Entity};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

static RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Offset: ([0-9]+)-([0-9]+);\s*Word:\s*(.+?);\s*Entity Type:\s*(.+);\s*Probability:\s*(-?[0-9.]+(?:[eE][-+]?[0-9]+)?)",
    )
    .unwrap()
});

fn read_record(record: &Captures<'_>) -> Option<Entity> {
    let left = record[1].parse().ok()?;
    let right = record[2].parse().ok()?;
    let probability = record[5].parse().ok()?;
    Some(Entity::with_span(
        &record[3],
        &record[4],
        left,
        right,
        probability,
    ))
}

/// Parses the classifier output `text` and keeps the entities whose probability is at least
/// `threshold`. Text that is not a record, or a record whose numbers cannot be read, is skipped.
///
/// Probabilities may be written in exponent form (`5e-05`). Negative values are the confidences of
/// gold and rule-derived entities; they are read like any other and only kept when `threshold`
/// is low enough, which lets a rendered list of any entities be read back.
pub fn parse_classifier_output(text: &str, threshold: f64) -> Entities {
    RECORD
        .captures_iter(text)
        .filter_map(|record| {
            let entity = read_record(&record);
            if entity.is_none() {
                debug!(record = &record[0], "Skipping malformed record");
            }
            entity
        })
        .filter(|entity| entity.confidence() >= threshold)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::RULE_CONFIDENCE;
    use rstest::rstest;

    const OUTPUT: &str = "\
Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: 0.1
Offset: 9-13; Word: Mary; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: 0.5
Offset: 17-31; Word: 3rd March 2008; Entity Type: <TIMEX TYPE=\"DATE\">; Probability: 0.9
";

    #[test]
    fn test_threshold_is_inclusive() {
        let entities = parse_classifier_output(OUTPUT, 0.5);
        let probabilities: Vec<f64> = entities.iter().map(|e| e.confidence()).collect();
        assert_eq!(probabilities, vec![0.5, 0.9]);
    }

    #[rstest]
    #[case(0.0, 3)]
    #[case(0.11, 2)]
    #[case(0.9, 1)]
    #[case(0.95, 0)]
    fn test_threshold_filtering(#[case] threshold: f64, #[case] expected: usize) {
        assert_eq!(parse_classifier_output(OUTPUT, threshold).len(), expected)
    }

    #[rstest]
    #[case("5e-05", 0.5, None)]
    #[case("5e-05", 0.0, Some(0.00005))]
    #[case("2.5E-1", 0.25, Some(0.25))]
    #[case("1e+0", 1.0, Some(1.0))]
    fn test_exponent_probabilities(
        #[case] probability: &str,
        #[case] threshold: f64,
        #[case] expected: Option<f64>,
    ) {
        let text = format!(
            "Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: {} Method: maxent",
            probability
        );
        let entities = parse_classifier_output(&text, threshold);
        assert_eq!(entities.first().map(|e| e.confidence()), expected);
    }

    #[test]
    fn test_negative_confidences_are_below_any_probability() {
        let text = "Offset: 0-10; Word: March 2008; Entity Type: DATE; Probability: -1";
        assert!(parse_classifier_output(text, 0.0).is_empty());
        let entities = parse_classifier_output(text, f64::NEG_INFINITY);
        assert_eq!(entities[0].confidence(), RULE_CONFIDENCE);
    }

    #[test]
    fn test_fields_are_read() {
        let entities = parse_classifier_output(OUTPUT, 0.0);
        let date = &entities[2];
        assert_eq!(date.token(), "3rd March 2008");
        assert_eq!(date.entity_type(), "<TIMEX TYPE=\"DATE\">");
        assert_eq!(date.left_offset(), Some(17));
        assert_eq!(date.right_offset(), Some(31));
        assert_eq!(date.confidence(), 0.9);
    }

    #[test]
    fn test_whitespace_tolerance_and_case() {
        let text = "offset: 3-7;Word:  abcd ;   entity type:\tORG;Probability:1";
        let entities = parse_classifier_output(text, 0.0);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].token(), "abcd ");
        assert_eq!(entities[0].entity_type(), "ORG");
        assert_eq!(entities[0].confidence(), 1.0);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "\
garbage line
Offset: 1-2; Word: a; Entity Type: T; Probability: 1.2.3
Offset: x-2; Word: a; Entity Type: T; Probability: 0.4
Offset: 5-6; Word: b; Entity Type: T; Probability: 0.4
";
        let entities = parse_classifier_output(text, 0.0);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].token(), "b");
    }

    #[rstest]
    #[case(Entity::with_span("Acme", "<ENAMEX TYPE=\"ORG\">", 3, 7, 0.25))]
    #[case(Entity::with_span("Acme", "<ENAMEX TYPE=\"ORG\">", 3, 7, 0.00005))]
    #[case(Entity::with_span("Acme", "ORG", 3, 7, 1e-12))]
    #[case(Entity::rule("March 2008", "DATE", 0, 10))]
    #[case(Entity::gold("John", "<ENAMEX TYPE=\"PERSON\">", 0, 4))]
    fn test_rendered_entities_are_read_back(#[case] entity: Entity) {
        let entities = parse_classifier_output(&format!("{}\n", entity), f64::NEG_INFINITY);
        assert_eq!(entities.into_vec(), vec![entity]);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_classifier_output("", 0.0).is_empty());
    }
}
