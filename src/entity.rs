/**
This module holds the only domain object of the crate: the `Entity`, a labeled span of text with
offsets in the *de-tagged* text and a confidence value.
*/
use serde::Serialize;
use std::fmt::Display;
use std::ops::Deref;

/// Confidence given to entities read from the annotated gold standard.
pub const GOLD_CONFIDENCE: f64 = -2.0;
/// Confidence given to entities found by a rule, such as the date recognizer.
pub const RULE_CONFIDENCE: f64 = -1.0;
/// Confidence of an entity built without any other information.
const DEFAULT_CONFIDENCE: f64 = 1.0;

/// An entity represents a named object found in a document. Its offsets are character positions in
/// the text with every markup tag removed, so that entities coming from differently marked-up
/// sources stay comparable. Entities are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    token: String,
    entity_type: String,
    left_offset: Option<usize>,
    right_offset: Option<usize>,
    confidence: f64,
}

/// Where the confidence of an entity comes from. The confidence value encodes it by convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provenance {
    /// Reference entity of the gold standard. It has no real confidence.
    Gold,
    /// Entity derived from a rule.
    Rule,
    /// Entity predicted by a classifier, with its probability.
    Predicted(f64),
}

impl Entity {
    /// Builds an entity without offsets. The offsets are rendered as `-1`.
    pub fn new(token: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Entity {
            token: token.into(),
            entity_type: entity_type.into(),
            left_offset: None,
            right_offset: None,
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    /// Builds an entity spanning `left..right` in the de-tagged text.
    pub fn with_span(
        token: impl Into<String>,
        entity_type: impl Into<String>,
        left: usize,
        right: usize,
        confidence: f64,
    ) -> Self {
        Entity {
            token: token.into(),
            entity_type: entity_type.into(),
            left_offset: Some(left),
            right_offset: Some(right),
            confidence,
        }
    }

    /// Builds a reference entity of the gold standard.
    pub fn gold(
        token: impl Into<String>,
        entity_type: impl Into<String>,
        left: usize,
        right: usize,
    ) -> Self {
        Self::with_span(token, entity_type, left, right, GOLD_CONFIDENCE)
    }

    /// Builds a rule-derived entity.
    pub fn rule(
        token: impl Into<String>,
        entity_type: impl Into<String>,
        left: usize,
        right: usize,
    ) -> Self {
        Self::with_span(token, entity_type, left, right, RULE_CONFIDENCE)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn left_offset(&self) -> Option<usize> {
        self.left_offset
    }

    pub fn right_offset(&self) -> Option<usize> {
        self.right_offset
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn provenance(&self) -> Provenance {
        if self.confidence >= 0.0 {
            Provenance::Predicted(self.confidence)
        } else if self.confidence == GOLD_CONFIDENCE {
            Provenance::Gold
        } else {
            Provenance::Rule
        }
    }

    /// Exact match on the token, the type and both offsets. The confidence is ignored.
    pub fn matches(&self, other: &Entity) -> bool {
        self.token == other.token
            && self.entity_type == other.entity_type
            && self.left_offset == other.left_offset
            && self.right_offset == other.right_offset
    }
}

fn fmt_offset(offset: Option<usize>) -> String {
    match offset {
        Some(o) => o.to_string(),
        None => String::from("-1"),
    }
}

/// An entity is displayed as a line of the classifier output format, which means it can be read
/// back by `parse_classifier_output`.
impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Offset: {}-{}; Word: {}; Entity Type: {}; Probability: {}",
            fmt_offset(self.left_offset),
            fmt_offset(self.right_offset),
            self.token,
            self.entity_type,
            self.confidence
        )
    }
}

/// Ordered list of the entities of a single document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Entities(Vec<Entity>);

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.0.push(entity)
    }

    pub fn into_vec(self) -> Vec<Entity> {
        self.0
    }
}

impl Deref for Entities {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Entity>> for Entities {
    fn from(value: Vec<Entity>) -> Self {
        Entities(value)
    }
}

impl FromIterator<Entity> for Entities {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        Entities(iter.into_iter().collect())
    }
}

impl Extend<Entity> for Entities {
    fn extend<T: IntoIterator<Item = Entity>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Entities {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display_as_classifier_line() {
        let entity = Entity::with_span("John", "<ENAMEX TYPE=\"PERSON\">", 0, 4, 0.9);
        assert_eq!(
            entity.to_string(),
            "Offset: 0-4; Word: John; Entity Type: <ENAMEX TYPE=\"PERSON\">; Probability: 0.9"
        );
    }

    #[test]
    fn test_display_unset_offsets() {
        let entity = Entity::new("John", "PERSON");
        assert_eq!(
            entity.to_string(),
            "Offset: -1--1; Word: John; Entity Type: PERSON; Probability: 1"
        );
    }

    #[rstest]
    #[case(0.00005, "0.00005")]
    #[case(-1.0, "-1")]
    #[case(-2.0, "-2")]
    #[case(0.9, "0.9")]
    fn test_display_never_uses_exponent(#[case] confidence: f64, #[case] shown: &str) {
        let entity = Entity::with_span("a", "T", 0, 1, confidence);
        assert!(entity.to_string().ends_with(&format!("Probability: {}", shown)));
    }

    #[rstest]
    #[case(Entity::gold("a", "T", 0, 1), Provenance::Gold)]
    #[case(Entity::rule("a", "T", 0, 1), Provenance::Rule)]
    #[case(Entity::with_span("a", "T", 0, 1, 0.0), Provenance::Predicted(0.0))]
    #[case(Entity::with_span("a", "T", 0, 1, 0.75), Provenance::Predicted(0.75))]
    fn test_provenance(#[case] entity: Entity, #[case] expected: Provenance) {
        assert_eq!(entity.provenance(), expected)
    }

    #[test]
    fn test_matches_ignores_confidence() {
        let gold = Entity::gold("March 2008", "DATE", 10, 20);
        let predicted = Entity::with_span("March 2008", "DATE", 10, 20, 0.3);
        assert!(gold.matches(&predicted));
        assert!(predicted.matches(&gold));
    }

    #[rstest]
    #[case(Entity::gold("Mary", "PER", 10, 14))]
    #[case(Entity::gold("John", "ORG", 10, 14))]
    #[case(Entity::gold("John", "PER", 11, 14))]
    #[case(Entity::gold("John", "PER", 10, 15))]
    fn test_matches_requires_all_four_fields(#[case] other: Entity) {
        let entity = Entity::gold("John", "PER", 10, 14);
        assert!(!entity.matches(&other))
    }

    #[test]
    fn test_entities_collect_and_deref() {
        let entities: Entities = vec![Entity::new("a", "T"), Entity::new("b", "T")]
            .into_iter()
            .collect();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].token(), "b");
        let tokens: Vec<&str> = (&entities).into_iter().map(|e| e.token()).collect();
        assert_eq!(tokens, vec!["a", "b"]);
    }
}
