/**
Extraction of the entities annotated inline in the gold standard, such as
`<ENAMEX TYPE="PERSON">John</ENAMEX>`. Three families of tags are recognized: `ENAMEX` (entity
names), `TIMEX` (time expressions) and `NUMEX` (numerical expressions).
*/
use crate::entity::{Entities, Entity};
use crate::span::SpanLocator;
use enum_iterator::{all, Sequence};
use itertools::Itertools;
use regex::{Match, Matches, Regex};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

/// Family of an annotation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum TagFamily {
    Enamex,
    Timex,
    Numex,
}

impl TagFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enamex => "ENAMEX",
            Self::Timex => "TIMEX",
            Self::Numex => "NUMEX",
        }
    }
}

impl Display for TagFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTagFamily(String);

impl Display for UnknownTagFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown tag family: {}", self.0)
    }
}

impl std::error::Error for UnknownTagFamily {}

impl FromStr for TagFamily {
    type Err = UnknownTagFamily;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<TagFamily>()
            .find(|family| family.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTagFamily(String::from(s)))
    }
}

/// A complete annotation, from the opening tag to the first closing tag of any family.
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    let families = all::<TagFamily>().map(|f| f.as_str()).join("|");
    Regex::new(&format!("(?i)<(?:{families}).+?</(?:{families})>")).unwrap()
});
static FAMILY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(\w+?MEX)").unwrap());
static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\s*[^/>]+>").unwrap());
static INNER_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">(.+?)<").unwrap());

/// An entity read from the markup, along with the family of its tag.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedEntity {
    pub family: TagFamily,
    pub entity: Entity,
}

/// Lazily yields the annotated entities of a text, in order of appearance.
///
/// The type of every entity is its whole opening tag (e.g. `<ENAMEX TYPE="PERSON">`), kept
/// verbatim because the classifier output carries the same string. Its offsets are those of the
/// annotated text in the de-tagged document and its confidence is `GOLD_CONFIDENCE`. Annotations
/// spanning a line break are not recognized.
pub struct MarkedEntities<'t> {
    annotations: Matches<'static, 't>,
    locator: SpanLocator,
}

impl MarkedEntities<'_> {
    fn read(&self, annotation: Match<'_>) -> Option<MarkedEntity> {
        let raw = annotation.as_str();
        let family = FAMILY.captures(raw)?.get(1)?.as_str().parse().ok()?;
        let opening_tag = OPENING_TAG.find(raw)?.as_str();
        let inner = INNER_TEXT.captures(raw)?.get(1)?;
        let (left, right) = self
            .locator
            .span(annotation.start() + inner.start(), inner.as_str());
        Some(MarkedEntity {
            family,
            entity: Entity::gold(inner.as_str(), opening_tag, left, right),
        })
    }
}

impl Iterator for MarkedEntities<'_> {
    type Item = MarkedEntity;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let annotation = self.annotations.next()?;
            match self.read(annotation) {
                Some(marked) => return Some(marked),
                None => debug!(
                    annotation = annotation.as_str(),
                    "Skipping annotation without text"
                ),
            }
        }
    }
}

/// Iterates over the annotated entities of `text`.
pub fn marked_entities(text: &str) -> MarkedEntities<'_> {
    MarkedEntities {
        annotations: ANNOTATION.find_iter(text),
        locator: SpanLocator::new(text),
    }
}

/// Collects the annotated entities of `text`.
pub fn extract_marked(text: &str) -> Entities {
    marked_entities(text).map(|marked| marked.entity).collect()
}
