/**
Rule-based recognition of calendar dates in free text, such as `3rd March 2008`, `March 3rd, 2008`
or `Monday 3rd March 2008`. The recognizer is a single case-insensitive alternation composed from
the `DateShape`s.
*/
use crate::entity::Entity;
use crate::span::SpanLocator;
use enum_iterator::{all, Sequence};
use itertools::Itertools;
use regex::{Matches, Regex};
use std::sync::LazyLock;

/// Type given to every recognized date.
pub const DATE_TYPE: &str = "DATE";

const MONTH: &str = r"(?:january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sep|october|oct|november|nov|december|dec)";
const DAY: &str = r"(?:(?:[1-3]?(?:0th|1st|2nd|3rd|[4-9]th)|11th|12th|13th)|(?:3[01]|[0-2]{0,1}[0-9])|(?:(?:(?:twenty\s|thirty\s)?(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth))|tenth|eleventh|twelfth|(?:thir|four|fif|six|seven|eigh|nine)teenth)|twentieth|thirtieth)";
const YEAR: &str = r"(?:[0-9]{4})";
const WEEKDAY: &str = r"(?:mon|monday|tues|tuesday|wed|wednesday|thurs|thur|thursday|fri|friday|sat|saturday|sun|sunday)";
const SPACE: &str = r"\s*";
const SPACE_OR_COMMA: &str = r",?\s*";

/// The shapes of date recognized. The declaration order is the priority order of the alternation:
/// when two shapes match at the same position, the first declared wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum DateShape {
    /// `3rd March 2008`
    DayMonthYear,
    /// `March 3rd, 2008`
    MonthDayYear,
    /// `March 2008`
    MonthYear,
    /// `3rd March`
    DayMonth,
    /// `March 3rd`
    MonthDay,
    /// `Monday 3rd March 2008`
    WeekdayDayMonthYear,
    /// `Monday 3rd March`
    WeekdayDayMonth,
    /// `Monday, March 3rd, 2008`
    WeekdayMonthDayYear,
}

impl DateShape {
    /// Regular expression of the shape, without flags.
    pub fn pattern(&self) -> String {
        let parts: &[&str] = match self {
            Self::DayMonthYear => &[DAY, SPACE, MONTH, SPACE_OR_COMMA, YEAR],
            Self::MonthDayYear => &[MONTH, SPACE, DAY, SPACE_OR_COMMA, YEAR],
            Self::MonthYear => &[MONTH, SPACE_OR_COMMA, YEAR],
            Self::DayMonth => &[DAY, SPACE, MONTH],
            Self::MonthDay => &[MONTH, SPACE, DAY],
            Self::WeekdayDayMonthYear => &[
                WEEKDAY,
                SPACE_OR_COMMA,
                DAY,
                SPACE,
                MONTH,
                SPACE_OR_COMMA,
                YEAR,
            ],
            Self::WeekdayDayMonth => &[WEEKDAY, SPACE_OR_COMMA, DAY, SPACE, MONTH],
            Self::WeekdayMonthDayYear => &[
                WEEKDAY,
                SPACE_OR_COMMA,
                MONTH,
                SPACE,
                DAY,
                SPACE_OR_COMMA,
                YEAR,
            ],
        };
        format!("(?:{})", parts.concat())
    }
}

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = all::<DateShape>().map(|shape| shape.pattern()).join("|");
    Regex::new(&format!("(?i)(?:{})", alternation)).unwrap()
});

/// Lazily yields the dates of a text, in order of appearance. Every date is a rule-derived entity
/// of type `DATE` whose offsets are computed on the de-tagged text.
pub struct Dates<'t> {
    matches: Matches<'static, 't>,
    locator: SpanLocator,
}

impl<'t> Iterator for Dates<'t> {
    type Item = Entity;
    fn next(&mut self) -> Option<Self::Item> {
        let date = self.matches.next()?;
        let (left, right) = self.locator.span(date.start(), date.as_str());
        Some(Entity::rule(date.as_str(), DATE_TYPE, left, right))
    }
}

/// Recognizes the dates of `text`. Every call starts a new pass over the text.
pub fn recognize_dates(text: &str) -> Dates<'_> {
    Dates {
        matches: DATE.find_iter(text),
        locator: SpanLocator::new(text),
    }
}
