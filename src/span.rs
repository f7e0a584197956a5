/**
This module maps positions of the raw, marked-up text to character offsets in the same text with
its tags removed. Every entity offset of the crate goes through it.
*/
use regex::Regex;
use std::sync::LazyLock;

/// Generic markup tag. `.` does not cross newlines, so a `<` without a closing `>` on the same line
/// is plain text.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.+?>").unwrap());

/// Returns the number of characters of `text[..byte_index]` once every tag has been removed from
/// it. This is the offset, in the de-tagged text, of whatever starts at `byte_index` in the raw
/// text. The cost is proportional to `byte_index`; use a `SpanLocator` to answer many queries on
/// the same document.
///
/// `byte_index` must lie on a char boundary of `text`.
pub fn offset_of(text: &str, byte_index: usize) -> usize {
    TAG.replace_all(&text[..byte_index], "").chars().count()
}

/// Precomputed mapping from raw byte positions to de-tagged character offsets, built once per
/// document.
///
/// A tag is removed from a prefix `text[..i]` iff the tag ends at or before `i`: scanning the prefix
/// finds exactly the tags of the full text that fit inside it, and a tag straddling `i` is left in
/// place. `offset_of` therefore returns the same value as the free function `offset_of`.
#[derive(Debug, Clone)]
pub struct SpanLocator {
    /// Byte position of every char of the text.
    char_starts: Vec<usize>,
    /// End byte of every tag, in increasing order.
    tag_ends: Vec<usize>,
    /// Number of chars removed by the tags `0..=i`.
    removed: Vec<usize>,
}

impl SpanLocator {
    pub fn new(text: &str) -> Self {
        let char_starts = text.char_indices().map(|(i, _)| i).collect();
        let mut tag_ends = Vec::new();
        let mut removed = Vec::new();
        let mut total = 0;
        for tag in TAG.find_iter(text) {
            total += tag.as_str().chars().count();
            tag_ends.push(tag.end());
            removed.push(total);
        }
        SpanLocator {
            char_starts,
            tag_ends,
            removed,
        }
    }

    /// Offset in the de-tagged text of the raw position `byte_index`.
    pub fn offset_of(&self, byte_index: usize) -> usize {
        let chars_before = self.char_starts.partition_point(|&b| b < byte_index);
        let tags_before = self.tag_ends.partition_point(|&end| end <= byte_index);
        let removed = match tags_before {
            0 => 0,
            n => self.removed[n - 1],
        };
        chars_before - removed
    }

    /// Left and right offsets of `token` found at the raw position `byte_index`. The right offset
    /// is the left offset plus the length of the token, in chars.
    pub fn span(&self, byte_index: usize, token: &str) -> (usize, usize) {
        let left = self.offset_of(byte_index);
        (left, left + token.chars().count())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck as quickcheck_test;
    use rstest::rstest;

    #[rstest]
    #[case("no markup here", 3, 3)]
    #[case("<b>bold</b> text", 3, 0)]
    #[case("<b>bold</b> text", 11, 4)]
    #[case("<b>bold</b> text", 12, 5)]
    #[case("a < b <TAG>c", 11, 2)]
    #[case("<unclosed\n>x", 11, 11)]
    #[case("é<t>é", 5, 1)]
    fn test_offset_of(#[case] text: &str, #[case] byte_index: usize, #[case] expected: usize) {
        assert_eq!(offset_of(text, byte_index), expected);
        assert_eq!(SpanLocator::new(text).offset_of(byte_index), expected);
    }

    #[test]
    fn test_straddling_tag_is_not_removed() {
        let text = "ab<cd>ef";
        // The prefix "ab<c" has no complete tag.
        assert_eq!(offset_of(text, 4), 4);
        assert_eq!(SpanLocator::new(text).offset_of(4), 4);
        assert_eq!(SpanLocator::new(text).offset_of(6), 2);
    }

    #[test]
    fn test_span() {
        let text = "<ENAMEX TYPE=\"PERSON\">John</ENAMEX> met Mary";
        let locator = SpanLocator::new(text);
        let mary = text.find("Mary").unwrap();
        assert_eq!(locator.span(mary, "Mary"), (9, 13));
        let detagged = TAG.replace_all(text, "");
        assert_eq!(&detagged[9..13], "Mary");
    }

    #[quickcheck_test]
    fn propertie_locator_agrees_with_direct_stripping(
        words: Vec<String>,
        tags: Vec<bool>,
    ) -> TestResult {
        if words.is_empty() {
            return TestResult::discard();
        }
        let mut text = String::new();
        for (word, tagged) in words.iter().zip(tags.iter().chain(std::iter::repeat(&false))) {
            if *tagged {
                text.push_str("<T x=\"1\">");
                text.push_str(word);
                text.push_str("</T>");
            } else {
                text.push_str(word);
            }
        }
        let locator = SpanLocator::new(&text);
        for (i, _) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            if locator.offset_of(i) != offset_of(&text, i) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }

    #[quickcheck_test]
    fn propertie_offset_is_index_in_detagged_text(prefix: String, word: String) -> TestResult {
        if word.is_empty() || word.contains('<') || word.contains('>') {
            return TestResult::discard();
        }
        if prefix.contains('<') || prefix.contains('>') {
            return TestResult::discard();
        }
        let text = format!("<DOC>{}<b>{}</b>", prefix, word);
        let index = text.len() - "</b>".len() - word.len();
        let (left, right) = SpanLocator::new(&text).span(index, &word);
        let detagged: Vec<char> = TAG.replace_all(&text, "").chars().collect();
        let found: String = detagged[left..right].iter().collect();
        TestResult::from_bool(found == word)
    }
}
