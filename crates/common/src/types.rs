//! Core types for scenario text

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Gherkin step prefix, matched with its trailing space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPrefix {
    Given,
    When,
    Then,
    And,
}

impl StepPrefix {
    pub const ALL: [StepPrefix; 4] = [
        StepPrefix::Given,
        StepPrefix::When,
        StepPrefix::Then,
        StepPrefix::And,
    ];

    /// Lower-case prefix including the separating space
    pub fn as_str(&self) -> &'static str {
        match self {
            StepPrefix::Given => "given ",
            StepPrefix::When => "when ",
            StepPrefix::Then => "then ",
            StepPrefix::And => "and ",
        }
    }
}

impl std::fmt::Display for StepPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepPrefix::Given => write!(f, "Given"),
            StepPrefix::When => write!(f, "When"),
            StepPrefix::Then => write!(f, "Then"),
            StepPrefix::And => write!(f, "And"),
        }
    }
}

/// A single step line of a scenario block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLine<'a> {
    pub prefix: StepPrefix,
    /// Text after the prefix, original casing preserved
    pub text: &'a str,
}

impl<'a> StepLine<'a> {
    /// Classify a raw line.
    ///
    /// The line is trimmed and compared case-insensitively against `given `,
    /// `when `, `then ` and `and `. A bare `Given` with nothing after it is not
    /// a step, and neither is a blank line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let trimmed = line.trim();
        StepPrefix::ALL.iter().find_map(|prefix| {
            let len = prefix.as_str().len();
            let head = trimmed.get(..len)?;
            if head.eq_ignore_ascii_case(prefix.as_str()) {
                Some(StepLine {
                    prefix: *prefix,
                    text: &trimmed[len..],
                })
            } else {
                None
            }
        })
    }
}

/// Split text into lines on every line boundary, not only `\n`.
///
/// Besides `\n` and `\r\n` this breaks on a lone `\r`, vertical tab, form
/// feed, the `\x1c`..`\x1e` separators, NEL, U+2028 and U+2029. `\r\n`
/// counts as one boundary. A trailing boundary does not produce an empty
/// last line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let rest = self.rest;
        match rest.char_indices().find(|(_, c)| is_line_boundary(*c)) {
            Some((i, c)) => {
                let mut next = i + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                self.rest = &rest[next..];
                Some(&rest[..i])
            }
            None => {
                self.rest = "";
                Some(rest)
            }
        }
    }
}

/// One Gherkin `Feature`/`Scenario` text block.
///
/// Trailing whitespace is removed on construction and the text is never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScenarioBlock(String);

impl ScenarioBlock {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        text.truncate(text.trim_end().len());
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name following `Feature:` on the first feature line
    pub fn feature_name(&self) -> Option<&str> {
        self.keyword_value("Feature:")
    }

    /// Name following `Scenario:` on the first scenario line
    pub fn scenario_name(&self) -> Option<&str> {
        self.keyword_value("Scenario:")
    }

    pub fn step_lines(&self) -> impl Iterator<Item = StepLine<'_>> {
        split_lines(&self.0).filter_map(StepLine::parse)
    }

    fn keyword_value(&self, keyword: &str) -> Option<&str> {
        split_lines(&self.0)
            .find_map(|line| line.trim().strip_prefix(keyword))
            .map(str::trim)
    }
}

impl From<String> for ScenarioBlock {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for ScenarioBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<ScenarioBlock> for String {
    fn from(block: ScenarioBlock) -> Self {
        block.0
    }
}

impl AsRef<str> for ScenarioBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScenarioBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered scenario blocks in generation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet(Vec<ScenarioBlock>);

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: ScenarioBlock) {
        self.0.push(block);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScenarioBlock> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioBlock> {
        self.0.iter()
    }

    /// Parse a JSON array of scenario strings
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<ScenarioBlock> for ScenarioSet {
    fn from_iter<I: IntoIterator<Item = ScenarioBlock>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ScenarioSet {
    type Item = ScenarioBlock;
    type IntoIter = std::vec::IntoIter<ScenarioBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a ScenarioBlock;
    type IntoIter = std::slice::Iter<'a, ScenarioBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
