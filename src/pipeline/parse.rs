//! Requirement segmentation: turn the captured line stream into records.
//!
//! Each trimmed line is classified by an ordered rule table; the first rule
//! that matches decides what happens to the line:
//!
//! | # | Rule | Pattern | Effect |
//! |---|------|---------|--------|
//! | 1 | `FullHeader` | `ID: n / Legacy GUID: g / CR: c` | close open record, open a new one |
//! | 2 | `BareHeader` | `ID: n` | close open record, open a new one with `N/A` fields |
//! | 3 | `LegacyGuid` | `Legacy GUID: g` (record open) | set `legacy_guid` |
//! | 4 | `ChangeRequest` | `CR: c` (record open) | set `change_request` |
//! | 5 | `Description` | any non-empty line (record open) | append to `description` |
//! | – | `Discard` | everything else | dropped silently |
//!
//! The parser never fails: unrecognised content before the first header is
//! simply discarded.

use crate::output::{Requirement, NOT_AVAILABLE};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_FULL_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ID:\s*(\d+)\s*/\s*Legacy GUID:\s*(\S+)?\s*/\s*CR:\s*(\d+)?").unwrap()
});
static RE_BARE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ID:\s*(\d+)").unwrap());
static RE_LEGACY_GUID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Legacy GUID:\s*(\S+)").unwrap());
static RE_CHANGE_REQUEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^CR:\s*(\d+)").unwrap());

/// Names of the line rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    FullHeader,
    BareHeader,
    LegacyGuid,
    ChangeRequest,
    Description,
    /// Fallback: the line contributes nothing.
    Discard,
}

impl Rule {
    /// Evaluation order. `Discard` is not listed; it applies when none match.
    pub const ORDER: [Rule; 5] = [
        Rule::FullHeader,
        Rule::BareHeader,
        Rule::LegacyGuid,
        Rule::ChangeRequest,
        Rule::Description,
    ];

    /// Try this rule against a trimmed line.
    ///
    /// `open` tells whether a record is currently being accumulated; rules
    /// 3–5 only apply while one is.
    fn try_match<'a>(self, line: &'a str, open: bool) -> Option<LineMatch<'a>> {
        match self {
            Rule::FullHeader => RE_FULL_HEADER.captures(line).map(|c| LineMatch::FullHeader {
                id: c.get(1).map_or("", |m| m.as_str()),
                legacy_guid: c.get(2).map(|m| m.as_str()),
                change_request: c.get(3).map(|m| m.as_str()),
            }),
            Rule::BareHeader => RE_BARE_HEADER.captures(line).map(|c| LineMatch::BareHeader {
                id: c.get(1).map_or("", |m| m.as_str()),
            }),
            Rule::LegacyGuid if open => RE_LEGACY_GUID
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| LineMatch::LegacyGuid(m.as_str())),
            Rule::ChangeRequest if open => RE_CHANGE_REQUEST
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| LineMatch::ChangeRequest(m.as_str())),
            Rule::Description if open && !line.is_empty() => Some(LineMatch::Description(line)),
            _ => None,
        }
    }
}

/// A classified line with the fields its rule captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch<'a> {
    FullHeader {
        id: &'a str,
        legacy_guid: Option<&'a str>,
        change_request: Option<&'a str>,
    },
    BareHeader {
        id: &'a str,
    },
    LegacyGuid(&'a str),
    ChangeRequest(&'a str),
    Description(&'a str),
    Discard,
}

impl LineMatch<'_> {
    /// The rule that produced this match.
    pub fn rule(&self) -> Rule {
        match self {
            LineMatch::FullHeader { .. } => Rule::FullHeader,
            LineMatch::BareHeader { .. } => Rule::BareHeader,
            LineMatch::LegacyGuid(_) => Rule::LegacyGuid,
            LineMatch::ChangeRequest(_) => Rule::ChangeRequest,
            LineMatch::Description(_) => Rule::Description,
            LineMatch::Discard => Rule::Discard,
        }
    }
}

/// Classify a trimmed line. First matching rule in [`Rule::ORDER`] wins.
pub fn classify(line: &str, open: bool) -> LineMatch<'_> {
    Rule::ORDER
        .iter()
        .find_map(|rule| rule.try_match(line, open))
        .unwrap_or(LineMatch::Discard)
}

/// Parser state: at most one record is open at any time.
#[derive(Debug, Default)]
enum ParserState {
    #[default]
    Idle,
    Accumulating(Requirement),
}

/// Incremental requirement parser.
#[derive(Debug, Default)]
pub struct RequirementParser {
    state: ParserState,
    done: Vec<Requirement>,
    discarded: usize,
}

impl RequirementParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines dropped by the `Discard` rule so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Process one line of input.
    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        let open = matches!(self.state, ParserState::Accumulating(_));

        match classify(line, open) {
            LineMatch::FullHeader {
                id,
                legacy_guid,
                change_request,
            } => {
                let mut req = Requirement::new(id);
                req.legacy_guid = legacy_guid.unwrap_or(NOT_AVAILABLE).to_string();
                req.change_request = change_request.unwrap_or(NOT_AVAILABLE).to_string();
                self.open(req);
            }
            LineMatch::BareHeader { id } => self.open(Requirement::new(id)),
            LineMatch::LegacyGuid(guid) => {
                if let ParserState::Accumulating(req) = &mut self.state {
                    req.legacy_guid = guid.to_string();
                }
            }
            LineMatch::ChangeRequest(cr) => {
                if let ParserState::Accumulating(req) = &mut self.state {
                    req.change_request = cr.to_string();
                }
            }
            LineMatch::Description(text) => {
                if let ParserState::Accumulating(req) = &mut self.state {
                    req.description.push_str(text);
                    req.description.push(' ');
                }
            }
            LineMatch::Discard => {
                if !line.is_empty() {
                    debug!("Discarding line outside any requirement: {:?}", line);
                }
                self.discarded += 1;
            }
        }
    }

    /// Close the open record (if any) and return all records in order.
    pub fn finish(mut self) -> Vec<Requirement> {
        self.close();
        self.done
    }

    fn open(&mut self, req: Requirement) {
        self.close();
        debug!("Opened requirement {}", req.id);
        self.state = ParserState::Accumulating(req);
    }

    fn close(&mut self) {
        if let ParserState::Accumulating(mut req) = std::mem::take(&mut self.state) {
            req.description = req.description.trim().to_string();
            self.done.push(req);
        }
    }
}

/// Parse captured section text into requirement records.
pub fn parse_requirements(text: &str) -> Vec<Requirement> {
    let mut parser = RequirementParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}
