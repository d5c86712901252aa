//! Parsers for the three schedule mini-languages.
//!
//! Schedule rows encode eligibility in free text: an age-bracket spec, a
//! weight-class spec (sharing one field with the brackets), and an
//! entry-total range. Each parser here is a stateless function returning
//! `Option`: malformed input degrades to "no constraint" or "no match"
//! downstream, it never aborts a run.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::types::Gender;

/// Sentinel upper bound for a weight range whose top is reachable only
/// through an open-top ("plus") class. Real class weights top out far below.
pub const OPEN_TOP_MAX_KG: u32 = 999;

/// Sentinel upper bound meaning "any weight class", produced by `All` specs.
pub const ANY_WEIGHT_MAX_KG: u32 = 9_999;

/// Plausible weight-class domain. Numbers outside it inside a combined
/// age/weight spec are stray age digits, not class weights.
pub const MIN_CLASS_KG: u32 = 30;
pub const MAX_CLASS_KG: u32 = 200;

/// A bracket code covers five ages: `n` through `n + BRACKET_SPAN_YEARS`.
const BRACKET_SPAN_YEARS: u32 = 4;

static BRACKET_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([WM])(\d+)((?:\s*,\s*[WM]\d+)+)").unwrap());
static BRACKET_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([WM])(\d+)\s*-\s*[WM](\d+)").unwrap());
static SINGLE_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([WM])(\d+)(?:\s|$)").unwrap());
static BRACKET_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[WM](\d+)").unwrap());
static BRACKET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[WM]\d+\s*(?:[-,]\s*)?").unwrap());
static CLASS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)(\+)?(?:kg)?").unwrap());
static TOTAL_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").unwrap());

/// Inclusive age window decoded from a bracket spec, tagged with the
/// bracket's gender letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeWindow {
    pub gender: Gender,
    pub min_age: u32,
    pub max_age: u32,
}

impl AgeWindow {
    /// Whether `age` falls inside the window, inclusive on both ends.
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        self.min_age <= age && age <= self.max_age
    }
}

/// Named bracket patterns, tried in priority order; first success wins.
/// A comma list must run before the dash span, and both before the single
/// bracket, or the single-bracket pattern would swallow their leading token.
const AGE_GROUP_PATTERNS: &[(&str, fn(&str) -> Option<AgeWindow>)] = &[
    ("bracket-list", bracket_list),
    ("bracket-span", bracket_span),
    ("single-bracket", single_bracket),
];

/// Decodes the age-bracket portion of a combined age/weight spec.
///
/// `None` means the spec carries no parseable bracket; callers treat that as
/// age-unconstrained, since schedules routinely omit brackets for catch-all
/// sessions.
#[must_use]
pub fn parse_age_group(text: &str) -> Option<AgeWindow> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    AGE_GROUP_PATTERNS.iter().find_map(|(name, pattern)| {
        let window = pattern(text)?;
        trace!(pattern = name, ?window, "age bracket parsed");
        Some(window)
    })
}

/// `W65, W70, W75 ...`: union window from the lowest bracket's start to the
/// highest bracket's start plus the bracket span.
fn bracket_list(text: &str) -> Option<AgeWindow> {
    let caps = BRACKET_LIST_RE.captures(text)?;
    let mut starts = vec![caps[2].parse::<u32>().ok()?];
    starts.extend(
        BRACKET_TOKEN_RE
            .captures_iter(&caps[3])
            .filter_map(|c| c[1].parse::<u32>().ok()),
    );
    let min_age = *starts.iter().min()?;
    let max_age = *starts.iter().max()? + BRACKET_SPAN_YEARS;
    Some(AgeWindow {
        gender: bracket_gender(&caps[1]),
        min_age,
        max_age,
    })
}

/// `W65 - W75 ...`: window from the first bracket's start to the second
/// bracket's start plus the bracket span.
fn bracket_span(text: &str) -> Option<AgeWindow> {
    let caps = BRACKET_SPAN_RE.captures(text)?;
    let min_age = caps[2].parse::<u32>().ok()?;
    let max_age = caps[3].parse::<u32>().ok()? + BRACKET_SPAN_YEARS;
    Some(AgeWindow {
        gender: bracket_gender(&caps[1]),
        min_age,
        max_age,
    })
}

/// `W60 ...`: a single bracket's five-year window.
fn single_bracket(text: &str) -> Option<AgeWindow> {
    let caps = SINGLE_BRACKET_RE.captures(text)?;
    let start = caps[2].parse::<u32>().ok()?;
    Some(AgeWindow {
        gender: bracket_gender(&caps[1]),
        min_age: start,
        max_age: start + BRACKET_SPAN_YEARS,
    })
}

fn bracket_gender(letter: &str) -> Gender {
    if letter == "W" {
        Gender::Female
    } else {
        Gender::Male
    }
}

/// One discrete class token appearing in a weight spec, e.g. `77` or `86+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClassToken {
    pub base_kg: u32,
    pub open_top: bool,
}

/// Removes leading age-bracket tokens (single bracket, dash span, or comma
/// list) so only the weight portion of a combined spec remains.
pub(crate) fn strip_bracket_prefix(mut spec: &str) -> &str {
    while let Some(m) = BRACKET_PREFIX_RE.find(spec) {
        spec = &spec[m.end()..];
    }
    spec
}

/// Whether the weight portion is the `All` keyword (no weight constraint).
pub(crate) fn is_all_classes(rest: &str) -> bool {
    rest.split_whitespace().next() == Some("All")
}

/// Every `<int>(+)?(kg)?` token in the text, in order of appearance.
pub(crate) fn class_tokens(text: &str) -> Vec<ClassToken> {
    CLASS_TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(ClassToken {
                base_kg: caps[1].parse().ok()?,
                open_top: caps.get(2).is_some(),
            })
        })
        .collect()
}

/// Numeric weight interval extracted from a weight-class spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRange {
    pub min_kg: u32,
    pub max_kg: u32,
}

impl WeightRange {
    /// `true` when the top is reachable only through an open-top class.
    #[must_use]
    pub const fn is_open_top(&self) -> bool {
        self.max_kg == OPEN_TOP_MAX_KG
    }

    /// `true` when the spec constrains nothing (the `All` keyword).
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.max_kg == ANY_WEIGHT_MAX_KG
    }
}

/// Decodes the weight portion of a combined age/weight spec into a numeric
/// interval.
///
/// Tokens outside the plausible class domain are dropped so bracket digits
/// never masquerade as weights; any `+`-tagged token forces the open-top
/// sentinel. Used standalone for schedule validation; the per-athlete
/// decision lives in [`crate::weight_class_matches`].
#[must_use]
pub fn parse_weight_range(text: &str) -> Option<WeightRange> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let rest = strip_bracket_prefix(trimmed);
    if is_all_classes(rest) {
        return Some(WeightRange {
            min_kg: 0,
            max_kg: ANY_WEIGHT_MAX_KG,
        });
    }

    let plausible: Vec<ClassToken> = class_tokens(rest)
        .into_iter()
        .filter(|t| (MIN_CLASS_KG..=MAX_CLASS_KG).contains(&t.base_kg))
        .collect();
    let min_kg = plausible.iter().map(|t| t.base_kg).min()?;
    let max_kg = if plausible.iter().any(|t| t.open_top) {
        OPEN_TOP_MAX_KG
    } else {
        plausible.iter().map(|t| t.base_kg).max()?
    };
    Some(WeightRange { min_kg, max_kg })
}

/// Inclusive projected-total range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalRange {
    pub min: u32,
    pub max: u32,
}

impl TotalRange {
    /// Whether `total` falls inside the range, inclusive on both ends.
    #[must_use]
    pub const fn contains(&self, total: u32) -> bool {
        self.min <= total && total <= self.max
    }

    /// Center of the range, the tie-break scoring reference.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }
}

/// Extracts the first `<int> - <int>` pattern from a total-range spec.
///
/// `None` means the session carries no total constraint.
#[must_use]
pub fn parse_entry_total_range(text: &str) -> Option<TotalRange> {
    let caps = TOTAL_RANGE_RE.captures(text)?;
    Some(TotalRange {
        min: caps[1].parse().ok()?,
        max: caps[2].parse().ok()?,
    })
}
