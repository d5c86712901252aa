//! Weight-class matching between athlete tokens and schedule specs.

use crate::ranges::{self, ClassToken};

/// Decides whether an athlete's weight-class token satisfies a session's
/// weight-class spec.
///
/// Open-top classes are a category of their own, not "anything heavier":
/// `"86+"` matches a range only when the range's own top token is `86+`,
/// never because 86 fits under a plain numeric bound. Malformed specs match
/// nothing, so an unparseable schedule row cannot silently swallow athletes.
#[must_use]
pub fn weight_class_matches(athlete_class: &str, spec: &str) -> bool {
    let Some(athlete) = parse_athlete_class(athlete_class) else {
        return false;
    };
    let rest = ranges::strip_bracket_prefix(spec.trim());
    if ranges::is_all_classes(rest) {
        return true;
    }
    let tokens = ranges::class_tokens(rest);
    if tokens.is_empty() {
        return false;
    }

    // Exact-match path: specs that enumerate discrete classes, optionally
    // `&`-joined ("77kg & 69+kg").
    if tokens.contains(&athlete) {
        return true;
    }

    // Range path: a numeric span like "48kg - 86+kg". Enumerations keep the
    // exact-match semantics even when they happen to contain a dash.
    if rest.contains('&') || !rest.contains('-') || tokens.len() < 2 {
        return false;
    }
    if athlete.open_top {
        // Only an explicitly open-top upper token at exactly this base
        // weight admits a plus-class athlete.
        return tokens
            .iter()
            .any(|t| t.open_top && t.base_kg == athlete.base_kg);
    }
    let min = tokens.iter().map(|t| t.base_kg).min().unwrap_or(0);
    let max = tokens.iter().map(|t| t.base_kg).max().unwrap_or(0);
    min <= athlete.base_kg && athlete.base_kg <= max
}

/// Normalizes an athlete's raw weight-class token (`"69"`, `"86+"`,
/// `"69kg"`) into a class token. `None` when the token carries no weight.
fn parse_athlete_class(token: &str) -> Option<ClassToken> {
    let cleaned = token.replace("kg", " ");
    let cleaned = cleaned.trim();
    let (digits, open_top) = match cleaned.strip_suffix('+') {
        Some(base) => (base.trim(), true),
        None => (cleaned, false),
    };
    Some(ClassToken {
        base_kg: digits.parse().ok()?,
        open_top,
    })
}
