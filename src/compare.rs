use serde::Serialize;
use crate::address::model::ParsedAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MatchStatus {
    Match,
    #[serde(rename = "No Match")]
    NoMatch,
    /// structure agrees and the street bodies overlap, but neither zip nor city backs it up
    Potential,
}

/// Outcome of comparing two addresses.
///
/// Scores are the share (0-100) of one side's street body words found in
/// the other's, so `score_a` and `score_b` can differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "Match_Status")]
    pub status: MatchStatus,
    #[serde(rename = "Address1_Body_Score")]
    pub score_a: f64,
    #[serde(rename = "Address2_Body_Score")]
    pub score_b: f64,
    #[serde(rename = "Zip5_Match")]
    pub zip5_match: bool,
    #[serde(rename = "City_Match")]
    pub city_match: bool,
    #[serde(rename = "Directional_Match")]
    pub directional_match: bool,
    #[serde(rename = "Suite_Match")]
    pub suite_match: bool,
}

impl MatchResult {
    fn no_match() -> Self {
        Self {
            status: MatchStatus::NoMatch,
            score_a: 0.0,
            score_b: 0.0,
            zip5_match: false,
            city_match: false,
            directional_match: false,
            suite_match: false,
        }
    }
}

/// Decide whether two parsed addresses point at the same place.
pub fn compare(a: &ParsedAddress, b: &ParsedAddress) -> MatchResult {
    let zip5_match = prefix(a.zip(), 5) == prefix(b.zip(), 5);
    let city_match = a.city().eq_ignore_ascii_case(b.city());
    let state_match = a.state().eq_ignore_ascii_case(b.state());

    match (a.is_po_box(), b.is_po_box()) {
        (true, true) => {
            if a.box_number() == b.box_number() && state_match {
                MatchResult {
                    status: MatchStatus::Match,
                    score_a: 100.0,
                    score_b: 100.0,
                    zip5_match,
                    city_match,
                    directional_match: false,
                    suite_match: false,
                }
            } else {
                MatchResult::no_match()
            }
        }
        (false, false) => compare_streets(a, b, zip5_match, city_match, state_match),
        _ => MatchResult::no_match(),
    }
}

fn compare_streets(
    a: &ParsedAddress,
    b: &ParsedAddress,
    zip5_match: bool,
    city_match: bool,
    state_match: bool,
) -> MatchResult {
    if !state_match {
        return MatchResult::no_match();
    }

    let zip3_match = prefix(a.zip(), 3) == prefix(b.zip(), 3);
    let street_number_match = a.street_number() == b.street_number();
    let block_match = a.street_block() == b.street_block();
    let grid_match = a.grid_id() == b.grid_id();
    let directional_match = a.street_directional() == b.street_directional();
    let suite_match = a.suite_number() == b.suite_number();
    // one side having a suite and the other none is not a contradiction
    let missing_suite = !suite_match && (a.suite_number().is_empty() || b.suite_number().is_empty());

    if !(zip3_match && street_number_match && block_match && grid_match && (suite_match || missing_suite)) {
        return MatchResult::no_match();
    }

    let score_a = body_score(a.street_body(), b.street_body());
    let score_b = body_score(b.street_body(), a.street_body());

    let status = if score_a == 0.0 || score_b == 0.0 {
        MatchStatus::NoMatch
    } else if zip5_match || city_match || (score_a == 100.0 && score_b == 100.0) {
        MatchStatus::Match
    } else {
        MatchStatus::Potential
    };

    MatchResult {
        status,
        score_a,
        score_b,
        zip5_match,
        city_match,
        directional_match,
        suite_match,
    }
}

/// percentage of `from`'s words that appear as whole words in `to`, rounded half to even
fn body_score(from: &str, to: &str) -> f64 {
    let from_words = from.split(' ').collect::<Vec<_>>();
    let to_words = to.split(' ').collect::<Vec<_>>();
    let found = from_words.iter()
        .filter(|word| to_words.contains(*word))
        .count();
    (100.0 * found as f64 / from_words.len().max(1) as f64).round_ties_even()
}

/// the first `n` characters, or all of them when shorter
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
