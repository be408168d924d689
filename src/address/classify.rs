//! The five ordered passes that pull structured fields out of a street line.
//!
//! Every pass looks at the tokens still unclaimed by earlier passes and
//! reports the positions it claims; [`breakdown`] removes them before the
//! next pass runs. Order matters: suite, grid/block, number, suffix, directional.

use std::sync::LazyLock;
use log::debug;
use regex::Regex;
use crate::address::model::StreetDetails;
use crate::address::tokens::TokenMap;
use crate::tables::ReferenceTables;

static DIRECTIONAL_REG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(N|S|E|W|NE|NW|SE|SW|NORTH|SOUTH|EAST|WEST|NORTHEAST|NORTHWEST|SOUTHEAST|SOUTHWEST)$").unwrap()
});

pub const TOO_MANY_DIRECTIONALS: &str = "More than 2 potential Directionals exist in address.";

/// result of running every pass over one street line
#[derive(Debug, Default)]
pub(crate) struct Breakdown {
    pub details: StreetDetails,
    /// ambiguities worth reporting, the matching field is left empty
    pub warnings: Vec<String>,
}

pub(crate) fn breakdown(raw: &str, tables: &ReferenceTables) -> Breakdown {
    let mut tokens = TokenMap::tokenize(raw);
    let mut result = Breakdown::default();

    if let Some(suite) = find_suite(raw, &tokens, tables) {
        debug!("suite [{}] -> [{}] in [{}]", suite.identifier, suite.number, raw);
        tokens.remove_all(suite.positions);
        result.details.suite_number = suite.number;
    }

    let anchor = find_grid_or_block(&tokens);
    match &anchor {
        Some((position, Anchor::Grid(grid))) => {
            debug!("grid [{}] in [{}]", grid, raw);
            result.details.grid_id = grid.clone();
            tokens.remove(*position);
        }
        Some((position, Anchor::Block(block))) => {
            debug!("block [{}] in [{}]", block, raw);
            result.details.street_block = block.clone();
            tokens.remove(*position);
        }
        None => {}
    }

    if let Some(number) = find_street_number(&tokens, anchor.as_ref().map(|(_, anchor)| anchor)) {
        debug!("street number [{}] (suite suffix [{}]) in [{}]", number.number, number.suite_suffix, raw);
        tokens.remove(number.position);
        result.details.street_number = number.number;
        if result.details.suite_number.is_empty() && !number.suite_suffix.is_empty() {
            result.details.suite_number = number.suite_suffix;
        }
    }

    if let Some((position, suffix)) = find_suffix(&tokens, tables) {
        debug!("suffix [{}] in [{}]", suffix, raw);
        tokens.remove(position);
        result.details.street_suffix = suffix;
    }

    match find_directional(&tokens) {
        DirectionalPick::Found { position, abbreviation } => {
            debug!("directional [{}] in [{}]", abbreviation, raw);
            tokens.remove(position);
            result.details.street_directional = abbreviation;
        }
        DirectionalPick::Ambiguous(count) => {
            debug!("[{}] directional candidates in [{}], leaving it unset", count, raw);
            result.warnings.push(TOO_MANY_DIRECTIONALS.to_string());
        }
        DirectionalPick::Absent => {}
    }

    result.details.street_body = tokens.into_body();
    result
}

#[derive(Debug, PartialEq, Eq)]
pub struct SuiteMatch {
    pub identifier: String,
    pub number: String,
    pub positions: Vec<usize>,
}

/// Scan the whole line for suite identifiers.
///
/// When several identifiers occur, the last one in table order is used.
/// The suite number is the word right after the identifier with dashes dropped.
pub fn find_suite(raw: &str, tokens: &TokenMap, tables: &ReferenceTables) -> Option<SuiteMatch> {
    // ascii folding keeps byte offsets identical between `raw` and `upper`
    let upper = raw.to_ascii_uppercase();
    let identifier = tables.suite_identifiers()
        .filter(|identifier| upper.contains(*identifier))
        .last()?;

    let start = upper.find(identifier)? + identifier.len();
    let number = raw[start..].trim_start_matches(' ')
        .split(' ')
        .next()
        .unwrap_or_default()
        .replace('-', "");

    let positions = tokens.iter()
        .filter(|(_, token)| {
            token.eq_ignore_ascii_case(identifier)
                || (!number.is_empty() && *token == number)
                || token.contains(identifier)
        })
        .map(|(position, _)| position)
        .collect();

    Some(
        SuiteMatch {
            identifier: identifier.to_string(),
            number,
            positions,
        }
    )
}

/// what sits in front of the street number, if anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// map-grid id at position 0, e.g. `N6W23001` or `39.2`
    Grid(String),
    /// hyphenated block at position 0 or 1, e.g. `112-10`
    Block(String),
}

fn alphabetic_count(token: &str) -> usize {
    token.chars().filter(|c| c.is_alphabetic()).count()
}

fn is_grid(token: &str) -> bool {
    !token.contains('-') && (alphabetic_count(token) == 2 || token.contains('.'))
}

fn is_block(token: &str) -> bool {
    match token.split('-').nth(1) {
        Some(after_dash) => alphabetic_count(token) == 0 && after_dash.chars().count() >= 2,
        None => false,
    }
}

/// a grid is only looked for at position 0; it rules out a block
pub fn find_grid_or_block(tokens: &TokenMap) -> Option<(usize, Anchor)> {
    if let Some(token) = tokens.get(0).filter(|token| is_grid(token)) {
        return Some((0, Anchor::Grid(token.to_string())));
    }
    [0, 1].into_iter()
        .find_map(|position| {
            tokens.get(position)
                .filter(|token| is_block(token))
                .map(|token| (position, Anchor::Block(token.to_string())))
        })
}

#[derive(Debug, PartialEq, Eq)]
pub struct StreetNumber {
    pub position: usize,
    pub number: String,
    /// `B` from `123B`, `A` from `123-A`; empty otherwise
    pub suite_suffix: String,
}

/// Street number at position 0, or 1 after a grid. A block leaves no room for one.
pub fn find_street_number(tokens: &TokenMap, anchor: Option<&Anchor>) -> Option<StreetNumber> {
    let position = match anchor {
        None => 0,
        Some(Anchor::Grid(_)) => 1,
        Some(Anchor::Block(_)) => return None,
    };
    let token = tokens.get(position)?;

    if token.chars().any(|c| c.is_ascii_digit()) {
        let number = token.split('-')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        if number.is_empty() {
            return None;
        }
        let suite_suffix = if token.chars().all(char::is_alphanumeric) {
            token.chars().filter(|c| c.is_alphabetic()).collect()
        } else {
            token.split('-').nth(1).unwrap_or_default().to_string()
        };
        Some(StreetNumber { position, number, suite_suffix })
    } else if !token.is_empty() && token.chars().all(char::is_alphabetic) {
        word_to_number(token).map(|number| StreetNumber {
            position,
            number: number.to_string(),
            suite_suffix: String::new(),
        })
    } else {
        None
    }
}

/// spelled-out street numbers, single words only
fn word_to_number(word: &str) -> Option<&'static str> {
    let number = match word.to_ascii_uppercase().as_str() {
        "ONE" => "1",
        "TWO" => "2",
        "THREE" => "3",
        "FOUR" => "4",
        "FIVE" => "5",
        "SIX" => "6",
        "SEVEN" => "7",
        "EIGHT" => "8",
        "NINE" => "9",
        "TEN" => "10",
        "ELEVEN" => "11",
        "TWELVE" => "12",
        "THIRTEEN" => "13",
        "FOURTEEN" => "14",
        "FIFTEEN" => "15",
        "SIXTEEN" => "16",
        "SEVENTEEN" => "17",
        "EIGHTEEN" => "18",
        "NINETEEN" => "19",
        "TWENTY" => "20",
        "THIRTY" => "30",
        "FORTY" => "40",
        "FIFTY" => "50",
        "SIXTY" => "60",
        "SEVENTY" => "70",
        "EIGHTY" => "80",
        "NINETY" => "90",
        _ => return None,
    };
    Some(number)
}

/// Rightmost token found in the suffix table, so `PEACEFUL TRAIL RD` yields `RD`.
pub fn find_suffix(tokens: &TokenMap, tables: &ReferenceTables) -> Option<(usize, String)> {
    tokens.iter()
        .rev()
        .find_map(|(position, token)| {
            tables.suffix_abbreviation(token).map(|abbreviation| (position, abbreviation.to_string()))
        })
}

#[derive(Debug, PartialEq, Eq)]
pub enum DirectionalPick {
    Absent,
    Found { position: usize, abbreviation: String },
    /// more than two candidates, nothing is picked
    Ambiguous(usize),
}

/// Pick the directional among the remaining tokens.
///
/// Two adjacent candidates (`N WEST SIDE RD`) resolve to the left one,
/// two separated ones (`N CAROLINA ST SE`) to the right one.
pub fn find_directional(tokens: &TokenMap) -> DirectionalPick {
    let candidates = tokens.iter()
        .filter(|(_, token)| DIRECTIONAL_REG.is_match(token))
        .collect::<Vec<_>>();

    let (position, token) = match candidates.as_slice() {
        [] => return DirectionalPick::Absent,
        [only] => *only,
        [left, right] => {
            if right.0 - left.0 > 1 {
                *right
            } else {
                *left
            }
        }
        _ => return DirectionalPick::Ambiguous(candidates.len()),
    };
    DirectionalPick::Found {
        position,
        abbreviation: abbreviate_directional(token),
    }
}

/// full words become their abbreviation, short forms are kept as written
fn abbreviate_directional(token: &str) -> String {
    let abbreviation = match token.to_ascii_uppercase().as_str() {
        "NORTH" => "N",
        "SOUTH" => "S",
        "EAST" => "E",
        "WEST" => "W",
        "NORTHEAST" => "NE",
        "NORTHWEST" => "NW",
        "SOUTHEAST" => "SE",
        "SOUTHWEST" => "SW",
        _ => return token.to_string(),
    };
    abbreviation.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn suite_with_identifier_and_number() {
        let raw = "4568 East Gradine Drive SUITE J15";
        let tokens = TokenMap::tokenize(raw);
        let suite = find_suite(raw, &tokens, &tables()).unwrap();
        assert_eq!(suite.identifier, "SUITE");
        assert_eq!(suite.number, "J15");
        assert_eq!(suite.positions, vec![4, 5]);
    }

    #[test]
    fn suite_glued_to_identifier() {
        let raw = "123 MAIN ST #5-B";
        let tokens = TokenMap::tokenize(raw);
        let suite = find_suite(raw, &tokens, &tables()).unwrap();
        assert_eq!(suite.number, "5B");
        assert_eq!(suite.positions, vec![3]);
    }

    #[test]
    fn last_identifier_in_table_order_wins() {
        let tables = ReferenceTables::from_readers(
            "Identifier\nAPT\n#\n".as_bytes(),
            "Value,Conversion\nST,ST\n".as_bytes(),
        ).unwrap();
        let raw = "123 MAIN ST APT #7";
        let suite = find_suite(raw, &TokenMap::tokenize(raw), &tables).unwrap();
        assert_eq!(suite.identifier, "#");
        assert_eq!(suite.number, "7");
        assert_eq!(suite.positions, vec![4]);
    }

    #[test]
    fn no_suite() {
        let raw = "123 MAIN ST";
        assert_eq!(find_suite(raw, &TokenMap::tokenize(raw), &tables()), None);
    }

    #[test]
    fn grid_ids() {
        assert_eq!(
            find_grid_or_block(&TokenMap::tokenize("N6W23001 BLUEMOUND RD")),
            Some((0, Anchor::Grid("N6W23001".to_string())))
        );
        assert_eq!(
            find_grid_or_block(&TokenMap::tokenize("39.2 RD")),
            Some((0, Anchor::Grid("39.2".to_string())))
        );
    }

    #[test]
    fn block_at_first_or_second_position() {
        assert_eq!(
            find_grid_or_block(&TokenMap::tokenize("112-10 BRONX RD")),
            Some((0, Anchor::Block("112-10".to_string())))
        );
        assert_eq!(
            find_grid_or_block(&TokenMap::tokenize("N 112-10 BRONX RD")),
            Some((1, Anchor::Block("112-10".to_string())))
        );
    }

    #[test]
    fn short_or_lettered_dash_is_not_a_block() {
        assert_eq!(find_grid_or_block(&TokenMap::tokenize("123-4 MAIN ST")), None);
        assert_eq!(find_grid_or_block(&TokenMap::tokenize("123-AB MAIN ST")), None);
        assert_eq!(find_grid_or_block(&TokenMap::tokenize("123 MAIN ST")), None);
    }

    #[test]
    fn grid_excludes_block() {
        assert_eq!(
            find_grid_or_block(&TokenMap::tokenize("39.2 110-10 RD")),
            Some((0, Anchor::Grid("39.2".to_string())))
        );
    }

    #[test]
    fn plain_street_number() {
        let number = find_street_number(&TokenMap::tokenize("4568 MAIN"), None).unwrap();
        assert_eq!(number, StreetNumber { position: 0, number: "4568".to_string(), suite_suffix: String::new() });
    }

    #[test]
    fn street_number_with_letter_suffix() {
        let number = find_street_number(&TokenMap::tokenize("123B MAIN ST"), None).unwrap();
        assert_eq!(number.number, "123");
        assert_eq!(number.suite_suffix, "B");
    }

    #[test]
    fn street_number_with_dash_suffix() {
        let number = find_street_number(&TokenMap::tokenize("123-A MAIN ST"), None).unwrap();
        assert_eq!(number.number, "123");
        assert_eq!(number.suite_suffix, "A");
        let number = find_street_number(&TokenMap::tokenize("123-4 MAIN ST"), None).unwrap();
        assert_eq!(number.suite_suffix, "4");
    }

    #[test]
    fn street_number_after_grid() {
        let grid = Anchor::Grid("N6W23001".to_string());
        let tokens = TokenMap::tokenize("N6W23001 450 BLUEMOUND RD");
        assert_eq!(find_street_number(&tokens, Some(&grid)).unwrap().position, 1);
    }

    #[test]
    fn block_leaves_no_street_number() {
        let block = Anchor::Block("110-10".to_string());
        assert_eq!(find_street_number(&TokenMap::tokenize("110-10 45 MAIN ST"), Some(&block)), None);
    }

    #[test]
    fn spelled_street_number() {
        assert_eq!(find_street_number(&TokenMap::tokenize("One Microsoft Way"), None).unwrap().number, "1");
        assert_eq!(find_street_number(&TokenMap::tokenize("THREE OAKS LN"), None).unwrap().number, "3");
        assert_eq!(find_street_number(&TokenMap::tokenize("NINETY MAIN ST"), None).unwrap().number, "90");
        assert_eq!(find_street_number(&TokenMap::tokenize("HUNDRED MAIN ST"), None), None);
        assert_eq!(find_street_number(&TokenMap::tokenize("MAIN ST"), None), None);
    }

    #[test]
    fn rightmost_suffix_wins() {
        let tokens = TokenMap::tokenize("PEACEFUL TRAIL RD");
        assert_eq!(find_suffix(&tokens, &tables()), Some((2, "RD".to_string())));
        let tokens = TokenMap::tokenize("Gradine Drive");
        assert_eq!(find_suffix(&tokens, &tables()), Some((1, "DR".to_string())));
    }

    #[test]
    fn separated_directionals_pick_rightmost() {
        let mut tokens = TokenMap::tokenize("123 N CAROLINA ST SE");
        tokens.remove(0);
        assert_eq!(
            find_directional(&tokens),
            DirectionalPick::Found { position: 4, abbreviation: "SE".to_string() }
        );
    }

    #[test]
    fn adjacent_directionals_pick_leftmost() {
        let tokens = TokenMap::tokenize("N WEST SIDE RD");
        assert_eq!(
            find_directional(&tokens),
            DirectionalPick::Found { position: 0, abbreviation: "N".to_string() }
        );
    }

    #[test]
    fn full_word_directional_is_abbreviated() {
        let tokens = TokenMap::tokenize("Gradine southwest");
        assert_eq!(
            find_directional(&tokens),
            DirectionalPick::Found { position: 1, abbreviation: "SW".to_string() }
        );
    }

    #[test]
    fn three_directionals_are_ambiguous() {
        let tokens = TokenMap::tokenize("N EAST S");
        assert_eq!(find_directional(&tokens), DirectionalPick::Ambiguous(3));
        assert_eq!(find_directional(&TokenMap::tokenize("MAIN")), DirectionalPick::Absent);
    }

    #[test]
    fn short_directional_keeps_its_case() {
        let tokens = TokenMap::tokenize("Main n");
        assert_eq!(
            find_directional(&tokens),
            DirectionalPick::Found { position: 1, abbreviation: "n".to_string() }
        );
    }

    #[test]
    fn identifier_inside_mixed_case_word_keeps_the_word() {
        let raw = "100 Chester Ave";
        let suite = find_suite(raw, &TokenMap::tokenize(raw), &tables()).unwrap();
        assert_eq!(suite.identifier, "STE");
        assert_eq!(suite.number, "r");
        assert!(suite.positions.is_empty());

        let result = breakdown(raw, &tables());
        assert_eq!(result.details.street_number, "100");
        assert_eq!(result.details.street_suffix, "AVE");
        assert_eq!(result.details.street_body, "Chester");
    }

    #[test]
    fn identifier_inside_uppercase_word_claims_the_word() {
        let result = breakdown("100 CHESTER AVE", &tables());
        assert_eq!(result.details.suite_number, "R");
        assert_eq!(result.details.street_body, "");
    }

    #[test]
    fn later_identifier_inside_a_word_beats_apt() {
        let result = breakdown("100 Fleet Street Apt 2", &tables());
        assert_eq!(result.details.suite_number, "eet");
        assert_eq!(result.details.street_suffix, "ST");
        assert_eq!(result.details.street_body, "Fleet Apt 2");
    }

    #[test]
    fn full_breakdown() {
        let result = breakdown("4568 East Gradine Drive SUITE J15", &tables());
        assert_eq!(result.details.street_number, "4568");
        assert_eq!(result.details.suite_number, "J15");
        assert_eq!(result.details.street_suffix, "DR");
        assert_eq!(result.details.street_directional, "E");
        assert_eq!(result.details.street_body, "Gradine");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn street_number_suffix_fills_empty_suite() {
        let result = breakdown("123B Main ST S", &tables());
        assert_eq!(result.details.street_number, "123");
        assert_eq!(result.details.suite_number, "B");
        assert_eq!(result.details.street_directional, "S");
        assert_eq!(result.details.street_body, "Main");
    }

    #[test]
    fn explicit_suite_beats_street_number_suffix() {
        let result = breakdown("123B Main Street South Ste 58", &tables());
        assert_eq!(result.details.suite_number, "58");
        assert_eq!(result.details.street_number, "123");
        assert_eq!(result.details.street_suffix, "ST");
        assert_eq!(result.details.street_directional, "S");
        assert_eq!(result.details.street_body, "Main");
    }

    #[test]
    fn grid_address() {
        let result = breakdown("N6W23001 BLUEMOUND RD", &tables());
        assert_eq!(result.details.grid_id, "N6W23001");
        assert_eq!(result.details.street_block, "");
        assert_eq!(result.details.street_number, "");
        assert_eq!(result.details.street_suffix, "RD");
        assert_eq!(result.details.street_body, "BLUEMOUND");
    }

    #[test]
    fn ambiguous_directionals_are_reported() {
        let result = breakdown("123 N EAST S MAIN ST", &tables());
        assert_eq!(result.details.street_directional, "");
        assert_eq!(result.warnings, vec![TOO_MANY_DIRECTIONALS.to_string()]);
        assert_eq!(result.details.street_body, "N EAST S MAIN");
    }
}
