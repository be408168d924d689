use serde::{Deserialize, Serialize};
use crate::compare::{MatchResult, MatchStatus};

/// One input row: two addresses to compare
#[derive(Debug, Deserialize)]
pub struct AddressPair {
    #[serde(rename = "Address1")]
    pub address1: String,
    #[serde(rename = "City1")]
    pub city1: String,
    #[serde(rename = "State1")]
    pub state1: String,
    #[serde(rename = "Zip1")]
    pub zip1: String,
    #[serde(rename = "Address2")]
    pub address2: String,
    #[serde(rename = "City2")]
    pub city2: String,
    #[serde(rename = "State2")]
    pub state2: String,
    #[serde(rename = "Zip2")]
    pub zip2: String,
}

/// The final struct that will be written to the result CSV
#[derive(Debug, Serialize)]
pub struct Record {
    #[serde(rename = "Address1")]
    address1: String,
    #[serde(rename = "Address2")]
    address2: String,
    #[serde(rename = "Match_Status")]
    pub status: MatchStatus,
    #[serde(rename = "Address1_Body_Score")]
    score_a: f64,
    #[serde(rename = "Address2_Body_Score")]
    score_b: f64,
    #[serde(rename = "Zip5_Match")]
    zip5_match: bool,
    #[serde(rename = "City_Match")]
    city_match: bool,
    #[serde(rename = "Directional_Match")]
    directional_match: bool,
    #[serde(rename = "Suite_Match")]
    suite_match: bool,
}

impl Record {
    pub fn from_pair_and_result(pair: AddressPair, result: MatchResult) -> Self {
        Self {
            address1: pair.address1,
            address2: pair.address2,
            status: result.status,
            score_a: result.score_a,
            score_b: result.score_b,
            zip5_match: result.zip5_match,
            city_match: result.city_match,
            directional_match: result.directional_match,
            suite_match: result.suite_match,
        }
    }
}
