use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use color_eyre::eyre::{bail, WrapErr};
use log::debug;
use serde::Deserialize;

const BUILTIN_SUITE_IDENTIFIERS: &str = include_str!("../data/ste_identifiers.csv");
const BUILTIN_SUFFIXES: &str = include_str!("../data/suffix_identifiers.csv");

/// one row of the suite identifier table
#[derive(Debug, Deserialize)]
struct SuiteRow {
    #[serde(rename = "Identifier")]
    identifier: String,
}

/// one row of the street suffix table
#[derive(Debug, Deserialize)]
struct SuffixRow {
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Conversion")]
    conversion: String,
}

/// Read-only lookup data shared by every breakdown.
///
/// Load it once and hand out references; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    /// kept in file order, the suite pass picks the last identifier that matches
    suite_identifiers: Vec<String>,
    /// spelling found in raw addresses -> USPS abbreviation
    suffixes: HashMap<String, String>,
}

impl ReferenceTables {
    /// tables shipped with the crate (USPS Publication 28 suffixes, common unit designators)
    pub fn builtin() -> Self {
        // the embedded CSVs are part of the build, a parse failure here is a packaging bug
        Self::from_readers(BUILTIN_SUITE_IDENTIFIERS.as_bytes(), BUILTIN_SUFFIXES.as_bytes())
            .unwrap_or_else(|e| panic!("embedded reference tables are malformed: {:?}", e))
    }

    pub fn from_paths(suite_path: impl AsRef<Path>, suffix_path: impl AsRef<Path>) -> color_eyre::Result<Self> {
        let suite_path = suite_path.as_ref();
        let suffix_path = suffix_path.as_ref();
        let suite_file = File::open(suite_path)
            .wrap_err_with(|| format!("cannot open suite identifier table [{}]", suite_path.display()))?;
        let suffix_file = File::open(suffix_path)
            .wrap_err_with(|| format!("cannot open suffix table [{}]", suffix_path.display()))?;
        Self::from_readers(suite_file, suffix_file)
            .wrap_err_with(|| format!("cannot load [{}] / [{}]", suite_path.display(), suffix_path.display()))
    }

    /// parse both tables from CSV with `Identifier` and `Value,Conversion` headers
    pub fn from_readers(suite: impl Read, suffix: impl Read) -> color_eyre::Result<Self> {
        let mut suite_identifiers = Vec::new();
        for row in csv::Reader::from_reader(suite).deserialize::<SuiteRow>() {
            let row = row.wrap_err("malformed suite identifier row")?;
            let identifier = row.identifier.trim().to_ascii_uppercase();
            if !identifier.is_empty() {
                suite_identifiers.push(identifier);
            }
        }

        let mut suffixes = HashMap::new();
        for row in csv::Reader::from_reader(suffix).deserialize::<SuffixRow>() {
            let row = row.wrap_err("malformed suffix row")?;
            let value = row.value.trim().to_ascii_uppercase();
            if value.is_empty() {
                continue;
            }
            suffixes.insert(value, row.conversion.trim().to_ascii_uppercase());
        }

        if suite_identifiers.is_empty() {
            bail!("suite identifier table is empty");
        }
        if suffixes.is_empty() {
            bail!("suffix table is empty");
        }
        debug!("loaded [{}] suite identifiers and [{}] suffixes", suite_identifiers.len(), suffixes.len());
        Ok(
            Self {
                suite_identifiers,
                suffixes,
            }
        )
    }

    /// uppercase identifiers in table order
    pub fn suite_identifiers(&self) -> impl Iterator<Item = &str> {
        self.suite_identifiers.iter().map(String::as_str)
    }

    /// USPS abbreviation for a suffix spelling, case-insensitive
    pub fn suffix_abbreviation(&self, token: &str) -> Option<&str> {
        self.suffixes.get(&token.to_ascii_uppercase()).map(String::as_str)
    }
}
