use std::path::{Path, PathBuf};
use color_eyre::eyre::{bail, eyre, WrapErr};
use log::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use us_address_match::record::{AddressPair, Record};
use us_address_match::{compare, parse, ExceptionLog, MatchStatus, ReferenceTables};

const DEFAULT_OUTPUT: &str = "result/matches.csv";
const DEFAULT_EXCEPTION_LOG: &str = "result/exceptions.csv";

fn main() {
    install_tracing();
    if let Err(e) = color_eyre::install() {
        error!("cannot install error report handler: {:?}", e);
    }

    if let Err(e) = run() {
        error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default())
        .init();
}

/// settings taken from the environment
///
/// SUITE_TABLE / SUFFIX_TABLE: reference CSVs, both or neither (builtin tables otherwise)
/// OUTPUT: result CSV, EXCEPTION_LOG: append-only exception CSV
struct Config {
    input: PathBuf,
    output: PathBuf,
    exception_log: PathBuf,
    tables: Option<(PathBuf, PathBuf)>,
}

impl Config {
    fn from_env() -> color_eyre::Result<Self> {
        let input = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("usage: us-address-match <pairs.csv>"))?;
        let output = std::env::var_os("OUTPUT").map(PathBuf::from).unwrap_or_else(|| DEFAULT_OUTPUT.into());
        let exception_log = std::env::var_os("EXCEPTION_LOG").map(PathBuf::from).unwrap_or_else(|| DEFAULT_EXCEPTION_LOG.into());
        let tables = match (std::env::var_os("SUITE_TABLE"), std::env::var_os("SUFFIX_TABLE")) {
            (Some(suite), Some(suffix)) => Some((PathBuf::from(suite), PathBuf::from(suffix))),
            (None, None) => None,
            _ => bail!("`SUITE_TABLE` and `SUFFIX_TABLE` must be set together"),
        };
        Ok(
            Self {
                input,
                output,
                exception_log,
                tables,
            }
        )
    }

    fn load_tables(&self) -> color_eyre::Result<ReferenceTables> {
        match &self.tables {
            Some((suite, suffix)) => {
                info!("loading reference tables from [{}] and [{}]", suite.display(), suffix.display());
                ReferenceTables::from_paths(suite, suffix)
            }
            None => Ok(ReferenceTables::builtin()),
        }
    }
}

fn run() -> color_eyre::Result<()> {
    let config = Config::from_env()?;
    let _span = tracing::info_span!("batch", input = %config.input.display()).entered();

    let tables = config.load_tables()?;
    let pairs = read_pairs(&config.input)?;
    info!("comparing [{}] address pairs", pairs.len());

    let mut exception_log = ExceptionLog::open(&config.exception_log)?;
    let total = pairs.len();
    let mut records = Vec::with_capacity(total);
    for (idx, pair) in pairs.into_iter().enumerate() {
        let a = parse(&pair.address1, &pair.city1, &pair.state1, &pair.zip1, &tables);
        let b = parse(&pair.address2, &pair.city2, &pair.state2, &pair.zip2, &tables);
        exception_log.append(a.exceptions())?;
        exception_log.append(b.exceptions())?;

        let result = compare(&a, &b);
        tracing::debug!("[{}/{total}] [{}] vs [{}] -> {:?}", idx + 1, a.raw_address(), b.raw_address(), result.status);
        records.push(Record::from_pair_and_result(pair, result));
    }

    let matched = records.iter().filter(|r| r.status == MatchStatus::Match).count();
    let potential = records.iter().filter(|r| r.status == MatchStatus::Potential).count();
    info!("[{}] matches, [{}] potential matches out of [{}] pairs", matched, potential, total);

    info!("saving records to [{}]", config.output.display());
    save_records(records, &config.output)?;
    Ok(())
}

fn read_pairs(path: &Path) -> color_eyre::Result<Vec<AddressPair>> {
    let mut rdr = csv::Reader::from_path(path)
        .wrap_err_with(|| format!("cannot open [{}]", path.display()))?;
    let pairs = rdr.deserialize::<AddressPair>()
        .enumerate()
        .map(|(idx, row)| row.wrap_err_with(|| format!("malformed row [{}] in [{}]", idx + 1, path.display())))
        .collect::<color_eyre::Result<Vec<_>>>()?;
    Ok(pairs)
}

/// write result to CSV file, matches first
fn save_records(mut records: Vec<Record>, save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    records.sort_by_key(|record| record.status);
    let save_path = save_path.as_ref();
    if let Some(parent) = save_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("cannot create [{}]", parent.display()))?;
    }
    let mut wtr = csv::Writer::from_path(save_path)
        .wrap_err_with(|| format!("cannot create [{}]", save_path.display()))?;
    records.iter()
        .try_for_each(|record| wtr.serialize(record))
        .wrap_err("cannot write match records")?;
    wtr.flush()?;
    Ok(())
}
