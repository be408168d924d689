use std::fmt;
use log::debug;
use crate::address::model::{AddressException, ParsedAddress, StreetDetails};
use crate::tables::ReferenceTables;

mod classify;
mod pobox;
pub mod model;
pub mod tokens;

/// Break a raw address line down into its structured fields.
///
/// Never fails: unrecognized pieces stay in the street body and ambiguous
/// ones are reported through [`ParsedAddress::exceptions`].
pub fn parse(
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    tables: &ReferenceTables,
) -> ParsedAddress {
    let mut parsed = ParsedAddress {
        raw_address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
        is_po_box: false,
        box_number: String::new(),
        details: StreetDetails::default(),
        exceptions: Vec::new(),
    };

    if let Some(box_number) = pobox::detect(address) {
        debug!("[{}] is PO box [{}]", address, box_number);
        parsed.is_po_box = true;
        parsed.box_number = box_number;
        return parsed;
    }

    let breakdown = classify::breakdown(address, tables);
    parsed.details = breakdown.details;
    parsed.exceptions = breakdown.warnings.into_iter()
        .map(|message| AddressException {
            address: address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
            message,
        })
        .collect();
    parsed
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Raw Address: {}", self.raw_address)?;
        writeln!(f, "Raw City: {}", self.city)?;
        writeln!(f, "Raw State: {}", self.state)?;
        writeln!(f, "Raw Zip: {}", self.zip)?;
        writeln!(f, "PO Box: {}", self.is_po_box)?;
        writeln!(f, "Grid ID: {}", self.grid_id())?;
        writeln!(f, "Street Block: {}", self.street_block())?;
        writeln!(f, "Street Number: {}", self.street_number())?;
        writeln!(f, "Street Body: {}", self.street_body())?;
        writeln!(f, "Street Suffix: {}", self.street_suffix())?;
        writeln!(f, "Street Directional: {}", self.street_directional())?;
        writeln!(f, "Suite Number: {}", self.suite_number())?;
        write!(f, "PO Box Number: {}", self.box_number)
    }
}
