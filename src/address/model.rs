use serde::Serialize;

/// An ambiguous condition noticed during breakdown.
///
/// Never fatal; the breakdown keeps going with the affected field left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressException {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Exception")]
    pub message: String,
}

/// the structured fields pulled out of a street address line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StreetDetails {
    pub grid_id: String,
    pub street_block: String,
    pub street_number: String,
    pub street_body: String,
    pub street_suffix: String,
    pub street_directional: String,
    pub suite_number: String,
}

/// A fully broken down address. Built once by [`crate::parse`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub(crate) raw_address: String,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) zip: String,
    pub(crate) is_po_box: bool,
    pub(crate) box_number: String,
    pub(crate) details: StreetDetails,
    pub(crate) exceptions: Vec<AddressException>,
}

impl ParsedAddress {
    pub fn raw_address(&self) -> &str {
        &self.raw_address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn is_po_box(&self) -> bool {
        self.is_po_box
    }

    /// empty unless this is a PO box
    pub fn box_number(&self) -> &str {
        &self.box_number
    }

    /// map-grid prefix such as `N6W23001`
    pub fn grid_id(&self) -> &str {
        &self.details.grid_id
    }

    /// hyphenated block number such as `112-10`
    pub fn street_block(&self) -> &str {
        &self.details.street_block
    }

    pub fn street_number(&self) -> &str {
        &self.details.street_number
    }

    /// what is left of the line once every other field has been claimed
    pub fn street_body(&self) -> &str {
        &self.details.street_body
    }

    /// USPS abbreviation, e.g. `ST`
    pub fn street_suffix(&self) -> &str {
        &self.details.street_suffix
    }

    /// one or two letter abbreviation, e.g. `NE`
    pub fn street_directional(&self) -> &str {
        &self.details.street_directional
    }

    pub fn suite_number(&self) -> &str {
        &self.details.suite_number
    }

    pub fn exceptions(&self) -> &[AddressException] {
        &self.exceptions
    }
}
