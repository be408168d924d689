//! Break free-text U.S. street addresses into structured fields and decide
//! whether two of them name the same place.
//!
//! ```
//! use us_address_match::{compare, parse, MatchStatus, ReferenceTables};
//!
//! let tables = ReferenceTables::builtin();
//! let a = parse("110-10 Main ST S", "Seattle", "WA", "98039", &tables);
//! let b = parse("110-10 Main Street S", "Seattle", "WA", "98039", &tables);
//! assert_eq!(compare(&a, &b).status, MatchStatus::Match);
//! ```

pub mod address;
pub mod compare;
pub mod exception;
pub mod record;
pub mod tables;

pub use address::model::{AddressException, ParsedAddress};
pub use address::parse;
pub use compare::{compare, MatchResult, MatchStatus};
pub use exception::ExceptionLog;
pub use tables::ReferenceTables;
