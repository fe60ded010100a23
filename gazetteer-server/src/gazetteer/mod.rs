//! Gazetteer of named places.
//!
//! Loads the reference table once at startup and answers three kinds of
//! query against it: substring search over place names, name → coordinates,
//! and coordinates → name.

mod dms;
mod error;
mod index;
mod load;
mod row;


pub use dms::{Dms, to_decimal_degrees};
pub use error::{LoadError, ResolveError};
pub use index::{GazetteerIndex, Location};
pub use load::{columns, load};
pub use row::{GridPoint, ReferenceRow};
