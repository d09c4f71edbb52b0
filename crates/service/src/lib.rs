//! Service layer providing business-oriented operations on top of models.
//! - Separates request handling from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Owns the row grouping used by the industries listing.

pub mod errors;
pub mod grouping;
pub mod db;
#[cfg(test)]
pub mod test_support;
