//! Catalog store and filter engine.
//!
//! The catalog is loaded once at startup (either the built-in sample set or a
//! TOML file) and is read-only afterwards. Everything else holds track ids or
//! catalog positions into it.

mod filter;
mod load;
mod model;

pub use filter::*;
pub use load::CatalogError;
pub use model::*;

#[cfg(test)]
mod tests;
