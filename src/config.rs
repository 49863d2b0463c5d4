//! Settings for the storefront: the TOML/env schema and where it is read
//! from.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
