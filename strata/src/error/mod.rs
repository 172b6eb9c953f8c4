//! Error types produced by the registry, its sources, and the decoder.

mod coerce;
mod types;

pub use coerce::CoerceError;
pub use types::StrataError;

#[cfg(test)]
mod tests;
