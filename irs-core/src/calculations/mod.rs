//! The IRS/SS derivation graph.

pub mod model;

pub use model::TaxModel;
