pub mod calculations;
pub mod models;
pub mod rates;

pub use calculations::TaxModel;
pub use models::*;
