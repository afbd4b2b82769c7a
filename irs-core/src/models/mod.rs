mod frequency;
mod period_amounts;
mod tax_rank;

pub use frequency::{Frequency, ParseFrequencyError};
pub use period_amounts::PeriodAmounts;
pub use tax_rank::{RankRates, TaxRank};
