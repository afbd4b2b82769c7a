//! Net income derivation for Portuguese independent workers.
//!
//! [`TaxModel`] holds a small set of mutable inputs and derives every
//! downstream figure on demand:
//!
//! | Step | Getter | Description |
//! |------|--------|-------------|
//! | 1 | [`gross_income`](TaxModel::gross_income) | income converted to year/month/day |
//! | 2 | [`ss_pay`](TaxModel::ss_pay) | social security contribution, capped and floored |
//! | 3 | [`specific_deductions`](TaxModel::specific_deductions) | deduction base, zero under RNH |
//! | 4 | [`expenses`](TaxModel::expenses) | deductible expenses above the specific deductions |
//! | 5 | [`taxable_income`](TaxModel::taxable_income) | taxable fraction of yearly gross |
//! | 6 | [`tax_rank`](TaxModel::tax_rank) | progressive bracket lookup plus RNH overlay |
//! | 7 | [`tax_income_avg`](TaxModel::tax_income_avg) | slice taxed at the blended rate |
//! | 8 | [`irs_pay`](TaxModel::irs_pay) | yearly IRS split across periods |
//! | 9 | [`net_income`](TaxModel::net_income) | gross minus IRS minus SS |
//!
//! Every getter recomputes from the current inputs, so reads always reflect
//! the latest setter calls. There is no validation layer: degenerate inputs
//! (absent income, zero months) silently produce `None` instead of an error,
//! and consumers decide how to render the absence.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irs_core::{Frequency, TaxModel};
//!
//! let mut model = TaxModel::new();
//! model.set_income(Some(dec!(2000)));
//! model.set_frequency(Frequency::Month);
//!
//! let gross = model.gross_income().unwrap();
//! assert_eq!(gross.year, dec!(24000));
//!
//! let ss = model.ss_pay().unwrap();
//! assert_eq!(ss.month, dec!(299.6));
//!
//! let net = model.net_income().unwrap();
//! assert_eq!(net.year, gross.year - model.irs_pay().unwrap().year - ss.year);
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{Frequency, PeriodAmounts, RankRates};
use crate::rates::{
    EXPENSES_RATE, MIN_SPECIFIC_DEDUCTIONS, MONTH_BUSINESS_DAYS, MONTHS_PER_YEAR,
    SPECIFIC_DEDUCTIONS_GROSS_CAP, SS_INCOME_FACTOR, SS_MAX_MONTH_INCOME, SS_MIN_MONTH_PAY,
    SS_TAX_RATE, TAX_RANKS, TAXABLE_FACTOR_WITH_EXPENSES, TAXABLE_FACTOR_WITHOUT_EXPENSES,
    YEAR_BUSINESS_DAYS,
};

/// The derivation graph over the simulation inputs.
///
/// Setters write one field verbatim; derived getters walk the full
/// dependency chain on every read. `display_frequency` and `valid` are
/// carried for consumers and have no computational effect.
#[derive(Debug, Clone)]
pub struct TaxModel {
    income: Option<Decimal>,
    frequency: Frequency,
    display_frequency: Frequency,
    has_rnh: bool,
    has_expenses: bool,
    ss_discount: Decimal,
    nr_months_display: Decimal,
    valid: bool,
}

impl Default for TaxModel {
    fn default() -> Self {
        Self {
            income: None,
            frequency: Frequency::Year,
            display_frequency: Frequency::Month,
            has_rnh: false,
            has_expenses: true,
            ss_discount: Decimal::ZERO,
            nr_months_display: MONTHS_PER_YEAR,
            valid: false,
        }
    }
}

impl TaxModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── input setters ───────────────────────────────────────────────────────

    pub fn set_income(&mut self, income: Option<Decimal>) {
        self.income = income;
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn set_display_frequency(&mut self, frequency: Frequency) {
        self.display_frequency = frequency;
    }

    pub fn set_has_expenses(&mut self, has_expenses: bool) {
        self.has_expenses = has_expenses;
    }

    pub fn set_has_rnh(&mut self, has_rnh: bool) {
        self.has_rnh = has_rnh;
    }

    pub fn set_ss_discount(&mut self, ss_discount: Decimal) {
        self.ss_discount = ss_discount;
    }

    pub fn set_nr_months_display(&mut self, nr_months: Decimal) {
        self.nr_months_display = nr_months;
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Marks the input set as ready.
    pub fn validate(&mut self) {
        self.set_valid(true);
    }

    /// Marks the input set as not ready.
    pub fn unvalid(&mut self) {
        self.set_valid(false);
    }

    // ─── input accessors ─────────────────────────────────────────────────────

    pub fn income(&self) -> Option<Decimal> {
        self.income
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn display_frequency(&self) -> Frequency {
        self.display_frequency
    }

    pub fn has_rnh(&self) -> bool {
        self.has_rnh
    }

    pub fn has_expenses(&self) -> bool {
        self.has_expenses
    }

    pub fn ss_discount(&self) -> Decimal {
        self.ss_discount
    }

    pub fn nr_months_display(&self) -> Decimal {
        self.nr_months_display
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    // ─── derived getters ─────────────────────────────────────────────────────

    /// Converts the income input into all three periods.
    ///
    /// A yearly amount spreads over `nr_months_display` months and the
    /// business days of the year; a monthly amount annualizes over
    /// `nr_months_display`; a daily amount annualizes over the business days
    /// of the year, with the monthly figure re-spread over
    /// `nr_months_display`. Absent income or zero months yields `None`.
    pub fn gross_income(&self) -> Option<PeriodAmounts> {
        if self.nr_months_display.is_zero() {
            warn!("nr_months_display is zero; gross income is undefined");
            return None;
        }
        let income = self.income?;
        let amounts = match self.frequency {
            Frequency::Year => PeriodAmounts {
                year: income,
                month: income / self.nr_months_display,
                day: income / YEAR_BUSINESS_DAYS,
            },
            Frequency::Month => PeriodAmounts {
                year: income * self.nr_months_display,
                month: income,
                day: income / MONTH_BUSINESS_DAYS,
            },
            Frequency::Day => PeriodAmounts {
                year: income * YEAR_BUSINESS_DAYS,
                month: income * MONTH_BUSINESS_DAYS * MONTHS_PER_YEAR / self.nr_months_display,
                day: income,
            },
        };
        Some(amounts)
    }

    /// Social security contribution per period.
    ///
    /// The contribution base is 70% of gross income scaled by
    /// `1 + ss_discount` and capped at the monthly ceiling (twelve times it
    /// for the year). Monthly and yearly contributions are floored at the
    /// statutory minimums; the daily figure keeps the unfloored monthly
    /// contribution spread over business days.
    pub fn ss_pay(&self) -> Option<PeriodAmounts> {
        let gross = self.gross_income()?;
        let factor = SS_INCOME_FACTOR * (Decimal::ONE + self.ss_discount);
        let month_ss = SS_TAX_RATE * SS_MAX_MONTH_INCOME.min(gross.month * factor);
        let year_ss =
            SS_TAX_RATE * (SS_MAX_MONTH_INCOME * MONTHS_PER_YEAR).min(gross.year * factor);
        Some(PeriodAmounts {
            year: year_ss.max(SS_MIN_MONTH_PAY * MONTHS_PER_YEAR),
            month: month_ss.max(SS_MIN_MONTH_PAY),
            day: month_ss / MONTH_BUSINESS_DAYS,
        })
    }

    /// Yearly specific deductions.
    ///
    /// Zero under the RNH regime; otherwise the yearly SS contribution
    /// capped at 10% of yearly gross, floored at the statutory minimum.
    pub fn specific_deductions(&self) -> Option<Decimal> {
        if self.has_rnh {
            return Some(Decimal::ZERO);
        }
        let gross = self.gross_income()?;
        let ss = self.ss_pay()?;
        Some(MIN_SPECIFIC_DEDUCTIONS.max(ss.year.min(SPECIFIC_DEDUCTIONS_GROSS_CAP * gross.year)))
    }

    /// Yearly deductible expenses: 15% of gross above the specific
    /// deductions, never negative.
    pub fn expenses(&self) -> Option<Decimal> {
        let gross = self.gross_income()?;
        let deductions = self.specific_deductions()?;
        Some((EXPENSES_RATE * gross.year - deductions).max(Decimal::ZERO))
    }

    /// Yearly taxable income: 75% of gross when deductible expenses apply,
    /// 90% otherwise.
    pub fn taxable_income(&self) -> Option<Decimal> {
        let gross = self.gross_income()?;
        let factor = if self.has_expenses {
            TAXABLE_FACTOR_WITH_EXPENSES
        } else {
            TAXABLE_FACTOR_WITHOUT_EXPENSES
        };
        Some(gross.year * factor)
    }

    /// The bracket matching the taxable income, with the RNH overlay
    /// applied. Brackets are scanned in table order; no match leaves the
    /// bracket identity absent.
    pub fn tax_rank(&self) -> RankRates {
        let matched = self
            .taxable_income()
            .and_then(|taxable| TAX_RANKS.iter().find(|rank| rank.contains(taxable)));
        RankRates::overlay(matched, self.has_rnh)
    }

    /// The bracket one id below the matched one, with the same RNH overlay.
    /// The first bracket (and the no-match case) has no lower neighbour and
    /// is returned unchanged.
    pub fn tax_rank_avg(&self) -> RankRates {
        let rank = self.tax_rank();
        match rank.id {
            None | Some(1) => rank,
            Some(id) => {
                let below = TAX_RANKS.iter().find(|r| r.id == id - 1);
                RankRates::overlay(below, self.has_rnh)
            }
        }
    }

    /// The income slice taxed at the blended average rate: the whole
    /// taxable income inside the first bracket, otherwise the upper bound
    /// of the bracket below.
    pub fn tax_income_avg(&self) -> Option<Decimal> {
        if self.tax_rank().id == Some(1) {
            return self.taxable_income();
        }
        self.tax_rank_avg().max
    }

    /// The marginal slice taxed at the matched bracket's normal rate.
    pub fn tax_income_normal(&self) -> Option<Decimal> {
        if self.tax_rank().id == Some(1) {
            return Some(Decimal::ZERO);
        }
        Some(self.taxable_income()? - self.tax_income_avg()?)
    }

    /// IRS due per period.
    ///
    /// The yearly figure taxes the blended slice at the lower bracket's
    /// average rate and the marginal slice at the matched bracket's normal
    /// rate, floored at zero. Monthly spreads the yearly figure over
    /// `nr_months_display`; daily spreads the monthly figure over business
    /// days. Any absent component makes the whole result absent.
    pub fn irs_pay(&self) -> Option<PeriodAmounts> {
        let year_irs = self.tax_income_avg()? * self.tax_rank_avg().average_tax?
            + self.tax_income_normal()? * self.tax_rank().normal_tax?;
        let month_irs = (year_irs / self.nr_months_display).max(Decimal::ZERO);
        Some(PeriodAmounts {
            year: year_irs.max(Decimal::ZERO),
            month: month_irs,
            day: month_irs / MONTH_BUSINESS_DAYS,
        })
    }

    /// Net income per period: gross minus IRS minus SS.
    ///
    /// The daily figure derives from the monthly one spread over business
    /// days, not from the daily components.
    pub fn net_income(&self) -> Option<PeriodAmounts> {
        let gross = self.gross_income()?;
        let irs = self.irs_pay()?;
        let ss = self.ss_pay()?;
        let month = gross.month - irs.month - ss.month;
        Some(PeriodAmounts {
            year: gross.year - irs.year - ss.year,
            month,
            day: month / MONTH_BUSINESS_DAYS,
        })
    }
}
