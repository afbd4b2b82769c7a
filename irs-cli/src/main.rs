use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use irs_core::{Frequency, PeriodAmounts, RankRates, TaxModel};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net income simulator for Portuguese independent workers.
///
/// Derives social security contributions, IRS and net income from a single
/// gross income figure. Degenerate inputs (for example `--months 0`) are not
/// errors: the affected figures simply come out absent and print as `n/a`.
#[derive(Debug, Parser)]
#[command(name = "irs-sim", version)]
struct Cli {
    /// Gross income amount, in the unit given by --frequency.
    #[arg(long)]
    income: Decimal,

    /// Unit of the income amount: year, month or day.
    #[arg(long, default_value = "year")]
    frequency: Frequency,

    /// Period to report figures in: year, month or day.
    #[arg(long, default_value = "month")]
    display: Frequency,

    /// Apply the non-habitual-resident flat tax regime.
    #[arg(long)]
    rnh: bool,

    /// Tax 90% of gross income instead of 75% (no deductible expenses).
    #[arg(long)]
    no_expenses: bool,

    /// Fractional discount on the social security contribution base.
    #[arg(long, default_value = "0")]
    ss_discount: Decimal,

    /// Number of months the yearly income is spread over (14 is common for
    /// salaried comparisons).
    #[arg(long, default_value = "12")]
    months: Decimal,

    /// Print the full report as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

// ─── report ──────────────────────────────────────────────────────────────────

/// Everything the model derives, in serializable form. Absent figures
/// serialize as `null`.
#[derive(Debug, Serialize)]
struct Report {
    gross_income: Option<PeriodAmounts>,
    ss_pay: Option<PeriodAmounts>,
    specific_deductions: Option<Decimal>,
    expenses: Option<Decimal>,
    taxable_income: Option<Decimal>,
    tax_rank: RankRates,
    tax_rank_avg: RankRates,
    tax_income_avg: Option<Decimal>,
    tax_income_normal: Option<Decimal>,
    irs_pay: Option<PeriodAmounts>,
    net_income: Option<PeriodAmounts>,
}

impl Report {
    fn from_model(model: &TaxModel) -> Self {
        Self {
            gross_income: model.gross_income(),
            ss_pay: model.ss_pay(),
            specific_deductions: model.specific_deductions(),
            expenses: model.expenses(),
            taxable_income: model.taxable_income(),
            tax_rank: model.tax_rank(),
            tax_rank_avg: model.tax_rank_avg(),
            tax_income_avg: model.tax_income_avg(),
            tax_income_normal: model.tax_income_normal(),
            irs_pay: model.irs_pay(),
            net_income: model.net_income(),
        }
    }
}

fn build_model(cli: &Cli) -> TaxModel {
    let mut model = TaxModel::new();
    model.set_income(Some(cli.income));
    model.set_frequency(cli.frequency);
    model.set_display_frequency(cli.display);
    model.set_has_rnh(cli.rnh);
    model.set_has_expenses(!cli.no_expenses);
    model.set_ss_discount(cli.ss_discount);
    model.set_nr_months_display(cli.months);
    model.validate();
    model
}

fn fmt_opt(value: Option<Decimal>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "n/a".to_string(),
    }
}

fn fmt_period(amounts: Option<&PeriodAmounts>, display: Frequency) -> String {
    fmt_opt(amounts.map(|a| a.for_frequency(display)))
}

fn print_report(report: &Report, display: Frequency) {
    println!("Figures per {}:", display.as_str());
    println!("  gross income         {}", fmt_period(report.gross_income.as_ref(), display));
    println!("  social security      {}", fmt_period(report.ss_pay.as_ref(), display));
    println!("  irs                  {}", fmt_period(report.irs_pay.as_ref(), display));
    println!("  net income           {}", fmt_period(report.net_income.as_ref(), display));
    println!();
    println!("Yearly detail:");
    println!("  taxable income       {}", fmt_opt(report.taxable_income));
    println!("  specific deductions  {}", fmt_opt(report.specific_deductions));
    println!("  deductible expenses  {}", fmt_opt(report.expenses));
    match report.tax_rank.id {
        Some(id) => println!(
            "  tax bracket          {id} (marginal rate {})",
            fmt_opt(report.tax_rank.normal_tax)
        ),
        None => println!("  tax bracket          n/a"),
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let model = build_model(&cli);
    debug!(
        frequency = model.frequency().as_str(),
        months = %model.nr_months_display(),
        "inputs applied"
    );

    let report = Report::from_model(&model);
    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{rendered}");
    } else {
        print_report(&report, model.display_frequency());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn flags_map_onto_the_model_inputs() {
        let cli = parse(&[
            "irs-sim",
            "--income",
            "2000",
            "--frequency",
            "month",
            "--display",
            "year",
            "--rnh",
            "--no-expenses",
            "--ss-discount",
            "0.25",
            "--months",
            "14",
        ]);

        let model = build_model(&cli);

        assert_eq!(model.income(), Some(dec!(2000)));
        assert_eq!(model.frequency(), Frequency::Month);
        assert_eq!(model.display_frequency(), Frequency::Year);
        assert!(model.has_rnh());
        assert!(!model.has_expenses());
        assert_eq!(model.ss_discount(), dec!(0.25));
        assert_eq!(model.nr_months_display(), dec!(14));
        assert!(model.is_valid());
    }

    #[test]
    fn report_carries_the_derived_figures() {
        let cli = parse(&["irs-sim", "--income", "2000", "--frequency", "month"]);

        let report = Report::from_model(&build_model(&cli));

        assert_eq!(report.gross_income.unwrap().year, dec!(24000));
        assert_eq!(report.tax_rank.id, Some(3));
        assert_eq!(report.irs_pay.unwrap().year, dec!(3935.20644));
    }

    #[test]
    fn degenerate_months_produce_an_absent_report() {
        let cli = parse(&["irs-sim", "--income", "2000", "--months", "0"]);

        let report = Report::from_model(&build_model(&cli));

        assert_eq!(report.gross_income, None);
        assert_eq!(report.net_income, None);
        assert_eq!(fmt_period(report.net_income.as_ref(), Frequency::Month), "n/a");
    }

    #[test]
    fn fmt_opt_renders_presence_and_absence() {
        assert_eq!(fmt_opt(Some(dec!(299.6))), "299.6");
        assert_eq!(fmt_opt(None), "n/a");
    }
}
