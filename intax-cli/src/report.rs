//! Plain-text rendering of results and rule sets.

use std::fmt::Write;

use intax_core::calculations::bracket_label;
use intax_core::calculations::format::{percent, rupees};
use intax_core::{ComparisonResult, Regime, TaxCalculationResult, TaxYearConfig};

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 16;

/// Slab table, totals and the explanation for one regime.
pub fn render_result(result: &TaxCalculationResult) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{} Tax Regime", result.regime.label()));

    row(&mut out, "Gross income", &rupees(result.annual_gross_income));
    row(&mut out, "Standard deduction", &rupees(result.standard_deduction));
    row(&mut out, "Taxable income", &rupees(result.taxable_income));
    out.push('\n');

    if result.breakdown.is_empty() {
        out.push_str("  (no taxable slabs)\n");
    }
    for line in &result.breakdown {
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>5}% {:>AMOUNT_WIDTH$}",
            line.bracket_label,
            percent(line.rate_percent),
            rupees(line.tax_amount),
        );
    }
    out.push('\n');

    row(&mut out, "Cess", &rupees(result.cess));
    row(&mut out, "Rebate", &format!("-{}", rupees(result.rebate)));
    row(&mut out, "Total tax", &rupees(result.total_tax));
    row(
        &mut out,
        "Effective rate",
        &format!("{}%", percent(result.effective_tax_rate_percent)),
    );
    out.push('\n');
    out.push_str(&result.explanation);
    out.push('\n');
    out
}

/// Both regimes followed by a side-by-side summary and the recommendation.
pub fn render_comparison(comparison: &ComparisonResult) -> String {
    let mut out = String::new();
    for regime in Regime::ALL {
        out.push_str(&render_result(comparison.result_for(regime)));
        out.push('\n');
    }

    heading(&mut out, "Comparison");
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$}",
        "", "Old", "New"
    );
    let pair = |out: &mut String, label: &str, old: String, new: String| {
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$}",
            label, old, new
        );
    };
    pair(
        &mut out,
        "Taxable income",
        rupees(comparison.old.taxable_income),
        rupees(comparison.new.taxable_income),
    );
    pair(
        &mut out,
        "Total tax",
        rupees(comparison.old.total_tax),
        rupees(comparison.new.total_tax),
    );
    pair(
        &mut out,
        "Effective rate",
        format!("{}%", percent(comparison.old.effective_tax_rate_percent)),
        format!("{}%", percent(comparison.new.effective_tax_rate_percent)),
    );
    out.push('\n');
    out.push_str(&comparison.recommendation);
    out.push('\n');
    out
}

/// Scalars and slab tables of a rule set.
pub fn render_rules(config: &TaxYearConfig) -> String {
    let mut out = String::new();
    heading(&mut out, &config.tax_year);
    row(
        &mut out,
        "Health & education cess",
        &format!("{}%", percent(config.cess_rate_percent)),
    );

    for regime in Regime::ALL {
        let rules = config.rules(regime);
        out.push('\n');
        heading(&mut out, &format!("{} Tax Regime", regime.label()));
        row(&mut out, "Standard deduction", &rupees(rules.standard_deduction));
        row(
            &mut out,
            "Rebate threshold",
            &rupees(rules.rebate.income_threshold),
        );
        row(&mut out, "Maximum rebate", &rupees(rules.rebate.max_rebate));
        for bracket in &rules.brackets {
            let _ = writeln!(
                out,
                "  {:<LABEL_WIDTH$} {:>5}%",
                bracket_label(bracket),
                percent(bracket.rate_percent),
            );
        }
    }
    out
}

fn heading(
    out: &mut String,
    title: &str,
) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn row(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$} {value:>AMOUNT_WIDTH$}");
}
