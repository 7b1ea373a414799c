//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::dashboard::{CombinedTable, Dashboard};
use crate::domain::ResamplePolicy;

/// Format the run summary: cutoff, one line per built series, skipped series.
pub fn format_dashboard_summary(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str("=== ppd - Purchasing Power Dashboard ===\n");
    out.push_str(&format!("Cutoff: {}\n", dashboard.cutoff));
    out.push_str(&format!(
        "Series: {} built | {} skipped\n\n",
        dashboard.entries.len(),
        dashboard.skipped.len()
    ));

    out.push_str(
        format!(
            "{:<14} {:<6} {:>8} {:>6} {:>6} {:<11} {:>6} {:>10}\n",
            "series", "policy", "amount", "raw", "years", "baseline", "latest", "% of base"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<14} {:-<6} {:-<8} {:-<6} {:-<6} {:-<11} {:-<6} {:-<10}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for e in &dashboard.entries {
        let (latest_year, latest_pct) = e
            .rebased
            .latest()
            .map(|p| (p.year.to_string(), format!("{:.2}", p.pct_of_baseline)))
            .unwrap_or_default();
        out.push_str(
            format!(
                "{:<14} {:<6} {:>8} {:>6} {:>6} {:<11} {:>6} {:>10}\n",
                e.id.display_name(),
                policy_name(e.spec.policy),
                e.spec.unit_amount,
                e.raw.len(),
                e.annual.points.len(),
                e.rebased.baseline_date,
                latest_year,
                latest_pct,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if !dashboard.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for s in &dashboard.skipped {
            out.push_str(&format!("- {}\n", s.reason));
        }
    }

    out
}

/// Format the combined table, one row per year; absent cells print as `-`.
pub fn format_combined_table(table: &CombinedTable) -> String {
    let mut out = String::new();

    let mut header = format!("{:<6}", "year");
    for id in &table.columns {
        header.push_str(&format!(" {:>13}", id.display_name()));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for row in &table.rows {
        let mut line = format!("{:<6}", row.year);
        for v in &row.values {
            let cell = v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string());
            line.push_str(&format!(" {cell:>13}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn policy_name(policy: ResamplePolicy) -> &'static str {
    match policy {
        ResamplePolicy::Mean => "mean",
        ResamplePolicy::Last => "last",
    }
}
