//! Markdown rendering of the smoke-test report

use crate::core::metrics::{CategoryCount, GroupRate, HistogramBin};
use crate::report::chart_data::{
    BUDGET_VIOLATIONS_FILE, DISAGREEMENT_TYPES_FILE, FAITHFULNESS_BY_SCENARIO_FILE,
    LATENCY_HIST_FILE,
};
use crate::report::ReportDocument;

const NA: &str = "NA";

/// Rate as a percentage with one decimal, or `NA`.
pub fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| NA.to_string())
}

pub fn format_score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| NA.to_string())
}

/// Milliseconds truncated toward zero, or `NA`. Snaps to the microsecond
/// first so interpolation noise (3599.9999999999995) does not lose a whole ms.
pub fn format_millis(value: Option<f64>) -> String {
    value
        .map(|v| {
            let snapped = (v * 1e6).round() / 1e6;
            format!("{}", snapped.trunc() as i64)
        })
        .unwrap_or_else(|| NA.to_string())
}

pub fn render(doc: &ReportDocument) -> String {
    let m = &doc.summary;
    let mut content = String::new();

    content.push_str("# Ask Ralph – Smoke Test Report\n\n");
    content.push_str("**What we tested**\n");
    content.push_str("- Prompts from ./prompts (one per file), answered in the app.\n");
    content.push_str(
        "- We checked **faithfulness** to product PDPs (price/color/material/care/sizes), \
         **relevance** to the prompt, **toxicity**, **latency**, and **budget adherence**.\n",
    );
    content.push_str(&format!(
        "- Source: `{}` (run `{}`)\n\n",
        doc.source, doc.run_id
    ));

    content.push_str(&format!(
        "**Key metrics**\n- Total tests: {}\n- Faithfulness rate: {}\n    - Contradictions: {} | Unsupported: {}\n- Avg relevance score: {}\n- Toxicity rate: {}\n- Latency p50 / p95 (ms): {} / {}\n- Budget violation rate: {}\n\n",
        m.n_tests,
        format_percent(m.faithful_rate),
        format_percent(m.contradiction_rate),
        format_percent(m.unsupported_rate),
        format_score(m.avg_relevance),
        format_percent(m.toxicity_rate),
        format_millis(m.p50_latency_ms),
        format_millis(m.p95_latency_ms),
        format_percent(m.budget_violation_rate)
    ));

    content.push_str("**Pass/Fail (suggested)**\n");
    for verdict in &doc.verdicts {
        content.push_str(&format!("- {} → {}\n", verdict.label, verdict.status));
    }
    content.push('\n');

    render_rate_table(
        &mut content,
        "Faithfulness rate by scenario",
        "Faithfulness rate",
        &doc.breakdowns.faithful_by_scenario,
    );
    render_category_table(&mut content, &doc.breakdowns.disagreement_types);
    render_histogram_table(&mut content, &doc.latency_histogram);
    render_rate_table(
        &mut content,
        "Budget violation rate by scenario",
        "Violation rate",
        &doc.breakdowns.budget_violation_by_scenario,
    );

    content.push_str("**How to read the charts**\n");
    content.push_str(&format!(
        "- `{}`: Which scenarios align best with PDP facts.\n",
        FAITHFULNESS_BY_SCENARIO_FILE
    ));
    content.push_str(&format!(
        "- `{}`: Whether issues are mostly materials, care, price, etc.\n",
        DISAGREEMENT_TYPES_FILE
    ));
    content.push_str(&format!(
        "- `{}`: Response speed distribution.\n",
        LATENCY_HIST_FILE
    ));
    content.push_str(&format!(
        "- `{}`: Where we overshoot budgets.\n\n",
        BUDGET_VIOLATIONS_FILE
    ));

    content.push_str("**Next**\n");
    content.push_str(
        "- For any failing scenario, open examples and compare reply vs PDP lines that disagree. \
         Adjust prompts or mapping and re-run as a regression.\n",
    );

    content
}

fn render_rate_table(content: &mut String, title: &str, value_header: &str, rows: &[GroupRate]) {
    content.push_str(&format!("**{}**\n", title));
    if rows.is_empty() {
        content.push_str("- No scenarios.\n\n");
        return;
    }
    content.push_str(&format!("| Scenario | {} | Tests |\n|---|---|---|\n", value_header));
    for row in rows {
        content.push_str(&format!(
            "| {} | {} | {} |\n",
            row.key,
            format_percent(Some(row.rate)),
            row.rows
        ));
    }
    content.push('\n');
}

fn render_category_table(content: &mut String, rows: &[CategoryCount]) {
    content.push_str("**Disagreement types**\n");
    if rows.is_empty() {
        content.push_str("- No rows.\n\n");
        return;
    }
    content.push_str("| Type | Count |\n|---|---|\n");
    for row in rows {
        content.push_str(&format!("| {} | {} |\n", row.label, row.count));
    }
    content.push('\n');
}

fn render_histogram_table(content: &mut String, bins: &[HistogramBin]) {
    content.push_str("**Latency distribution (ms)**\n");
    if bins.is_empty() {
        content.push_str("- No valid latency values.\n\n");
        return;
    }
    content.push_str("| From | To | Frequency |\n|---|---|---|\n");
    for bin in bins {
        content.push_str(&format!(
            "| {:.0} | {:.0} | {} |\n",
            bin.lower, bin.upper, bin.count
        ));
    }
    content.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::{Aggregator, GroupedBreakdowns};
    use crate::core::{evaluate, NormalizationStats, Thresholds};
    use chrono::Utc;
    use uuid::Uuid;

    fn empty_document() -> ReportDocument {
        let summary = Aggregator::summarize(&[]);
        let verdicts = evaluate(&summary, &Thresholds::default());
        ReportDocument {
            run_id: Uuid::nil(),
            generated_at: Utc::now(),
            source: "empty.csv".to_string(),
            summary,
            verdicts,
            breakdowns: GroupedBreakdowns::default(),
            latency_histogram: Vec::new(),
            normalization: NormalizationStats::default(),
        }
    }

    #[test]
    fn test_render_empty_run() {
        let report = render(&empty_document());

        assert!(report.starts_with("# Ask Ralph – Smoke Test Report\n\n**What we tested**\n"));
        assert!(report.contains("- Total tests: 0\n- Faithfulness rate: NA\n"));
        assert!(report.contains("- Latency p50 / p95 (ms): NA / NA\n"));
        assert!(report.contains("**Faithfulness rate by scenario**\n- No scenarios.\n\n"));
        assert!(report.contains("**Disagreement types**\n- No rows.\n\n"));
        assert!(report.contains("**Latency distribution (ms)**\n- No valid latency values.\n\n"));
        assert!(report.contains(&format!("- `{}`: Response speed distribution.\n", LATENCY_HIST_FILE)));
        assert!(report.ends_with("re-run as a regression.\n"));
        assert_eq!(report.matches(" → FAIL").count(), 5);
    }

    #[test]
    fn test_formatters() {
        assert_eq!(format_percent(Some(0.9)), "90.0%");
        assert_eq!(format_percent(Some(1.0 / 3.0)), "33.3%");
        assert_eq!(format_percent(None), "NA");
        assert_eq!(format_score(Some(0.856)), "0.86");
        assert_eq!(format_score(None), "NA");
        assert_eq!(format_millis(Some(2999.9)), "2999");
        assert_eq!(format_millis(Some(3599.9999999999995)), "3600");
        assert_eq!(format_millis(None), "NA");
    }
}
