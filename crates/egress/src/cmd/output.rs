//! Output rendering for command results
//!
//! Pivot tables print as ASCII tables or CSV with one row per bucket and one
//! column per category. JSON output is the chart spec itself.

use anyhow::Result;
use egress_analytics::{PanelOutput, PeriodClass, PivotTable};
use egress_query::OutputFormat;

/// Maximum table column width
const MAX_WIDTH: usize = 50;

/// Print a panel in the requested format
pub fn print_panel(output: &PanelOutput, period: PeriodClass, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", output.title);
            println!();
            print!("{}", render_table(&output.pivot, period));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output.chart)?);
        }
        OutputFormat::Csv => {
            print!("{}", render_csv(&output.pivot, period));
        }
    }
    Ok(())
}

/// Header and cells of a pivot table, labels in the first column
fn grid(pivot: &PivotTable, period: PeriodClass) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = vec![bucket_header(period).to_string()];
    header.extend(pivot.categories.iter().cloned());

    let rows = pivot
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![period.label(row.bucket)];
            cells.extend(pivot.categories.iter().map(|c| row.get(c).to_string()));
            cells
        })
        .collect();

    (header, rows)
}

fn bucket_header(period: PeriodClass) -> &'static str {
    match period {
        PeriodClass::Hourly => "hour",
        PeriodClass::Daily => "day",
        PeriodClass::Monthly => "month",
    }
}

/// Render as ASCII table
pub fn render_table(pivot: &PivotTable, period: PeriodClass) -> String {
    if pivot.is_empty() {
        return "(empty result)\n".to_string();
    }

    let (header, rows) = grid(pivot, period);

    // Calculate column widths
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }
    for w in &mut widths {
        *w = (*w).min(MAX_WIDTH);
    }

    let mut out = String::new();
    out.push_str(&format_row(&header, &widths));
    out.push('\n');

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&sep.join("-+-"));
    out.push('\n');

    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }

    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let values: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            if cell.chars().count() > *w {
                let cut: String = cell.chars().take(w.saturating_sub(3)).collect();
                format!("{}...", cut)
            } else {
                format!("{:width$}", cell, width = *w)
            }
        })
        .collect();
    values.join(" | ").trim_end().to_string()
}

/// Render as CSV
pub fn render_csv(pivot: &PivotTable, period: PeriodClass) -> String {
    let (header, rows) = grid(pivot, period);

    let mut out = String::new();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let values: Vec<String> = line.iter().map(|v| csv_escape(v)).collect();
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out
}

/// Escape value for CSV output
fn csv_escape(s: &str) -> String {
    // Quote if contains comma, newline, or quote
    if s.contains(',') || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use egress_analytics::CountRow;

    fn pivot() -> PivotTable {
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        PivotTable::from_counts(&[
            CountRow::new("A", jan, 5),
            CountRow::new("B", jan, 3),
            CountRow::new("A", feb, 2),
        ])
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&pivot(), PeriodClass::Monthly);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "month   | A | B");
        assert_eq!(lines[1], "--------+---+--");
        assert_eq!(lines[2], "2024-01 | 5 | 3");
        assert_eq!(lines[3], "2024-02 | 2 | 0");
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(
            render_table(&PivotTable::empty(), PeriodClass::Daily),
            "(empty result)\n"
        );
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&pivot(), PeriodClass::Monthly);

        assert_eq!(csv, "month,A,B\n2024-01,5,3\n2024-02,2,0\n");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
