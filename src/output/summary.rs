//! Plain-text summary of a curve report for terminal output.

use super::schema::CurveReport;

/// Render one line per curve, at most `max_lines` curves
///
/// Each line shows the label, the element, the number of stored points
/// and the first and last y value.
pub fn generate_text_summary(report: &CurveReport, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {:<40} {:<24} {:>7} {:>12} {:>12}",
        "CURVE", "ELEMENT", "POINTS", "FIRST", "LAST"
    ));

    for entry in report.curves.iter().take(max_lines) {
        let points = &entry.points;
        let (first, last) = if points.is_empty() || points.column_count() < 2 {
            ("-".to_string(), "-".to_string())
        } else {
            (
                points.get(0, 1).to_string(),
                points.get(points.row_count() - 1, 1).to_string(),
            )
        };

        lines.push(format!(
            "  {:<40} {:<24} {:>7} {:>12} {:>12}",
            truncate(&entry.metadata.path_name, 40),
            truncate(&entry.element, 24),
            points.row_count(),
            first,
            last
        ));
    }

    if report.curves.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing {} of {} curves)",
            max_lines,
            report.curves.len()
        ));
    }

    lines.join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
