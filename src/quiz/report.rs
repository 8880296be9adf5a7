use time::Date;

use super::model::QuizResult;

const HEADING: &str = "LOYALTY PROGRAM MATURITY ASSESSMENT REPORT";

/// Renders a scored assessment as a plain-text report suitable for download.
pub fn render_text_report(result: &QuizResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", HEADING, "=".repeat(HEADING.len())));
    out.push_str(&format!("Overall Score: {}%\n", result.overall_percentage));
    out.push_str(&format!(
        "Total Score: {}/{}\n\n",
        result.total_score, result.total_possible
    ));
    out.push_str(&format!("{}\n\n", result.overall_feedback));
    out.push_str("CATEGORY BREAKDOWN:\n");

    for category in &result.category_scores {
        out.push_str(&format!("\n{}: {}%", category.category, category.percentage));
        if category.is_underperforming {
            out.push_str(" (Needs Improvement)");
        }
        out.push_str(&format!("\n{}\n", category.summary));
        if !category.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            push_bullets(&mut out, &category.recommendations);
        }
    }

    out.push_str("\nTOP RECOMMENDATIONS:\n");
    push_bullets(&mut out, &result.recommendations);

    out
}

fn push_bullets(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push_str(&format!("\u{2022} {}\n", line));
    }
}

pub fn report_file_name(date: Date) -> String {
    format!(
        "loyalty-assessment-report-{:04}-{:02}-{:02}.txt",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
