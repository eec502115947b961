use infection_core::game::TrackerReport;
use std::fmt::Write;

/// Plain-text table: one row per city, one column per round, odds last.
pub fn render_table(report: &TrackerReport) -> String {
    let name_width = report
        .cities
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once("Total".len()))
        .max()
        .unwrap_or(5);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "mode: {} | open round: R{}",
        report.mode,
        report.open_round + 1
    );

    let _ = write!(out, "{:<name_width$}  {:>4}", "City", "Deck");
    for index in 0..report.round_totals.len() {
        let _ = write!(out, "  {:>4}", format!("R{}", index + 1));
    }
    let _ = writeln!(out, "  {:>7}", "Odds");

    for row in &report.cities {
        let _ = write!(out, "{:<name_width$}  {:>4}", row.name, row.total);
        for count in &row.rounds {
            let _ = write!(out, "  {count:>4}");
        }
        let _ = writeln!(out, "  {:>6.1}%", row.probability * 100.0);
    }

    let _ = write!(out, "{:<name_width$}  {:>4}", "Total", report.deck_total);
    for total in &report.round_totals {
        let _ = write!(out, "  {total:>4}");
    }
    out.push('\n');
    out
}
