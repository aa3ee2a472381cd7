use crate::math::search::SearchOutcome;
use crate::math::sweep::SweepRow;

/// Renders sweep rows as a fixed-width text table.
///
/// Sample counts that did not reach their target are suffixed with `*`.
pub fn render_table(rows: &[SweepRow]) -> String {
    let mut out = format!(
        "{:>10} {:>12} {:>12} {:>12} {:>12}\n",
        "accuracy", "tolerance", "n_rect", "n_mc_mean", "n_mc_dart"
    );
    for row in rows {
        out.push_str(&format!(
            "{:>10} {:>12.3e} {:>12} {:>12} {:>12}\n",
            row.accuracy,
            row.tolerance,
            cell(&row.rect),
            cell(&row.mc_mean),
            cell(&row.mc_dart)
        ));
    }
    if rows.iter().any(|row| !row.all_achieved()) {
        out.push_str("* sample budget exhausted before the target was met\n");
    }
    out
}

/// Serialises sweep rows as pretty-printed JSON.
pub fn render_json(rows: &[SweepRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

fn cell(outcome: &SearchOutcome) -> String {
    if outcome.achieved {
        outcome.sample_count.to_string()
    } else {
        format!("{}*", outcome.sample_count)
    }
}
