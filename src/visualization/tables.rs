use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{GrowthModel, SimulationResult, SweepRow, SweepSummary};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_optional_time(t: Option<f64>) -> String {
    t.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

/// Format the current constants, parameters and crossing as a string.
pub fn format_parameter_table(result: &SimulationResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Current Parameters".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let c = &result.constants;
    let p = &result.parameters;
    let mut table = new_table(vec!["Parameter", "Value", "Note"]);

    table.add_row(vec![
        Cell::new("K (carrying capacity)"),
        Cell::new(format!("{:.0}", c.carrying_capacity)),
        Cell::new("fixed"),
    ]);
    table.add_row(vec![
        Cell::new("Tf (horizon)"),
        Cell::new(format!("{:.1}", c.horizon)),
        Cell::new("days, fixed"),
    ]);
    table.add_row(vec![
        Cell::new("Td (doubling time)"),
        Cell::new(format!("{:.2}", c.doubling_time)),
        Cell::new("days, fixed"),
    ]);
    table.add_row(vec![
        Cell::new("N0 (initial population)"),
        Cell::new(format!("{:.0}", p.initial_population)),
        Cell::new("cells"),
    ]);
    table.add_row(vec![
        Cell::new("r (growth rate)"),
        Cell::new(format!("{:.2}", p.growth_rate)),
        Cell::new("per day"),
    ]);
    table.add_row(vec![
        Cell::new("alpha (treatment effectiveness)"),
        Cell::new(format!("{:.3}", p.treatment_effectiveness)),
        Cell::new("per day"),
    ]);
    table.add_row(vec![
        Cell::new("A = (K - N0) / N0"),
        Cell::new(format!("{:.2}", result.headroom)),
        Cell::new("computed"),
    ]);

    if let Some((early, late)) = GrowthModel::new(*c).crossing_roots(p) {
        table.add_row(vec![
            Cell::new("K/2 crossing roots"),
            Cell::new(format!("{early:.2}, {late:.2}")),
            Cell::new("days, before horizon check"),
        ]);
    }

    table.add_row(vec![
        Cell::new("Half-capacity time"),
        Cell::new(format_optional_time(result.half_capacity.time())),
        Cell::new(if result.half_capacity.is_found() {
            "days"
        } else {
            "not reached"
        }),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the parameter table.
pub fn print_parameter_table(result: &SimulationResult) {
    print!("{}", format_parameter_table(result));
}

/// Format up to `max_rows` evenly spaced samples of both curves as a string.
pub fn format_curve_table(result: &SimulationResult, max_rows: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sampled Curves".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Day", "Untreated", "Treated"]);

    let n = result.len();
    let shown = max_rows.min(n);
    let indices: Vec<usize> = match shown {
        0 => Vec::new(),
        1 => vec![0],
        m => (0..m)
            .map(|i| ((i as f64 / (m - 1) as f64) * (n - 1) as f64).round() as usize)
            .collect(),
    };

    for idx in indices {
        table.add_row(vec![
            Cell::new(format!("{:.2}", result.times[idx])),
            Cell::new(format!("{:.1}", result.untreated[idx])),
            Cell::new(format!("{:.1}", result.treated[idx])),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print sampled curve values.
pub fn print_curve_table(result: &SimulationResult, max_rows: usize) {
    print!("{}", format_curve_table(result, max_rows));
}

/// Format sweep results as a string.
pub fn format_sweep_table(rows: &[SweepRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Parameter Sweep".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = new_table(vec![
        "Label",
        "N0",
        "r",
        "alpha",
        "A",
        "T half (days)",
        "Untreated @ Tf",
        "Treated @ Tf",
    ]);

    for (i, row) in rows.iter().enumerate() {
        let label = row.label.clone().unwrap_or_else(|| format!("#{}", i + 1));
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.0}", row.parameters.initial_population)),
            Cell::new(format!("{:.2}", row.parameters.growth_rate)),
            Cell::new(format!("{:.3}", row.parameters.treatment_effectiveness)),
            Cell::new(format!("{:.2}", row.headroom)),
            Cell::new(format_optional_time(row.half_capacity.time())),
            Cell::new(format!("{:.1}", row.final_untreated)),
            Cell::new(format!("{:.1}", row.final_treated)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print sweep results.
pub fn print_sweep_table(rows: &[SweepRow]) {
    print!("{}", format_sweep_table(rows));
}

/// Format the sweep summary as a string.
pub fn format_sweep_summary(summary: &SweepSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sweep Summary".bold().green()));
    output.push_str(&format!(
        "{}\n",
        format!(
            "K/2 reached in {} of {} parameter sets",
            summary.found, summary.total
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Statistic", "T half (days)"]);
    let stats = [
        ("Minimum", summary.min_time),
        ("Maximum", summary.max_time),
        ("Mean", summary.mean_time),
        ("Std. deviation", summary.std_dev_time),
    ];
    for (name, value) in stats {
        table.add_row(vec![Cell::new(name), Cell::new(format_optional_time(value))]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the sweep summary.
pub fn print_sweep_summary(summary: &SweepSummary) {
    print!("{}", format_sweep_summary(summary));
}
