use colored::Colorize;

use crate::analysis::SimulationResult;

pub const CHART_WIDTH: usize = 60;
pub const CHART_HEIGHT: usize = 20;

const UNTREATED: char = '*';
const TREATED: char = '+';
const HALF_LINE: char = '-';
const MARKER: char = 'X';

/// Headroom above carrying capacity on the y axis.
const Y_HEADROOM: f64 = 1.1;

fn row_for(value: f64, y_max: f64, height: usize) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value > y_max {
        return None;
    }
    let level = (value / y_max * (height - 1) as f64).round() as usize;
    Some(height - 1 - level.min(height - 1))
}

/// Plot both curves onto a character grid (top row first).
///
/// The y axis spans `[0, 1.1 K]`; values above it are clipped, as the
/// untreated curve usually is. The K/2 reference line is drawn with `-`,
/// the untreated curve with `*`, the treated curve with `+` and the
/// half-capacity crossing, when found, with `X`.
pub fn render_chart_grid(result: &SimulationResult, width: usize, height: usize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![' '; width]; height];
    if width < 2 || height < 2 || result.is_empty() {
        return grid;
    }

    let y_max = result.constants.carrying_capacity * Y_HEADROOM;
    let last = result.len() - 1;

    if let Some(row) = row_for(result.half_capacity_level(), y_max, height) {
        grid[row].iter_mut().for_each(|c| *c = HALF_LINE);
    }

    for col in 0..width {
        let idx = ((col as f64 / (width - 1) as f64) * last as f64).round() as usize;
        if let Some(row) = row_for(result.untreated[idx], y_max, height) {
            grid[row][col] = UNTREATED;
        }
        if let Some(row) = row_for(result.treated[idx], y_max, height) {
            grid[row][col] = TREATED;
        }
    }

    if let Some(t) = result.half_capacity.time() {
        let horizon = result.constants.horizon;
        let col = ((t / horizon) * (width - 1) as f64).round() as usize;
        if let Some(row) = row_for(result.half_capacity_level(), y_max, height) {
            grid[row][col.min(width - 1)] = MARKER;
        }
    }

    grid
}

fn colorize(c: char) -> String {
    let s = c.to_string();
    match c {
        UNTREATED => s.red().to_string(),
        TREATED => s.blue().to_string(),
        HALF_LINE => s.green().dimmed().to_string(),
        MARKER => s.green().bold().to_string(),
        _ => s,
    }
}

/// Format the growth chart, legend and crossing annotation as a string.
pub fn format_growth_chart(result: &SimulationResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Tumor Growth: Untreated vs. Treated".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(CHART_WIDTH + 10)));

    if result.is_empty() {
        output.push_str("  No samples to plot.\n");
        return output;
    }

    let grid = render_chart_grid(result, CHART_WIDTH, CHART_HEIGHT);
    let y_max = result.constants.carrying_capacity * Y_HEADROOM;
    let half_row = row_for(result.half_capacity_level(), y_max, CHART_HEIGHT);

    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{y_max:>7.0}")
        } else if Some(i) == half_row {
            format!("{:>7.0}", result.half_capacity_level())
        } else if i == CHART_HEIGHT - 1 {
            format!("{:>7}", 0)
        } else {
            " ".repeat(7)
        };
        let line: String = row.iter().map(|&c| colorize(c)).collect();
        output.push_str(&format!("{label} |{line}\n"));
    }

    output.push_str(&format!("{} +{}\n", " ".repeat(7), "-".repeat(CHART_WIDTH)));
    let end_label = format!("{:.0}", result.constants.horizon);
    output.push_str(&format!(
        "{} 0{}{end_label}  (days)\n",
        " ".repeat(8),
        " ".repeat(CHART_WIDTH.saturating_sub(1 + end_label.len()))
    ));

    output.push_str(&format!(
        "\n  {} untreated   {} treated   {} half capacity (K/2 = {:.0})\n",
        colorize(UNTREATED),
        colorize(TREATED),
        colorize(HALF_LINE),
        result.half_capacity_level()
    ));

    match result.half_capacity.time() {
        Some(t) => output.push_str(&format!(
            "  {} Analytic half-capacity time: {}\n",
            colorize(MARKER),
            format!("{t:.2} days").bold()
        )),
        None => output.push_str(&format!(
            "  {}\n",
            "Treated curve does not reach K/2 within the horizon.".dimmed()
        )),
    }

    output
}

/// Print the growth chart.
pub fn print_growth_chart(result: &SimulationResult) {
    print!("{}", format_growth_chart(result));
}
