mod tables;
mod charts;

pub use tables::{
    format_parameter_table, print_parameter_table,
    format_curve_table, print_curve_table,
    format_sweep_table, print_sweep_table,
    format_sweep_summary, print_sweep_summary,
};
pub use charts::{format_growth_chart, print_growth_chart, render_chart_grid, CHART_HEIGHT, CHART_WIDTH};
