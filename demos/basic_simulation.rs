//! Basic simulation example: compute both curves, report the half-capacity
//! time, then move the sliders the way the interactive UI does.
//!
//! Run from the project root:
//!   cargo run --example basic_simulation

use tumor_growth_simulator::visualization::{print_growth_chart, print_parameter_table};
use tumor_growth_simulator::{GrowthModel, ModelConstants, ModelParameters, Simulator};

fn main() {
    let model = GrowthModel::new(ModelConstants::default());
    let params = ModelParameters::default();

    let result = model.simulate(&params, 300);
    print_parameter_table(&result);
    print_growth_chart(&result);

    // The default crossing is the later of two roots and falls past the horizon.
    if let Some((early, late)) = model.crossing_roots(&params) {
        println!("\nK/2 is crossed at {early:.2} and {late:.2} days");
    }

    // Drive the same model through slider changes.
    let mut simulator = Simulator::new(ModelConstants::default(), params, 300);
    simulator.on_update(|result| {
        let p = &result.parameters;
        println!(
            "N0 = {:>5.0}  r = {:.2}  alpha = {:.3}  ->  {}",
            p.initial_population, p.growth_rate, p.treatment_effectiveness, result.half_capacity
        );
    });

    println!();
    simulator.set_growth_rate(0.5);
    simulator.set_growth_rate(1.0);
    simulator.set_treatment_effectiveness(0.05);
    simulator.set_initial_population(100.0);
}
