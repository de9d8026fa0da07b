use assert_approx_eq::assert_approx_eq;
use proptest::prelude::*;

use tumor_growth_simulator::{
    analysis::{
        crossing_roots, half_capacity_time, headroom_ratio, run_sweep, time_grid,
        treated_growth, untreated_growth, ParameterSet, SweepSummary,
    },
    io::{
        read_curve_json, read_parameter_sets, read_parameter_sets_from_bytes, write_curves,
        FileFormat,
    },
    CrossingTime, GrowthModel, ModelConstants, ModelParameters, ParameterRanges, SimConfig,
    Simulator,
};

const K: f64 = 800.0;
const TD: f64 = 3.5;
const TF: f64 = 40.0;

fn default_model() -> GrowthModel {
    GrowthModel::new(ModelConstants::default())
}

// ---------------------------------------------------------------------------
// Core model at the default parameters
// ---------------------------------------------------------------------------

#[test]
fn test_default_headroom() {
    assert_approx_eq!(headroom_ratio(50.0, K), 15.0);
}

#[test]
fn test_untreated_default_samples() {
    assert_approx_eq!(untreated_growth(0.0, 50.0, TD), 50.0);
    // 50 * 2^2 * e^-0.14
    assert_approx_eq!(untreated_growth(7.0, 50.0, TD), 173.8716, 1e-3);
}

#[test]
fn test_treated_default_samples() {
    assert_approx_eq!(treated_growth(0.0, 50.0, K, 0.25, 0.01), 50.0);
    // Still above K/2 at the horizon; the curve falls back through it near day 88.
    assert_approx_eq!(treated_growth(TF, 50.0, K, 0.25, 0.01), 771.3213, 1e-3);
}

#[test]
fn test_default_crossing_lies_beyond_horizon() {
    // The larger of the two K/2 crossings is selected; at the defaults it
    // falls after day 40 even though the curve rises through K/2 earlier.
    let a = headroom_ratio(50.0, K);
    assert_eq!(half_capacity_time(50.0, 0.25, 0.01, a, TF), CrossingTime::NotFound);

    let (early, late) = crossing_roots(0.25, 0.01, a).unwrap();
    assert_approx_eq!(early, 12.36, 0.01);
    assert_approx_eq!(late, 87.64, 0.01);

    match half_capacity_time(50.0, 0.25, 0.01, a, 100.0) {
        CrossingTime::Found(t) => {
            assert_approx_eq!(t, late, 1e-12);
            assert_approx_eq!(treated_growth(t, 50.0, K, 0.25, 0.01), K / 2.0, 1e-6);
        }
        CrossingTime::NotFound => panic!("expected a crossing within 100 days"),
    }
}

#[test]
fn test_crossing_found_within_horizon() {
    let a = headroom_ratio(50.0, K);
    let t = half_capacity_time(50.0, 1.0, 0.05, a, TF).time().unwrap();
    assert_approx_eq!(t, 16.77, 0.01);
    assert_approx_eq!(treated_growth(t, 50.0, K, 1.0, 0.05), K / 2.0, 1e-6);
}

#[test]
fn test_crossing_edge_cases() {
    // A = 0: N0 already at K
    assert_eq!(half_capacity_time(K, 0.25, 0.01, 0.0, TF), CrossingTime::NotFound);
    // A < 0: N0 above K
    let a = headroom_ratio(1000.0, K);
    assert_eq!(half_capacity_time(1000.0, 0.25, 0.01, a, TF), CrossingTime::NotFound);
    // Negative discriminant
    let a = headroom_ratio(50.0, K);
    assert_eq!(half_capacity_time(50.0, 0.05, 0.05, a, TF), CrossingTime::NotFound);
    // No treatment means a degenerate quadratic
    assert_eq!(half_capacity_time(50.0, 0.25, 0.0, a, TF), CrossingTime::NotFound);
    // Non-positive N0
    assert_eq!(half_capacity_time(0.0, 0.25, 0.01, 15.0, TF), CrossingTime::NotFound);
    assert_eq!(half_capacity_time(-5.0, 0.25, 0.01, 15.0, TF), CrossingTime::NotFound);
}

#[test]
fn test_single_positive_root_above_half_capacity() {
    // N0 > K/2 gives A < 1, so one root is negative.
    let a = headroom_ratio(600.0, K);
    let (early, late) = crossing_roots(0.25, 0.01, a).unwrap();
    assert!(early < 0.0);
    assert!(late > 0.0);
    assert_eq!(half_capacity_time(600.0, 0.25, 0.01, a, TF), CrossingTime::NotFound);
    match half_capacity_time(600.0, 0.25, 0.01, a, 200.0) {
        CrossingTime::Found(t) => assert_approx_eq!(t, late, 1e-12),
        CrossingTime::NotFound => panic!("expected the positive root"),
    }
}

// ---------------------------------------------------------------------------
// Simulation and presentation state
// ---------------------------------------------------------------------------

#[test]
fn test_simulation_result_shapes() {
    let result = default_model().simulate(&ModelParameters::default(), 300);
    assert_eq!(result.len(), 300);
    assert_eq!(result.times[0], 0.0);
    assert_eq!(result.times[299], TF);
    assert_approx_eq!(result.untreated[0], 50.0);
    assert_approx_eq!(result.treated[0], 50.0);
    assert_approx_eq!(result.half_capacity_level(), 400.0);
    assert_eq!(result.half_capacity, CrossingTime::NotFound);
}

#[test]
fn test_simulator_slider_changes_recompute() {
    use std::sync::{Arc, Mutex};

    let seen: Arc<Mutex<Vec<Option<f64>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut sim = Simulator::new(ModelConstants::default(), ModelParameters::default(), 50);
    sim.on_update(move |r| sink.lock().unwrap().push(r.half_capacity.time()));

    sim.set_growth_rate(1.0);
    sim.set_treatment_effectiveness(0.05);
    sim.set_initial_population(100.0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], None);
    assert!(seen[1].is_some());
    // Less headroom moves the later crossing out: 16.77 -> 17.82 days.
    assert!(seen[2].unwrap() > seen[1].unwrap());
}

#[test]
fn test_slider_ranges_cover_defaults() {
    let ranges = ParameterRanges::default();
    assert!(ranges.out_of_range(&ModelParameters::default()).is_empty());
    let snapped = ranges.snap(&ModelParameters::new(57.0, 2.0, 0.0));
    assert_approx_eq!(snapped.initial_population, 60.0);
    assert_approx_eq!(snapped.growth_rate, 1.0);
    assert_approx_eq!(snapped.treatment_effectiveness, 0.001);
}

// ---------------------------------------------------------------------------
// Configuration, I/O and sweeps
// ---------------------------------------------------------------------------

#[test]
fn test_config_overrides_model() {
    let config = SimConfig::from_toml_str(
        "[constants]\nhorizon = 100.0\n\n[parameters]\ngrowth_rate = 0.25\n",
    )
    .unwrap();
    let model = GrowthModel::new(config.constants);
    let t = model.half_capacity_time(&config.parameters);
    assert_approx_eq!(t.time().unwrap(), 87.64, 0.01);
}

#[test]
fn test_json_curve_export_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curves.json");
    let result = default_model().simulate(&ModelParameters::new(50.0, 1.0, 0.05), 25);
    write_curves(&result, &path, true).unwrap();

    let loaded = read_curve_json(&path).unwrap();
    assert_eq!(loaded.len(), result.len());
    assert_eq!(loaded.parameters, result.parameters);
    assert_approx_eq!(loaded.half_capacity.time().unwrap(), 16.77, 0.01);
    for (a, b) in loaded.treated.iter().zip(&result.treated) {
        assert_approx_eq!(*a, *b, 1e-9);
    }
}

#[test]
fn test_excel_curve_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curves.xlsx");
    let result = default_model().simulate(&ModelParameters::default(), 25);
    write_curves(&result, &path, false).unwrap();
    assert!(path.exists());
}

#[test]
fn test_sweep_from_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sets.csv");
    std::fs::write(
        &path,
        "label,initial_population,growth_rate,treatment_effectiveness\n\
         baseline,50,0.25,0.01\n\
         fast,100,1.0,0.04\n\
         aggressive,50,1.0,0.05\n",
    )
    .unwrap();

    let sets = read_parameter_sets(&path).unwrap();
    assert_eq!(sets.len(), 3);

    let rows = run_sweep(&default_model(), &sets).unwrap();
    assert_eq!(rows[0].half_capacity, CrossingTime::NotFound);
    assert_approx_eq!(rows[1].half_capacity.time().unwrap(), 22.87, 0.01);
    assert_approx_eq!(rows[2].half_capacity.time().unwrap(), 16.77, 0.01);

    let summary = SweepSummary::compute(&rows).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.found, 2);
    assert_approx_eq!(summary.min_time.unwrap(), 16.77, 0.01);
    assert_approx_eq!(summary.max_time.unwrap(), 22.87, 0.01);
}

#[test]
fn test_sweep_from_json_bytes() {
    let data = br#"[
        {"initial_population": 50.0, "growth_rate": 1.0, "treatment_effectiveness": 0.05},
        {"label": "untreated-ish", "initial_population": 50.0, "growth_rate": 0.25, "treatment_effectiveness": 0.001}
    ]"#;
    let sets: Vec<ParameterSet> = read_parameter_sets_from_bytes(data, FileFormat::Json).unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[1].label.as_deref(), Some("untreated-ish"));
}

#[test]
fn test_sweep_rejects_invalid_row() {
    let data = b"label,initial_population,growth_rate,treatment_effectiveness\nbad,-1,0.25,0.01\n";
    let err = read_parameter_sets_from_bytes(data, FileFormat::Csv).unwrap_err();
    assert!(err.to_string().contains("Row 1"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_curves_start_at_initial_population(
        n0 in 1.0f64..1000.0,
        r in 0.01f64..2.0,
        alpha in 0.0f64..0.1,
    ) {
        let untreated = untreated_growth(0.0, n0, TD);
        let treated = treated_growth(0.0, n0, K, r, alpha);
        prop_assert!((untreated - n0).abs() <= 1e-9 * n0);
        prop_assert!((treated - n0).abs() <= 1e-9 * n0);
    }

    #[test]
    fn prop_half_capacity_time_total_and_bounded(
        n0 in proptest::num::f64::ANY,
        r in proptest::num::f64::ANY,
        alpha in proptest::num::f64::ANY,
        a in proptest::num::f64::ANY,
        horizon in 0.0f64..1000.0,
    ) {
        if let CrossingTime::Found(t) = half_capacity_time(n0, r, alpha, a, horizon) {
            prop_assert!(t > 0.0);
            prop_assert!(t <= horizon);
        }
    }

    #[test]
    fn prop_found_time_hits_half_capacity(
        n0 in 10.0f64..200.0,
        r in 0.05f64..1.0,
        alpha in 0.001f64..0.05,
    ) {
        let a = headroom_ratio(n0, K);
        if let CrossingTime::Found(t) = half_capacity_time(n0, r, alpha, a, TF) {
            let n = treated_growth(t, n0, K, r, alpha);
            prop_assert!((n - K / 2.0).abs() < 1e-6 * K);
        }
    }

    #[test]
    fn prop_simulation_is_deterministic(
        n0 in 10.0f64..200.0,
        r in 0.05f64..1.0,
        alpha in 0.001f64..0.05,
        samples in 2usize..400,
    ) {
        let params = ModelParameters::new(n0, r, alpha);
        let first = default_model().simulate(&params, samples);
        let second = default_model().simulate(&params, samples);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_time_grid_spans_horizon(samples in 2usize..2000, horizon in 0.1f64..500.0) {
        let grid = time_grid(horizon, samples);
        prop_assert_eq!(grid.len(), samples);
        prop_assert_eq!(grid[0], 0.0);
        prop_assert_eq!(grid[samples - 1], horizon);
        prop_assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }
}
