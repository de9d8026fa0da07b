#![no_main]

use libfuzzer_sys::fuzz_target;
use tumor_growth_simulator::analysis::{half_capacity_time, headroom_ratio, treated_growth};
use tumor_growth_simulator::CrossingTime;

fuzz_target!(|input: (f64, f64, f64, f64, f64)| {
    let (n0, k, r, alpha, horizon) = input;
    let a = headroom_ratio(n0, k);

    if let CrossingTime::Found(t) = half_capacity_time(n0, r, alpha, a, horizon) {
        assert!(t > 0.0 && t <= horizon);
        let _ = treated_growth(t, n0, k, r, alpha);
    }
});
