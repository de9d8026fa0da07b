#![no_main]

use libfuzzer_sys::fuzz_target;
use tumor_growth_simulator::analysis::{run_sweep, GrowthModel};
use tumor_growth_simulator::io::read_parameter_sets_csv_from_bytes;

fuzz_target!(|data: &[u8]| {
    if let Ok(sets) = read_parameter_sets_csv_from_bytes(data) {
        // Every accepted row has already passed validation.
        assert!(run_sweep(&GrowthModel::default(), &sets).is_ok());
    }
});
