use serde::{Deserialize, Serialize};

/// Natural die-back rate of the untreated population (per day).
pub const DECAY_RATE: f64 = 0.02;

/// Untreated growth: `N(t) = N0 * 2^(t/Td) * e^(-0.02*t)`.
///
/// Doubling-time driven exponential growth attenuated by a fixed decay.
/// No validation is performed; out-of-domain inputs yield whatever the
/// formula produces.
pub fn untreated_growth(t: f64, initial_population: f64, doubling_time: f64) -> f64 {
    initial_population * 2f64.powf(t / doubling_time) * (-DECAY_RATE * t).exp()
}

/// [`untreated_growth`] evaluated at every point of `times`.
pub fn untreated_series(times: &[f64], initial_population: f64, doubling_time: f64) -> Vec<f64> {
    times
        .iter()
        .map(|&t| untreated_growth(t, initial_population, doubling_time))
        .collect()
}

/// Headroom ratio `A = (K - N0) / N0`.
pub fn headroom_ratio(initial_population: f64, carrying_capacity: f64) -> f64 {
    (carrying_capacity - initial_population) / initial_population
}

/// Treated growth: `N(t) = K / (1 + A * e^(-r*t*(1 - alpha*t)))`.
///
/// A logistic curve whose effective rate `r*(1 - alpha*t)` falls linearly
/// with exposure time and changes sign once `alpha*t > 1`, after which the
/// population declines again.
pub fn treated_growth(
    t: f64,
    initial_population: f64,
    carrying_capacity: f64,
    growth_rate: f64,
    treatment_effectiveness: f64,
) -> f64 {
    let a = headroom_ratio(initial_population, carrying_capacity);
    carrying_capacity
        / (1.0 + a * (-growth_rate * t * (1.0 - treatment_effectiveness * t)).exp())
}

/// [`treated_growth`] evaluated at every point of `times`.
pub fn treated_series(
    times: &[f64],
    initial_population: f64,
    carrying_capacity: f64,
    growth_rate: f64,
    treatment_effectiveness: f64,
) -> Vec<f64> {
    times
        .iter()
        .map(|&t| {
            treated_growth(
                t,
                initial_population,
                carrying_capacity,
                growth_rate,
                treatment_effectiveness,
            )
        })
        .collect()
}

/// Outcome of the half-capacity lookup.
///
/// `NotFound` is a regular result, not an error: the treated curve may never
/// reach `K/2` inside the horizon, or the quadratic may have no usable root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "time", rename_all = "snake_case")]
pub enum CrossingTime {
    Found(f64),
    NotFound,
}

impl CrossingTime {
    pub fn time(&self) -> Option<f64> {
        match self {
            CrossingTime::Found(t) => Some(*t),
            CrossingTime::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CrossingTime::Found(_))
    }
}

impl From<CrossingTime> for Option<f64> {
    fn from(c: CrossingTime) -> Self {
        c.time()
    }
}

impl std::fmt::Display for CrossingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossingTime::Found(t) => write!(f, "{t:.2} days"),
            CrossingTime::NotFound => write!(f, "not reached"),
        }
    }
}

/// Roots of `-r*alpha*t^2 + r*t - ln(A) = 0` in quadratic-formula order
/// (`+sqrt` first). `None` when the roots are not real and finite.
fn quadratic_roots(growth_rate: f64, treatment_effectiveness: f64, headroom: f64) -> Option<(f64, f64)> {
    if !(headroom > 0.0) || !headroom.is_finite() {
        return None;
    }

    let a_param = -growth_rate * treatment_effectiveness;
    let b_param = growth_rate;
    let c_param = -headroom.ln();

    if a_param == 0.0 || !a_param.is_finite() || !b_param.is_finite() {
        return None;
    }

    let discriminant = b_param * b_param - 4.0 * a_param * c_param;
    // NaN compares false, so this also rejects a non-numeric discriminant.
    if !(discriminant >= 0.0) || !discriminant.is_finite() {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b_param + sqrt_disc) / (2.0 * a_param);
    let t2 = (-b_param - sqrt_disc) / (2.0 * a_param);

    if t1.is_finite() && t2.is_finite() {
        Some((t1, t2))
    } else {
        None
    }
}

/// Both times at which the treated curve equals `K/2`, in ascending order.
///
/// The curve rises through `K/2` at the earlier root and, once the
/// treatment reverses the growth rate, falls back through it at the later
/// one. Returns `None` under the same conditions as [`half_capacity_time`]
/// reports `NotFound` before the horizon check.
pub fn crossing_roots(
    growth_rate: f64,
    treatment_effectiveness: f64,
    headroom: f64,
) -> Option<(f64, f64)> {
    quadratic_roots(growth_rate, treatment_effectiveness, headroom)
        .map(|(t1, t2)| if t1 <= t2 { (t1, t2) } else { (t2, t1) })
}

/// Analytic time at which the treated curve reaches half of carrying capacity.
///
/// Solves `a*t^2 + b*t + c = 0` with `a = -r*alpha`, `b = r`, `c = -ln(A)`.
/// When both roots are positive the larger one is returned, otherwise the
/// single positive root. The chosen root must satisfy `0 < t <= horizon`.
///
/// Never fails: `N0 <= 0`, `A <= 0`, `alpha = 0`, a negative discriminant
/// and non-finite intermediates all yield `CrossingTime::NotFound`.
pub fn half_capacity_time(
    initial_population: f64,
    growth_rate: f64,
    treatment_effectiveness: f64,
    headroom: f64,
    horizon: f64,
) -> CrossingTime {
    if !(initial_population > 0.0) {
        return CrossingTime::NotFound;
    }

    let Some((t1, t2)) = quadratic_roots(growth_rate, treatment_effectiveness, headroom) else {
        return CrossingTime::NotFound;
    };

    let candidate = if t1 > 0.0 && t2 > 0.0 {
        t1.max(t2)
    } else if t1 > 0.0 {
        t1
    } else {
        t2
    };

    if candidate > 0.0 && candidate <= horizon {
        CrossingTime::Found(candidate)
    } else {
        CrossingTime::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: f64 = 800.0;
    const N0: f64 = 50.0;
    const R: f64 = 0.25;
    const ALPHA: f64 = 0.01;
    const TD: f64 = 3.5;
    const TF: f64 = 40.0;

    fn default_headroom() -> f64 {
        headroom_ratio(N0, K)
    }

    #[test]
    fn test_untreated_at_zero_is_initial() {
        for n0 in [1.0, 10.0, 50.0, 200.0, 12345.6] {
            assert_eq!(untreated_growth(0.0, n0, TD), n0);
        }
    }

    #[test]
    fn test_untreated_formula() {
        let expected = 50.0 * 2f64.powf(7.0 / 3.5) * (-0.02f64 * 7.0).exp();
        assert!((untreated_growth(7.0, 50.0, 3.5) - expected).abs() < 1e-9);
        // Two doublings minus decay
        assert!((untreated_growth(7.0, 50.0, 3.5) - 200.0 * (-0.14f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_untreated_series_matches_scalar() {
        let times = [0.0, 1.0, 2.5, 40.0];
        let series = untreated_series(&times, N0, TD);
        assert_eq!(series.len(), 4);
        for (t, v) in times.iter().zip(&series) {
            assert_eq!(*v, untreated_growth(*t, N0, TD));
        }
    }

    #[test]
    fn test_treated_at_zero_is_initial() {
        for n0 in [10.0, 50.0, 200.0, 799.0] {
            for alpha in [0.0, 0.001, 0.05] {
                let v = treated_growth(0.0, n0, K, R, alpha);
                assert!((v - n0).abs() < 1e-9 * n0, "n0={n0}, alpha={alpha}, got {v}");
            }
        }
    }

    #[test]
    fn test_treated_without_treatment_is_logistic() {
        let t = 10.0;
        let logistic = K / (1.0 + default_headroom() * (-R * t).exp());
        assert!((treated_growth(t, N0, K, R, 0.0) - logistic).abs() < 1e-9);
    }

    #[test]
    fn test_treated_declines_after_rate_reversal() {
        // Effective exponent peaks at t = 1 / (2 alpha) = 50 days
        let peak = treated_growth(50.0, N0, K, R, ALPHA);
        assert!(treated_growth(80.0, N0, K, R, ALPHA) < peak);
        assert!(treated_growth(120.0, N0, K, R, ALPHA) < N0);
    }

    #[test]
    fn test_treated_series_matches_scalar() {
        let times = [0.0, 5.0, 20.0];
        let series = treated_series(&times, N0, K, R, ALPHA);
        for (t, v) in times.iter().zip(&series) {
            assert_eq!(*v, treated_growth(*t, N0, K, R, ALPHA));
        }
    }

    #[test]
    fn test_headroom_ratio() {
        assert_eq!(headroom_ratio(50.0, 800.0), 15.0);
        assert_eq!(headroom_ratio(800.0, 800.0), 0.0);
        assert!(headroom_ratio(900.0, 800.0) < 0.0);
    }

    #[test]
    fn test_default_selects_larger_root_beyond_horizon() {
        // Roots are ~12.36 and ~87.64; the larger one is outside 40 days.
        let result = half_capacity_time(N0, R, ALPHA, default_headroom(), TF);
        assert_eq!(result, CrossingTime::NotFound);
    }

    #[test]
    fn test_default_larger_root_reaches_half_capacity() {
        let result = half_capacity_time(N0, R, ALPHA, default_headroom(), 100.0);
        let t_star = result.time().expect("crossing within 100 days");
        assert!(t_star > 0.0 && t_star <= 100.0);
        assert!((t_star - 87.64).abs() < 0.01, "got {t_star}");
        let value = treated_growth(t_star, N0, K, R, ALPHA);
        assert!(((value - 400.0) / 400.0).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn test_crossing_roots_both_hit_half_capacity() {
        let (early, late) = crossing_roots(R, ALPHA, default_headroom()).unwrap();
        assert!(early < late);
        assert!((early - 12.36).abs() < 0.01, "got {early}");
        for t in [early, late] {
            let value = treated_growth(t, N0, K, R, ALPHA);
            assert!(((value - 400.0) / 400.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_positive_root_selected() {
        // N0 > K/2 gives ln(A) < 0: roots straddle zero.
        let n0 = 600.0;
        let a = headroom_ratio(n0, K);
        let (early, late) = crossing_roots(R, ALPHA, a).unwrap();
        assert!(early < 0.0 && late > 0.0);
        let result = half_capacity_time(n0, R, ALPHA, a, 200.0);
        assert_eq!(result, CrossingTime::Found(late));
    }

    #[test]
    fn test_found_within_horizon() {
        // r = 1, alpha = 0.05, A = 15: roots ~3.23 and ~16.77
        let a = default_headroom();
        let result = half_capacity_time(N0, 1.0, 0.05, a, TF);
        let t_star = result.time().unwrap();
        assert!(t_star > 0.0 && t_star <= TF);
        let value = treated_growth(t_star, N0, K, 1.0, 0.05);
        assert!(((value - 400.0) / 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_population_at_capacity_not_found() {
        let a = headroom_ratio(800.0, K);
        assert_eq!(a, 0.0);
        assert_eq!(half_capacity_time(800.0, R, ALPHA, a, TF), CrossingTime::NotFound);
    }

    #[test]
    fn test_population_above_capacity_not_found() {
        let a = headroom_ratio(900.0, K);
        assert_eq!(half_capacity_time(900.0, R, ALPHA, a, TF), CrossingTime::NotFound);
    }

    #[test]
    fn test_negative_discriminant_not_found() {
        // b^2 = 0.0025 < 4ac = 4 * 0.0025 * ln(15)
        let a = default_headroom();
        assert!(crossing_roots(0.05, 0.05, a).is_none());
        assert_eq!(half_capacity_time(N0, 0.05, 0.05, a, TF), CrossingTime::NotFound);
    }

    #[test]
    fn test_zero_alpha_not_found() {
        assert_eq!(
            half_capacity_time(N0, R, 0.0, default_headroom(), TF),
            CrossingTime::NotFound
        );
    }

    #[test]
    fn test_non_finite_inputs_not_found() {
        let a = default_headroom();
        assert_eq!(half_capacity_time(N0, f64::NAN, ALPHA, a, TF), CrossingTime::NotFound);
        assert_eq!(half_capacity_time(N0, R, f64::INFINITY, a, TF), CrossingTime::NotFound);
        assert_eq!(half_capacity_time(N0, R, ALPHA, f64::NAN, TF), CrossingTime::NotFound);
        assert_eq!(half_capacity_time(0.0, R, ALPHA, a, TF), CrossingTime::NotFound);
    }

    #[test]
    fn test_idempotent() {
        let a = default_headroom();
        let first = half_capacity_time(N0, 1.0, 0.05, a, TF);
        let second = half_capacity_time(N0, 1.0, 0.05, a, TF);
        assert_eq!(first.time().map(f64::to_bits), second.time().map(f64::to_bits));
        assert_eq!(
            treated_growth(13.7, N0, K, R, ALPHA).to_bits(),
            treated_growth(13.7, N0, K, R, ALPHA).to_bits()
        );
        assert_eq!(
            untreated_growth(13.7, N0, TD).to_bits(),
            untreated_growth(13.7, N0, TD).to_bits()
        );
    }

    #[test]
    fn test_default_treated_non_decreasing_over_horizon() {
        let mut previous = treated_growth(0.0, N0, K, R, ALPHA);
        for i in 1..=400 {
            let t = TF * i as f64 / 400.0;
            let value = treated_growth(t, N0, K, R, ALPHA);
            assert!(value >= previous, "decreased at t={t}");
            previous = value;
        }
    }

    #[test]
    fn test_crossing_time_display() {
        assert_eq!(CrossingTime::Found(12.347).to_string(), "12.35 days");
        assert_eq!(CrossingTime::NotFound.to_string(), "not reached");
    }

    #[test]
    fn test_crossing_time_json() {
        let json = serde_json::to_string(&CrossingTime::Found(3.5)).unwrap();
        assert_eq!(json, r#"{"status":"found","time":3.5}"#);
        let json = serde_json::to_string(&CrossingTime::NotFound).unwrap();
        assert_eq!(json, r#"{"status":"not_found"}"#);
        let back: CrossingTime = serde_json::from_str(r#"{"status":"found","time":1.0}"#).unwrap();
        assert_eq!(back, CrossingTime::Found(1.0));
    }

    #[test]
    fn test_crossing_time_into_option() {
        let found: Option<f64> = CrossingTime::Found(2.0).into();
        assert_eq!(found, Some(2.0));
        let missing: Option<f64> = CrossingTime::NotFound.into();
        assert_eq!(missing, None);
    }
}
