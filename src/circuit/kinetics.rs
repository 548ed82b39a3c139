//! Hill kinetics for promoter activation and repression.
//!
//! Both functions guard against non-positive concentrations: the Hill
//! coefficients in this model are non-integer (2.4, 1.8, 7.6), and a
//! negative base raised to a fractional power is undefined. An adaptive
//! solver can overshoot a concentration slightly below zero, so any
//! non-positive input is treated as absent (activation 0, repression 1).

/// Hill activation term for cooperative promoter binding
///
/// f(x) = x^n / (x^n + K^n), and 0 when x <= 0.
///
/// # Arguments
/// * `x` - Activator concentration
/// * `k_half` - Half-activation constant K
/// * `n` - Hill coefficient
pub fn hill_activation(x: f64, k_half: f64, n: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let x_n = x.powf(n);
    let k_n = k_half.powf(n);
    x_n / (x_n + k_n)
}

/// Hill repression term for cooperative repressor binding
///
/// f(x) = K^n / (x^n + K^n), and 1 when x <= 0 (no repressor present).
///
/// # Arguments
/// * `x` - Repressor concentration
/// * `k_half` - Half-repression constant K
/// * `n` - Hill coefficient
pub fn hill_repression(x: f64, k_half: f64, n: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let x_n = x.powf(n);
    let k_n = k_half.powf(n);
    k_n / (x_n + k_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_guard() {
        assert_eq!(hill_activation(0.0, 1.0, 2.4), 0.0);
        assert_eq!(hill_activation(-1.0, 1.0, 2.4), 0.0);
        // A fractional power of a negative base would be NaN without the guard
        assert!(hill_activation(-5.0, 111.0, 7.6).is_finite());
    }

    #[test]
    fn test_repression_guard() {
        assert_eq!(hill_repression(0.0, 111.0, 7.6), 1.0);
        assert_eq!(hill_repression(-1.0, 111.0, 7.6), 1.0);
    }

    #[test]
    fn test_half_saturation() {
        // At x = K the term is exactly 1/2 for any n
        let act = hill_activation(206.0, 206.0, 2.4);
        assert!((act - 0.5).abs() < 1e-12);
        let rep = hill_repression(111.0, 111.0, 7.6);
        assert!((rep - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_saturation_limits() {
        // Far above K: activation -> 1, repression -> 0
        assert!(hill_activation(1e6, 0.513, 1.0) > 0.999);
        assert!(hill_repression(1e6, 111.0, 7.6) < 1e-6);
        // Far below K: activation -> 0, repression -> 1
        assert!(hill_activation(1e-9, 0.513, 1.0) < 1e-6);
        assert!(hill_repression(1e-9, 111.0, 7.6) > 0.999);
    }

    #[test]
    fn test_activation_monotonic() {
        let mut prev = 0.0;
        for i in 1..100 {
            let x = i as f64 * 50.0;
            let v = hill_activation(x, 206.0, 2.4);
            assert!(v > prev, "Hill activation must be strictly increasing");
            prev = v;
        }
    }
}
