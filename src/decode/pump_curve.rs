//! Pump bonding-curve progression tracking.

use crate::constants::INIT_PUMP_TOKEN_AMOUNT;

/// `pump_point = clamp(1 - pool_base_token_reserves / INIT_PUMP_TOKEN_AMOUNT, 0, 1)`.
pub fn pump_point(pool_base_token_reserves: u64) -> f64 {
    let raw = 1.0 - (pool_base_token_reserves as f64 / INIT_PUMP_TOKEN_AMOUNT as f64);
    raw.clamp(0.0, 1.0)
}

/// A trade observing `pump_point >= 0.999` clamps to 1 and migrates.
pub fn clamp_if_migrating(point: f64) -> (f64, bool) {
    if point >= 0.999 {
        (1.0, true)
    } else {
        (point, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_point_s1() {
        let p = pump_point(872_000_000);
        assert!((p - 0.001146).abs() < 1e-5, "got {}", p);
    }

    #[test]
    fn pump_point_s2_clamps_to_migrating() {
        let p = pump_point(870_000);
        assert!((p - 0.999).abs() < 1e-3, "got {}", p);
        let (clamped, migrating) = clamp_if_migrating(p);
        assert_eq!(clamped, 1.0);
        assert!(migrating);
    }

    #[test]
    fn pump_point_never_leaves_unit_interval() {
        assert_eq!(pump_point(0), 1.0);
        assert_eq!(pump_point(u64::MAX), 0.0);
    }
}
