/// In-memory, per-block token account snapshot
/// Within a block, at most one entry per `token_account_address`;
/// `token_decimal` is back-filled from any sibling account with the same mint.
#[derive(Debug, Clone)]
pub struct TokenAccount {
    pub owner: String,
    pub token_account_address: String,
    pub token_address: String,
    pub token_decimal: u8,
    pub pre_value: i64,
    pub post_value: i64,
    pub closed: bool,
    pub init: bool,
}

impl TokenAccount {
    pub fn ui_pre(&self) -> f64 {
        ui(self.pre_value as f64, self.token_decimal)
    }

    pub fn ui_post(&self) -> f64 {
        ui(self.post_value as f64, self.token_decimal)
    }
}

/// `ui(amount, decimals) = amount / 10^decimals`
pub fn ui(amount: f64, decimals: u8) -> f64 {
    amount / 10f64.powi(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_round_trips_for_small_decimals() {
        for d in 0..=9u8 {
            let amount: f64 = 1_234_567.0;
            let scaled = amount * 10f64.powi(d as i32);
            let back = ui(scaled, d);
            assert!((back - amount).abs() < 1e-6, "d={} back={}", d, back);
        }
    }
}
