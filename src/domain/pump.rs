use serde::{Deserialize, Serialize};

/// Pump bonding-curve status machine, matching the Go
/// `original_source/rc_dex/consumer/internal/logic/block/pump.go` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpStatus {
    NotStart,
    Create,
    Trading,
    Migrating,
    End,
}

impl PumpStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            PumpStatus::NotStart => 0,
            PumpStatus::Create => -1,
            PumpStatus::Trading => 1,
            PumpStatus::Migrating => 2,
            PumpStatus::End => 3,
        }
    }

    pub fn from_i64(v: i64) -> Option<PumpStatus> {
        match v {
            0 => Some(PumpStatus::NotStart),
            -1 => Some(PumpStatus::Create),
            1 => Some(PumpStatus::Trading),
            2 => Some(PumpStatus::Migrating),
            3 => Some(PumpStatus::End),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_i64() {
        for s in [
            PumpStatus::NotStart,
            PumpStatus::Create,
            PumpStatus::Trading,
            PumpStatus::Migrating,
            PumpStatus::End,
        ] {
            assert_eq!(PumpStatus::from_i64(s.as_i64()), Some(s));
        }
    }
}
