use soroban_sdk::contracttype;

use crate::errors::EscrowError;

pub const BPS_DENOMINATOR: u32 = 10_000;

/// Hard ceiling on the platform fee rate: 5%.
pub const MAX_FEE_BPS: u32 = 500;

/// Default policy: 2% with a 0.01-unit floor (in stroops for a 7-decimal
/// asset), active.
pub const DEFAULT_FEE_BPS: u32 = 200;
pub const DEFAULT_FEE_FLOOR: i128 = 100_000;

/// Platform fee policy. Mutable by the administrator only; amounts computed
/// before a change are never revised, since the net amount is fixed at
/// deposit time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub rate_bps: u32,
    pub floor: i128,
    pub active: bool,
}

impl FeeConfig {
    pub fn default_config() -> Self {
        Self {
            rate_bps: DEFAULT_FEE_BPS,
            floor: DEFAULT_FEE_FLOOR,
            active: true,
        }
    }

    pub fn validated(rate_bps: u32, floor: i128, active: bool) -> Result<Self, EscrowError> {
        if rate_bps > MAX_FEE_BPS {
            return Err(EscrowError::FeeTooHigh);
        }
        Ok(Self {
            rate_bps,
            floor,
            active,
        })
    }

    /// Fee deducted from a gross deposit: zero when inactive, otherwise the
    /// percentage cut with the floor as a lower bound.
    pub fn fee_for(&self, gross: i128) -> Result<i128, EscrowError> {
        if !self.active {
            return Ok(0);
        }
        let cut = gross
            .checked_mul(self.rate_bps as i128)
            .ok_or(EscrowError::Overflow)?
            / BPS_DENOMINATOR as i128;
        Ok(if cut > self.floor { cut } else { self.floor })
    }
}
