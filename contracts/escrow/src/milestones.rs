use soroban_sdk::{Env, String, Vec};

use crate::errors::EscrowError;
use crate::fee::BPS_DENOMINATOR;
use crate::types::Milestone;

pub const MAX_MILESTONES: u32 = 10;

/// Validates a milestone definition and builds the ledger entries. Shares are
/// basis points of the net amount and must sum to exactly 100%.
pub fn build(
    env: &Env,
    descriptions: &Vec<String>,
    shares: &Vec<u32>,
) -> Result<Vec<Milestone>, EscrowError> {
    let count = descriptions.len();
    if count == 0 || count > MAX_MILESTONES {
        return Err(EscrowError::InvalidMilestoneCount);
    }
    if shares.len() != count {
        return Err(EscrowError::LengthMismatch);
    }

    let mut total: u32 = 0;
    let mut entries = Vec::new(env);
    for i in 0..count {
        let description = descriptions.get_unchecked(i);
        let share = shares.get_unchecked(i);
        if description.len() == 0 {
            return Err(EscrowError::EmptyDescription);
        }
        if share == 0 {
            return Err(EscrowError::ZeroShare);
        }
        total = total
            .checked_add(share)
            .ok_or(EscrowError::SharesNotWhole)?;
        entries.push_back(Milestone {
            description,
            share_bps: share,
            amount: 0,
            completed: false,
            released: false,
        });
    }
    if total != BPS_DENOMINATOR {
        return Err(EscrowError::SharesNotWhole);
    }
    Ok(entries)
}

/// Fixes every entry's amount from its share of the net deposit. Called once,
/// right after the first deposit; amounts are never recomputed. Integer
/// division truncates, so the amounts may sum to slightly less than `net`.
pub fn materialize(entries: &mut Vec<Milestone>, net: i128) -> Result<(), EscrowError> {
    for i in 0..entries.len() {
        let mut entry = entries.get_unchecked(i);
        entry.amount = net
            .checked_mul(entry.share_bps as i128)
            .ok_or(EscrowError::Overflow)?
            / BPS_DENOMINATOR as i128;
        entries.set(i, entry);
    }
    Ok(())
}
