use soroban_sdk::{Env, Vec};

use crate::errors::EscrowError;
use crate::fee::FeeConfig;
use crate::types::{DataKey, EscrowAccount, Milestone};

// A deployed contract holds exactly one escrow, so the whole aggregate lives
// in instance storage.

pub fn has_account(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Account)
}

pub fn load_account(env: &Env) -> Result<EscrowAccount, EscrowError> {
    env.storage()
        .instance()
        .get(&DataKey::Account)
        .ok_or(EscrowError::NotInitialized)
}

pub fn save_account(env: &Env, account: &EscrowAccount) {
    env.storage().instance().set(&DataKey::Account, account);
}

pub fn load_milestones(env: &Env) -> Vec<Milestone> {
    env.storage()
        .instance()
        .get(&DataKey::Milestones)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_milestones(env: &Env, entries: &Vec<Milestone>) {
    env.storage().instance().set(&DataKey::Milestones, entries);
}

pub fn load_fee_config(env: &Env) -> Result<FeeConfig, EscrowError> {
    env.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .ok_or(EscrowError::NotInitialized)
}

pub fn save_fee_config(env: &Env, config: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, config);
}

/// Single-acquisition reentrancy lock, held by every operation that performs
/// an external transfer. A failed operation reverts its storage, so the lock
/// clears on every exit path.
pub fn acquire_lock(env: &Env) -> Result<(), EscrowError> {
    let locked: bool = env
        .storage()
        .instance()
        .get(&DataKey::Lock)
        .unwrap_or(false);
    if locked {
        return Err(EscrowError::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Lock, &true);
    Ok(())
}

pub fn release_lock(env: &Env) {
    env.storage().instance().set(&DataKey::Lock, &false);
}
