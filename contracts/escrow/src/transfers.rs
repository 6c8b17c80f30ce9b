use soroban_sdk::{token, Address, Env};

use crate::types::AssetKind;

// The ledger port: all value movement between the contract's custody and the
// parties goes through these two calls. A failed transfer traps and reverts
// the whole invocation, so no partial state is ever committed.

/// Pulls `amount` from `from` into the contract's custody.
pub fn pull(env: &Env, asset: &AssetKind, from: &Address, amount: i128) {
    client(env, asset).transfer(from, &env.current_contract_address(), &amount);
}

/// Pays `amount` out of custody to `to`.
pub fn pay_out(env: &Env, asset: &AssetKind, to: &Address, amount: i128) {
    client(env, asset).transfer(&env.current_contract_address(), to, &amount);
}

fn client<'a>(env: &'a Env, asset: &AssetKind) -> token::Client<'a> {
    token::Client::new(env, asset.contract())
}
