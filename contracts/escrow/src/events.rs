use soroban_sdk::{symbol_short, Address, Env};

// One notification per successful mutating operation, published as the last
// step after all state changes and transfers.

pub fn initialized(env: &Env, buyer: &Address, seller: &Address, release_deadline: u64) {
    env.events().publish(
        (symbol_short!("init"), buyer.clone(), seller.clone()),
        release_deadline,
    );
}

pub fn fee_updated(env: &Env, rate_bps: u32, floor: i128, active: bool) {
    env.events()
        .publish((symbol_short!("fee_cfg"),), (rate_bps, floor, active));
}

pub fn admin_transferred(env: &Env, previous: &Address, next: &Address) {
    env.events()
        .publish((symbol_short!("new_admin"), previous.clone()), next.clone());
}

pub fn milestones_set(env: &Env, count: u32, total_bps: u32) {
    env.events()
        .publish((symbol_short!("ms_set"),), (count, total_bps));
}

pub fn deposited(env: &Env, buyer: &Address, net: i128, fee: i128) {
    env.events()
        .publish((symbol_short!("deposit"), buyer.clone()), (net, fee));
}

pub fn delivery_confirmed(env: &Env, buyer: &Address) {
    env.events()
        .publish((symbol_short!("confirmed"),), buyer.clone());
}

pub fn funds_released(env: &Env, seller: &Address, net: i128, fee_remaining: i128) {
    env.events().publish(
        (symbol_short!("released"), seller.clone()),
        (net, fee_remaining),
    );
}

pub fn milestone_completed(env: &Env, index: u32, amount: i128) {
    env.events()
        .publish((symbol_short!("ms_done"), index), amount);
}

pub fn all_milestones_completed(env: &Env, count: u32) {
    env.events().publish((symbol_short!("ms_all"),), count);
}

pub fn milestone_released(env: &Env, index: u32, amount: i128) {
    env.events()
        .publish((symbol_short!("ms_paid"), index), amount);
}

pub fn cancelled(env: &Env, buyer: &Address, refund: i128) {
    env.events()
        .publish((symbol_short!("cancelled"), buyer.clone()), refund);
}

pub fn fees_collected(env: &Env, admin: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("fees"), admin.clone()), amount);
}
