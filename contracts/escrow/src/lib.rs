#![no_std]

use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, String, Vec};

pub mod errors;
pub mod events;
pub mod fee;
pub mod milestones;
pub mod storage;
pub mod transfers;
pub mod types;


pub use errors::EscrowError;
pub use fee::FeeConfig;
pub use types::{AssetKind, EscrowAccount, Milestone};

contractmeta!(
    key = "Description",
    val = "Custodial escrow with milestone releases and a platform fee"
);

#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    /// Sets up the escrow between `buyer` and `seller`. The release deadline
    /// is fixed at creation time plus `timeout_secs` and never moves.
    pub fn initialize(
        env: Env,
        buyer: Address,
        seller: Address,
        admin: Address,
        asset: AssetKind,
        timeout_secs: u64,
    ) -> Result<(), EscrowError> {
        if storage::has_account(&env) {
            return Err(EscrowError::AlreadyInitialized);
        }
        if seller == buyer {
            return Err(EscrowError::InvalidSeller);
        }
        if timeout_secs == 0 {
            return Err(EscrowError::InvalidTimeout);
        }
        buyer.require_auth();

        let release_deadline = env
            .ledger()
            .timestamp()
            .checked_add(timeout_secs)
            .ok_or(EscrowError::InvalidTimeout)?;

        let account = EscrowAccount {
            buyer: buyer.clone(),
            seller: seller.clone(),
            admin,
            asset,
            net_amount: 0,
            collected_fee: 0,
            fee_rate_bps: fee::DEFAULT_FEE_BPS,
            release_deadline,
            total_released: 0,
            has_milestones: false,
            completed_count: 0,
            is_confirmed: false,
            is_cancelled: false,
            is_released: false,
        };
        storage::save_account(&env, &account);
        storage::save_fee_config(&env, &FeeConfig::default_config());

        events::initialized(&env, &buyer, &seller, release_deadline);
        Ok(())
    }

    /// Replaces the fee policy. Administrator only; the rate is capped at 5%.
    /// Has no effect on an already-made deposit, whose net amount is fixed.
    pub fn update_fee_config(
        env: Env,
        rate_bps: u32,
        floor: i128,
        active: bool,
    ) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.admin.require_auth();

        let config = FeeConfig::validated(rate_bps, floor, active)?;
        storage::save_fee_config(&env, &config);
        if account.net_amount == 0 {
            account.fee_rate_bps = rate_bps;
            storage::save_account(&env, &account);
        }

        events::fee_updated(&env, rate_bps, floor, active);
        Ok(())
    }

    /// Hands the administrator role to another identity.
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.admin.require_auth();

        let previous = account.admin.clone();
        account.admin = new_admin.clone();
        storage::save_account(&env, &account);

        events::admin_transferred(&env, &previous, &new_admin);
        Ok(())
    }

    /// Attaches a milestone ledger. Buyer only, before any deposit, at most
    /// once; the composition is immutable afterwards.
    pub fn set_milestones(
        env: Env,
        descriptions: Vec<String>,
        shares: Vec<u32>,
    ) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.buyer.require_auth();

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if account.net_amount != 0 {
            return Err(EscrowError::AlreadyDeposited);
        }
        if account.has_milestones {
            return Err(EscrowError::MilestonesAlreadySet);
        }

        let entries = milestones::build(&env, &descriptions, &shares)?;
        account.has_milestones = true;
        storage::save_milestones(&env, &entries);
        storage::save_account(&env, &account);

        events::milestones_set(&env, entries.len(), fee::BPS_DENOMINATOR);
        Ok(())
    }

    /// Funds the escrow. Buyer only, exactly once. The fee is taken off the
    /// gross amount; milestone amounts are fixed from the net at this point.
    pub fn deposit(env: Env, amount: i128) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.buyer.require_auth();
        storage::acquire_lock(&env)?;

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if account.net_amount != 0 {
            return Err(EscrowError::AlreadyDeposited);
        }
        if amount <= 0 {
            return Err(EscrowError::ZeroAmount);
        }

        let config = storage::load_fee_config(&env)?;
        let fee = config.fee_for(amount)?;
        if amount <= fee {
            return Err(EscrowError::AmountBelowFee);
        }
        let net = amount - fee;

        account.net_amount = net;
        account.collected_fee = fee;
        storage::save_account(&env, &account);
        if account.has_milestones {
            let mut entries = storage::load_milestones(&env);
            milestones::materialize(&mut entries, net)?;
            storage::save_milestones(&env, &entries);
        }

        transfers::pull(&env, &account.asset, &account.buyer, amount);
        storage::release_lock(&env);

        events::deposited(&env, &account.buyer, net, fee);
        Ok(())
    }

    /// Buyer confirms delivery and the funds go to the seller immediately.
    /// Milestone escrows confirm through `complete_milestone` instead.
    pub fn confirm_delivery(env: Env) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.buyer.require_auth();
        storage::acquire_lock(&env)?;

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if account.has_milestones {
            return Err(EscrowError::UseMilestoneApi);
        }
        if account.net_amount == 0 {
            return Err(EscrowError::NoFunds);
        }

        account.is_confirmed = true;
        settle_to_seller(&env, &mut account);
        storage::release_lock(&env);

        events::delivery_confirmed(&env, &account.buyer);
        events::funds_released(&env, &account.seller, account.net_amount, account.collected_fee);
        Ok(())
    }

    /// Seller claims the funds, either after buyer confirmation or once the
    /// release deadline has passed.
    pub fn release_funds(env: Env) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.seller.require_auth();
        storage::acquire_lock(&env)?;

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if account.has_milestones {
            return Err(EscrowError::UseMilestoneApi);
        }
        if account.net_amount == 0 {
            return Err(EscrowError::NoFunds);
        }
        if !account.is_confirmed && env.ledger().timestamp() < account.release_deadline {
            return Err(EscrowError::TooEarly);
        }

        settle_to_seller(&env, &mut account);
        storage::release_lock(&env);

        events::funds_released(&env, &account.seller, account.net_amount, account.collected_fee);
        Ok(())
    }

    /// Buyer marks milestone `index` as done. Completion is strictly ordered;
    /// completing the last milestone confirms the whole escrow.
    pub fn complete_milestone(env: Env, index: u32) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.buyer.require_auth();

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if account.net_amount == 0 {
            return Err(EscrowError::NoFunds);
        }

        let mut entries = storage::load_milestones(&env);
        if index >= entries.len() {
            return Err(EscrowError::MilestoneOutOfRange);
        }
        let mut entry = entries.get_unchecked(index);
        if entry.completed {
            return Err(EscrowError::MilestoneAlreadyCompleted);
        }
        if index > 0 && !entries.get_unchecked(index - 1).completed {
            return Err(EscrowError::MilestoneOutOfOrder);
        }

        entry.completed = true;
        let amount = entry.amount;
        entries.set(index, entry);
        account.completed_count += 1;
        let total = entries.len();
        let all_done = account.completed_count == total;
        if all_done {
            account.is_confirmed = true;
        }
        storage::save_milestones(&env, &entries);
        storage::save_account(&env, &account);

        if all_done {
            events::all_milestones_completed(&env, total);
        } else {
            events::milestone_completed(&env, index, amount);
        }
        Ok(())
    }

    /// Seller collects the payout for a completed milestone. Releases may
    /// happen in any order once the milestone is completed.
    pub fn release_milestone(env: Env, index: u32) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.seller.require_auth();
        storage::acquire_lock(&env)?;

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        let mut entries = storage::load_milestones(&env);
        if index >= entries.len() {
            return Err(EscrowError::MilestoneOutOfRange);
        }
        let mut entry = entries.get_unchecked(index);
        if !entry.completed {
            return Err(EscrowError::MilestoneNotCompleted);
        }
        if entry.released {
            return Err(EscrowError::MilestoneAlreadyReleased);
        }

        entry.released = true;
        let amount = entry.amount;
        entries.set(index, entry);
        account.total_released = account
            .total_released
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        let fully_released = account.total_released == account.net_amount;
        if fully_released {
            account.is_released = true;
        }
        storage::save_milestones(&env, &entries);
        storage::save_account(&env, &account);

        transfers::pay_out(&env, &account.asset, &account.seller, amount);
        storage::release_lock(&env);

        events::milestone_released(&env, index, amount);
        if fully_released {
            events::funds_released(&env, &account.seller, account.net_amount, account.collected_fee);
        }
        Ok(())
    }

    /// Buyer cancels before the deadline and before confirmation. Refunds the
    /// unreleased remainder; the collected fee is never refunded.
    pub fn cancel_escrow(env: Env) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.buyer.require_auth();
        storage::acquire_lock(&env)?;

        if !account.is_active() {
            return Err(EscrowError::EscrowNotActive);
        }
        if env.ledger().timestamp() >= account.release_deadline {
            return Err(EscrowError::PastDeadline);
        }
        if account.is_confirmed {
            return Err(EscrowError::AlreadyConfirmed);
        }

        account.is_cancelled = true;
        let refund = account.net_amount - account.total_released;
        storage::save_account(&env, &account);

        if refund > 0 {
            transfers::pay_out(&env, &account.asset, &account.buyer, refund);
        }
        storage::release_lock(&env);

        events::cancelled(&env, &account.buyer, refund);
        Ok(())
    }

    /// Administrator withdraws the collected fee once the escrow has settled
    /// (released or cancelled). One-shot per nonzero fee.
    pub fn collect_fees(env: Env) -> Result<(), EscrowError> {
        let mut account = storage::load_account(&env)?;
        account.admin.require_auth();
        storage::acquire_lock(&env)?;

        if account.collected_fee == 0 {
            return Err(EscrowError::NoFees);
        }
        if !account.is_released && !account.is_cancelled {
            return Err(EscrowError::EscrowNotSettled);
        }

        let amount = account.collected_fee;
        account.collected_fee = 0;
        storage::save_account(&env, &account);

        transfers::pay_out(&env, &account.asset, &account.admin, amount);
        storage::release_lock(&env);

        events::fees_collected(&env, &account.admin, amount);
        Ok(())
    }

    // -- Read surface -----------------------------------------------------

    pub fn calculate_fee(env: Env, amount: i128) -> Result<i128, EscrowError> {
        storage::load_fee_config(&env)?.fee_for(amount)
    }

    pub fn buyer(env: Env) -> Result<Address, EscrowError> {
        Ok(storage::load_account(&env)?.buyer)
    }

    pub fn seller(env: Env) -> Result<Address, EscrowError> {
        Ok(storage::load_account(&env)?.seller)
    }

    pub fn admin(env: Env) -> Result<Address, EscrowError> {
        Ok(storage::load_account(&env)?.admin)
    }

    pub fn asset(env: Env) -> Result<AssetKind, EscrowError> {
        Ok(storage::load_account(&env)?.asset)
    }

    pub fn net_amount(env: Env) -> Result<i128, EscrowError> {
        Ok(storage::load_account(&env)?.net_amount)
    }

    pub fn collected_fee(env: Env) -> Result<i128, EscrowError> {
        Ok(storage::load_account(&env)?.collected_fee)
    }

    pub fn fee_rate(env: Env) -> Result<u32, EscrowError> {
        Ok(storage::load_account(&env)?.fee_rate_bps)
    }

    pub fn fee_config(env: Env) -> Result<FeeConfig, EscrowError> {
        storage::load_fee_config(&env)
    }

    pub fn release_deadline(env: Env) -> Result<u64, EscrowError> {
        Ok(storage::load_account(&env)?.release_deadline)
    }

    pub fn total_released(env: Env) -> Result<i128, EscrowError> {
        Ok(storage::load_account(&env)?.total_released)
    }

    pub fn milestones(env: Env) -> Vec<Milestone> {
        storage::load_milestones(&env)
    }

    pub fn milestone_count(env: Env) -> u32 {
        storage::load_milestones(&env).len()
    }

    pub fn completed_milestones(env: Env) -> Result<u32, EscrowError> {
        Ok(storage::load_account(&env)?.completed_count)
    }

    pub fn status(env: Env) -> Result<String, EscrowError> {
        let account = storage::load_account(&env)?;
        let total = storage::load_milestones(&env).len();
        Ok(types::render_status(&env, &account, total))
    }
}

/// Terminal step of the non-milestone path: commit the released state, then
/// move the whole net amount to the seller.
fn settle_to_seller(env: &Env, account: &mut EscrowAccount) {
    account.is_released = true;
    account.total_released = account.net_amount;
    storage::save_account(env, account);
    transfers::pay_out(env, &account.asset, &account.seller, account.net_amount);
}
