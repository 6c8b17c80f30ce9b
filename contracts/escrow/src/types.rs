use soroban_sdk::{contracttype, Address, Env, String};

/// The asset held in custody. Native lumens move through the Stellar Asset
/// Contract just like any other token, so both variants carry the asset
/// contract address; the variant records which kind the deployer chose.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetKind {
    Native(Address),
    Token(Address),
}

impl AssetKind {
    pub fn contract(&self) -> &Address {
        match self {
            AssetKind::Native(addr) | AssetKind::Token(addr) => addr,
        }
    }
}

/// Aggregate state for one escrow instance.
///
/// `net_amount == 0` means no deposit has been made yet. `is_cancelled` and
/// `is_released` are one-way flags and at most one of them ever becomes true.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowAccount {
    pub buyer: Address,
    pub seller: Address,
    pub admin: Address,
    pub asset: AssetKind,
    pub net_amount: i128,
    pub collected_fee: i128,
    pub fee_rate_bps: u32,
    pub release_deadline: u64,
    pub total_released: i128,
    pub has_milestones: bool,
    pub completed_count: u32,
    pub is_confirmed: bool,
    pub is_cancelled: bool,
    pub is_released: bool,
}

impl EscrowAccount {
    pub fn is_active(&self) -> bool {
        !self.is_cancelled && !self.is_released
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.is_released {
            Lifecycle::Released
        } else if self.is_cancelled {
            Lifecycle::Cancelled
        } else if self.is_confirmed {
            Lifecycle::Confirmed
        } else if self.net_amount > 0 {
            Lifecycle::Pending
        } else {
            Lifecycle::AwaitingDeposit
        }
    }
}

/// Derived lifecycle state, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    AwaitingDeposit,
    Pending,
    Confirmed,
    Released,
    Cancelled,
}

/// One milestone entry. `amount` stays zero until the first deposit fixes it
/// from the share; it is never recomputed afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub description: String,
    pub share_bps: u32,
    pub amount: i128,
    pub completed: bool,
    pub released: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Account,
    Milestones,
    FeeConfig,
    Lock,
}

/// Maps the derived lifecycle plus milestone progress to a display string.
/// The "k/n" rendering is formatting only; counts never exceed two digits.
pub fn render_status(env: &Env, account: &EscrowAccount, milestone_total: u32) -> String {
    match account.lifecycle() {
        Lifecycle::Released => String::from_str(env, "Released"),
        Lifecycle::Cancelled => String::from_str(env, "Cancelled"),
        Lifecycle::Confirmed => String::from_str(env, "Confirmed"),
        Lifecycle::AwaitingDeposit => String::from_str(env, "Awaiting Deposit"),
        Lifecycle::Pending => {
            if account.has_milestones {
                milestone_progress(env, account.completed_count, milestone_total)
            } else {
                String::from_str(env, "Pending")
            }
        }
    }
}

fn milestone_progress(env: &Env, completed: u32, total: u32) -> String {
    const PREFIX: &[u8] = b"Pending (";
    const SUFFIX: &[u8] = b" milestones)";
    let mut buf = [0u8; 32];
    let mut len = 0;
    for b in PREFIX {
        buf[len] = *b;
        len += 1;
    }
    len += write_count(&mut buf[len..], completed);
    buf[len] = b'/';
    len += 1;
    len += write_count(&mut buf[len..], total);
    for b in SUFFIX {
        buf[len] = *b;
        len += 1;
    }
    String::from_bytes(env, &buf[..len])
}

fn write_count(buf: &mut [u8], value: u32) -> usize {
    if value >= 10 {
        buf[0] = b'0' + (value / 10 % 10) as u8;
        buf[1] = b'0' + (value % 10) as u8;
        2
    } else {
        buf[0] = b'0' + value as u8;
        1
    }
}
