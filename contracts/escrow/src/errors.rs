use soroban_sdk::contracterror;

/// Every rejection an escrow operation can produce. Discriminants are part of
/// the contract surface and must stay stable.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EscrowError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidSeller = 3,
    InvalidTimeout = 4,

    // Fee policy
    FeeTooHigh = 5,

    // Milestone definition
    InvalidMilestoneCount = 6,
    LengthMismatch = 7,
    EmptyDescription = 8,
    ZeroShare = 9,
    SharesNotWhole = 10,
    MilestonesAlreadySet = 11,

    // Deposit
    AlreadyDeposited = 12,
    ZeroAmount = 13,
    AmountBelowFee = 14,

    // Release / cancellation
    NoFunds = 15,
    UseMilestoneApi = 16,
    TooEarly = 17,
    PastDeadline = 18,
    AlreadyConfirmed = 19,
    EscrowNotActive = 20,

    // Milestone progress
    MilestoneOutOfRange = 21,
    MilestoneAlreadyCompleted = 22,
    MilestoneOutOfOrder = 23,
    MilestoneNotCompleted = 24,
    MilestoneAlreadyReleased = 25,

    // Fee collection
    NoFees = 26,
    EscrowNotSettled = 27,

    Overflow = 28,
    Reentrancy = 29,
}
