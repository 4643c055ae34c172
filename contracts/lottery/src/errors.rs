//! Error codes for the commit-reveal lottery contract.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidFeePercent = 3,
    InvalidTicketPrice = 4,
    /// Bets must be open (placing) or closed (revealing, drawing)
    InvalidPhase = 5,
    /// Bet value must equal the ticket price exactly
    ValueMismatch = 6,
    /// A previous bet by the same participant exists this round
    DuplicateBet = 7,
    /// Number does not hash to the stored commitment (or no bet exists)
    RevealMismatch = 8,
    AlreadyRevealed = 9,
    CooldownNotElapsed = 10,
    /// A draw needs at least one revealed bet
    NoContenders = 11,
    Unauthorized = 12,
    NothingToWithdraw = 13,
    Overflow = 14,
}
