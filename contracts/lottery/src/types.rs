//! Type definitions for the commit-reveal lottery contract.

use soroban_sdk::{contracttype, Address, BytesN};

/// Storage keys for contract data
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Token,
    TicketPrice,
    FeePercent,
    CurrentRound,
    Bets,     // Map<Address, BetRecord> for the current round
    BetOrder, // Vec<Address> in bet-placement order
    PotBalance,
    FeeBalance,
}

/// Betting phase of the current round
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Open,
    Closed,
}

/// The live betting round
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    /// Round counter, starts at 0 and increments on every completed draw
    pub number: u32,
    pub phase: Phase,
    /// Ledger sequence at the moment the round closed;
    /// meaningful only while `phase` is `Closed`
    pub closed_at_ledger: u32,
}

/// A participant's commitment in the current round
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct BetRecord {
    pub participant: Address,
    /// keccak256 over the secret number and the participant address,
    /// binding the bettor to the number before the reveal phase
    pub commitment: BytesN<32>,
    /// Zero until `revealed` is set
    pub revealed_number: u64,
    pub revealed: bool,
}
