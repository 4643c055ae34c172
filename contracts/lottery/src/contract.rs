//! Core contract implementation for the commit-reveal lottery.
//!
//! Participants commit to a secret number by submitting
//! `keccak256(number || address)` together with the ticket price. Once
//! `CLOSE_THRESHOLD` bets accumulate the round closes; participants may then
//! reveal their numbers, and after `DRAW_DELAY_LEDGERS` ledgers anyone can
//! trigger a draw. The winner is `bet_order[seed % bet_count]` where `seed`
//! is the XOR of all revealed numbers. The seed consumes no host entropy, so
//! once reveals are public the outcome is computable in advance; this
//! mirrors the source system and is documented in DESIGN.md.

use soroban_sdk::{
    contract, contractimpl, symbol_short, token, xdr::ToXdr, Address, Bytes, BytesN, Env, Map, Vec,
};

use crate::errors::ContractError;
use crate::types::{BetRecord, DataKey, Phase, Round};

/// Number of bets that closes a round
pub const CLOSE_THRESHOLD: u32 = 10;

/// Ledgers that must elapse after a round closes before it can be drawn
pub const DRAW_DELAY_LEDGERS: u32 = 10;

#[contract]
pub struct LotteryContract;

#[contractimpl]
impl LotteryContract {
    /// Initializes the contract with the fee owner, the payment token,
    /// the ticket price and the owner fee percentage (one-time only)
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        ticket_price: i128,
        fee_percent: u32,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        if env.storage().persistent().has(&DataKey::Owner) {
            return Err(ContractError::AlreadyInitialized);
        }
        if ticket_price <= 0 {
            return Err(ContractError::InvalidTicketPrice);
        }
        if fee_percent > 100 {
            return Err(ContractError::InvalidFeePercent);
        }

        env.storage().persistent().set(&DataKey::Owner, &owner);
        env.storage().persistent().set(&DataKey::Token, &token);
        env.storage().persistent().set(&DataKey::TicketPrice, &ticket_price);
        env.storage().persistent().set(&DataKey::FeePercent, &fee_percent);
        env.storage().persistent().set(&DataKey::PotBalance, &0i128);
        env.storage().persistent().set(&DataKey::FeeBalance, &0i128);

        let round = Round {
            number: 0,
            phase: Phase::Open,
            closed_at_ledger: 0,
        };
        env.storage().persistent().set(&DataKey::CurrentRound, &round);

        Ok(())
    }

    /// Places a bet for `participant`, binding them to `commitment`.
    /// `amount` must equal the ticket price exactly; the ticket is pulled
    /// from the participant's token balance. The tenth bet closes the round.
    pub fn place_bet(
        env: Env,
        participant: Address,
        commitment: BytesN<32>,
        amount: i128,
    ) -> Result<(), ContractError> {
        participant.require_auth();

        let mut round = Self::_round(&env)?;
        if round.phase != Phase::Open {
            return Err(ContractError::InvalidPhase);
        }

        let ticket_price: i128 = env
            .storage()
            .persistent()
            .get(&DataKey::TicketPrice)
            .ok_or(ContractError::NotInitialized)?;
        if amount != ticket_price {
            return Err(ContractError::ValueMismatch);
        }

        let mut bets = Self::_bets(&env);
        if bets.contains_key(participant.clone()) {
            return Err(ContractError::DuplicateBet);
        }

        let fee_percent: u32 = env
            .storage()
            .persistent()
            .get(&DataKey::FeePercent)
            .ok_or(ContractError::NotInitialized)?;

        // Truncating integer division: sub-percent dust stays in the pot
        let fee = amount
            .checked_mul(fee_percent as i128)
            .ok_or(ContractError::Overflow)?
            / 100;
        let net = amount.checked_sub(fee).ok_or(ContractError::Overflow)?;

        let fee_balance = Self::get_fee_balance(env.clone())
            .checked_add(fee)
            .ok_or(ContractError::Overflow)?;
        let pot_balance = Self::get_pot_balance(env.clone())
            .checked_add(net)
            .ok_or(ContractError::Overflow)?;

        bets.set(
            participant.clone(),
            BetRecord {
                participant: participant.clone(),
                commitment,
                revealed_number: 0,
                revealed: false,
            },
        );
        let mut order = Self::_bet_order(&env);
        order.push_back(participant.clone());

        if order.len() == CLOSE_THRESHOLD {
            round.phase = Phase::Closed;
            round.closed_at_ledger = env.ledger().sequence();
        }

        env.storage().persistent().set(&DataKey::Bets, &bets);
        env.storage().persistent().set(&DataKey::BetOrder, &order);
        env.storage().persistent().set(&DataKey::FeeBalance, &fee_balance);
        env.storage().persistent().set(&DataKey::PotBalance, &pot_balance);
        env.storage().persistent().set(&DataKey::CurrentRound, &round);

        // Pull the ticket last: a failed transfer traps and aborts the
        // whole invocation, leaving no partial state behind
        let token_addr = Self::_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &participant,
            &env.current_contract_address(),
            &amount,
        );

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("bet"), symbol_short!("placed")),
            (participant, round.number, order.len()),
        );

        if round.phase == Phase::Closed {
            #[allow(deprecated)]
            env.events().publish(
                (symbol_short!("bets"), symbol_short!("closed")),
                (round.number, round.closed_at_ledger),
            );
        }

        Ok(())
    }

    /// Reveals the secret number behind the participant's commitment.
    /// Succeeds at most once per bet and only while bets are closed.
    pub fn reveal(env: Env, participant: Address, number: u64) -> Result<(), ContractError> {
        participant.require_auth();

        let round = Self::_round(&env)?;
        if round.phase != Phase::Closed {
            return Err(ContractError::InvalidPhase);
        }

        let mut bets = Self::_bets(&env);

        // A participant with no bet at all is a commitment mismatch too
        let mut record = bets
            .get(participant.clone())
            .ok_or(ContractError::RevealMismatch)?;
        if Self::_commitment(&env, number, &participant) != record.commitment {
            return Err(ContractError::RevealMismatch);
        }
        if record.revealed {
            return Err(ContractError::AlreadyRevealed);
        }

        record.revealed_number = number;
        record.revealed = true;
        bets.set(participant.clone(), record);
        env.storage().persistent().set(&DataKey::Bets, &bets);

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("bet"), symbol_short!("revealed")),
            (participant, number, round.number),
        );

        Ok(())
    }

    /// Draws the winner of a closed round once the cooldown has elapsed.
    /// Callable by anyone. The winner index is the XOR of all revealed
    /// numbers modulo the total bet count, over bet-placement order, so a
    /// bettor who never revealed can still win. Pays out the whole pot,
    /// then reopens bets for the next round.
    pub fn draw_winner(env: Env) -> Result<Address, ContractError> {
        let round = Self::_round(&env)?;
        if round.phase != Phase::Closed {
            return Err(ContractError::InvalidPhase);
        }

        let bets = Self::_bets(&env);
        let order = Self::_bet_order(&env);

        let mut seed: u64 = 0;
        let mut contenders: u32 = 0;
        for participant in order.iter() {
            if let Some(record) = bets.get(participant) {
                if record.revealed {
                    seed ^= record.revealed_number;
                    contenders += 1;
                }
            }
        }
        if contenders == 0 {
            return Err(ContractError::NoContenders);
        }

        let current_ledger = env.ledger().sequence();
        let eligible_at = round
            .closed_at_ledger
            .checked_add(DRAW_DELAY_LEDGERS)
            .ok_or(ContractError::Overflow)?;
        if current_ledger < eligible_at {
            return Err(ContractError::CooldownNotElapsed);
        }

        let winner_index = (seed % order.len() as u64) as u32;
        let winner = order.get_unchecked(winner_index);

        let payout = Self::get_pot_balance(env.clone());

        env.storage().persistent().set(&DataKey::PotBalance, &0i128);
        env.storage().persistent().remove(&DataKey::Bets);
        env.storage().persistent().remove(&DataKey::BetOrder);

        let next_round = Round {
            number: round.number + 1,
            phase: Phase::Open,
            closed_at_ledger: 0,
        };
        env.storage().persistent().set(&DataKey::CurrentRound, &next_round);

        // Pay the winner after all state writes
        let token_addr = Self::_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &env.current_contract_address(),
            &winner,
            &payout,
        );

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("round"), symbol_short!("drawn")),
            (winner.clone(), payout, round.number),
        );

        Ok(winner)
    }

    /// Withdraws the accumulated owner fees (owner only)
    pub fn withdraw_fees(env: Env, caller: Address) -> Result<i128, ContractError> {
        caller.require_auth();

        let owner: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Owner)
            .ok_or(ContractError::NotInitialized)?;
        if caller != owner {
            return Err(ContractError::Unauthorized);
        }

        let amount = Self::get_fee_balance(env.clone());
        if amount == 0 {
            return Err(ContractError::NothingToWithdraw);
        }

        env.storage().persistent().set(&DataKey::FeeBalance, &0i128);

        let token_addr = Self::_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &env.current_contract_address(),
            &owner,
            &amount,
        );

        #[allow(deprecated)]
        env.events().publish(
            (symbol_short!("fees"), symbol_short!("paid")),
            (owner, amount),
        );

        Ok(amount)
    }

    /// Computes the commitment hash for a number and a participant:
    /// keccak256 over the big-endian number followed by the XDR-encoded
    /// address. Exposed so clients build the exact hash the contract checks.
    pub fn commitment_hash(env: Env, number: u64, participant: Address) -> BytesN<32> {
        Self::_commitment(&env, number, &participant)
    }

    pub fn get_owner(env: Env) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Owner)
    }

    pub fn get_token(env: Env) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Token)
    }

    pub fn get_ticket_price(env: Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::TicketPrice)
            .unwrap_or(0)
    }

    pub fn get_owner_fee(env: Env) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::FeePercent)
            .unwrap_or(0)
    }

    /// Returns true while the current round accepts bets
    pub fn is_open(env: Env) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::CurrentRound)
            .map(|round: Round| round.phase == Phase::Open)
            .unwrap_or(false)
    }

    pub fn get_pot_balance(env: Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::PotBalance)
            .unwrap_or(0)
    }

    pub fn get_fee_balance(env: Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::FeeBalance)
            .unwrap_or(0)
    }

    /// Returns the current round number
    pub fn get_round(env: Env) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::CurrentRound)
            .map(|round: Round| round.number)
            .unwrap_or(0)
    }

    /// Returns the participant's bet in the current round, if any
    pub fn get_bet(env: Env, participant: Address) -> Option<BetRecord> {
        Self::_bets(&env).get(participant)
    }

    /// Returns the number of bets placed in the current round
    pub fn get_bet_count(env: Env) -> u32 {
        Self::_bet_order(&env).len()
    }

    fn _round(env: &Env) -> Result<Round, ContractError> {
        env.storage()
            .persistent()
            .get(&DataKey::CurrentRound)
            .ok_or(ContractError::NotInitialized)
    }

    fn _token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .persistent()
            .get(&DataKey::Token)
            .ok_or(ContractError::NotInitialized)
    }

    fn _bets(env: &Env) -> Map<Address, BetRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Bets)
            .unwrap_or(Map::new(env))
    }

    fn _bet_order(env: &Env) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::BetOrder)
            .unwrap_or(Vec::new(env))
    }

    // Number first, then identity: the binding order matters
    fn _commitment(env: &Env, number: u64, participant: &Address) -> BytesN<32> {
        let mut preimage = Bytes::from_array(env, &number.to_be_bytes());
        preimage.append(&participant.clone().to_xdr(env));
        env.crypto().keccak256(&preimage).to_bytes()
    }
}
