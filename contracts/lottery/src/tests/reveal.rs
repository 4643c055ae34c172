//! Tests for commitment reveals.

use crate::errors::ContractError;
use soroban_sdk::{testutils::Address as _, Address};

use super::common::{place_bets, setup};

#[test]
fn test_reveal_requires_closed_phase() {
    let t = setup();

    let bettors = place_bets(&t, &[3]);
    assert_eq!(t.client.is_open(), true);

    let result = t.client.try_reveal(&bettors.get_unchecked(0), &3);
    assert_eq!(result, Err(Ok(ContractError::InvalidPhase)));
}

#[test]
fn test_reveal_marks_record() {
    let t = setup();

    let bettors = place_bets(&t, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(t.client.is_open(), false);

    let bettor = bettors.get_unchecked(3);
    t.client.reveal(&bettor, &3);

    let record = t.client.get_bet(&bettor).unwrap();
    assert_eq!(record.revealed, true);
    assert_eq!(record.revealed_number, 3);

    // Other records are untouched
    let other = t.client.get_bet(&bettors.get_unchecked(4)).unwrap();
    assert_eq!(other.revealed, false);
}

#[test]
fn test_reveal_wrong_number_rejected() {
    let t = setup();

    let bettors = place_bets(&t, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let bettor = bettors.get_unchecked(3);
    let result = t.client.try_reveal(&bettor, &4);
    assert_eq!(result, Err(Ok(ContractError::RevealMismatch)));

    let record = t.client.get_bet(&bettor).unwrap();
    assert_eq!(record.revealed, false);
}

#[test]
fn test_reveal_without_bet_rejected() {
    let t = setup();

    place_bets(&t, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let stranger = Address::generate(&t.env);
    let result = t.client.try_reveal(&stranger, &0);
    assert_eq!(result, Err(Ok(ContractError::RevealMismatch)));
}

#[test]
fn test_reveal_only_once() {
    let t = setup();

    let bettors = place_bets(&t, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let bettor = bettors.get_unchecked(3);

    t.client.reveal(&bettor, &3);

    // A wrong number after a successful reveal still reads as a mismatch
    let result = t.client.try_reveal(&bettor, &4);
    assert_eq!(result, Err(Ok(ContractError::RevealMismatch)));

    // The correct number a second time is the double-reveal case
    let result = t.client.try_reveal(&bettor, &3);
    assert_eq!(result, Err(Ok(ContractError::AlreadyRevealed)));
}
