#![no_std]

mod contract;
mod errors;
mod types;

#[cfg(test)]
mod tests;

pub use contract::{LotteryContract, LotteryContractClient, CLOSE_THRESHOLD, DRAW_DELAY_LEDGERS};
pub use errors::ContractError;
pub use types::{BetRecord, Phase, Round};
