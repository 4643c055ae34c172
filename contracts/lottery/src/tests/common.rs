//! Shared fixtures for the lottery tests.

use crate::contract::{LotteryContract, LotteryContractClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, Vec,
};

pub const TICKET_PRICE: i128 = 100;
pub const FEE_PERCENT: u32 = 5;

pub struct LotteryTest {
    pub env: Env,
    pub client: LotteryContractClient<'static>,
    pub owner: Address,
    pub token: TokenClient<'static>,
    pub token_admin: StellarAssetClient<'static>,
}

pub fn setup() -> LotteryTest {
    setup_with(TICKET_PRICE, FEE_PERCENT)
}

pub fn setup_with(ticket_price: i128, fee_percent: u32) -> LotteryTest {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(LotteryContract, ());
    let client = LotteryContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let issuer = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(issuer);
    let token = TokenClient::new(&env, &sac.address());
    let token_admin = StellarAssetClient::new(&env, &sac.address());

    client.initialize(&owner, &sac.address(), &ticket_price, &fee_percent);

    LotteryTest {
        env,
        client,
        owner,
        token,
        token_admin,
    }
}

/// Funds one fresh participant per number and places one bet each,
/// committing to the corresponding number. Returns the bettors in
/// bet-placement order.
pub fn place_bets(t: &LotteryTest, numbers: &[u64]) -> Vec<Address> {
    let ticket_price = t.client.get_ticket_price();
    let mut bettors = Vec::new(&t.env);
    for number in numbers {
        let bettor = Address::generate(&t.env);
        t.token_admin.mint(&bettor, &ticket_price);
        let commitment = t.client.commitment_hash(number, &bettor);
        t.client.place_bet(&bettor, &commitment, &ticket_price);
        bettors.push_back(bettor);
    }
    bettors
}
