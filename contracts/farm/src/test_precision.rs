#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

extern crate std;

use super::{FarmError, RewardFarm, RewardFarmClient};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, U256,
};

const ONE: i128 = 1_000_000_000_000_000_000;
const START: u32 = 100;

// ── Mock stake token with configurable decimals ──────────────────

#[contracttype]
#[derive(Clone)]
enum MockTokenKey {
    Decimals,
    Balance(Address),
}

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn init(env: Env, decimals: u32) {
        env.storage().instance().set(&MockTokenKey::Decimals, &decimals);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let key = MockTokenKey::Balance(to);
        let balance: i128 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(balance + amount));
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        let from_key = MockTokenKey::Balance(from);
        let from_balance: i128 = env.storage().instance().get(&from_key).unwrap_or(0);
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .instance()
            .set(&from_key, &(from_balance - amount));

        let to_key = MockTokenKey::Balance(to);
        let to_balance: i128 = env.storage().instance().get(&to_key).unwrap_or(0);
        env.storage().instance().set(&to_key, &(to_balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&MockTokenKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockTokenKey::Decimals)
            .unwrap_or(7)
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn setup() -> (Env, RewardFarmClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(START);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RewardFarm, ());
    let client = RewardFarmClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &reward_token, &ONE);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(1_000_000 * ONE));

    (env, client, owner)
}

/// Registers a mock stake asset with `decimals` as a new pool.
fn add_mock_pool(
    env: &Env,
    client: &RewardFarmClient,
    owner: &Address,
    decimals: u32,
) -> (u32, MockTokenClient<'static>) {
    let asset = MockTokenClient::new(env, &env.register(MockToken, ()));
    asset.init(&decimals);
    let index = client.add_pool(owner, &10, &asset.address);
    (index, asset)
}

fn staker(env: &Env, asset: &MockTokenClient, amount: i128) -> Address {
    let account = Address::generate(env);
    asset.mint(&account, &amount);
    account
}

fn advance(env: &Env, blocks: u32) {
    env.ledger()
        .set_sequence_number(env.ledger().sequence() + blocks);
}

fn wide(env: &Env, value: u128) -> U256 {
    U256::from_u128(env, value)
}

/// Deposits `amount` of a `decimals` asset, lets two ledgers pass and checks
/// the synced accumulator and the staker's pending reward.
fn assert_two_ledger_accrual(decimals: u32, amount: i128, acc: u128, pending: i128) {
    let (env, client, owner) = setup();
    let (pool, asset) = add_mock_pool(&env, &client, &owner, decimals);
    let user = staker(&env, &asset, amount);
    client.deposit(&user, &pool, &amount, &user);

    advance(&env, 2);
    let record = client.sync_pool(&pool);
    assert_eq!(record.acc_reward_per_share, wide(&env, acc));
    assert!(record.acc_reward_per_share > wide(&env, 0));
    assert_eq!(client.pending_reward(&pool, &user), pending);
}

// ======================== Scale per asset ========================

#[test]
fn test_precision_follows_stake_decimals() {
    let (env, client, owner) = setup();
    let (p0, _) = add_mock_pool(&env, &client, &owner, 0);
    let (p18, _) = add_mock_pool(&env, &client, &owner, 18);
    let (p27, _) = add_mock_pool(&env, &client, &owner, 27);

    assert_eq!(client.pool_info(&p0).precision, wide(&env, 100_000_000_000));
    assert_eq!(
        client.pool_info(&p18).precision,
        wide(&env, 100_000_000_000_000_000_000_000_000_000)
    );
    assert_eq!(
        client.pool_info(&p27).precision,
        wide(&env, 100_000_000_000_000_000_000_000_000_000_000_000_000)
    );
}

#[test]
fn test_stake_asset_past_27_decimals_is_rejected() {
    let (env, client, owner) = setup();
    let asset = MockTokenClient::new(&env, &env.register(MockToken, ()));
    asset.init(&28);

    let result = client.try_add_pool(&owner, &10, &asset.address);
    assert_eq!(result.unwrap_err().unwrap(), FarmError::ArithmeticOverflow);
    assert_eq!(client.pool_length(), 0);
}

// ======================== 18-decimal LP shares ========================

#[test]
fn test_base_case_hundred_tokens() {
    assert_two_ledger_accrual(
        18,
        100 * ONE,
        2_000_000_000_000_000_000_000_000_000,
        2 * ONE,
    );
}

#[test]
fn test_hundred_dollars_of_angel_vault_shares() {
    // $100 at $3.6e9 per share.
    assert_two_ledger_accrual(
        18,
        27_777_777_777,
        7_200_000_000_201_600_000_005_644_800_000_158_054,
        2 * ONE - 1,
    );
}

#[test]
fn test_thousand_dollars_of_slp() {
    // $1000 at $360_000 per share.
    assert_two_ledger_accrual(
        18,
        2_777_777_777_777_777,
        72_000_000_000_000_020_160_000_000_000_005,
        2 * ONE - 1,
    );
}

#[test]
fn test_billion_dollars_of_slp() {
    assert_two_ledger_accrual(
        18,
        2_777_777_777_777_777_777_777,
        72_000_000_000_000_000_000_020_160,
        2 * ONE - 1,
    );
}

#[test]
fn test_hundred_dollars_of_balancer_shares() {
    // $100 at $120 per share.
    assert_two_ledger_accrual(
        18,
        833_333_333_333_333_333,
        240_000_000_000_000_000_096_000_000_000,
        2 * ONE - 1,
    );
}

#[test]
fn test_billion_dollars_of_balancer_shares() {
    assert_two_ledger_accrual(
        18,
        8_333_333_333_333_333_333_333_333,
        24_000_000_000_000_000_000_000,
        2 * ONE - 1,
    );
}

#[test]
fn test_hundred_dollars_of_1inch_shares() {
    // $100 at $20 per share.
    assert_two_ledger_accrual(
        18,
        5 * ONE,
        40_000_000_000_000_000_000_000_000_000,
        2 * ONE,
    );
}

#[test]
fn test_billion_dollars_of_1inch_shares_keeps_accumulator_positive() {
    assert_two_ledger_accrual(
        18,
        50_000_000 * ONE,
        4_000_000_000_000_000_000_000,
        2 * ONE,
    );
}

// ======================== Low-decimal assets ========================

#[test]
fn test_whole_unit_asset() {
    assert_two_ledger_accrual(0, 100, 2_000_000_000_000_000_000_000_000_000, 2 * ONE);
}

#[test]
fn test_two_decimal_asset() {
    assert_two_ledger_accrual(
        2,
        12_345,
        1_620_089_104_900_769_542_324_827_865,
        2 * ONE - 1,
    );
}

#[test]
fn test_six_decimal_asset() {
    assert_two_ledger_accrual(
        6,
        1_000_000_000,
        200_000_000_000_000_000_000_000_000,
        2 * ONE,
    );
}

// ======================== Accumulator past i128 ========================

#[test]
fn test_high_decimal_pool_keeps_working_past_i128() {
    let (env, client, owner) = setup();
    let (pool, asset) = add_mock_pool(&env, &client, &owner, 18);
    let user = staker(&env, &asset, 27_777_777_777);
    client.deposit(&user, &pool, &27_777_777_777, &user);

    advance(&env, 100);
    let record = client.sync_pool(&pool);
    assert!(record.acc_reward_per_share.to_u128().is_none());

    assert_eq!(client.harvest(&user, &pool, &user), 100 * ONE - 1);
    assert_eq!(client.pending_reward(&pool, &user), 0);
    client.withdraw(&user, &pool, &27_777_777_777, &user);
    assert_eq!(asset.balance(&user), 27_777_777_777);
    assert_eq!(client.user_info(&pool, &user).staked, 0);
}

#[test]
fn test_single_unit_in_high_decimal_pool_then_large_deposit() {
    let (env, client, owner) = setup();
    let (pool, asset) = add_mock_pool(&env, &client, &owner, 18);
    let dust = staker(&env, &asset, 1);
    client.deposit(&dust, &pool, &1, &dust);

    advance(&env, 1);
    assert_eq!(client.pending_reward(&pool, &dust), ONE);

    advance(&env, 1_000);
    assert_eq!(client.pending_reward(&pool, &dust), 1_001 * ONE);

    // 1e9 whole tokens against an accumulator near 1e50.
    let whale_stake = 1_000_000_000 * ONE;
    let whale = staker(&env, &asset, whale_stake);
    client.deposit(&whale, &pool, &whale_stake, &whale);
    assert_eq!(client.pending_reward(&pool, &whale), 0);

    advance(&env, 1);
    assert_eq!(client.pending_reward(&pool, &whale), ONE - 1);
    assert_eq!(client.pending_reward(&pool, &dust), 1_001 * ONE);

    assert_eq!(client.harvest(&dust, &pool, &dust), 1_001 * ONE);
    client.withdraw(&whale, &pool, &whale_stake, &whale);
    assert_eq!(asset.balance(&whale), whale_stake);
    client.withdraw(&dust, &pool, &1, &dust);
    assert_eq!(client.staked_supply(&pool), 0);
}

#[test]
fn test_dust_stake_does_not_lock_stellar_asset_pool() {
    let (env, client, owner) = setup();
    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let pool = client.add_pool(&owner, &10, &asset);
    let minter = StellarAssetClient::new(&env, &asset);

    let dust = Address::generate(&env);
    minter.mint(&dust, &1);
    client.deposit(&dust, &pool, &1, &dust);

    // 1e36 per ledger over a single unit: past i128 after ~170 ledgers.
    advance(&env, 300);
    let honest = Address::generate(&env);
    minter.mint(&honest, &10_000_000);
    client.deposit(&honest, &pool, &10_000_000, &honest);
    let acc = client.pool_info(&pool).acc_reward_per_share;
    assert_eq!(acc, wide(&env, (300 * ONE) as u128).mul(&wide(&env, ONE as u128)));
    assert!(acc > wide(&env, i128::MAX as u128));
    assert_eq!(client.pending_reward(&pool, &dust), 300 * ONE);
    assert_eq!(client.pending_reward(&pool, &honest), 0);

    advance(&env, 10);
    assert_eq!(client.pending_reward(&pool, &dust), 300_000_000_999_999_900_000);
    assert_eq!(client.pending_reward(&pool, &honest), 9_999_999_000_000_099_999);

    assert_eq!(client.harvest(&honest, &pool, &honest), 9_999_999_000_000_099_999);
    client.withdraw(&dust, &pool, &1, &dust);
    client.withdraw(&honest, &pool, &10_000_000, &honest);
    assert_eq!(TokenClient::new(&env, &asset).balance(&honest), 10_000_000);
    assert_eq!(client.staked_supply(&pool), 0);
}
