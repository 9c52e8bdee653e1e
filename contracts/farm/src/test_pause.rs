#![cfg(test)]

use crate::{FarmError, RewardFarm, RewardFarmClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

const ONE: i128 = 1_000_000_000_000_000_000;

fn setup_test() -> (Env, RewardFarmClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(10);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RewardFarm, ());
    let client = RewardFarmClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &reward_token, &ONE);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(100 * ONE));

    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    client.add_pool(&owner, &10, &asset);

    (env, client, owner, asset)
}

#[test]
fn test_pause_blocks_staking_flows() {
    let (env, client, owner, asset) = setup_test();
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &asset).mint(&user, &1_000);
    client.deposit(&user, &0, &1_000, &user);

    client.set_paused(&owner, &true);
    assert!(client.is_paused());

    let res = client.try_deposit(&user, &0, &0, &user);
    assert_eq!(res.unwrap_err().unwrap(), FarmError::Paused);
    let res = client.try_withdraw(&user, &0, &100, &user);
    assert_eq!(res.unwrap_err().unwrap(), FarmError::Paused);
    let res = client.try_harvest(&user, &0, &user);
    assert_eq!(res.unwrap_err().unwrap(), FarmError::Paused);

    client.set_paused(&owner, &false);
    client.withdraw(&user, &0, &100, &user);
    assert_eq!(client.user_info(&0, &user).staked, 900);
}

#[test]
fn test_emergency_exit_works_while_paused() {
    let (env, client, owner, asset) = setup_test();
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &asset).mint(&user, &1_000);
    client.deposit(&user, &0, &1_000, &user);
    env.ledger().set_sequence_number(15);

    client.set_paused(&owner, &true);
    assert_eq!(client.emergency_withdraw(&user, &0, &user), 1_000);
    assert_eq!(client.pending_reward(&0, &user), 0);
}

#[test]
fn test_reads_sync_and_admin_work_while_paused() {
    let (env, client, owner, asset) = setup_test();
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &asset).mint(&user, &1_000);
    client.deposit(&user, &0, &1_000, &user);

    client.set_paused(&owner, &true);
    env.ledger().set_sequence_number(12);

    assert_eq!(client.pending_reward(&0, &user), 2 * ONE);
    assert_eq!(client.sync_pool(&0).last_synced_block, 12);
    assert_eq!(client.mass_sync_all(), 1);

    let second = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    assert_eq!(client.add_pool(&owner, &10, &second), 1);
    client.set_weight(&owner, &0, &30);
    client.set_reward_per_block(&owner, &(2 * ONE), &true);
    assert_eq!(client.total_weight(), 40);
}

#[test]
fn test_only_owner_can_pause() {
    let (env, client, _owner, _asset) = setup_test();
    let stranger = Address::generate(&env);

    let res = client.try_set_paused(&stranger, &true);
    assert_eq!(res.unwrap_err().unwrap(), FarmError::NotOwner);
    assert!(!client.is_paused());
}
