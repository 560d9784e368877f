use solana_program::pubkey::Pubkey;

use savings_vault::{
    engine::VaultEngine,
    error::VaultError,
    state::SavingsVault,
};

const T: i64 = 1_700_000_000;
const MONTH: i64 = 2_592_000;

fn active_vault(target: u64) -> SavingsVault {
    SavingsVault::new(Pubkey::new_unique(), target, T + MONTH, 254)
}

#[test]
fn test_deposit_accumulates_and_latches() {
    // Scenario: target 5 SOL-ish, two deposits crossing the target.
    let mut vault = active_vault(5_000_000);
    let owner = vault.owner;

    VaultEngine::check_deposit(&vault, &owner, &Pubkey::default(), &Pubkey::default(), T + 10)
        .unwrap();
    let reached = VaultEngine::apply_deposit(&mut vault, 3_000_000).unwrap();
    assert!(!reached);
    assert_eq!(vault.total_saved, 3_000_000);
    assert!(!vault.goal_completed);

    let reached = VaultEngine::apply_deposit(&mut vault, 2_000_000).unwrap();
    assert!(reached);
    assert_eq!(vault.total_saved, 5_000_000);
    assert!(vault.goal_completed);
}

#[test]
fn test_deposit_crossing_target_overshoots() {
    let mut vault = active_vault(1_000);
    let reached = VaultEngine::apply_deposit(&mut vault, 2_500).unwrap();
    assert!(reached);
    assert_eq!(vault.total_saved, 2_500);
    assert!(vault.goal_completed);
}

#[test]
fn test_total_saved_is_exact_sum_of_deposits() {
    let mut vault = active_vault(u64::MAX);
    let amounts = [1u64, 99, 40_000, 7, 123_456_789];
    let mut expected = 0u64;
    let mut previous = 0u64;

    for amount in amounts {
        VaultEngine::apply_deposit(&mut vault, amount).unwrap();
        expected += amount;
        assert_eq!(vault.total_saved, expected);
        assert!(vault.total_saved >= previous);
        previous = vault.total_saved;
    }
}

#[test]
fn test_goal_completed_latch_never_resets() {
    let mut vault = active_vault(100);
    assert!(VaultEngine::apply_deposit(&mut vault, 100).unwrap());
    assert!(vault.goal_completed);

    // Further credits keep the latch set. (The processor would reject them
    // earlier in the ladder, but the latch itself must also be monotonic.)
    assert!(!VaultEngine::apply_deposit(&mut vault, 1).unwrap());
    assert!(vault.goal_completed);
}

#[test]
fn test_deposit_precondition_order() {
    let vault = active_vault(1_000_000);
    let owner = vault.owner;
    let vault_address = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();
    let elsewhere = Pubkey::new_unique();

    // Unauthorized wins over every later failure.
    assert_eq!(
        VaultEngine::check_deposit(&vault, &stranger, &elsewhere, &vault_address, T + MONTH + 1),
        Err(VaultError::Unauthorized)
    );

    // Deadline wins over misdirection.
    assert_eq!(
        VaultEngine::check_deposit(&vault, &owner, &elsewhere, &vault_address, T + MONTH),
        Err(VaultError::DeadlineElapsed)
    );

    // Completed goal wins over misdirection.
    let mut completed = vault.clone();
    completed.goal_completed = true;
    assert_eq!(
        VaultEngine::check_deposit(&completed, &owner, &elsewhere, &vault_address, T),
        Err(VaultError::GoalAlreadyComplete)
    );

    // Misdirection is the last gate.
    assert_eq!(
        VaultEngine::check_deposit(&vault, &owner, &elsewhere, &vault_address, T),
        Err(VaultError::MisdirectedPayment)
    );

    // All gates pass.
    assert_eq!(
        VaultEngine::check_deposit(&vault, &owner, &vault_address, &vault_address, T),
        Ok(())
    );
}

#[test]
fn test_deposit_at_deadline_rejected() {
    let vault = active_vault(1_000_000);
    let owner = vault.owner;
    let addr = Pubkey::new_unique();

    // now == deadline is already too late.
    assert_eq!(
        VaultEngine::check_deposit(&vault, &owner, &addr, &addr, vault.deadline),
        Err(VaultError::DeadlineElapsed)
    );
    assert_eq!(
        VaultEngine::check_deposit(&vault, &owner, &addr, &addr, vault.deadline - 1),
        Ok(())
    );
}

#[test]
fn test_deposit_overflow_leaves_state_unchanged() {
    let mut vault = active_vault(u64::MAX);
    VaultEngine::apply_deposit(&mut vault, u64::MAX - 10).unwrap();

    let before = vault.clone();
    assert_eq!(
        VaultEngine::apply_deposit(&mut vault, 11),
        Err(VaultError::Overflow)
    );
    assert_eq!(vault, before);

    // The exact boundary still fits and completes the goal.
    assert!(VaultEngine::apply_deposit(&mut vault, 10).unwrap());
    assert_eq!(vault.total_saved, u64::MAX);
}

#[test]
fn test_withdraw_gate_goal_complete() {
    let mut vault = active_vault(1_000);
    let owner = vault.owner;

    // Before the deadline with the goal incomplete: locked, owner included.
    assert_eq!(
        VaultEngine::check_withdraw(&vault, &owner, T + 60),
        Err(VaultError::WithdrawalNotYetPermitted)
    );

    VaultEngine::apply_deposit(&mut vault, 1_000).unwrap();
    assert_eq!(VaultEngine::check_withdraw(&vault, &owner, T + 60), Ok(()));
}

#[test]
fn test_withdraw_gate_deadline() {
    let vault = active_vault(10_000_000);
    let owner = vault.owner;

    // Goal never met; the deadline alone unlocks the vault.
    assert_eq!(
        VaultEngine::check_withdraw(&vault, &owner, vault.deadline - 1),
        Err(VaultError::WithdrawalNotYetPermitted)
    );
    assert_eq!(
        VaultEngine::check_withdraw(&vault, &owner, vault.deadline),
        Ok(())
    );
}

#[test]
fn test_withdraw_rejects_non_owner_even_when_unlocked() {
    let mut vault = active_vault(100);
    VaultEngine::apply_deposit(&mut vault, 100).unwrap();

    let stranger = Pubkey::new_unique();
    assert_eq!(
        VaultEngine::check_withdraw(&vault, &stranger, vault.deadline + 1),
        Err(VaultError::Unauthorized)
    );
}

#[test]
fn test_failed_checks_mutate_nothing() {
    let vault = active_vault(1_000_000);
    let owner = vault.owner;
    let addr = Pubkey::new_unique();
    let before = vault.clone();

    let _ = VaultEngine::check_deposit(&vault, &Pubkey::new_unique(), &addr, &addr, T);
    let _ = VaultEngine::check_deposit(&vault, &owner, &Pubkey::new_unique(), &addr, T);
    let _ = VaultEngine::check_withdraw(&vault, &owner, T);
    let _ = VaultEngine::check_withdraw(&vault, &Pubkey::new_unique(), T + MONTH);

    // owner, target_amount, deadline are write-once; nothing else moved
    // either.
    assert_eq!(vault, before);
}

#[test]
fn test_state_views() {
    let mut vault = active_vault(10_000);
    assert_eq!(vault.remaining_to_target(), 10_000);
    assert!(!vault.is_withdrawable(T));
    assert!(vault.is_withdrawable(vault.deadline));

    VaultEngine::apply_deposit(&mut vault, 4_000).unwrap();
    assert_eq!(vault.remaining_to_target(), 6_000);

    VaultEngine::apply_deposit(&mut vault, 8_000).unwrap();
    assert_eq!(vault.remaining_to_target(), 0);
    assert!(vault.is_withdrawable(T));
}

#[test]
fn test_state_borsh_round_trip() {
    use borsh::BorshDeserialize;
    use solana_program::program_pack::Pack;

    let vault = SavingsVault::new(Pubkey::new_unique(), 5_000_000, T + MONTH, 253);
    let mut buf = vec![0u8; SavingsVault::LEN];
    SavingsVault::pack(vault.clone(), &mut buf).unwrap();

    let decoded = SavingsVault::try_from_slice(&buf).unwrap();
    assert_eq!(decoded, vault);
    assert!(decoded.is_initialized);
}
