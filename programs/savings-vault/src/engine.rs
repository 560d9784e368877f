use solana_program::pubkey::Pubkey;

use crate::{error::VaultError, state::SavingsVault};

/// Pure transition logic for the vault state machine.
///
/// Everything here operates on an in-memory `SavingsVault` plus the facts
/// the ledger supplies per call (caller identity, clock, account addresses).
/// The processor is responsible for loading state, invoking the paired
/// lamport transfer, and persisting the result; no account plumbing leaks
/// into this module, which keeps the precondition ladders directly testable.
pub struct VaultEngine;

impl VaultEngine {
    /// Deposit precondition ladder. Checked in order; the first failure
    /// wins and the caller must leave all state untouched.
    pub fn check_deposit(
        vault: &SavingsVault,
        caller: &Pubkey,
        destination: &Pubkey,
        vault_address: &Pubkey,
        now: i64,
    ) -> Result<(), VaultError> {
        if caller != &vault.owner {
            return Err(VaultError::Unauthorized);
        }
        if now >= vault.deadline {
            return Err(VaultError::DeadlineElapsed);
        }
        if vault.goal_completed {
            return Err(VaultError::GoalAlreadyComplete);
        }
        if destination != vault_address {
            return Err(VaultError::MisdirectedPayment);
        }
        Ok(())
    }

    /// Credit an accepted deposit. Returns true if this deposit completed
    /// the goal. The latch is set in the same step as the crossing credit,
    /// and never resets.
    pub fn apply_deposit(vault: &mut SavingsVault, amount: u64) -> Result<bool, VaultError> {
        let new_total = vault
            .total_saved
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;

        vault.total_saved = new_total;

        if !vault.goal_completed && vault.total_saved >= vault.target_amount {
            vault.goal_completed = true;
            return Ok(true);
        }
        Ok(false)
    }

    /// Withdrawal gate. No override path exists: the owner is held to the
    /// same conditions as anyone else.
    pub fn check_withdraw(
        vault: &SavingsVault,
        caller: &Pubkey,
        now: i64,
    ) -> Result<(), VaultError> {
        if caller != &vault.owner {
            return Err(VaultError::Unauthorized);
        }
        if !vault.is_withdrawable(now) {
            return Err(VaultError::WithdrawalNotYetPermitted);
        }
        Ok(())
    }
}
