use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::{IsInitialized, Pack},
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

use crate::{
    engine::VaultEngine,
    error::VaultError,
    instruction::VaultInstruction,
    state::{SavingsVault, VAULT_SEED_PREFIX},
};

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = VaultInstruction::unpack(instruction_data)?;

        match instruction {
            VaultInstruction::CreateGoal {
                target_amount,
                deadline,
            } => {
                msg!("Instruction: CreateGoal");
                Self::process_create_goal(accounts, program_id, target_amount, deadline)
            }
            VaultInstruction::Deposit { amount } => {
                msg!("Instruction: Deposit");
                Self::process_deposit(accounts, program_id, amount)
            }
            VaultInstruction::Withdraw => {
                msg!("Instruction: Withdraw");
                Self::process_withdraw(accounts, program_id)
            }
        }
    }

    /// Create the vault account and write its initial state. One vault per
    /// owner; calling twice fails on the already-populated account.
    fn process_create_goal(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        target_amount: u64,
        deadline: i64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let rent = &Rent::from_account_info(next_account_info(account_info_iter)?)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        // A zero target would latch goal_completed on the first deposit of
        // any size, making the lock meaningless.
        if target_amount == 0 {
            return Err(VaultError::ZeroTarget.into());
        }

        let (vault_pubkey, vault_bump) = SavingsVault::find_address(owner_info.key, program_id);
        if vault_pubkey != *vault_info.key {
            return Err(VaultError::InvalidVaultAddress.into());
        }

        if !vault_info.data_is_empty() {
            return Err(VaultError::AlreadyInitialized.into());
        }

        let vault_lamports = rent.minimum_balance(SavingsVault::LEN);

        invoke_signed(
            &system_instruction::create_account(
                owner_info.key,
                vault_info.key,
                vault_lamports,
                SavingsVault::LEN as u64,
                program_id,
            ),
            &[owner_info.clone(), vault_info.clone(), system_program.clone()],
            &[&[VAULT_SEED_PREFIX, owner_info.key.as_ref(), &[vault_bump]]],
        )?;

        let vault = SavingsVault::new(*owner_info.key, target_amount, deadline, vault_bump);
        SavingsVault::pack(vault, &mut vault_info.try_borrow_mut_data()?)?;

        msg!(
            "Savings goal created: target {} lamports, deadline {}",
            target_amount,
            deadline
        );
        Ok(())
    }

    /// Validate and credit a deposit. The lamport transfer is invoked in the
    /// same instruction as the state update, so the ledger commits or
    /// discards the pair as one unit.
    fn process_deposit(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        amount: u64,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let destination_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let clock = Clock::from_account_info(next_account_info(account_info_iter)?)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if vault_info.owner != program_id {
            return Err(VaultError::InvalidVaultAddress.into());
        }

        let mut vault = SavingsVault::unpack_unchecked(&vault_info.try_borrow_data()?)?;
        if !vault.is_initialized() {
            return Err(VaultError::NotInitialized.into());
        }

        VaultEngine::check_deposit(
            &vault,
            owner_info.key,
            destination_info.key,
            vault_info.key,
            clock.unix_timestamp,
        )?;

        invoke(
            &system_instruction::transfer(owner_info.key, destination_info.key, amount),
            &[
                owner_info.clone(),
                destination_info.clone(),
                system_program.clone(),
            ],
        )?;

        let goal_reached = VaultEngine::apply_deposit(&mut vault, amount)?;
        let total_saved = vault.total_saved;
        SavingsVault::pack(vault, &mut vault_info.try_borrow_mut_data()?)?;

        msg!("Deposit accepted: total saved {} lamports", total_saved);
        if goal_reached {
            msg!("Savings goal reached");
        }
        Ok(())
    }

    /// Release the entire vault balance to the owner and close the account.
    /// The gate has no override path: the owner is subject to it like
    /// anyone else.
    fn process_withdraw(accounts: &[AccountInfo], program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let vault_info = next_account_info(account_info_iter)?;
        let clock = Clock::from_account_info(next_account_info(account_info_iter)?)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if vault_info.owner != program_id {
            return Err(VaultError::InvalidVaultAddress.into());
        }

        let vault = SavingsVault::unpack_unchecked(&vault_info.try_borrow_data()?)?;
        if !vault.is_initialized() {
            return Err(VaultError::NotInitialized.into());
        }

        VaultEngine::check_withdraw(&vault, owner_info.key, clock.unix_timestamp)?;

        // Entire balance, deposits plus rent reserve; the account is closed.
        let vault_balance = vault_info.lamports();
        **vault_info.try_borrow_mut_lamports()? = 0;
        **owner_info.try_borrow_mut_lamports()? = owner_info
            .lamports()
            .checked_add(vault_balance)
            .ok_or(VaultError::Overflow)?;
        vault_info.try_borrow_mut_data()?.fill(0);

        msg!("Withdrawal complete: {} lamports released", vault_balance);
        Ok(())
    }
}
