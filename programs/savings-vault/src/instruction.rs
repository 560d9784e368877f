use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::{error::VaultError, state::SavingsVault};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub enum VaultInstruction {
    /// Create a savings goal vault. Called exactly once per owner.
    /// Accounts:
    /// 0. `[signer, writable]` Owner (pays for the vault account)
    /// 1. `[writable]` Vault PDA
    /// 2. `[]` System program
    /// 3. `[]` Rent sysvar
    CreateGoal {
        target_amount: u64,
        deadline: i64,
    },

    /// Deposit lamports toward the goal. The transfer and the credit are
    /// one instruction, so they commit or fail together.
    /// Accounts:
    /// 0. `[signer, writable]` Owner
    /// 1. `[writable]` Vault PDA
    /// 2. `[writable]` Transfer destination (must be the vault PDA)
    /// 3. `[]` System program
    /// 4. `[]` Clock sysvar
    Deposit {
        amount: u64,
    },

    /// Withdraw the entire vault balance to the owner and close the
    /// vault account.
    /// Accounts:
    /// 0. `[signer, writable]` Owner
    /// 1. `[writable]` Vault PDA
    /// 2. `[]` Clock sysvar
    Withdraw,
}

impl VaultInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| VaultError::InvalidInstruction.into())
    }

    pub fn pack(&self) -> Vec<u8> {
        self.try_to_vec().unwrap()
    }
}

// Helper functions to create instructions
pub fn create_goal(
    program_id: &Pubkey,
    owner: &Pubkey,
    target_amount: u64,
    deadline: i64,
) -> Instruction {
    let (vault_pda, _) = SavingsVault::find_address(owner, program_id);

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(vault_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: VaultInstruction::CreateGoal {
            target_amount,
            deadline,
        }
        .pack(),
    }
}

pub fn deposit(
    program_id: &Pubkey,
    owner: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) -> Instruction {
    let (vault_pda, _) = SavingsVault::find_address(owner, program_id);

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(vault_pda, false),
        AccountMeta::new(*destination, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: VaultInstruction::Deposit { amount }.pack(),
    }
}

pub fn withdraw(program_id: &Pubkey, owner: &Pubkey) -> Instruction {
    let (vault_pda, _) = SavingsVault::find_address(owner, program_id);

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(vault_pda, false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: VaultInstruction::Withdraw.pack(),
    }
}
