use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    program_error::ProgramError,
    program_pack::{IsInitialized, Pack, Sealed},
    pubkey::Pubkey,
};

/// PDA seed prefix for vault accounts (seeds = [SEED_PREFIX, owner])
pub const VAULT_SEED_PREFIX: &[u8] = b"savings_vault";

/// Per-goal vault state. One account per savings goal, owned exclusively
/// by this program; all mutation goes through the deposit and withdraw
/// transitions.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct SavingsVault {
    pub is_initialized: bool,
    /// The only identity allowed to deposit or withdraw. Write-once.
    pub owner: Pubkey,
    /// Savings target in lamports. Write-once.
    pub target_amount: u64,
    /// Running sum of accepted deposits. Never decreases.
    pub total_saved: u64,
    /// Unix timestamp after which withdrawal is unconditionally permitted.
    /// Write-once.
    pub deadline: i64,
    /// Latches true when total_saved first reaches target_amount. Never
    /// reset.
    pub goal_completed: bool,
    pub bump: u8,
}

impl SavingsVault {
    pub const LEN: usize = 1 + 32 + 8 + 8 + 8 + 1 + 1;

    pub fn new(owner: Pubkey, target_amount: u64, deadline: i64, bump: u8) -> Self {
        Self {
            is_initialized: true,
            owner,
            target_amount,
            total_saved: 0,
            deadline,
            goal_completed: false,
            bump,
        }
    }

    /// Canonical PDA for a given owner's vault.
    pub fn find_address(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED_PREFIX, owner.as_ref()], program_id)
    }

    /// Lamports still needed to reach the target. Zero once the goal is met.
    pub fn remaining_to_target(&self) -> u64 {
        self.target_amount.saturating_sub(self.total_saved)
    }

    /// Whether a withdrawal at `now` would be authorized for the owner.
    pub fn is_withdrawable(&self, now: i64) -> bool {
        self.goal_completed || now >= self.deadline
    }
}

impl Sealed for SavingsVault {}

impl IsInitialized for SavingsVault {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Pack for SavingsVault {
    const LEN: usize = SavingsVault::LEN;

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let data = self.try_to_vec().unwrap();
        dst[..data.len()].copy_from_slice(&data);
    }

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(src).map_err(|_| ProgramError::InvalidAccountData)
    }
}
