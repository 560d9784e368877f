use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq)]
pub enum VaultError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Vault already initialized")]
    AlreadyInitialized = 1,

    #[error("Vault not initialized")]
    NotInitialized = 2,

    #[error("Vault account does not match the canonical PDA")]
    InvalidVaultAddress = 3,

    #[error("Target amount must be greater than zero")]
    ZeroTarget = 4,

    #[error("Caller is not the goal owner")]
    Unauthorized = 5,

    #[error("Cannot deposit after the deadline")]
    DeadlineElapsed = 6,

    #[error("Goal already completed")]
    GoalAlreadyComplete = 7,

    #[error("Payment must be addressed to the vault")]
    MisdirectedPayment = 8,

    #[error("Arithmetic overflow")]
    Overflow = 9,

    #[error("Withdrawal conditions not met: goal incomplete and deadline not reached")]
    WithdrawalNotYetPermitted = 10,
}

impl PrintProgramError for VaultError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("VaultError: {}", self);
    }
}

impl From<VaultError> for ProgramError {
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for VaultError {
    fn type_of() -> &'static str {
        "VaultError"
    }
}
