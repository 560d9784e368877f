use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
    msg,
};

pub mod engine;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

use crate::processor::Processor;

solana_program::declare_id!("GoaLVau1t1111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process);

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("Savings Vault Program entrypoint");
    Processor::process(program_id, accounts, instruction_data)
}
