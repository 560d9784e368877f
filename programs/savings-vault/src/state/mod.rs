pub mod savings_vault;

pub use savings_vault::*;
