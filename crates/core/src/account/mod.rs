//! Chart of accounts domain logic.
//!
//! This module implements the account registry core:
//! - Account types and the debit/credit sign convention
//! - Balance calculation (the single authoritative sign function)
//! - Non-recursive account tree construction
//! - The built-in standard chart used for bulk seeding

pub mod balance;
pub mod seed;
pub mod tree;
pub mod types;

pub use balance::{account_balance, opening_balance, sum_by_code_prefix, BalanceSide};
pub use seed::{standard_chart, SeedAccount};
pub use tree::{build_tree, AccountNode};
pub use types::{Account, AccountType, CreateAccountInput, UpdateAccountInput};
