//! Raw accounts backing a single curve quote

use std::convert::TryFrom;

use anchor_client::solana_sdk::account::Account;
use anchor_lang::prelude::Pubkey;
use anyhow::{anyhow, ensure, Result};
use pumpfun_idl::pda;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Accounts needed to price trades of one launched token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveAccounts {
  /// Address of the program's `MainState`
  pub main_state_address: Pubkey,

  /// Global launch configuration
  pub main_state: Account,

  /// Launched token
  pub base_mint: Pubkey,

  /// Pool for `base_mint`, absent until the pool is created
  pub pool_state: Option<Account>,
}

impl CurveAccounts {
  /// Account pubkeys in the order expected by `TryFrom`.
  #[must_use]
  pub fn pubkeys(main_state_address: Pubkey, base_mint: Pubkey) -> Vec<Pubkey> {
    vec![main_state_address, pda::pool_state(base_mint)]
  }

  #[must_use]
  pub const fn expected_count() -> usize {
    2
  }

  /// Validates lengths, and that the pool pubkey is the PDA of `base_mint`.
  ///
  /// # Errors
  /// Returns error if any validation fails
  pub fn validate(
    base_mint: Pubkey,
    pubkeys: &[Pubkey],
    accounts: &[Option<Account>],
  ) -> Result<()> {
    ensure!(
      pubkeys.len() == accounts.len(),
      "Mismatch: {} pubkeys but {} accounts",
      pubkeys.len(),
      accounts.len()
    );
    ensure!(
      pubkeys.len() == Self::expected_count(),
      "Expected {} accounts, got {}",
      Self::expected_count(),
      pubkeys.len()
    );
    let expected_pool = pda::pool_state(base_mint);
    ensure!(
      pubkeys[1] == expected_pool,
      "Pool account mismatch: expected {expected_pool}, got {}",
      pubkeys[1]
    );
    accounts.iter().flatten().try_for_each(|account| {
      if account.owner == pumpfun_idl::ID {
        Ok(())
      } else {
        Err(anyhow!("Account owned by {}, not the program", account.owner))
      }
    })
  }
}

/// Convert from RPC response (base mint, pubkeys and accounts) to
/// `CurveAccounts`. A missing pool account is expected, a missing main state
/// is not.
impl TryFrom<(Pubkey, &[Pubkey], &[Option<Account>])> for CurveAccounts {
  type Error = anyhow::Error;

  fn try_from(
    (base_mint, pubkeys, accounts): (Pubkey, &[Pubkey], &[Option<Account>]),
  ) -> Result<Self> {
    Self::validate(base_mint, pubkeys, accounts)?;
    let main_state = accounts[0].clone().ok_or_else(|| {
      QuoteError::unavailable(
        "main state",
        anyhow!("MainState {} not found", pubkeys[0]),
      )
    })?;
    Ok(Self {
      main_state_address: pubkeys[0],
      main_state,
      base_mint,
      pool_state: accounts[1].clone(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn program_account() -> Account {
    Account {
      owner: pumpfun_idl::ID,
      ..Account::default()
    }
  }

  #[test]
  fn missing_pool_is_allowed() -> Result<()> {
    let base_mint = Pubkey::new_unique();
    let pubkeys = CurveAccounts::pubkeys(Pubkey::new_unique(), base_mint);
    let accounts = vec![Some(program_account()), None];
    let curve = CurveAccounts::try_from((
      base_mint,
      pubkeys.as_slice(),
      accounts.as_slice(),
    ))?;
    assert!(curve.pool_state.is_none());
    Ok(())
  }

  #[test]
  fn missing_main_state_is_unavailable() {
    let base_mint = Pubkey::new_unique();
    let pubkeys = CurveAccounts::pubkeys(Pubkey::new_unique(), base_mint);
    let accounts = vec![None, Some(program_account())];
    let result = CurveAccounts::try_from((
      base_mint,
      pubkeys.as_slice(),
      accounts.as_slice(),
    ));
    let err = result.expect_err("main state required");
    assert!(matches!(
      err.downcast_ref::<QuoteError>(),
      Some(QuoteError::SnapshotUnavailable { record: "main state", .. })
    ));
  }

  #[test]
  fn rejects_foreign_pool_pubkey() {
    let base_mint = Pubkey::new_unique();
    let pubkeys = CurveAccounts::pubkeys(Pubkey::new_unique(), Pubkey::new_unique());
    let accounts = vec![Some(program_account()), None];
    assert!(CurveAccounts::validate(base_mint, &pubkeys, &accounts).is_err());
  }

  #[test]
  fn rejects_foreign_owner() {
    let base_mint = Pubkey::new_unique();
    let pubkeys = CurveAccounts::pubkeys(Pubkey::new_unique(), base_mint);
    let accounts = vec![Some(Account::default()), None];
    assert!(CurveAccounts::validate(base_mint, &pubkeys, &accounts).is_err());
  }
}
