//! Decoded curve state and the snapshot it prices against

use anchor_lang::prelude::Pubkey;
use anchor_lang::AccountDeserialize;
use anyhow::{anyhow, Result};
use pumpfun_core::pool_lifecycle::{CurveDefaults, CurveSnapshot, PoolReserves};
use pumpfun_idl::accounts::{MainState, PoolState};
use pumpfun_idl::pda;

use crate::error::QuoteError;
use crate::protocol_state::CurveAccounts;

/// Decoded `MainState` plus the pool of one launched token, if created.
#[derive(Clone, Debug)]
pub struct CurveState {
  pub main_state_address: Pubkey,
  pub main_state: MainState,
  pub base_mint: Pubkey,
  pub pool_state: Option<PoolState>,
}

/// Parties paid a share of the trading fee, with their wrapped SOL accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeRecipients {
  pub platform: Pubkey,
  pub platform_quote_ata: Pubkey,
  pub creator: Pubkey,
  pub creator_quote_ata: Pubkey,
}

impl CurveState {
  /// Chooses pool reserves or launch defaults.
  ///
  /// # Errors
  /// * Invalid trading fee or reserves
  pub fn snapshot(&self) -> Result<CurveSnapshot> {
    let defaults = CurveDefaults::try_from(&self.main_state)?;
    let pool = self.pool_state.as_ref().map(PoolReserves::from);
    Ok(CurveSnapshot::select(&defaults, pool.as_ref())?)
  }

  /// Creator recipient comes from the caller when given, otherwise from the
  /// pool record.
  ///
  /// # Errors
  /// * Neither source names a creator recipient
  /// * `MainState` has no platform recipient
  pub fn fee_recipients(
    &self,
    creator_override: Option<Pubkey>,
  ) -> Result<FeeRecipients, QuoteError> {
    let missing = || QuoteError::MissingFeeRecipient {
      base_mint: self.base_mint,
    };
    let platform = Some(self.main_state.platform_fee_recipient)
      .filter(|k| *k != Pubkey::default())
      .ok_or_else(missing)?;
    let creator = creator_override
      .or_else(|| {
        self
          .pool_state
          .as_ref()
          .map(|pool| pool.creator_fee_recipient)
      })
      .filter(|k| *k != Pubkey::default())
      .ok_or_else(missing)?;
    Ok(FeeRecipients {
      platform,
      platform_quote_ata: pda::quote_ata(platform),
      creator,
      creator_quote_ata: pda::quote_ata(creator),
    })
  }
}

impl TryFrom<&CurveAccounts> for CurveState {
  type Error = anyhow::Error;

  /// # Errors
  /// Returns error if any account fails deserialization.
  fn try_from(accounts: &CurveAccounts) -> Result<Self> {
    let main_state =
      MainState::try_deserialize(&mut accounts.main_state.data.as_slice())
        .map_err(|e| {
          QuoteError::unavailable(
            "main state",
            anyhow!("Failed to deserialize MainState: {e}"),
          )
        })?;

    let pool_state = accounts
      .pool_state
      .as_ref()
      .map(|account| PoolState::try_deserialize(&mut account.data.as_slice()))
      .transpose()
      .map_err(|e| {
        QuoteError::unavailable(
          "pool state",
          anyhow!("Failed to deserialize PoolState: {e}"),
        )
      })?;

    Ok(Self {
      main_state_address: accounts.main_state_address,
      main_state,
      base_mint: accounts.base_mint,
      pool_state,
    })
  }
}
