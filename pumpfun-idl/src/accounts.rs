//! Program-owned accounts read by the quoting layer.

use anchor_lang::prelude::*;

/// Global configuration written once by the protocol owner.
///
/// Supplies the trading fee for every pool, and the default curve used to
/// price a token whose pool has not been created yet.
#[account]
#[derive(Debug, Default, PartialEq, Eq, InitSpace)]
pub struct MainState {
  pub owner: Pubkey,
  pub platform_fee_recipient: Pubkey,
  pub quote_mint: Pubkey,
  /// Percentage scaled by [`crate::constants::FEE_PRE_DIV`].
  pub trading_fee: u64,
  pub total_supply: u64,
  pub init_virt_base_reserves: u64,
  pub init_virt_quote_reserves: u64,
  pub real_quote_threshold: u64,
}

/// Reserves of a single base/quote bonding curve.
#[account]
#[derive(Debug, Default, PartialEq, Eq, InitSpace)]
pub struct PoolState {
  pub base_mint: Pubkey,
  pub quote_mint: Pubkey,
  pub creator: Pubkey,
  pub creator_fee_recipient: Pubkey,
  pub virt_base_reserves: u64,
  pub virt_quote_reserves: u64,
  pub real_base_reserves: u64,
  pub real_quote_reserves: u64,
  pub real_quote_threshold: u64,
  /// Set by the program once `real_quote_reserves` reaches the threshold.
  pub complete: bool,
}

#[cfg(test)]
mod tests {
  use anchor_lang::{AccountDeserialize, AccountSerialize, Discriminator};

  use super::*;

  #[test]
  fn pool_state_account_roundtrip() -> Result<()> {
    let pool = PoolState {
      base_mint: Pubkey::new_unique(),
      quote_mint: Pubkey::new_unique(),
      creator: Pubkey::new_unique(),
      creator_fee_recipient: Pubkey::new_unique(),
      virt_base_reserves: 63_529_411_764_705,
      virt_quote_reserves: 280_000_000,
      real_base_reserves: 1_000_000_000_000_000,
      real_quote_reserves: 0,
      real_quote_threshold: 850_000_000,
      complete: false,
    };
    let mut data = Vec::new();
    pool.try_serialize(&mut data)?;
    assert_eq!(&data[..8], PoolState::DISCRIMINATOR);
    assert_eq!(data.len(), 8 + PoolState::INIT_SPACE);
    let decoded = PoolState::try_deserialize(&mut data.as_slice())?;
    assert_eq!(pool, decoded);
    Ok(())
  }

  #[test]
  fn main_state_rejects_pool_discriminator() -> Result<()> {
    let mut data = Vec::new();
    PoolState::default().try_serialize(&mut data)?;
    assert!(MainState::try_deserialize(&mut data.as_slice()).is_err());
    Ok(())
  }
}
