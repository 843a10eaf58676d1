//! Service configuration, deserializable or read from the environment

use std::str::FromStr;

use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_lang::prelude::Pubkey;
use anyhow::{Context, Result};
use pumpfun_core::slippage_config::SlippageConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Slippage applied when a caller passes none, in whole percent.
pub const DEFAULT_SLIPPAGE_PERCENT: u64 = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
  Processed,
  #[default]
  Confirmed,
  Finalized,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
  pub rpc_url: String,
  pub commitment: Commitment,
  /// Owner seed of the `MainState` PDA. Discovered on chain when unset.
  pub main_state_owner: Option<String>,
  pub default_slippage_percent: u64,
}

impl Default for QuoteConfig {
  fn default() -> Self {
    Self {
      rpc_url: DEFAULT_RPC_URL.to_string(),
      commitment: Commitment::default(),
      main_state_owner: None,
      default_slippage_percent: DEFAULT_SLIPPAGE_PERCENT,
    }
  }
}

impl QuoteConfig {
  /// Reads `RPC_URL`, `PUMPFUN_MAIN_STATE_OWNER` and
  /// `PUMPFUN_SLIPPAGE_PERCENT`, keeping defaults for unset variables.
  ///
  /// # Errors
  /// * `PUMPFUN_SLIPPAGE_PERCENT` is not a whole number
  pub fn from_env() -> Result<Self> {
    let mut config = Self::default();
    if let Ok(rpc_url) = std::env::var("RPC_URL") {
      config.rpc_url = rpc_url;
    }
    config.main_state_owner = std::env::var("PUMPFUN_MAIN_STATE_OWNER").ok();
    if let Ok(percent) = std::env::var("PUMPFUN_SLIPPAGE_PERCENT") {
      config.default_slippage_percent = percent
        .trim()
        .parse()
        .context("PUMPFUN_SLIPPAGE_PERCENT must be a whole percent")?;
    }
    Ok(config)
  }

  #[must_use]
  pub fn commitment_config(&self) -> CommitmentConfig {
    match self.commitment {
      Commitment::Processed => CommitmentConfig::processed(),
      Commitment::Confirmed => CommitmentConfig::confirmed(),
      Commitment::Finalized => CommitmentConfig::finalized(),
    }
  }

  /// # Errors
  /// * Owner is not a base58 pubkey
  pub fn main_state_owner(&self) -> Result<Option<Pubkey>> {
    self
      .main_state_owner
      .as_deref()
      .map(|owner| {
        Pubkey::from_str(owner)
          .with_context(|| format!("Invalid main state owner: {owner}"))
      })
      .transpose()
  }

  /// # Errors
  /// * Percent overflows basis points
  pub fn default_slippage(&self) -> Result<SlippageConfig> {
    Ok(SlippageConfig::from_percent(self.default_slippage_percent)?)
  }
}

#[cfg(test)]
mod tests {
  use fix::prelude::*;

  use super::*;

  #[test]
  fn partial_config_keeps_defaults() -> Result<()> {
    let config: QuoteConfig =
      serde_json::from_str(r#"{ "commitment": "finalized" }"#)?;
    assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    assert_eq!(config.commitment_config(), CommitmentConfig::finalized());
    assert_eq!(config.main_state_owner()?, None);
    assert_eq!(
      config.default_slippage()?.slippage_tolerance(),
      UFix64::<N4>::new(1_000)
    );
    Ok(())
  }

  #[test]
  fn owner_must_be_pubkey() {
    let config = QuoteConfig {
      main_state_owner: Some("not-a-key".to_string()),
      ..QuoteConfig::default()
    };
    assert!(config.main_state_owner().is_err());
  }
}
