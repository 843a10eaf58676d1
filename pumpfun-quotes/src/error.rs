//! Failures raised by the quoting layer itself. Curve math errors surface
//! as [`pumpfun_core::error::CoreError`].

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
  #[error("{record} snapshot unavailable")]
  SnapshotUnavailable {
    record: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
  #[error("unable to determine creator fee recipient for {base_mint}")]
  MissingFeeRecipient { base_mint: Pubkey },
  #[error("pool for {base_mint} has graduated")]
  PoolGraduated { base_mint: Pubkey },
}

impl QuoteError {
  pub(crate) fn unavailable(
    record: &'static str,
    source: impl Into<anyhow::Error>,
  ) -> Self {
    let source: anyhow::Error = source.into();
    QuoteError::SnapshotUnavailable {
      record,
      source: source.into(),
    }
  }
}
