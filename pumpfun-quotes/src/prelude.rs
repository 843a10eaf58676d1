//! Common imports for pumpfun-quotes.

pub use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
pub use anchor_lang::prelude::Pubkey;
pub use anyhow::Result;
pub use fix::prelude::*;
pub use pumpfun_core::pool_lifecycle::PoolStatus;
pub use pumpfun_core::slippage_config::SlippageConfig;
pub use pumpfun_idl::tokens::{LaunchToken, TokenMint, TokenUnits, SOL};

pub use crate::config::QuoteConfig;
pub use crate::error::QuoteError;
pub use crate::protocol_state::{
  CurveAccounts, CurveState, FeeRecipients, RpcStateProvider,
  SnapshotProvider,
};
pub use crate::{
  BuyQuote, Operation, Quote, QuoteMetadata, QuoteService, SellQuote,
  SlippageLimit,
};
