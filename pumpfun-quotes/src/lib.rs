//! Quotes for tokens launched on a bonding-curve launchpad.
//!
//! Every quote fetches `MainState` and the token's pool record once, prices
//! the trade with `pumpfun-core` against the pool's reserves (or against
//! the launch defaults when no pool exists yet) and attaches a slippage
//! bound, the fee recipients and a graduation prediction.
//!
//! # Example
//!
//! ```rust,no_run
//! use pumpfun_quotes::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = QuoteConfig::from_env()?;
//! let service = QuoteService::from_config(&config)?;
//!
//! let base_mint = Pubkey::new_unique();
//! let creator = Pubkey::new_unique();
//! let quote_in = UFix64::<N9>::new(100_000_000); // 0.1 SOL
//!
//! let quote = service
//!   .quote_buy_exact_in(base_mint, quote_in, None, Some(creator))
//!   .await?;
//! println!("{} tokens, {:?}", quote.amount_out.bits, quote.limit);
//! # Ok(())
//! # }
//! ```

use fix::prelude::*;
use pumpfun_core::pool_lifecycle::PoolStatus;

pub mod config;
pub mod error;
pub mod prelude;
pub mod protocol_state;
mod quote_metadata;
mod quote_service;

pub use quote_metadata::{Operation, QuoteMetadata};
pub use quote_service::QuoteService;

use crate::protocol_state::FeeRecipients;

/// Bound a trade may settle at. Buys with exact out cap what is paid,
/// everything else floors what is received.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SlippageLimit<InExp, OutExp> {
  MinimumOut(UFix64<OutExp>),
  MaximumIn(UFix64<InExp>),
}

impl<InExp, OutExp> std::fmt::Debug for SlippageLimit<InExp, OutExp>
where
  UFix64<InExp>: std::fmt::Debug,
  UFix64<OutExp>: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MinimumOut(v) => f.debug_tuple("MinimumOut").field(v).finish(),
      Self::MaximumIn(v) => f.debug_tuple("MaximumIn").field(v).finish(),
    }
  }
}

/// Priced trade. The fee is always denominated in SOL.
#[derive(Clone, PartialEq, Eq)]
pub struct Quote<InExp, OutExp> {
  pub amount_in: UFix64<InExp>,
  pub amount_out: UFix64<OutExp>,
  pub limit: SlippageLimit<InExp, OutExp>,
  pub fee_amount: UFix64<N9>,
  pub pool_status: PoolStatus,
  /// The buy is expected to complete the curve.
  pub will_graduate: bool,
  pub fee_recipients: FeeRecipients,
  pub metadata: QuoteMetadata,
}

impl<InExp, OutExp> std::fmt::Debug for Quote<InExp, OutExp>
where
  UFix64<InExp>: std::fmt::Debug,
  UFix64<OutExp>: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Quote")
      .field("amount_in", &self.amount_in)
      .field("amount_out", &self.amount_out)
      .field("limit", &self.limit)
      .field("fee_amount", &self.fee_amount)
      .field("pool_status", &self.pool_status)
      .field("will_graduate", &self.will_graduate)
      .field("fee_recipients", &self.fee_recipients)
      .field("metadata", &self.metadata)
      .finish()
  }
}

/// SOL in, tokens out.
pub type BuyQuote = Quote<N9, N6>;

/// Tokens in, SOL out.
pub type SellQuote = Quote<N6, N9>;
