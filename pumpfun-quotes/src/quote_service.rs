//! Quote service: fetches curve state once per call and prices one trade.

use anchor_lang::prelude::Pubkey;
use anyhow::Result;
use fix::prelude::*;
use pumpfun_core::error::CoreError::InvalidAmount;
use pumpfun_core::pool_lifecycle::{CurveSnapshot, PoolStatus};
use pumpfun_core::slippage_config::SlippageConfig;
use pumpfun_core::units::{from_base_units, to_base_units};
use pumpfun_idl::tokens::{BaseExp, QuoteExp};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::QuoteConfig;
use crate::error::QuoteError;
use crate::protocol_state::{CurveState, RpcStateProvider, SnapshotProvider};
use crate::quote_metadata::{Operation, QuoteMetadata};
use crate::{BuyQuote, Quote, SellQuote, SlippageLimit};

/// Prices buys and sells of launched tokens against live curve state.
pub struct QuoteService<S: SnapshotProvider> {
  provider: S,
  default_slippage: SlippageConfig,
}

impl QuoteService<RpcStateProvider> {
  /// RPC backed service with the configured default slippage.
  ///
  /// # Errors
  /// * Invalid owner or slippage in `config`
  pub fn from_config(config: &QuoteConfig) -> Result<Self> {
    Ok(Self::new(
      RpcStateProvider::from_config(config)?,
      config.default_slippage()?,
    ))
  }
}

impl<S: SnapshotProvider> QuoteService<S> {
  #[must_use]
  pub fn new(provider: S, default_slippage: SlippageConfig) -> Self {
    Self {
      provider,
      default_slippage,
    }
  }

  #[must_use]
  pub fn default_slippage(&self) -> SlippageConfig {
    self.default_slippage
  }

  /// Buy with an exact amount of SOL in.
  ///
  /// # Errors
  /// * Zero `quote_in`
  /// * Curve state unavailable or graduated
  /// * No creator fee recipient known for the token
  /// * Curve arithmetic
  pub async fn quote_buy_exact_in(
    &self,
    base_mint: Pubkey,
    quote_in: UFix64<N9>,
    slippage: Option<SlippageConfig>,
    creator_override: Option<Pubkey>,
  ) -> Result<BuyQuote> {
    ensure_nonzero(quote_in)?;
    let (state, snapshot) = self.buyable(base_mint).await?;
    let fee_recipients = state.fee_recipients(creator_override)?;
    let prediction = snapshot.predict_buy(quote_in)?;
    let breakdown = prediction.breakdown;
    let slippage = slippage.unwrap_or(self.default_slippage);
    let quote = Quote {
      amount_in: breakdown.quote_in,
      amount_out: breakdown.base_out,
      limit: SlippageLimit::MinimumOut(slippage.minimum_out(breakdown.base_out)?),
      fee_amount: breakdown.fee,
      pool_status: snapshot.status(),
      will_graduate: prediction.will_graduate,
      fee_recipients,
      metadata: QuoteMetadata::route(
        Operation::BuyExactIn,
        base_mint,
        snapshot.status(),
      ),
    };
    debug!(
      %base_mint,
      amount_in = quote.amount_in.bits,
      amount_out = quote.amount_out.bits,
      will_graduate = quote.will_graduate,
      "quoted buy exact in"
    );
    Ok(quote)
  }

  /// Buy an exact amount of tokens.
  ///
  /// # Errors
  /// * Zero `base_out`, or more than the pool holds
  /// * Net quote past the graduation threshold
  /// * Curve state unavailable or graduated
  /// * No creator fee recipient known for the token
  pub async fn quote_buy_exact_out(
    &self,
    base_mint: Pubkey,
    base_out: UFix64<N6>,
    slippage: Option<SlippageConfig>,
    creator_override: Option<Pubkey>,
  ) -> Result<BuyQuote> {
    ensure_nonzero(base_out)?;
    let (state, snapshot) = self.buyable(base_mint).await?;
    let fee_recipients = state.fee_recipients(creator_override)?;
    let prediction = snapshot.predict_buy_exact_out(base_out)?;
    let breakdown = prediction.breakdown;
    let slippage = slippage.unwrap_or(self.default_slippage);
    let quote = Quote {
      amount_in: breakdown.quote_in,
      amount_out: breakdown.base_out,
      limit: SlippageLimit::MaximumIn(slippage.maximum_in(breakdown.quote_in)?),
      fee_amount: breakdown.fee,
      pool_status: snapshot.status(),
      will_graduate: prediction.will_graduate,
      fee_recipients,
      metadata: QuoteMetadata::route(
        Operation::BuyExactOut,
        base_mint,
        snapshot.status(),
      ),
    };
    debug!(
      %base_mint,
      amount_in = quote.amount_in.bits,
      amount_out = quote.amount_out.bits,
      will_graduate = quote.will_graduate,
      "quoted buy exact out"
    );
    Ok(quote)
  }

  /// Sell an exact amount of tokens. Only pools that exist can be sold
  /// into.
  ///
  /// # Errors
  /// * Zero `base_in`
  /// * No pool record, or the pool has graduated
  /// * No creator fee recipient known for the token
  pub async fn quote_sell(
    &self,
    base_mint: Pubkey,
    base_in: UFix64<N6>,
    slippage: Option<SlippageConfig>,
    creator_override: Option<Pubkey>,
  ) -> Result<SellQuote> {
    ensure_nonzero(base_in)?;
    let (state, snapshot) = self.sellable(base_mint).await?;
    let fee_recipients = state.fee_recipients(creator_override)?;
    let prediction = snapshot.predict_sell(base_in)?;
    let breakdown = prediction.breakdown;
    let slippage = slippage.unwrap_or(self.default_slippage);
    let quote = Quote {
      amount_in: breakdown.base_in,
      amount_out: breakdown.quote_out,
      limit: SlippageLimit::MinimumOut(
        slippage.minimum_out(breakdown.quote_out)?,
      ),
      fee_amount: breakdown.fee,
      pool_status: snapshot.status(),
      will_graduate: false,
      fee_recipients,
      metadata: QuoteMetadata::route(
        Operation::Sell,
        base_mint,
        snapshot.status(),
      ),
    };
    debug!(
      %base_mint,
      amount_in = quote.amount_in.bits,
      amount_out = quote.amount_out.bits,
      "quoted sell"
    );
    Ok(quote)
  }

  /// `Uninitialized` until the pool exists, `Graduated` once complete.
  ///
  /// # Errors
  /// * Curve state unavailable
  pub async fn pool_status(&self, base_mint: Pubkey) -> Result<PoolStatus> {
    let (_, snapshot) = self.load(base_mint).await?;
    Ok(snapshot.status())
  }

  /// Tokens received for `sol` SOL, without slippage.
  ///   `0.1 => 277808474.311978` on a fresh default curve
  ///
  /// # Errors
  /// * `sol` is negative or not representable in lamports
  /// * Same as [`Self::quote_buy_exact_in`], minus fee recipients
  pub async fn preview_buy(
    &self,
    base_mint: Pubkey,
    sol: Decimal,
  ) -> Result<Decimal> {
    let quote_in = to_base_units::<QuoteExp>(sol)?;
    let (_, snapshot) = self.buyable(base_mint).await?;
    let prediction = snapshot.predict_buy(quote_in)?;
    Ok(from_base_units(prediction.breakdown.base_out)?)
  }

  /// SOL received for `tokens` tokens, after fees, without slippage.
  ///
  /// # Errors
  /// * `tokens` is negative or not representable in base units
  /// * Same as [`Self::quote_sell`], minus fee recipients
  pub async fn preview_sell(
    &self,
    base_mint: Pubkey,
    tokens: Decimal,
  ) -> Result<Decimal> {
    let base_in = to_base_units::<BaseExp>(tokens)?;
    let (_, snapshot) = self.sellable(base_mint).await?;
    let prediction = snapshot.predict_sell(base_in)?;
    Ok(from_base_units(prediction.breakdown.quote_out)?)
  }

  async fn load(&self, base_mint: Pubkey) -> Result<(CurveState, CurveSnapshot)> {
    let state = self.provider.fetch_state(base_mint).await.map_err(|e| {
      warn!(%base_mint, error = %e, "curve state fetch failed");
      if e.is::<QuoteError>() {
        e
      } else {
        QuoteError::unavailable("curve state", e).into()
      }
    })?;
    let snapshot = state.snapshot()?;
    debug!(%base_mint, status = ?snapshot.status(), "selected curve snapshot");
    Ok((state, snapshot))
  }

  async fn tradable(
    &self,
    base_mint: Pubkey,
  ) -> Result<(CurveState, CurveSnapshot)> {
    let (state, snapshot) = self.load(base_mint).await?;
    if snapshot.status() == PoolStatus::Graduated {
      return Err(QuoteError::PoolGraduated { base_mint }.into());
    }
    Ok((state, snapshot))
  }

  /// A pool that reached its threshold but is not yet flagged `complete`
  /// takes no more quote.
  async fn buyable(
    &self,
    base_mint: Pubkey,
  ) -> Result<(CurveState, CurveSnapshot)> {
    let (state, snapshot) = self.tradable(base_mint).await?;
    if snapshot.reserves().is_at_threshold() {
      debug!(%base_mint, "pool at graduation threshold");
      return Err(QuoteError::PoolGraduated { base_mint }.into());
    }
    Ok((state, snapshot))
  }

  async fn sellable(
    &self,
    base_mint: Pubkey,
  ) -> Result<(CurveState, CurveSnapshot)> {
    let (state, snapshot) = self.tradable(base_mint).await?;
    if let CurveSnapshot::DefaultSnapshot(_) = snapshot {
      return Err(
        QuoteError::unavailable(
          "pool state",
          anyhow::anyhow!("No pool for {base_mint}, nothing to sell into"),
        )
        .into(),
      );
    }
    Ok((state, snapshot))
  }
}

fn ensure_nonzero<Exp>(amount: UFix64<Exp>) -> Result<()> {
  if amount.bits == 0 {
    Err(anchor_lang::error::Error::from(InvalidAmount).into())
  } else {
    Ok(())
  }
}
