//! Pool lifecycle: which reserves to price against, and what a trade is
//! expected to do to them.
//!
//! ```txt
//! Uninitialized --(pool created)--> Active --(buy fills threshold)--> Graduated
//! ```
//!
//! Nothing here is persisted. Predictions only feed slippage bounds and the
//! `will_graduate` flag of a quote; the program decides the real outcome.

use anchor_lang::prelude::*;
use fix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::curve_math::{
  buy_breakdown, buy_input_breakdown, sell_breakdown, BuyBreakdown,
  BuyInputBreakdown, SellBreakdown,
};
use crate::error::CoreError::{CurveArithmetic, ExceedsThreshold};
use crate::fee::TradingFee;
use crate::reserves::ReserveSnapshot;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolStatus {
  /// No pool record yet, priced from global defaults.
  Uninitialized,
  Active,
  /// Pool record flagged `complete`.
  Graduated,
}

/// Global launch parameters, used for tokens whose pool does not exist yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CurveDefaults {
  pub trading_fee: TradingFee,
  pub init_virt_base_reserves: UFix64<N6>,
  pub init_virt_quote_reserves: UFix64<N9>,
  pub total_supply: UFix64<N6>,
  pub real_quote_threshold: UFix64<N9>,
}

/// Reserves as recorded on a pool account.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PoolReserves {
  pub virt_base_reserves: UFix64<N6>,
  pub virt_quote_reserves: UFix64<N9>,
  pub real_base_reserves: UFix64<N6>,
  pub real_quote_reserves: UFix64<N9>,
  pub real_quote_threshold: UFix64<N9>,
  pub complete: bool,
}

/// Reserves to price against, tagged by where they came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveSnapshot {
  /// Read from an existing pool record.
  PoolSnapshot {
    reserves: ReserveSnapshot,
    complete: bool,
  },
  /// Synthesized from [`CurveDefaults`] ahead of pool creation.
  DefaultSnapshot(ReserveSnapshot),
}

/// Expected result of a trade against a [`CurveSnapshot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TradePrediction<B> {
  pub breakdown: B,
  pub next_reserves: ReserveSnapshot,
  pub next_status: PoolStatus,
  pub will_graduate: bool,
}

impl CurveDefaults {
  /// Fresh curve: all supply for sale, no quote collected.
  #[must_use]
  pub fn reserves(&self) -> ReserveSnapshot {
    ReserveSnapshot {
      trading_fee: self.trading_fee,
      virtual_base_reserves: self.init_virt_base_reserves,
      virtual_quote_reserves: self.init_virt_quote_reserves,
      real_base_reserves: self.total_supply,
      real_quote_reserves: UFix64::zero(),
      real_quote_threshold: self.real_quote_threshold,
    }
  }
}

impl PoolReserves {
  /// The fee is global, pools only carry reserves.
  #[must_use]
  pub fn reserves(&self, trading_fee: TradingFee) -> ReserveSnapshot {
    ReserveSnapshot {
      trading_fee,
      virtual_base_reserves: self.virt_base_reserves,
      virtual_quote_reserves: self.virt_quote_reserves,
      real_base_reserves: self.real_base_reserves,
      real_quote_reserves: self.real_quote_reserves,
      real_quote_threshold: self.real_quote_threshold,
    }
  }
}

impl CurveSnapshot {
  /// Prices against the pool record when there is one, otherwise against
  /// the launch defaults.
  pub fn select(
    defaults: &CurveDefaults,
    pool: Option<&PoolReserves>,
  ) -> Result<CurveSnapshot> {
    let snapshot = match pool {
      Some(pool) => CurveSnapshot::PoolSnapshot {
        reserves: pool.reserves(defaults.trading_fee),
        complete: pool.complete,
      },
      None => CurveSnapshot::DefaultSnapshot(defaults.reserves()),
    };
    snapshot.reserves().validate()?;
    Ok(snapshot)
  }

  #[must_use]
  pub fn status(&self) -> PoolStatus {
    match self {
      CurveSnapshot::DefaultSnapshot(_) => PoolStatus::Uninitialized,
      CurveSnapshot::PoolSnapshot { complete: true, .. } => {
        PoolStatus::Graduated
      }
      CurveSnapshot::PoolSnapshot { complete: false, .. } => PoolStatus::Active,
    }
  }

  #[must_use]
  pub fn reserves(&self) -> &ReserveSnapshot {
    match self {
      CurveSnapshot::PoolSnapshot { reserves, .. }
      | CurveSnapshot::DefaultSnapshot(reserves) => reserves,
    }
  }

  /// Buy with exact quote in. Graduation is predicted when the clamped net
  /// quote lands exactly on the threshold.
  pub fn predict_buy(
    &self,
    quote_in: UFix64<N9>,
  ) -> Result<TradePrediction<BuyBreakdown>> {
    let current = self.reserves();
    let breakdown = buy_breakdown(current, quote_in)?;
    let next_reserves =
      apply_buy(current, breakdown.net_quote_in, breakdown.base_out)?;
    Ok(self.prediction(breakdown, next_reserves, breakdown.fills_threshold))
  }

  /// Buy with exact base out. The curve does not clamp this path, so an
  /// output whose net quote lands exactly on the threshold graduates the
  /// pool and one that needs more is rejected.
  pub fn predict_buy_exact_out(
    &self,
    base_out: UFix64<N6>,
  ) -> Result<TradePrediction<BuyInputBreakdown>> {
    let current = self.reserves();
    let breakdown = buy_input_breakdown(current, base_out)?;
    let capacity = current.remaining_quote_capacity();
    if breakdown.net_quote_in > capacity {
      return Err(ExceedsThreshold.into());
    }
    let next_reserves =
      apply_buy(current, breakdown.net_quote_in, base_out)?;
    let will_graduate = breakdown.net_quote_in == capacity;
    Ok(self.prediction(breakdown, next_reserves, will_graduate))
  }

  /// Sell with exact base in. Selling never graduates a pool.
  pub fn predict_sell(
    &self,
    base_in: UFix64<N6>,
  ) -> Result<TradePrediction<SellBreakdown>> {
    let current = self.reserves();
    let breakdown = sell_breakdown(current, base_in)?;
    let next_reserves = ReserveSnapshot {
      real_base_reserves: current
        .real_base_reserves
        .checked_add(&base_in)
        .ok_or(CurveArithmetic)?,
      real_quote_reserves: current
        .real_quote_reserves
        .checked_sub(&breakdown.gross_quote_out)
        .unwrap_or(UFix64::zero()),
      ..*current
    };
    Ok(self.prediction(breakdown, next_reserves, false))
  }

  fn prediction<B>(
    &self,
    breakdown: B,
    next_reserves: ReserveSnapshot,
    will_graduate: bool,
  ) -> TradePrediction<B> {
    let next_status = match (self.status(), will_graduate) {
      (PoolStatus::Graduated, _) | (_, true) => PoolStatus::Graduated,
      _ => PoolStatus::Active,
    };
    TradePrediction {
      breakdown,
      next_reserves,
      next_status,
      will_graduate,
    }
  }
}

fn apply_buy(
  current: &ReserveSnapshot,
  net_quote_in: UFix64<N9>,
  base_out: UFix64<N6>,
) -> Result<ReserveSnapshot> {
  Ok(ReserveSnapshot {
    real_base_reserves: current
      .real_base_reserves
      .checked_sub(&base_out)
      .ok_or(CurveArithmetic)?,
    real_quote_reserves: current
      .real_quote_reserves
      .checked_add(&net_quote_in)
      .ok_or(CurveArithmetic)?,
    ..*current
  })
}
