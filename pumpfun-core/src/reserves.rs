use anchor_lang::prelude::*;
use fix::prelude::*;

use crate::error::CoreError::{CurveArithmetic, ReserveInvariant};
use crate::fee::TradingFee;

/// Reserves of a bonding curve at the moment a quote is computed.
///
/// Base amounts are in launched token units (`N6`), quote amounts in
/// lamports (`N9`). Virtual reserves only shift the curve, they are never
/// paid out or received.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReserveSnapshot {
  pub trading_fee: TradingFee,
  pub virtual_base_reserves: UFix64<N6>,
  pub virtual_quote_reserves: UFix64<N9>,
  pub real_base_reserves: UFix64<N6>,
  pub real_quote_reserves: UFix64<N9>,
  pub real_quote_threshold: UFix64<N9>,
}

/// Effective reserves on the input and output side of a trade.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ReservePair<InExp, OutExp> {
  pub input: UFix64<InExp>,
  pub output: UFix64<OutExp>,
}

impl<InExp, OutExp> std::fmt::Debug for ReservePair<InExp, OutExp>
where
  UFix64<InExp>: std::fmt::Debug,
  UFix64<OutExp>: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ReservePair")
      .field("input", &self.input)
      .field("output", &self.output)
      .finish()
  }
}

impl ReserveSnapshot {
  /// Threshold must be positive and real quote cannot exceed it.
  pub fn validate(&self) -> Result<()> {
    if self.real_quote_threshold > UFix64::zero()
      && self.real_quote_reserves <= self.real_quote_threshold
    {
      Ok(())
    } else {
      Err(ReserveInvariant.into())
    }
  }

  /// `real_base + virtual_base`
  pub fn total_base(&self) -> Result<UFix64<N6>> {
    self
      .real_base_reserves
      .checked_add(&self.virtual_base_reserves)
      .ok_or(CurveArithmetic.into())
  }

  /// `real_quote + virtual_quote`
  pub fn total_quote(&self) -> Result<UFix64<N9>> {
    self
      .real_quote_reserves
      .checked_add(&self.virtual_quote_reserves)
      .ok_or(CurveArithmetic.into())
  }

  /// Quote flows in, base flows out.
  pub fn buy_pair(&self) -> Result<ReservePair<N9, N6>> {
    Ok(ReservePair {
      input: self.total_quote()?,
      output: self.total_base()?,
    })
  }

  /// Base flows in, quote flows out.
  pub fn sell_pair(&self) -> Result<ReservePair<N6, N9>> {
    Ok(ReservePair {
      input: self.total_base()?,
      output: self.total_quote()?,
    })
  }

  /// Quote the pool can still absorb before it graduates.
  #[must_use]
  pub fn remaining_quote_capacity(&self) -> UFix64<N9> {
    self
      .real_quote_threshold
      .checked_sub(&self.real_quote_reserves)
      .unwrap_or(UFix64::zero())
  }

  #[must_use]
  pub fn is_at_threshold(&self) -> bool {
    self.real_quote_reserves >= self.real_quote_threshold
  }
}
