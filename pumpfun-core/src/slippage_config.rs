use crate::error::CoreError::{SlippageArithmetic, SlippageExceeded};

use anchor_lang::prelude::*;
use fix::prelude::*;

/// Client specified slippage tolerance as a fraction, `0.1000 => 10%`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlippageConfig {
  slippage_tolerance: UFix64<N4>,
}

impl SlippageConfig {
  #[must_use]
  pub fn new(slippage_tolerance: UFix64<N4>) -> SlippageConfig {
    SlippageConfig { slippage_tolerance }
  }

  /// Whole percent, `10 => 10%`.
  pub fn from_percent(percent: u64) -> Result<SlippageConfig> {
    percent
      .checked_mul(100)
      .map(Self::from_bps)
      .ok_or(SlippageArithmetic.into())
  }

  /// Basis points, `50 => 0.5%`.
  #[must_use]
  pub fn from_bps(bps: u64) -> SlippageConfig {
    SlippageConfig::new(UFix64::new(bps))
  }

  #[must_use]
  pub fn slippage_tolerance(&self) -> UFix64<N4> {
    self.slippage_tolerance
  }

  /// Lowest output to accept for an expected output.
  ///   `floor(expected * (1 - tolerance))`
  pub fn minimum_out<Exp>(&self, expected: UFix64<Exp>) -> Result<UFix64<Exp>> {
    UFix64::<N4>::one()
      .checked_sub(&self.slippage_tolerance)
      .and_then(|factor| expected.mul_div_floor(factor, UFix64::one()))
      .ok_or(SlippageArithmetic.into())
  }

  /// Highest input to pay for an expected input.
  ///   `ceil(expected * (1 + tolerance))`
  pub fn maximum_in<Exp>(&self, expected: UFix64<Exp>) -> Result<UFix64<Exp>> {
    UFix64::<N4>::one()
      .checked_add(&self.slippage_tolerance)
      .and_then(|factor| expected.mul_div_ceil(factor, UFix64::one()))
      .ok_or(SlippageArithmetic.into())
  }

  /// Checks a filled amount against the lowest tolerable amount.
  pub fn validate_token_out<Exp>(
    &self,
    expected: UFix64<Exp>,
    token_out: UFix64<Exp>,
  ) -> Result<()> {
    let tolerable_amount = self.minimum_out(expected)?;
    if token_out.bits >= tolerable_amount.bits {
      Ok(())
    } else {
      Err(SlippageExceeded.into())
    }
  }
}
