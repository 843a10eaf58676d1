use anchor_lang::prelude::*;
use fix::prelude::*;

use crate::error::CoreError::{FeeExtraction, InvalidFees};

/// Trading fee rate as a fraction with five decimal places.
///
/// The program stores the fee as `percent * 1000`, which happens to be the
/// bit pattern of a `UFix64<N5>` fraction: `1_000 => 0.01000 => 1%`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TradingFee {
  rate: UFix64<N5>,
}

impl TradingFee {
  /// Fee must be less than 100%.
  pub fn new(rate: UFix64<N5>) -> Result<TradingFee> {
    if rate < UFix64::one() {
      Ok(TradingFee { rate })
    } else {
      Err(InvalidFees.into())
    }
  }

  /// Builds the fee from the raw `MainState::trading_fee` integer.
  pub fn from_raw(trading_fee: u64) -> Result<TradingFee> {
    TradingFee::new(UFix64::new(trading_fee))
  }

  #[must_use]
  pub fn zero() -> TradingFee {
    TradingFee {
      rate: UFix64::zero(),
    }
  }

  #[must_use]
  pub fn rate(&self) -> UFix64<N5> {
    self.rate
  }

  /// Takes the fee out of a gross amount.
  pub fn extract<Exp>(&self, amount: UFix64<Exp>) -> Result<FeeExtract<Exp>> {
    FeeExtract::new(self.rate, amount)
  }

  /// Fee to add on top of a net amount so that extracting it again leaves
  /// the net amount.
  ///   `fee = net * rate / (1 - rate)`
  pub fn gross_up<Exp>(&self, net: UFix64<Exp>) -> Result<UFix64<Exp>> {
    UFix64::<N5>::one()
      .checked_sub(&self.rate)
      .and_then(|complement| net.mul_div_floor(self.rate, complement))
      .ok_or(FeeExtraction.into())
  }
}

/// Combines fee multiplication for a token amount with the remaining token
/// amount by subtraction. Fees round up.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FeeExtract<Exp> {
  pub fees_extracted: UFix64<Exp>,
  pub amount_remaining: UFix64<Exp>,
}

impl<Exp> std::fmt::Debug for FeeExtract<Exp>
where
  UFix64<Exp>: std::fmt::Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FeeExtract")
      .field("fees_extracted", &self.fees_extracted)
      .field("amount_remaining", &self.amount_remaining)
      .finish()
  }
}

impl<Exp> FeeExtract<Exp> {
  pub fn new(
    fee: UFix64<N5>,
    amount_in: UFix64<Exp>,
  ) -> Result<FeeExtract<Exp>> {
    let fees_extracted = amount_in
      .mul_div_ceil(fee, UFix64::<N5>::one())
      .ok_or(FeeExtraction)?;

    let amount_remaining = amount_in
      .checked_sub(&fees_extracted)
      .ok_or(FeeExtraction)?;

    Ok(FeeExtract {
      fees_extracted,
      amount_remaining,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_one_percent() -> Result<()> {
    let fee = TradingFee::from_raw(1_000)?;
    let result = fee.extract(UFix64::<N9>::new(100_000_000))?;
    assert_eq!(result.fees_extracted, UFix64::new(1_000_000));
    assert_eq!(result.amount_remaining, UFix64::new(99_000_000));
    Ok(())
  }

  #[test]
  fn extract_rounds_fee_up() -> Result<()> {
    let fee = TradingFee::from_raw(1_000)?;
    let result = fee.extract(UFix64::<N9>::new(150))?;
    assert_eq!(result.fees_extracted, UFix64::new(2));
    assert_eq!(result.amount_remaining, UFix64::new(148));
    Ok(())
  }

  #[test]
  fn gross_up_inverts_extract() -> Result<()> {
    let fee = TradingFee::from_raw(1_000)?;
    let net = UFix64::<N9>::new(99_000_000);
    let gross = net
      .checked_add(&fee.gross_up(net)?)
      .ok_or(FeeExtraction)?;
    assert_eq!(gross, UFix64::new(100_000_000));
    assert_eq!(fee.extract(gross)?.amount_remaining, net);
    Ok(())
  }

  #[test]
  fn zero_fee_is_identity() -> Result<()> {
    let fee = TradingFee::zero();
    let amount = UFix64::<N6>::new(123_456);
    assert_eq!(fee.extract(amount)?.amount_remaining, amount);
    assert_eq!(fee.gross_up(amount)?, UFix64::zero());
    Ok(())
  }

  #[test]
  fn reject_100_percent_fee() {
    let result = TradingFee::from_raw(100_000);
    assert!(result.is_err_and(|e| e == InvalidFees.into()));
  }
}
