//! Conversion between human readable amounts and base units.

use std::str::FromStr;

use anchor_lang::prelude::*;
use fix::prelude::*;
use fix::typenum::Integer;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::CoreError::AmountParse;

fn decimals<Exp: Integer>() -> Result<u32> {
  u32::try_from(-Exp::to_i32()).map_err(|_| AmountParse.into())
}

/// Scales a decimal amount to base units, truncating extra precision.
///   `0.1 SOL => 100_000_000`
pub fn to_base_units<Exp: Integer>(amount: Decimal) -> Result<UFix64<Exp>> {
  if amount.is_sign_negative() {
    return Err(AmountParse.into());
  }
  let scale = 10u64
    .checked_pow(decimals::<Exp>()?)
    .ok_or(AmountParse)?;
  amount
    .checked_mul(Decimal::from(scale))
    .and_then(|scaled| scaled.trunc().to_u64())
    .map(UFix64::new)
    .ok_or(AmountParse.into())
}

/// Parses then scales a decimal string.
pub fn parse_amount<Exp: Integer>(amount: &str) -> Result<UFix64<Exp>> {
  let parsed = Decimal::from_str(amount.trim()).map_err(|_| AmountParse)?;
  to_base_units(parsed)
}

/// Exact decimal representation of a base unit amount.
pub fn from_base_units<Exp: Integer>(amount: UFix64<Exp>) -> Result<Decimal> {
  Decimal::try_from_i128_with_scale(i128::from(amount.bits), decimals::<Exp>()?)
    .map(|d| d.normalize())
    .map_err(|_| AmountParse.into())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sol_to_lamports() -> Result<()> {
    assert_eq!(parse_amount::<N9>("0.1")?, UFix64::new(100_000_000));
    assert_eq!(parse_amount::<N9>("1.5")?, UFix64::new(1_500_000_000));
    Ok(())
  }

  #[test]
  fn tokens_truncate_extra_precision() -> Result<()> {
    let amount = parse_amount::<N6>("63529411.7647058")?;
    assert_eq!(amount, UFix64::new(63_529_411_764_705));
    Ok(())
  }

  #[test]
  fn base_units_back_to_decimal() -> Result<()> {
    let tokens = from_base_units(UFix64::<N6>::new(277_808_474_311_978))?;
    assert_eq!(tokens, Decimal::from_str("277808474.311978").expect("dec"));
    let sol = from_base_units(UFix64::<N9>::new(850_000_000))?;
    assert_eq!(sol, Decimal::from_str("0.85").expect("dec"));
    Ok(())
  }

  #[test]
  fn reject_negative_and_garbage() {
    assert!(parse_amount::<N9>("-1").is_err_and(|e| e == AmountParse.into()));
    assert!(parse_amount::<N9>("one sol").is_err());
  }

  #[test]
  fn reject_overflow() {
    let result = parse_amount::<N9>("100000000000");
    assert!(result.is_err_and(|e| e == AmountParse.into()));
  }
}
