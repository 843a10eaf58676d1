use anchor_lang::prelude::*;
use fix::prelude::*;

use crate::error::CoreError::{
  CurveArithmetic, DegenerateCurve, ExceedsReserves, InvalidAmount,
};
use crate::reserves::{ReservePair, ReserveSnapshot};

/// Constant product output for an amount entering the curve.
///
/// ```txt
///                  output_reserve * input_amount
/// output_amount = -------------------------------
///                  input_reserve + input_amount
/// ```
pub fn calculate_output_amount<InExp, OutExp>(
  input_amount: UFix64<InExp>,
  reserves: ReservePair<InExp, OutExp>,
) -> Result<UFix64<OutExp>> {
  let divider = reserves
    .input
    .checked_add(&input_amount)
    .ok_or(CurveArithmetic)?;
  if divider.bits == 0 {
    Ok(UFix64::new(0))
  } else {
    reserves
      .output
      .mul_div_floor(input_amount, divider)
      .ok_or(CurveArithmetic.into())
  }
}

/// Inverse of [`calculate_output_amount`], the input needed to take an exact
/// amount out of the curve.
///
/// ```txt
///                 input_reserve * output_amount
/// input_amount = --------------------------------
///                 output_reserve - output_amount
/// ```
pub fn calculate_input_amount<InExp, OutExp>(
  output_amount: UFix64<OutExp>,
  reserves: ReservePair<InExp, OutExp>,
) -> Result<UFix64<InExp>> {
  if output_amount.bits >= reserves.output.bits {
    return Err(DegenerateCurve.into());
  }
  let divider = reserves
    .output
    .checked_sub(&output_amount)
    .ok_or(DegenerateCurve)?;
  reserves
    .input
    .mul_div_floor(output_amount, divider)
    .ok_or(CurveArithmetic.into())
}

/// Every intermediate of a buy with exact quote in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuyBreakdown {
  pub quote_in: UFix64<N9>,
  pub fee: UFix64<N9>,
  /// Quote entering the curve after fees and the threshold clamp.
  pub net_quote_in: UFix64<N9>,
  pub base_out: UFix64<N6>,
  /// Net quote lands the pool exactly on its graduation threshold.
  pub fills_threshold: bool,
}

/// Every intermediate of a sell with exact base in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SellBreakdown {
  pub base_in: UFix64<N6>,
  /// Quote leaving the curve before fees.
  pub gross_quote_out: UFix64<N9>,
  pub fee: UFix64<N9>,
  pub quote_out: UFix64<N9>,
}

/// Every intermediate of a buy with exact base out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuyInputBreakdown {
  pub base_out: UFix64<N6>,
  /// Quote the curve itself needs.
  pub net_quote_in: UFix64<N9>,
  pub fee: UFix64<N9>,
  pub quote_in: UFix64<N9>,
}

/// Prices a buy with an exact amount of quote in.
///
/// Fee is taken from the gross input first. If the remainder would push
/// real quote reserves past the graduation threshold, only the part that
/// fills the threshold is priced. Output never exceeds real base reserves.
///
/// The fee is rounded up to whole lamports before pricing, so when
/// `quote_in * rate` is fractional the curve sees up to one lamport less
/// than an exact fractional net amount would give it.
pub fn buy_breakdown(
  snapshot: &ReserveSnapshot,
  quote_in: UFix64<N9>,
) -> Result<BuyBreakdown> {
  if quote_in == UFix64::zero() {
    return Ok(BuyBreakdown {
      quote_in,
      fee: UFix64::zero(),
      net_quote_in: UFix64::zero(),
      base_out: UFix64::zero(),
      fills_threshold: false,
    });
  }
  let extract = snapshot.trading_fee.extract(quote_in)?;
  let capacity = snapshot.remaining_quote_capacity();
  let net_quote_in = if extract.amount_remaining > capacity {
    capacity
  } else {
    extract.amount_remaining
  };
  let curve_out = calculate_output_amount(net_quote_in, snapshot.buy_pair()?)?;
  let base_out = if curve_out > snapshot.real_base_reserves {
    snapshot.real_base_reserves
  } else {
    curve_out
  };
  Ok(BuyBreakdown {
    quote_in,
    fee: extract.fees_extracted,
    net_quote_in,
    base_out,
    fills_threshold: net_quote_in > UFix64::zero() && net_quote_in == capacity,
  })
}

/// Prices a sell with an exact amount of base in. Fee is taken from the
/// curve's quote output.
pub fn sell_breakdown(
  snapshot: &ReserveSnapshot,
  base_in: UFix64<N6>,
) -> Result<SellBreakdown> {
  if base_in == UFix64::zero() {
    return Ok(SellBreakdown {
      base_in,
      gross_quote_out: UFix64::zero(),
      fee: UFix64::zero(),
      quote_out: UFix64::zero(),
    });
  }
  let gross_quote_out = calculate_output_amount(base_in, snapshot.sell_pair()?)?;
  let extract = snapshot.trading_fee.extract(gross_quote_out)?;
  Ok(SellBreakdown {
    base_in,
    gross_quote_out,
    fee: extract.fees_extracted,
    quote_out: extract.amount_remaining,
  })
}

/// Prices a buy with an exact amount of base out.
///
/// The fee is grossed up so that extracting it from the total leaves the
/// quote the curve needs: `fee = net * rate / (1 - rate)`.
pub fn buy_input_breakdown(
  snapshot: &ReserveSnapshot,
  base_out: UFix64<N6>,
) -> Result<BuyInputBreakdown> {
  if base_out == UFix64::zero() {
    return Err(InvalidAmount.into());
  }
  if base_out > snapshot.real_base_reserves {
    return Err(ExceedsReserves.into());
  }
  let net_quote_in = calculate_input_amount(base_out, snapshot.buy_pair()?)?;
  let fee = snapshot.trading_fee.gross_up(net_quote_in)?;
  let quote_in = net_quote_in.checked_add(&fee).ok_or(CurveArithmetic)?;
  Ok(BuyInputBreakdown {
    base_out,
    net_quote_in,
    fee,
    quote_in,
  })
}

/// Base out for an exact quote in.
pub fn quote_buy_output(
  snapshot: &ReserveSnapshot,
  quote_in: UFix64<N9>,
) -> Result<UFix64<N6>> {
  buy_breakdown(snapshot, quote_in).map(|b| b.base_out)
}

/// Quote in, fees included, for an exact base out.
pub fn quote_buy_input(
  snapshot: &ReserveSnapshot,
  base_out: UFix64<N6>,
) -> Result<UFix64<N9>> {
  buy_input_breakdown(snapshot, base_out).map(|b| b.quote_in)
}

/// Quote out, net of fees, for an exact base in.
pub fn quote_sell_output(
  snapshot: &ReserveSnapshot,
  base_in: UFix64<N6>,
) -> Result<UFix64<N9>> {
  sell_breakdown(snapshot, base_in).map(|s| s.quote_out)
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::fee::TradingFee;
  use crate::util::proptest::*;

  use more_asserts::{assert_ge, assert_le, assert_lt};
  use proptest::prelude::*;

  #[test]
  fn golden_buy_output() -> Result<()> {
    let snapshot = golden_snapshot();
    let out = quote_buy_output(&snapshot, UFix64::new(100_000_000))?;
    assert_eq!(out, UFix64::new(277_808_474_311_978));
    Ok(())
  }

  #[test]
  fn golden_buy_breakdown() -> Result<()> {
    let snapshot = golden_snapshot();
    let buy = buy_breakdown(&snapshot, UFix64::new(100_000_000))?;
    assert_eq!(buy.fee, UFix64::new(1_000_000));
    assert_eq!(buy.net_quote_in, UFix64::new(99_000_000));
    assert!(!buy.fills_threshold);
    Ok(())
  }

  #[test]
  fn zero_in_zero_out() -> Result<()> {
    let snapshot = golden_snapshot();
    assert_eq!(quote_buy_output(&snapshot, UFix64::zero())?, UFix64::zero());
    assert_eq!(quote_sell_output(&snapshot, UFix64::zero())?, UFix64::zero());
    Ok(())
  }

  #[test]
  fn buy_clamps_to_threshold() -> Result<()> {
    let mut snapshot = golden_snapshot();
    snapshot.real_quote_reserves = UFix64::new(849_999_999);
    let buy = buy_breakdown(&snapshot, UFix64::new(1_000_000_000))?;
    assert_eq!(buy.net_quote_in, UFix64::new(1));
    assert_eq!(buy.base_out, UFix64::new(941_176));
    assert!(buy.fills_threshold);
    Ok(())
  }

  #[test]
  fn buy_fills_fresh_pool() -> Result<()> {
    let snapshot = golden_snapshot();
    let buy = buy_breakdown(&snapshot, UFix64::new(1_000_000_000))?;
    assert_eq!(buy.fee, UFix64::new(10_000_000));
    assert_eq!(buy.net_quote_in, UFix64::new(850_000_000));
    assert_eq!(buy.base_out, UFix64::new(799_999_999_996_460));
    assert!(buy.fills_threshold);
    Ok(())
  }

  #[test]
  fn buy_on_full_pool_yields_nothing() -> Result<()> {
    let mut snapshot = golden_snapshot();
    snapshot.real_quote_reserves = snapshot.real_quote_threshold;
    let buy = buy_breakdown(&snapshot, UFix64::new(100_000_000))?;
    assert_eq!(buy.net_quote_in, UFix64::zero());
    assert_eq!(buy.base_out, UFix64::zero());
    assert!(!buy.fills_threshold);
    Ok(())
  }

  #[test]
  fn buy_output_capped_by_real_base() -> Result<()> {
    let mut snapshot = golden_snapshot();
    snapshot.real_base_reserves = UFix64::new(1_000);
    let out = quote_buy_output(&snapshot, UFix64::new(100_000_000))?;
    assert_eq!(out, UFix64::new(1_000));
    Ok(())
  }

  #[test]
  fn fractional_fee_prices_whole_lamports() -> Result<()> {
    let snapshot = golden_snapshot();
    // 1% of 150 is 1.5, charged as 2
    let buy = buy_breakdown(&snapshot, UFix64::new(150))?;
    assert_eq!(buy.fee, UFix64::new(2));
    assert_eq!(buy.net_quote_in, UFix64::new(148));
    assert_eq!(buy.base_out, UFix64::new(562_150_963));
    // pricing the exact 148.5 lamports would give 564_050_121
    assert_lt!(buy.base_out, UFix64::new(564_050_121));
    Ok(())
  }

  #[test]
  fn sell_after_golden_buy() -> Result<()> {
    let mut snapshot = golden_snapshot();
    let bought = UFix64::<N6>::new(277_808_474_311_978);
    snapshot.real_base_reserves = UFix64::new(722_191_525_688_022);
    snapshot.real_quote_reserves = UFix64::new(99_000_000);
    let sell = sell_breakdown(&snapshot, bought)?;
    assert_eq!(sell.gross_quote_out, UFix64::new(98_999_999));
    assert_eq!(sell.fee, UFix64::new(990_000));
    assert_eq!(sell.quote_out, UFix64::new(98_009_999));
    Ok(())
  }

  #[test]
  fn sell_dust_rounds_to_zero() -> Result<()> {
    let snapshot = golden_snapshot();
    let out = quote_sell_output(&snapshot, UFix64::new(1_000_000))?;
    assert_eq!(out, UFix64::zero());
    Ok(())
  }

  #[test]
  fn buy_input_grosses_up_fee() -> Result<()> {
    let snapshot = golden_snapshot();
    let buy = buy_input_breakdown(&snapshot, UFix64::new(100_000_000_000))?;
    assert_eq!(buy.net_quote_in, UFix64::new(26_329));
    // 26_329 * 0.01 / 0.99, not 26_329 * 0.01
    assert_eq!(buy.fee, UFix64::new(265));
    assert_eq!(buy.quote_in, UFix64::new(26_594));
    Ok(())
  }

  #[test]
  fn buy_input_inverts_golden_buy() -> Result<()> {
    let snapshot = golden_snapshot();
    let quote_in =
      quote_buy_input(&snapshot, UFix64::new(277_808_474_311_978))?;
    assert_eq!(quote_in, UFix64::new(99_999_998));
    Ok(())
  }

  #[test]
  fn buy_input_rejects_zero() {
    let snapshot = golden_snapshot();
    let result = quote_buy_input(&snapshot, UFix64::zero());
    assert!(result.is_err_and(|e| e == InvalidAmount.into()));
  }

  #[test]
  fn buy_input_exceeds_real_base() {
    let snapshot = golden_snapshot();
    let over = snapshot
      .real_base_reserves
      .checked_add(&UFix64::new(1))
      .expect("over");
    let result = quote_buy_input(&snapshot, over);
    assert!(result.is_err_and(|e| e == ExceedsReserves.into()));
  }

  #[test]
  fn buy_input_whole_real_base_with_virtual_offset() -> Result<()> {
    let snapshot = golden_snapshot();
    let quote_in = quote_buy_input(&snapshot, snapshot.real_base_reserves)?;
    assert_ge!(quote_in, snapshot.virtual_quote_reserves);
    Ok(())
  }

  #[test]
  fn buy_input_degenerate_without_virtual_base() {
    let mut snapshot = golden_snapshot();
    snapshot.virtual_base_reserves = UFix64::zero();
    let result = quote_buy_input(&snapshot, snapshot.real_base_reserves);
    assert!(result.is_err_and(|e| e == DegenerateCurve.into()));
  }

  #[test]
  fn zero_fee_pricing_matches_curve() -> Result<()> {
    let mut snapshot = golden_snapshot();
    snapshot.trading_fee = TradingFee::zero();
    let out = quote_buy_output(&snapshot, UFix64::new(99_000_000))?;
    assert_eq!(out, UFix64::new(277_808_474_311_978));
    Ok(())
  }

  #[test]
  fn pricing_is_idempotent() -> Result<()> {
    let snapshot = golden_snapshot();
    let quote_in = UFix64::new(123_456_789);
    assert_eq!(
      buy_breakdown(&snapshot, quote_in)?,
      buy_breakdown(&snapshot, quote_in)?
    );
    let base_in = UFix64::new(9_876_543_210);
    assert_eq!(
      sell_breakdown(&snapshot, base_in)?,
      sell_breakdown(&snapshot, base_in)?
    );
    Ok(())
  }

  proptest! {
    #[test]
    fn buy_roundtrip_never_expands(
      snapshot in reserve_snapshot(),
      quote_in in quote_amount(),
    ) {
      let base_out = quote_buy_output(&snapshot, quote_in)?;
      if base_out > UFix64::zero() {
        let back = quote_buy_input(&snapshot, base_out)?;
        prop_assert!(back <= quote_in);
      }
    }

    #[test]
    fn sell_output_monotone(
      snapshot in reserve_snapshot(),
      base_in in base_amount(),
      extra in base_amount(),
    ) {
      let larger = base_in.checked_add(&extra).expect("larger");
      let small_out = quote_sell_output(&snapshot, base_in)?;
      let large_out = quote_sell_output(&snapshot, larger)?;
      prop_assert!(small_out <= large_out);
    }

    #[test]
    fn buy_respects_reserves_and_threshold(
      snapshot in reserve_snapshot(),
      quote_in in quote_amount(),
    ) {
      let buy = buy_breakdown(&snapshot, quote_in)?;
      assert_le!(buy.base_out, snapshot.real_base_reserves);
      assert_le!(buy.net_quote_in, snapshot.remaining_quote_capacity());
      assert_le!(
        buy.fee.checked_add(&buy.net_quote_in).expect("spent"),
        quote_in
      );
    }

    #[test]
    fn sell_fee_bounded_by_gross(
      snapshot in reserve_snapshot(),
      base_in in base_amount(),
    ) {
      let sell = sell_breakdown(&snapshot, base_in)?;
      prop_assert_eq!(
        sell.fee.checked_add(&sell.quote_out).expect("gross"),
        sell.gross_quote_out
      );
    }
  }
}
