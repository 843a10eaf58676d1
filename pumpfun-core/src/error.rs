use anchor_lang::prelude::error_code;

#[error_code]
pub enum CoreError {
  // `curve_math`
  #[msg("Trade amount must be greater than zero.")]
  InvalidAmount = 7000,
  #[msg("Requested output exceeds the pool's real base reserves.")]
  ExceedsReserves,
  #[msg("Requested output consumes the entire curve reserve.")]
  DegenerateCurve,
  #[msg("Over/underflow in constant product formula.")]
  CurveArithmetic,
  // `fee`
  #[msg("Arithmetic error while extracting trading fee.")]
  FeeExtraction,
  #[msg("Trading fee must be below 100%.")]
  InvalidFees,
  // `reserves`
  #[msg("Real quote reserves are above the graduation threshold.")]
  ReserveInvariant,
  // `slippage_config`
  #[msg("Over/underflow while computing acceptable token amount.")]
  SlippageArithmetic,
  #[msg("Token output amount exceeds provided slippage configuration.")]
  SlippageExceeded,
  // `units`
  #[msg("Amount cannot be represented in the token's base units.")]
  AmountParse,
  // `pool_lifecycle`
  #[msg("Requested output needs more quote than the curve accepts before graduating.")]
  ExceedsThreshold,
}
