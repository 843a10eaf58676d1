//! Quote metadata types

use anchor_lang::prelude::Pubkey;

/// Trade direction and which side the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  BuyExactIn,
  BuyExactOut,
  Sell,
}

impl Operation {
  #[must_use]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Operation::BuyExactIn => "buy_exact_in",
      Operation::BuyExactOut => "buy_exact_out",
      Operation::Sell => "sell",
    }
  }
}

impl AsRef<str> for Operation {
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl std::fmt::Display for Operation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Metadata for a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMetadata {
  pub operation: Operation,

  /// Human-readable route, eg `buy_exact_in <mint> (Active)`
  pub description: String,
}

impl QuoteMetadata {
  #[must_use]
  pub fn new(operation: Operation, description: impl Into<String>) -> Self {
    Self {
      operation,
      description: description.into(),
    }
  }

  pub(crate) fn route(
    operation: Operation,
    base_mint: Pubkey,
    status: impl std::fmt::Debug,
  ) -> Self {
    Self::new(operation, format!("{operation} {base_mint} ({status:?})"))
  }
}
