use anchor_lang::prelude::{pubkey, Pubkey};
use fix::prelude::{N6, N9};
use fix::typenum::Integer;

/// Fixed-point exponent of a token's smallest unit.
pub trait TokenUnits {
  type Exp: Integer;
}

/// Token with a single well known mint.
pub trait TokenMint: TokenUnits {
  const MINT: Pubkey;
}

/// Wrapped SOL, the quote side of every pool.
pub struct SOL;

impl TokenUnits for SOL {
  type Exp = N9;
}

impl TokenMint for SOL {
  const MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
}

/// Any token launched through the program. Mints are created per launch so
/// there is no fixed address.
pub struct LaunchToken;

impl TokenUnits for LaunchToken {
  type Exp = N6;
}

/// Base units of a launched token.
pub type BaseExp = <LaunchToken as TokenUnits>::Exp;

/// Lamports.
pub type QuoteExp = <SOL as TokenUnits>::Exp;
