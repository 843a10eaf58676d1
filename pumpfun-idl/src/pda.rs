use anchor_lang::prelude::Pubkey;

use crate::constants::{MAIN_STATE, POOL_STATE};
use crate::tokens::{TokenMint, SOL};

macro_rules! pda {
  ($program_id:expr, $base:expr, $key:expr) => {
    Pubkey::find_program_address(&[$base.as_ref(), $key.as_ref()], &$program_id)
      .0
  };
  ($program_id:expr, $base:expr, $key_1:expr, $key_2:expr) => {
    Pubkey::find_program_address(
      &[$base.as_ref(), $key_1.as_ref(), $key_2.as_ref()],
      &$program_id,
    )
    .0
  };
}

#[macro_export]
macro_rules! ata {
  ($auth:expr, $mint:expr) => {
    anchor_spl::associated_token::get_associated_token_address(&$auth, &$mint)
  };
}

/// Global config account, keyed by the protocol owner.
#[must_use]
pub fn main_state(owner: Pubkey) -> Pubkey {
  pda!(crate::ID, MAIN_STATE, owner)
}

/// Curve account for a launched token paired against wrapped SOL.
#[must_use]
pub fn pool_state(base_mint: Pubkey) -> Pubkey {
  pda!(crate::ID, POOL_STATE, base_mint, SOL::MINT)
}

/// Wrapped SOL token account of a fee recipient.
#[must_use]
pub fn quote_ata(auth: Pubkey) -> Pubkey {
  ata!(&auth, &SOL::MINT)
}
