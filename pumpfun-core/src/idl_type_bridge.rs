use anchor_lang::prelude::*;
use fix::prelude::*;

use crate::fee::TradingFee;
use crate::pool_lifecycle::{CurveDefaults, PoolReserves};

impl TryFrom<&pumpfun_idl::accounts::MainState> for CurveDefaults {
  type Error = anchor_lang::error::Error;

  fn try_from(idl: &pumpfun_idl::accounts::MainState) -> Result<Self> {
    Ok(CurveDefaults {
      trading_fee: TradingFee::from_raw(idl.trading_fee)?,
      init_virt_base_reserves: UFix64::new(idl.init_virt_base_reserves),
      init_virt_quote_reserves: UFix64::new(idl.init_virt_quote_reserves),
      total_supply: UFix64::new(idl.total_supply),
      real_quote_threshold: UFix64::new(idl.real_quote_threshold),
    })
  }
}

impl From<&pumpfun_idl::accounts::PoolState> for PoolReserves {
  fn from(idl: &pumpfun_idl::accounts::PoolState) -> Self {
    PoolReserves {
      virt_base_reserves: UFix64::new(idl.virt_base_reserves),
      virt_quote_reserves: UFix64::new(idl.virt_quote_reserves),
      real_base_reserves: UFix64::new(idl.real_base_reserves),
      real_quote_reserves: UFix64::new(idl.real_quote_reserves),
      real_quote_threshold: UFix64::new(idl.real_quote_threshold),
      complete: idl.complete,
    }
  }
}
