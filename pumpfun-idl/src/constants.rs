/// Seed prefix of the singleton `MainState` account.
pub const MAIN_STATE: &[u8] = b"main";

/// Seed prefix of each per-token `PoolState` account.
pub const POOL_STATE: &[u8] = b"pool";

/// `MainState::trading_fee` stores a percentage multiplied by this value.
///   `1%  => 1_000`
pub const FEE_PRE_DIV: u64 = 1_000;

