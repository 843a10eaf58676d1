//! Example: quote a buy and the sell back for one launched token
//!
//! Run with:
//! ```bash
//! RPC_URL=https://api.mainnet-beta.solana.com \
//! PUMPFUN_BASE_MINT=<mint> cargo run --example quote_buy_sell
//! ```

use std::env;
use std::str::FromStr;

use pumpfun_core::units::from_base_units;
use pumpfun_quotes::prelude::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = QuoteConfig::from_env()?;
  let base_mint = Pubkey::from_str(&env::var("PUMPFUN_BASE_MINT")?)?;
  let service = QuoteService::from_config(&config)?;

  let status = service.pool_status(base_mint).await?;
  println!("Pool {base_mint}: {status:?}");

  let quote_in = UFix64::<N9>::new(100_000_000); // 0.1 SOL
  let buy = service
    .quote_buy_exact_in(base_mint, quote_in, None, None)
    .await?;
  println!("Buy:  {}", buy.metadata.description);
  println!("  tokens out: {}", from_base_units(buy.amount_out)?);
  println!("  fee:        {} SOL", from_base_units(buy.fee_amount)?);
  println!("  limit:      {:?}", buy.limit);
  println!("  graduates:  {}", buy.will_graduate);

  let sell = service
    .quote_sell(base_mint, buy.amount_out, None, None)
    .await?;
  println!("Sell: {}", sell.metadata.description);
  println!("  SOL out:    {}", from_base_units(sell.amount_out)?);

  let preview = service
    .preview_buy(base_mint, Decimal::from_str("1")?)
    .await?;
  println!("1 SOL buys about {preview} tokens");
  Ok(())
}
