//! Snapshot provider trait and the RPC backed implementation

use std::sync::{Arc, OnceLock};

use anchor_lang::prelude::Pubkey;
use anchor_lang::Discriminator;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use pumpfun_idl::accounts::MainState;
use pumpfun_idl::pda;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcProgramAccountsConfig;
use solana_rpc_client_api::filter::{Memcmp, RpcFilterType};
use tracing::{debug, warn};

use crate::config::QuoteConfig;
use crate::error::QuoteError;
use crate::protocol_state::{CurveAccounts, CurveState};

/// Source of curve state for one launched token.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
  /// Fetch `MainState` and the pool record of `base_mint`, once.
  ///
  /// # Errors
  /// Returns error if state fetching fails.
  async fn fetch_state(&self, base_mint: Pubkey) -> Result<CurveState>;
}

#[async_trait]
impl<T: SnapshotProvider> SnapshotProvider for Arc<T> {
  async fn fetch_state(&self, base_mint: Pubkey) -> Result<CurveState> {
    (**self).fetch_state(base_mint).await
  }
}

/// Fetches curve state via Solana RPC.
pub struct RpcStateProvider {
  rpc_client: Arc<RpcClient>,
  /// Derived from the owner up front, or discovered on first fetch.
  main_state_address: OnceLock<Pubkey>,
}

impl RpcStateProvider {
  /// Without a `main_state_owner` the `MainState` address is discovered
  /// by scanning program accounts once, then reused.
  #[must_use]
  pub fn new(
    rpc_client: Arc<RpcClient>,
    main_state_owner: Option<Pubkey>,
  ) -> Self {
    let main_state_address = OnceLock::new();
    if let Some(owner) = main_state_owner {
      main_state_address.get_or_init(|| pda::main_state(owner));
    }
    Self {
      rpc_client,
      main_state_address,
    }
  }

  /// # Errors
  /// * Malformed `main_state_owner`
  pub fn from_config(config: &QuoteConfig) -> Result<Self> {
    let rpc_client = RpcClient::new_with_commitment(
      config.rpc_url.clone(),
      config.commitment_config(),
    );
    Ok(Self::new(Arc::new(rpc_client), config.main_state_owner()?))
  }

  async fn main_state_address(&self) -> Result<Pubkey> {
    if let Some(address) = self.main_state_address.get() {
      return Ok(*address);
    }
    let config = RpcProgramAccountsConfig {
      filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
        0,
        MainState::DISCRIMINATOR.to_vec(),
      ))]),
      ..RpcProgramAccountsConfig::default()
    };
    let found = self
      .rpc_client
      .get_program_accounts_with_config(&pumpfun_idl::ID, config)
      .await
      .map_err(|e| {
        QuoteError::unavailable(
          "main state",
          anyhow!("Failed to scan program accounts: {e}"),
        )
      })?;
    debug!(candidates = found.len(), "discovered MainState accounts");
    let address = found.first().map(|(address, _)| *address).ok_or_else(|| {
      QuoteError::unavailable("main state", anyhow!("No MainState account"))
    })?;
    Ok(*self.main_state_address.get_or_init(|| address))
  }
}

#[async_trait]
impl SnapshotProvider for RpcStateProvider {
  async fn fetch_state(&self, base_mint: Pubkey) -> Result<CurveState> {
    let main_state_address = self.main_state_address().await?;
    let pubkeys = CurveAccounts::pubkeys(main_state_address, base_mint);
    let account_data = self
      .rpc_client
      .get_multiple_accounts(&pubkeys)
      .await
      .map_err(|e| {
        warn!(%base_mint, error = %e, "curve account fetch failed");
        QuoteError::unavailable(
          "curve state",
          anyhow!("Failed to fetch accounts from RPC: {e}"),
        )
      })?;
    let accounts = CurveAccounts::try_from((
      base_mint,
      pubkeys.as_slice(),
      account_data.as_slice(),
    ))?;
    debug!(
      %base_mint,
      %main_state_address,
      pool_exists = accounts.pool_state.is_some(),
      "fetched curve accounts"
    );
    CurveState::try_from(&accounts)
  }
}
