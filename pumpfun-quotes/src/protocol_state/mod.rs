mod accounts;
mod provider;
mod state;

pub use accounts::CurveAccounts;
pub use provider::{RpcStateProvider, SnapshotProvider};
pub use state::{CurveState, FeeRecipients};
