mod importance;
mod info;
mod multisig;
mod remote;
mod state;
mod weighted;

pub use importance::{AccountImportance, AccountLink};
pub use info::AccountInfo;
pub use multisig::MultisigLinks;
pub use remote::{ImportanceTransferMode, RemoteLink, RemoteLinks, RemoteRole};
pub use state::AccountState;
pub use weighted::{WeightedBalance, WeightedBalances};
