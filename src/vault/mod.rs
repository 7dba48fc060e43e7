//! Local vault of saved TFSA vs RRSP simulations

mod ids;
mod record;
mod storage;
mod store;

pub use ids::IdGenerator;
pub use record::{default_title, RecordId, VaultRecord};
pub use storage::{FileStorage, MemoryStorage, StoragePort, VAULT_KEY};
pub use store::{DeleteOutcome, VaultStore};
