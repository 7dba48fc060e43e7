//! SmartSave - savings projections for Canadian registered accounts
//!
//! This library provides:
//! - Monthly-compounded savings projections with yearly sample points
//! - TFSA vs RRSP comparison with an income-based contribution multiplier
//! - Advisory tips and reference data on registered account types
//! - A local vault of saved simulations behind a pluggable storage port
//! - CSV and chart payloads for downstream rendering

pub mod error;
pub mod projection;
pub mod accounts;
pub mod scenario;
pub mod export;
pub mod vault;

// Re-export commonly used types
pub use error::{ExportError, RecordError, StorageError, VaultError};
pub use projection::{
    DualProjection, ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionPoint,
    ProjectionResult, Recommendation, project, simulate_dual,
};
pub use scenario::{Comparison, ScenarioRunner};
pub use vault::{FileStorage, MemoryStorage, RecordId, StoragePort, VaultRecord, VaultStore};
