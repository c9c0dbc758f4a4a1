//! AquaGrow Record Store
//!
//! A tiny embedded database over a single key/value slot:
//! - One JSON document holding the farmers, investors and team members
//!   collections plus the company info singleton
//! - Seeded from an embedded dataset on first use
//! - Corrupted payloads are copied to a backup slot before recovery
//! - CRUD per collection with generated, prefixed ids
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aquagrow_store::{MemoryStorage, NewFarmer, RecordStore};
//!
//! # async fn demo() -> aquagrow_store::Result<()> {
//! let store = RecordStore::new(Arc::new(MemoryStorage::new()));
//! let farmer = store
//!     .farmers()
//!     .create(NewFarmer {
//!         name: "Amina".into(),
//!         location: "Kitui".into(),
//!         phone: Some("+254700000000".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(store.farmers().list().await?[0], farmer);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod id;
pub mod model;
pub mod record;
pub mod seed;
pub mod storage;
pub mod store;

pub use error::{Result, StorageError, StoreError};
pub use model::{
    CompanyInfo, Document, Farmer, FarmerStatus, Investor, InvestorStatus, NewFarmer,
    NewInvestor, NewTeamMember, Socials, StoreSummary, TeamMember,
};
pub use record::Record;
pub use storage::{MemoryStorage, SledStorage, StoragePort};
pub use store::{Collection, CorruptionPolicy, RecordStore, StoreConfig};
