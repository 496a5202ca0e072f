//! Asynchronous model import
//!
//! Stores deliver one completion per [`ImportRequest`], in any order, through
//! an [`ImportCallback`]. A [`LoadBarrier`] turns those completions into a
//! single event; [`join`] offers the same fan-in as futures.

mod barrier;
mod cancel;
pub mod join;
mod memory_store;
mod obj_store;
mod store;

pub use barrier::{BarrierReport, BarrierState, LoadBarrier};
pub use cancel::CancellationToken;
pub use memory_store::{DeliveryMode, MemoryAssetStore};
pub use obj_store::{load_obj_meshes, ObjAssetStore};
pub use store::{AssetStore, ImportCallback, ImportOutcome, ImportRequest, LoadError, LoadedMesh};
