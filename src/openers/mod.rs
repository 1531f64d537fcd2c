//! Opener definitions and persistence

mod store;
mod types;

pub use store::{OpenerStore, StoreError};
pub use types::Opener;
