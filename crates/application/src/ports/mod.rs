//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the client core and the outside
//! world. Adapters in the infrastructure layer implement them.

mod storage;
mod transport;

pub use storage::{KeyValueStorage, StorageError};
pub use transport::{HttpTransport, TransportError};
