//! # Relief Storage
//!
//! One storage capability, three backing technologies:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn DocumentCollection> / RealtimeStore / BlobStore
//! LoggedStore<S>                 (logs and wraps every backend failure)
//!   ↓  impl Store
//! SqlDocumentStore               (JSON documents in SQL, one collection each)
//! RealtimeStore                  (path-addressed values over a key/value backend)
//! BlobStore                      (files under a folder of a local blob root)
//! ```
//!
//! All adapters expose `create`/`read`/`update`/`delete` over an opaque
//! string id through the [`Store`] trait.

pub mod blob;
pub mod document;
pub mod logged;
pub mod pool;
pub mod realtime;
pub mod traits;

pub use blob::*;
pub use document::*;
pub use logged::*;
pub use pool::*;
pub use realtime::*;
pub use traits::*;
