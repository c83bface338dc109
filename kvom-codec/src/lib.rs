//! Wire codec for kvom.
//!
//! Converts between the store's record formats and alias-keyed
//! [`EntityData`](kvom_model::EntityData):
//! - [`hash`]: flat string maps, one string per field
//! - [`json`]: one JSON document per entity
//! - [`RawRecord`]: either of the above as it crosses the store boundary
//!
//! Decoding is strict for declared fields and lenient for everything else:
//! values under undeclared keys are passed through untouched.

mod error;
pub mod hash;
pub mod json;
mod record;
mod scalar;

pub use error::{CodecError, CodecResult, DataError};
pub use hash::HashData;
pub use record::{decode_record, encode_record, RawRecord};
