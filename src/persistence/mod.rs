//! Save document codec and the on-disk store.

pub mod codec;
pub mod store;

pub use codec::*;
pub use store::*;
