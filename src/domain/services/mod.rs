mod session_store;
mod storage;

pub use session_store::*;
pub use storage::*;
