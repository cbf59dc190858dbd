mod address;
mod hash;

pub use address::{Address, ADDRESS_SIZE};
pub use hash::{Hash, HASH_SIZE};
