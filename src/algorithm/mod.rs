//! Graph algorithms
mod traversal;
pub use self::traversal::*;
mod search;
pub use self::search::*;
mod ancestor;
pub use self::ancestor::*;
