mod adjacent_list;
pub use self::adjacent_list::*;
mod tree_backed;
pub use self::tree_backed::*;

#[cfg(test)]
pub use self::tests::*;
