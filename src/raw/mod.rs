mod arena;
mod handle;
mod node;
mod raw_bst_tree;

pub use arena::Arena;
pub use handle::Handle;
pub use node::Node;
pub(crate) use node::{maximum, predecessor, successor};
pub(crate) use raw_bst_tree::RawBstTree;
