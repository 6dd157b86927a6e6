mod iter;
mod node;
mod raw_llrb_tree;

pub(crate) use iter::{Direction, RawIter, RawIterMut};
pub(crate) use raw_llrb_tree::RawLLRBTree;
