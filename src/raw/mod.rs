//! Private tree core backing [`AvlMap`](crate::AvlMap).

mod node;
mod tree;

pub(crate) use node::{Link, Node};
pub(crate) use tree::RawAvlTree;
