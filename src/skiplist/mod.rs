//! An ordered list built on a skip list, which allows faster searches than a
//! standard linked list while keeping positional access.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`).
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented.

mod iter;
mod level_generator;
mod list;
mod node;
#[cfg(test)]
mod test;

pub use iter::{
    IntoIter,
    Iter,
    ListIter,
};
pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
};
pub use list::SkipList;
