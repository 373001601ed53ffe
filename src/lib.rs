/// An indexed, sorted collection backed by a [`skip list`].
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;

pub mod config;
pub mod errs;

pub use config::{
    Config,
    MAX_LEVELS,
};
pub use errs::{
    Result,
    SkipListError,
};
pub use skiplist::SkipList;
