mod arena;
mod handle;
mod node;
mod raw_scapegoat_tree;

pub(crate) use raw_scapegoat_tree::{InOrder, RawScapegoatTree};
