pub(crate) mod escape;
pub(crate) mod trie;
