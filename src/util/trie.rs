/*!
A small `const` compatible trie with ASCII case folding.

This is used to recognize unit designators like `hrs` or `MilliSeconds`.
See the [`Trie`] type for more details.
*/

/// The type used to encode node IDs.
///
/// Every node in the trie has one of these per alphabet element, so keeping
/// it small matters. The designator trie has about 100 nodes, which fits
/// comfortably. If a set of needles needs more nodes than this type can
/// address, construction fails at compile time.
type TrieNodeId = u8;

/// A trie that can be built in a `const` context.
///
/// A trie is built from a fixed set of needles, each associated with a
/// value. Once built, [`Trie::find`] performs an anchored, longest match
/// search of a haystack for one of those needles.
///
/// # Case folding
///
/// Needles must be written without ASCII uppercase letters. The trie folds
/// ASCII uppercase bytes in the haystack to lowercase before following a
/// transition, so `HoUrS` finds the needle `hours`. Folding costs nothing
/// in space: the alphabet only ever contains lowercase bytes, and the fold
/// happens on the byte before its equivalence class is looked up.
///
/// Bytes outside of ASCII are never folded. A needle containing a
/// non-ASCII character matches only that exact UTF-8 sequence, so any case
/// variants of such a character must be listed as needles of their own.
///
/// # Type parameters
///
/// * `NODE_CAPACITY` is the total number of nodes in the trie, including
/// the root. Construction panics (at compile time, when used in a `static`)
/// if it is too small. It should be exact, since unused nodes are dead
/// weight.
/// * `ALPHABET_LEN` is the number of distinct bytes across all needles,
/// plus one. Compute it with [`TrieNeedles::alphabet_len`].
/// * `V` is the value associated with each needle. It must be `Copy`.
///
/// # Example
///
/// ```ignore
/// type FooTrie = Trie<7, { FOO_NEEDLES.alphabet_len() }, char>;
/// static FOO_TRIE: &'static FooTrie = &Trie::new(&FOO_NEEDLES);
/// const FOO_NEEDLES: TrieNeedles<char> =
///     TrieNeedles::new(&[("foo", 'a'), ("bar", 'b')]);
///
/// assert_eq!(FOO_TRIE.find(b"fo"), None);
/// assert_eq!(FOO_TRIE.find(b"FOO"), Some(('a', 3)));
/// assert_eq!(FOO_TRIE.find(b"barfoo"), Some(('b', 3)));
/// ```
#[derive(Clone, Debug)]
pub(crate) struct Trie<
    const NODE_CAPACITY: usize,
    const ALPHABET_LEN: usize,
    V: 'static,
> {
    nodes: [TrieNode<ALPHABET_LEN, V>; NODE_CAPACITY],
    /// The number of nodes in use.
    len: usize,
    alphabet: TrieAlphabet,
}

impl<
        const NODE_CAPACITY: usize,
        const ALPHABET_LEN: usize,
        V: Copy + 'static,
    > Trie<NODE_CAPACITY, ALPHABET_LEN, V>
{
    const ROOT_ID: TrieNodeId = 0;
    /// A sentinel ID for the dead state. Once a search reaches it, no needle
    /// can match any longer.
    const FAIL_ID: TrieNodeId = TrieNodeId::MAX;

    /// Builds a trie from the given needles.
    ///
    /// # Panics
    ///
    /// When a needle contains an ASCII uppercase byte, when two needles are
    /// identical, or when `NODE_CAPACITY` or `ALPHABET_LEN` don't match the
    /// needles.
    pub(crate) const fn new(
        needles: &TrieNeedles<V>,
    ) -> Trie<NODE_CAPACITY, ALPHABET_LEN, V> {
        let mut trie = Trie {
            nodes: [TrieNode {
                transitions: [Self::FAIL_ID; ALPHABET_LEN],
                value: None,
            }; NODE_CAPACITY],
            len: 1,
            alphabet: needles.alphabet(),
        };
        assert!(trie.alphabet.len() == ALPHABET_LEN);
        assert!(NODE_CAPACITY <= Self::FAIL_ID as usize);

        let mut i = 0;
        while i < needles.map.len() {
            let (needle, value) = needles.map[i];
            i += 1;

            let mut node_id = Self::ROOT_ID;
            let mut k = 0;
            while k < needle.len() {
                let byte = needle.as_bytes()[k];
                k += 1;
                assert!(
                    !byte.is_ascii_uppercase(),
                    "trie needles must not contain ASCII uppercase letters",
                );

                let equiv_id = trie.alphabet.equiv_id(byte) as usize;
                let mut next_id =
                    trie.nodes[node_id as usize].transitions[equiv_id];
                if next_id == Self::FAIL_ID {
                    assert!(trie.len < NODE_CAPACITY, "trie needs more nodes");
                    next_id = trie.len as TrieNodeId;
                    trie.len += 1;
                    trie.nodes[node_id as usize].transitions[equiv_id] =
                        next_id;
                }
                node_id = next_id;
            }
            if trie.nodes[node_id as usize].value.is_some() {
                panic!("duplicate needle detected");
            }
            trie.nodes[node_id as usize].value = Some(value);
        }
        assert!(trie.len == NODE_CAPACITY, "trie has unused nodes");
        trie
    }

    /// Returns the value of the longest needle that is a prefix of
    /// `haystack`, along with the needle's length in bytes.
    ///
    /// ASCII letters in the haystack are matched without regard to case.
    #[inline(always)]
    pub(crate) const fn find(&self, haystack: &[u8]) -> Option<(V, usize)> {
        let mut node_id = Self::ROOT_ID;
        let mut found = None;
        if let Some(value) = self.nodes[node_id as usize].value {
            found = Some((value, 0));
        }
        let mut i = 0;
        while i < haystack.len() {
            let next_id = self.next(node_id, haystack[i]);
            if next_id == Self::FAIL_ID {
                return found;
            }
            node_id = next_id;
            i += 1;
            if let Some(value) = self.nodes[node_id as usize].value {
                found = Some((value, i));
            }
        }
        found
    }

    /// Returns the ID of the node reached from `current_id` via `byte`,
    /// after folding `byte` to ASCII lowercase.
    #[inline(always)]
    const fn next(&self, current_id: TrieNodeId, byte: u8) -> TrieNodeId {
        let equiv_id = self.alphabet.equiv_id(byte.to_ascii_lowercase());
        self.nodes[current_id as usize].transitions[equiv_id as usize]
    }
}

#[derive(Clone, Copy, Debug)]
struct TrieNode<const ALPHABET_LEN: usize, V: 'static> {
    transitions: [TrieNodeId; ALPHABET_LEN],
    /// Set when a needle ends at this node.
    value: Option<V>,
}

/// A map from needle to value, used to build a [`Trie`].
///
/// Several needles may share a value, but no needle may appear twice.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrieNeedles<V: 'static> {
    map: &'static [(&'static str, V)],
}

impl<V: Copy + 'static> TrieNeedles<V> {
    pub(crate) const fn new(
        map: &'static [(&'static str, V)],
    ) -> TrieNeedles<V> {
        TrieNeedles { map }
    }

    /// Returns the number of equivalence classes formed by these needles:
    /// one per distinct byte, plus one for every byte that doesn't occur.
    pub(crate) const fn alphabet_len(&self) -> usize {
        self.alphabet().len()
    }

    const fn alphabet(&self) -> TrieAlphabet {
        TrieAlphabet::new(self)
    }
}

/// Maps each of the 256 byte values to an equivalence class.
///
/// Every byte occurring in a needle gets its own class. All other bytes
/// share class `0`, which never has a live transition. Since needles are
/// lowercase, uppercase ASCII letters land in class `0` too, and are only
/// reachable through the fold in [`Trie::next`].
#[derive(Clone)]
struct TrieAlphabet {
    len: u16,
    equiv_classes: [u8; 256],
}

impl TrieAlphabet {
    const fn new<V: Copy>(needles: &TrieNeedles<V>) -> TrieAlphabet {
        let mut seen = [false; 256];
        let mut i = 0;
        while i < needles.map.len() {
            let (needle, _) = needles.map[i];
            i += 1;

            let mut k = 0;
            while k < needle.len() {
                seen[needle.as_bytes()[k] as usize] = true;
                k += 1;
            }
        }

        // Class `0` is reserved for bytes that never occur, so the live
        // classes start at `1`. Needles are lowercase, which means at
        // least the 26 uppercase ASCII letters fall in class `0` and the
        // number of live classes is always below 256.
        let mut equiv_classes = [0u8; 256];
        let mut len: u16 = 1;
        let mut byte = 0;
        while byte < 256 {
            if seen[byte] {
                equiv_classes[byte] = len as u8;
                len += 1;
            }
            byte += 1;
        }
        TrieAlphabet { len, equiv_classes }
    }

    #[inline(always)]
    const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    const fn equiv_id(&self, byte: u8) -> u8 {
        self.equiv_classes[byte as usize]
    }
}

impl core::fmt::Debug for TrieAlphabet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("TrieAlphabet").field("len", &self.len).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match() {
        type MTrie = Trie<4, { M_NEEDLES.alphabet_len() }, char>;
        static M_TRIE: &'static MTrie = &Trie::new(&M_NEEDLES);
        const M_NEEDLES: TrieNeedles<char> =
            TrieNeedles::new(&[("m", 'm'), ("mo", 'o'), ("ms", 's')]);

        assert_eq!(M_TRIE.find(b""), None);
        assert_eq!(M_TRIE.find(b"x"), None);
        assert_eq!(M_TRIE.find(b"m"), Some(('m', 1)));
        assert_eq!(M_TRIE.find(b"mx"), Some(('m', 1)));
        assert_eq!(M_TRIE.find(b"mo"), Some(('o', 2)));
        assert_eq!(M_TRIE.find(b"mos"), Some(('o', 2)));
        assert_eq!(M_TRIE.find(b"ms"), Some(('s', 2)));
    }

    #[test]
    fn ascii_case_folding() {
        type FooTrie = Trie<7, { FOO_NEEDLES.alphabet_len() }, char>;
        static FOO_TRIE: &'static FooTrie = &Trie::new(&FOO_NEEDLES);
        const FOO_NEEDLES: TrieNeedles<char> =
            TrieNeedles::new(&[("foo", 'a'), ("bar", 'b'), ("b", 'c')]);

        assert_eq!(FOO_TRIE.find(b"fo"), None);
        assert_eq!(FOO_TRIE.find(b"foo"), Some(('a', 3)));
        assert_eq!(FOO_TRIE.find(b"FOO"), Some(('a', 3)));
        assert_eq!(FOO_TRIE.find(b"fOoBAR"), Some(('a', 3)));
        assert_eq!(FOO_TRIE.find(b"BaR"), Some(('b', 3)));
        assert_eq!(FOO_TRIE.find(b"Bz"), Some(('c', 1)));
        assert_eq!(FOO_TRIE.find(b"zfoo"), None);
    }

    #[test]
    fn non_ascii_needles_match_exactly() {
        type MuTrie = Trie<4, { MU_NEEDLES.alphabet_len() }, u8>;
        static MU_TRIE: &'static MuTrie = &Trie::new(&MU_NEEDLES);
        const MU_NEEDLES: TrieNeedles<u8> = TrieNeedles::new(&[("µs", 1)]);

        assert_eq!(MU_TRIE.find("µs".as_bytes()), Some((1, 3)));
        assert_eq!(MU_TRIE.find("µS".as_bytes()), Some((1, 3)));
        assert_eq!(MU_TRIE.find("µ".as_bytes()), None);
        // U+03BC GREEK SMALL LETTER MU is a different byte sequence.
        assert_eq!(MU_TRIE.find("μs".as_bytes()), None);
    }
}
