//! Prefix index over a [`WordDictionary`], used by the prefix-pruned search strategy.
//!
//! Nodes live in a single arena (`Vec<TrieNode>`) and refer to each other by index, so the
//! whole trie is one allocation plus one small edge list per node. Edges are keyed by ASCII
//! uppercase characters, matching how the dictionary stores its words.

use crate::dictionary::WordDictionary;

/// Index of a node inside a [`PrefixTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Default, Clone)]
struct TrieNode {
    /// Outgoing edges, kept sorted by label for binary search.
    children: Vec<(char, usize)>,
    is_word: bool,
}

/// Immutable prefix tree of every word in a dictionary.
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
}

impl PrefixTrie {
    const ROOT: usize = 0;

    /// Build the trie from every word in `dictionary`.
    #[must_use]
    pub fn from_dictionary(dictionary: &WordDictionary) -> PrefixTrie {
        let mut trie = PrefixTrie { nodes: vec![TrieNode::default()] };
        for word in dictionary.iter() {
            trie.insert(word);
        }
        log::debug!("Built prefix trie with {} nodes for {} words", trie.nodes.len(), dictionary.len());
        trie
    }

    fn insert(&mut self, word: &str) {
        let mut current = Self::ROOT;
        for ch in word.chars() {
            let label = ch.to_ascii_uppercase();
            current = match self.nodes[current].children.binary_search_by_key(&label, |&(c, _)| c) {
                Ok(pos) => self.nodes[current].children[pos].1,
                Err(pos) => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(pos, (label, next));
                    next
                }
            };
        }
        self.nodes[current].is_word = true;
    }

    /// The node for the empty prefix.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(Self::ROOT)
    }

    /// Follow the edge labelled `ch` (case-insensitively), if some word continues that way.
    #[must_use]
    pub fn step(&self, node: NodeId, ch: char) -> Option<NodeId> {
        let label = ch.to_ascii_uppercase();
        let children = &self.nodes[node.0].children;
        children
            .binary_search_by_key(&label, |&(c, _)| c)
            .ok()
            .map(|pos| NodeId(children[pos].1))
    }

    /// True if the path from the root to `node` spells a complete word.
    #[must_use]
    pub fn is_word(&self, node: NodeId) -> bool {
        self.nodes[node.0].is_word
    }

    /// True if some dictionary word starts with `prefix` (case-insensitive).
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        prefix.chars().try_fold(self.root(), |node, ch| self.step(node, ch)).is_some()
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(words: &[&str]) -> PrefixTrie {
        PrefixTrie::from_dictionary(&WordDictionary::from_lines(words.iter().copied()))
    }

    #[test]
    fn test_prefixes_and_words() {
        let trie = trie_of(&["cat", "cats", "act"]);

        assert!(trie.has_prefix(""));
        assert!(trie.has_prefix("ca"));
        assert!(trie.has_prefix("CAT"));
        assert!(trie.has_prefix("ac"));
        assert!(!trie.has_prefix("ta"));
        assert!(!trie.has_prefix("catsx"));

        let node = "cat".chars().try_fold(trie.root(), |n, c| trie.step(n, c)).unwrap();
        assert!(trie.is_word(node));
        let node = "ca".chars().try_fold(trie.root(), |n, c| trie.step(n, c)).unwrap();
        assert!(!trie.is_word(node));
    }

    #[test]
    fn test_shared_prefixes_share_nodes() {
        // root + C, A, T, S + A, C, T
        let trie = trie_of(&["cat", "cats", "act"]);
        assert_eq!(trie.node_count(), 8);
    }

    #[test]
    fn test_empty_dictionary() {
        let trie = trie_of(&[]);
        assert_eq!(trie.node_count(), 1);
        assert!(trie.step(trie.root(), 'a').is_none());
        assert!(!trie.is_word(trie.root()));
    }
}
