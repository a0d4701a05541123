//! Byte trie over command names.
//!
//! Children are kept in byte order so a pre-order walk yields keys in
//! lexicographic order, which is what autocomplete needs.

use std::collections::BTreeMap;

/// A set of strings supporting ordered prefix queries.
///
/// # Complexity
///
/// - `insert` / `remove` / `contains`: O(k) where k = key length
/// - `with_prefix`: O(k + m) where m = size of the matching subtree
///
/// # Examples
///
/// ```
/// use dev_console::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("help");
/// trie.insert("hello");
/// trie.insert("echo");
///
/// assert_eq!(trie.with_prefix("he"), vec!["hello", "help"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: Node,
    len: usize,
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<u8, Node>,
    // Full key, present only on terminal nodes
    key: Option<Box<str>>,
}

impl Node {
    fn is_dead(&self) -> bool {
        self.key.is_none() && self.children.is_empty()
    }
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: &str) -> bool {
        let mut node = &mut self.root;
        for &byte in key.as_bytes() {
            node = node.children.entry(byte).or_default();
        }

        if node.key.is_some() {
            return false;
        }
        node.key = Some(key.into());
        self.len += 1;
        true
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        let mut node = &self.root;
        for byte in key.as_bytes() {
            match node.children.get(byte) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.key.is_some()
    }

    /// Remove a key, pruning branches that no longer lead anywhere.
    ///
    /// Returns `true` if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = remove_from(&mut self.root, key.as_bytes());
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// All keys starting with `prefix`, in lexicographic (byte) order.
    ///
    /// The prefix itself is not required to be a key.
    pub fn with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut node = &self.root;
        for byte in prefix.as_bytes() {
            match node.children.get(byte) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            if let Some(key) = &node.key {
                out.push(key.as_ref());
            }
            // Reverse so the smallest byte is popped first
            stack.extend(node.children.values().rev());
        }
        out
    }

    /// All keys in lexicographic order.
    pub fn keys(&self) -> Vec<&str> {
        self.with_prefix("")
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }
}

fn remove_from(node: &mut Node, rest: &[u8]) -> bool {
    let Some((&first, tail)) = rest.split_first() else {
        return node.key.take().is_some();
    };

    let Some(child) = node.children.get_mut(&first) else {
        return false;
    };

    let removed = remove_from(child, tail);
    if removed && child.is_dead() {
        node.children.remove(&first);
    }
    removed
}
