use std::rc::Rc;

/// A node in the rope tree. Leaves carry text fragments, internal nodes
/// carry only child ownership and the character count of their left subtree.
/// Nodes are immutable after construction; split and concat build new
/// internal nodes and reuse untouched subtrees by reference.
#[derive(Debug)]
pub enum Node {
    Internal(Internal),
    Leaf(Leaf),
}

impl Node {
    /// An empty leaf, the representation of the empty buffer.
    pub fn empty() -> Rc<Self> {
        Self::leaf("")
    }

    pub fn leaf(text: &str) -> Rc<Self> {
        Rc::new(Node::Leaf(Leaf::from(text)))
    }

    /// Join two trees under one new internal node. O(1): both totals are
    /// cached, no descent happens.
    pub fn concat(left: Rc<Node>, right: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::Internal(Internal {
            weight: left.len(),
            len: left.len() + right.len(),
            left,
            right,
        }))
    }

    /// Total character count of the subtree.
    pub fn len(&self) -> usize {
        match self {
            Self::Internal(internal) => internal.len,
            Self::Leaf(leaf) => leaf.chars,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Internal(internal) => 1 + internal.left.height().max(internal.right.height()),
            Self::Leaf(_) => 1,
        }
    }

    /// Character at `index`. Caller has already bounds-checked, so descending
    /// left while `index < weight` (else right with `index - weight`) always
    /// lands inside a leaf.
    pub fn char_at(&self, index: usize) -> char {
        match self {
            Self::Internal(internal) => {
                if index < internal.weight {
                    internal.left.char_at(index)
                } else {
                    internal.right.char_at(index - internal.weight)
                }
            }
            Self::Leaf(leaf) => leaf.char_at(index),
        }
    }

    /// Split into two trees at character offset `index` (0 ≤ index ≤ len).
    /// Concatenating the results reproduces the original text. The side not
    /// containing the split point is reused as-is; only the spine down to
    /// the split leaf is rebuilt.
    pub fn split(node: &Rc<Node>, index: usize) -> (Rc<Node>, Rc<Node>) {
        match node.as_ref() {
            Node::Internal(internal) => {
                if index < internal.weight {
                    let (left, remainder) = Self::split(&internal.left, index);
                    (left, Self::concat(remainder, Rc::clone(&internal.right)))
                } else {
                    let (remainder, right) =
                        Self::split(&internal.right, index - internal.weight);
                    (Self::concat(Rc::clone(&internal.left), remainder), right)
                }
            }
            Node::Leaf(leaf) => {
                let (before, after) = leaf.split_at(index);
                (Self::leaf(before), Self::leaf(after))
            }
        }
    }

    /// In-order traversal, pushing every leaf fragment into `buf`.
    pub fn write_to(&self, buf: &mut String) {
        match self {
            Self::Internal(internal) => {
                internal.left.write_to(buf);
                internal.right.write_to(buf);
            }
            Self::Leaf(leaf) => buf.push_str(leaf.as_str()),
        }
    }
}

#[derive(Debug)]
pub struct Internal {
    /// Character count of the left subtree.
    weight: usize,
    /// Cached total character count of the whole subtree.
    len: usize,
    left: Rc<Node>,
    right: Rc<Node>,
}

#[derive(Debug)]
pub struct Leaf {
    chunk: String,
    /// Cached character count of `chunk`.
    chars: usize,
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf {
            chunk: value.to_owned(),
            chars: value.chars().count(),
        }
    }
}

impl Leaf {
    pub fn as_str(&self) -> &str {
        &self.chunk
    }

    fn char_at(&self, index: usize) -> char {
        match self.chunk.chars().nth(index) {
            Some(c) => c,
            None => unreachable!("index checked by Rope"),
        }
    }

    /// Split the fragment at character offset `index`, returning both halves.
    fn split_at(&self, index: usize) -> (&str, &str) {
        self.chunk.split_at(self.byte_offset(index))
    }

    /// Map a character offset into the fragment to its byte offset.
    fn byte_offset(&self, index: usize) -> usize {
        if index >= self.chars {
            return self.chunk.len();
        }
        self.chunk
            .char_indices()
            .nth(index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.chunk.len())
    }
}
