use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::freq::FrequencyTable;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
///
/// Nodes order by `freq`, then by `symbol`. For a leaf `symbol` is the byte it
/// stands for; for an internal node it is the smallest symbol below it and only
/// serves as a tie-break. Children take no part in comparisons.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    freq: u64,

    symbol: u8,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    #[derivative(Hash = "ignore")]
    children: Option<Box<(Node, Node)>>,
}

impl Node {
    pub fn leaf(symbol: u8, freq: u64) -> Self {
        Self {
            freq,
            symbol,
            children: None,
        }
    }

    /// Merges two subtrees. Whichever of the pair comes first goes left.
    pub fn combine(a: Node, b: Node) -> Self {
        let (left, right) = if comes_before(&b, &a) { (b, a) } else { (a, b) };

        Self {
            freq: left.freq + right.freq,
            symbol: left.symbol.min(right.symbol),
            children: Some(Box::new((left, right))),
        }
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    /// Tie-break key: the leaf's own symbol, or the smallest one in the subtree.
    pub fn rep_symbol(&self) -> u8 {
        self.symbol
    }

    /// The byte a leaf stands for. `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.children {
            None => Some(self.symbol),
            Some(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<&Node> {
        self.children.as_deref().map(|(l, _)| l)
    }

    pub fn right(&self) -> Option<&Node> {
        self.children.as_deref().map(|(_, r)| r)
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        self.children.as_deref().map(|(l, r)| (l, r))
    }

    /// Leaf symbols from left to right.
    pub fn leaves(&self) -> Vec<u8> {
        fn walk(node: &Node, out: &mut Vec<u8>) {
            match node.children() {
                None => out.push(node.symbol),
                Some((l, r)) => {
                    walk(l, out);
                    walk(r, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((l, r)) => 1 + l.depth().max(r.depth()),
        }
    }

    pub fn into_encoder_decoder_pair(self) -> (Encoder, Decoder) {
        let encoder = Encoder::from_tree(Some(&self));
        (encoder, Decoder::new(Some(self)))
    }
}

/// Whether `a` is taken before `b` when picking nodes to merge.
pub fn comes_before(a: &Node, b: &Node) -> bool {
    a < b
}

/// Builds the Huffman tree for every symbol with a non-zero count.
///
/// Returns `None` for an all-zero table and a lone leaf when only one symbol
/// occurs. The counts must sum to at most `u64::MAX`; parsed headers are
/// checked for this.
pub fn build_tree(freqs: &FrequencyTable) -> Option<Node> {
    let mut pq: BinaryHeap<_> = freqs
        .iter()
        .map(|(s, count)| Reverse(Node::leaf(s, count)))
        .collect();

    loop {
        let Reverse(first) = pq.pop()?;
        let Reverse(second) = match pq.pop() {
            Some(n) => n,
            None => {
                log::trace!("huffman tree: {:?}", first);
                return Some(first);
            }
        };
        pq.push(Reverse(Node::combine(first, second)));
    }
}
