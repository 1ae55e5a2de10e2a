//! Box path expressions: `moov/trak[1]/mdia/minf/stbl/stsd/enc.`
//!
//! A path is slash-separated segments of the form `tag[index]`. The tag is
//! exactly four characters; a `.` in any position matches any byte there
//! (so `enc.` covers `encv` and `enca`), and a bare `.` segment matches any
//! tag. The index selects among same-pattern siblings and defaults to 0
//! when omitted. Resolution fails softly: a path that leads nowhere is
//! `None`, never an error.

use crate::boxes::{BoxNode, BoxTree, FourCC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPattern {
    Exact(FourCC),
    /// Four tag bytes where `.` positions match anything.
    Masked([u8; 4]),
    Any,
}

impl TagPattern {
    pub fn parse(s: &str) -> Option<TagPattern> {
        if s == "." {
            return Some(TagPattern::Any);
        }
        let b = s.as_bytes();
        if b.len() != 4 {
            return None;
        }
        let tag = [b[0], b[1], b[2], b[3]];
        if tag == *b"...." {
            Some(TagPattern::Any)
        } else if tag.contains(&b'.') {
            Some(TagPattern::Masked(tag))
        } else {
            Some(TagPattern::Exact(FourCC(tag)))
        }
    }

    pub fn matches(&self, typ: FourCC) -> bool {
        match self {
            TagPattern::Exact(cc) => *cc == typ,
            TagPattern::Masked(m) => {
                m.iter().zip(typ.0.iter()).all(|(p, b)| *p == b'.' || p == b)
            }
            TagPattern::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub pattern: TagPattern,
    /// Position among siblings matching `pattern`, zero-based.
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BoxPath {
    pub segments: Vec<Segment>,
}

impl BoxPath {
    /// Parse an expression. The empty expression is the empty path, which
    /// resolves to the node it is applied to. A segment that cannot be
    /// parsed (wrong tag length, garbled index) makes the whole expression
    /// unusable.
    pub fn parse(expr: &str) -> Option<BoxPath> {
        if expr.is_empty() {
            return Some(BoxPath::default());
        }
        let mut segments = Vec::new();
        for seg in expr.split('/') {
            segments.push(parse_segment(seg)?);
        }
        Some(BoxPath { segments })
    }

    /// Descend from `node` through its children. The empty path yields
    /// `node` itself.
    pub fn resolve<'a>(&self, node: &'a BoxNode) -> Option<&'a BoxNode> {
        let mut cur = node;
        for seg in &self.segments {
            cur = select(&cur.children, seg)?;
        }
        Some(cur)
    }

    /// Descend starting among `siblings` (typically a tree's top-level
    /// boxes). The empty path yields `None` here: there is no node for it
    /// to name.
    pub fn resolve_in<'a>(&self, siblings: &'a [BoxNode]) -> Option<&'a BoxNode> {
        let (first, rest) = self.segments.split_first()?;
        let mut cur = select(siblings, first)?;
        for seg in rest {
            cur = select(&cur.children, seg)?;
        }
        Some(cur)
    }
}

fn select<'a>(siblings: &'a [BoxNode], seg: &Segment) -> Option<&'a BoxNode> {
    siblings
        .iter()
        .filter(|n| seg.pattern.matches(n.hdr.typ))
        .nth(seg.index)
}

fn parse_segment(seg: &str) -> Option<Segment> {
    let (name, index) = match seg.find('[') {
        Some(l) => {
            if !seg.ends_with(']') {
                return None;
            }
            let idx = seg[l + 1..seg.len() - 1].parse().ok()?;
            (&seg[..l], idx)
        }
        None => (seg, 0),
    };
    Some(Segment { pattern: TagPattern::parse(name)?, index })
}

impl BoxNode {
    /// Resolve a path expression against this node's subtree. `""` is the
    /// node itself; an unparseable or unmatched expression is `None`.
    pub fn resolve(&self, expr: &str) -> Option<&BoxNode> {
        BoxPath::parse(expr)?.resolve(self)
    }
}

impl BoxTree {
    /// Resolve a path expression starting at the top-level boxes. `""` is
    /// `None` here; the file itself is not a box.
    pub fn resolve(&self, expr: &str) -> Option<&BoxNode> {
        BoxPath::parse(expr)?.resolve_in(&self.boxes)
    }
}
