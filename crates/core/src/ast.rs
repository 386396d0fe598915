/// Generic nested-list tree produced by the parser.
///
/// No domain meaning is attached here; the descriptor layer decides what
/// each shape means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Symbol(String),
    Str(String),
    List(Vec<Node>),
}

impl Node {
    /// Text of a leaf, whether it was written bare or quoted.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Symbol(s) | Node::Str(s) => Some(s),
            Node::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            Node::Symbol(_) | Node::Str(_) => None,
        }
    }

    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Node::Symbol(s) if s == name)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Symbol(_) => "symbol",
            Node::Str(_) => "string",
            Node::List(_) => "list",
        }
    }
}

// Nested lists are torn down from a work list so dropping a tree never
// recurses once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::List(items) = self else {
            return;
        };
        let mut pending = std::mem::take(items);
        while let Some(mut node) = pending.pop() {
            if let Node::List(children) = &mut node {
                pending.append(children);
            }
        }
    }
}
