//! # Abstract Syntax Tree
//!
//! Arena-allocated AST for rule scripts. All nodes of one parsed program live
//! in a single `Vec` and refer to their children by [`NodeId`]; the program is
//! dropped as a unit.
//!
//! ## Example
//!
//! ```rust
//! let program = rulescript_parser::parse("a = 2; a * 3").unwrap();
//! assert_eq!(program.to_string(), "(seq (= a 2) (* a 3))");
//! ```

use crate::error::{templates, ScriptError};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NODE ID
// =============================================================================

/// Index of a node in its program's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

/// Unary node operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `!x`
    Not,
    /// `++x`
    PreIncrement,
    /// `--x`
    PreDecrement,
    /// `x++`
    PostIncrement,
    /// `x--`
    PostDecrement,
    /// `name.size()`: element count, or row count for a matrix.
    Size,
    /// `name[i].size()`: length of row `i` of a matrix.
    RowSize,
    /// `name.sort()`
    Sort,
    /// `return x`
    Return,
}

/// Binary node operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
    Max,
    Min,
    Assign,
}

impl BinaryOp {
    /// Short form used when printing a tree.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Max => "max",
            Self::Min => "min",
            Self::Assign => "=",
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// One AST node. Children are arena indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// No-op: an absent `for` clause or an empty statement.
    Empty,
    /// Integer literal.
    Number(i32),
    /// Bare identifier.
    Name(String),
    /// `name[index]` or `name[index][column]`.
    Index {
        name: String,
        index: NodeId,
        column: Option<NodeId>,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    /// `if`; else-if chains nest in `else_branch`.
    Conditional {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    For {
        init: NodeId,
        condition: NodeId,
        update: NodeId,
        body: NodeId,
    },
    /// Statements run in order.
    Sequence(Vec<NodeId>),
    Break,
}

impl Node {
    /// Whether the node can be assigned to or incremented.
    ///
    /// Only bare names and single-indexed names qualify.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Node::Name(_) | Node::Index { column: None, .. })
    }

    /// Direct children, in evaluation order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Empty | Node::Number(_) | Node::Name(_) | Node::Break => Vec::new(),
            Node::Index { index, column, .. } => std::iter::once(*index).chain(*column).collect(),
            Node::Unary { operand, .. } => vec![*operand],
            Node::Binary { left, right, .. } => vec![*left, *right],
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => [*condition, *then_branch].into_iter().chain(*else_branch).collect(),
            Node::While { condition, body } => vec![*condition, *body],
            Node::For {
                init,
                condition,
                update,
                body,
            } => vec![*init, *condition, *update, *body],
            Node::Sequence(children) => children.clone(),
        }
    }
}

// =============================================================================
// ARENA
// =============================================================================

/// Contiguous node store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Borrow a node.
    ///
    /// Ids are only minted by [`Arena::alloc`], so every id handed out by a
    /// program refers to a live node.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node was allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// PROGRAM
// =============================================================================

/// A parsed script: an arena plus the id of its root sequence.
///
/// Immutable once built. Evaluate it as often as needed.
///
/// Deserialized programs are checked to form a tree under `root`: every
/// child id is in range and no node has two parents, so evaluation can
/// neither index past the arena nor loop through a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgram")]
pub struct Program {
    arena: Arena,
    root: NodeId,
}

/// Wire form of a [`Program`] before the tree check.
#[derive(Deserialize)]
struct RawProgram {
    arena: RawArena,
    root: NodeId,
}

#[derive(Deserialize)]
struct RawArena {
    nodes: Vec<Node>,
}

impl TryFrom<RawProgram> for Program {
    type Error = ScriptError;

    fn try_from(raw: RawProgram) -> Result<Self, Self::Error> {
        let nodes = raw.arena.nodes;
        let malformed =
            |id: NodeId| ScriptError::syntax(templates::MALFORMED_TREE, [id.0.to_string()]);

        // The root counts as referenced once, by the program itself.
        let mut referenced = vec![false; nodes.len()];
        for id in nodes.iter().flat_map(Node::children).chain([raw.root]) {
            match referenced.get_mut(id.index()) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(malformed(id)),
            }
        }

        Ok(Self::new(Arena { nodes }, raw.root))
    }
}

impl Program {
    pub(crate) fn new(arena: Arena, root: NodeId) -> Self {
        Self { arena, root }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node of this program.
    ///
    /// `id` must come from this program; ids of another program may be out
    /// of range.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Number of nodes in the program.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the program holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// S-expression text of the subtree rooted at `id`.
    pub fn render(&self, id: NodeId) -> String {
        Subtree { program: self, id }.to_string()
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        match self.node(id) {
            Node::Empty => write!(f, "()"),
            Node::Number(n) => write!(f, "{n}"),
            Node::Name(name) => write!(f, "{name}"),
            Node::Index { name, index, column } => {
                write!(f, "{name}[")?;
                self.write_node(f, *index)?;
                write!(f, "]")?;
                if let Some(column) = column {
                    write!(f, "[")?;
                    self.write_node(f, *column)?;
                    write!(f, "]")?;
                }
                Ok(())
            }
            Node::Unary { op, operand } => {
                let label = match op {
                    UnaryOp::Negate => "neg",
                    UnaryOp::Not => "!",
                    UnaryOp::PreIncrement => "++pre",
                    UnaryOp::PreDecrement => "--pre",
                    UnaryOp::PostIncrement => "post++",
                    UnaryOp::PostDecrement => "post--",
                    UnaryOp::Size | UnaryOp::RowSize => "size",
                    UnaryOp::Sort => "sort",
                    UnaryOp::Return => "return",
                };
                write!(f, "({label} ")?;
                self.write_node(f, *operand)?;
                write!(f, ")")
            }
            Node::Binary { op, left, right } => {
                write!(f, "({} ", op.symbol())?;
                self.write_node(f, *left)?;
                write!(f, " ")?;
                self.write_node(f, *right)?;
                write!(f, ")")
            }
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "(if ")?;
                self.write_node(f, *condition)?;
                write!(f, " ")?;
                self.write_node(f, *then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " ")?;
                    self.write_node(f, *else_branch)?;
                }
                write!(f, ")")
            }
            Node::While { condition, body } => {
                write!(f, "(while ")?;
                self.write_node(f, *condition)?;
                write!(f, " ")?;
                self.write_node(f, *body)?;
                write!(f, ")")
            }
            Node::For {
                init,
                condition,
                update,
                body,
            } => {
                write!(f, "(for ")?;
                for part in [init, condition, update] {
                    self.write_node(f, *part)?;
                    write!(f, " ")?;
                }
                self.write_node(f, *body)?;
                write!(f, ")")
            }
            Node::Sequence(children) => {
                write!(f, "(seq")?;
                for child in children {
                    write!(f, " ")?;
                    self.write_node(f, *child)?;
                }
                write!(f, ")")
            }
            Node::Break => write!(f, "break"),
        }
    }
}

/// S-expression rendering, for debug views and tests.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root)
    }
}

struct Subtree<'a> {
    program: &'a Program,
    id: NodeId,
}

impl fmt::Display for Subtree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.program.write_node(f, self.id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_alloc_sequential_ids() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Number(1));
        let b = arena.alloc(Node::Number(2));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.get(b), &Node::Number(2));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_lvalue_kinds() {
        let mut arena = Arena::new();
        let i = arena.alloc(Node::Number(0));
        assert!(Node::Name("a".into()).is_lvalue());
        assert!(Node::Index { name: "a".into(), index: i, column: None }.is_lvalue());
        assert!(!Node::Index { name: "m".into(), index: i, column: Some(i) }.is_lvalue());
        assert!(!Node::Number(3).is_lvalue());
    }

    #[test]
    fn test_program_display() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Name("a".into()));
        let one = arena.alloc(Node::Number(1));
        let add = arena.alloc(Node::Binary { op: BinaryOp::Add, left: a, right: one });
        let root = arena.alloc(Node::Sequence(vec![add]));
        let program = Program::new(arena, root);
        assert_eq!(program.to_string(), "(seq (+ a 1))");
        assert_eq!(program.render(add), "(+ a 1)");
        assert_eq!(program.len(), 4);
    }

    #[test]
    fn test_node_children_order() {
        let mut arena = Arena::new();
        let c = arena.alloc(Node::Name("c".into()));
        let t = arena.alloc(Node::Number(1));
        let e = arena.alloc(Node::Number(2));
        let node = Node::Conditional {
            condition: c,
            then_branch: t,
            else_branch: Some(e),
        };
        assert_eq!(node.children(), vec![c, t, e]);
        assert!(Node::Break.children().is_empty());
    }

    #[test]
    fn test_program_json_round_trip() {
        let program = crate::parse("if (a) b = 1; else b = 2; return b").unwrap();
        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn test_deserialize_rejects_dangling_child() {
        let json = r#"{"arena":{"nodes":[{"Sequence":[7]}]},"root":0}"#;
        let error = serde_json::from_str::<Program>(json).unwrap_err();
        assert!(error.to_string().contains("node 7 is missing"), "{error}");
    }

    #[test]
    fn test_deserialize_rejects_cycles_and_sharing() {
        for json in [
            // A node that is its own child.
            r#"{"arena":{"nodes":[{"Sequence":[0]}]},"root":0}"#,
            // One literal under two parents.
            r#"{"arena":{"nodes":[{"Number":1},{"Sequence":[0,0]}]},"root":1}"#,
            // The root is also some node's child.
            r#"{"arena":{"nodes":[{"Number":1},{"Unary":{"op":"Negate","operand":0}}]},"root":0}"#,
            // Root out of range.
            r#"{"arena":{"nodes":[]},"root":0}"#,
        ] {
            assert!(serde_json::from_str::<Program>(json).is_err(), "{json}");
        }
    }
}
