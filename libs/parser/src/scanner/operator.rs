//! # Operators and Keywords
//!
//! The fixed vocabulary recognized by the scanner.
//!
//! ## Example
//!
//! ```rust
//! use rulescript_parser::scanner::Operator;
//!
//! assert_eq!(Operator::Star.precedence(), Some(3));
//! assert_eq!(Operator::Increment.precedence(), None);
//! ```

// =============================================================================
// OPERATOR
// =============================================================================

/// Operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Assign,
    /// `&&` or `and`
    And,
    /// `||` or `or`
    Or,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

/// Highest binary precedence level.
pub const MAX_PRECEDENCE: u8 = 3;

impl Operator {
    /// Two-character operators, matched before their one-character prefixes.
    const DOUBLE: [(&'static str, Operator); 8] = [
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("<=", Operator::LessEqual),
        (">=", Operator::GreaterEqual),
        ("&&", Operator::And),
        ("||", Operator::Or),
        ("++", Operator::Increment),
        ("--", Operator::Decrement),
    ];

    /// Match an operator at the start of `text`.
    ///
    /// ## Returns
    ///
    /// The operator and its length in bytes.
    pub fn match_prefix(text: &str) -> Option<(Self, usize)> {
        for (symbol, op) in Self::DOUBLE {
            if text.starts_with(symbol) {
                return Some((op, symbol.len()));
            }
        }

        let single = match text.chars().next()? {
            '=' => Self::Assign,
            '<' => Self::Less,
            '>' => Self::Greater,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Star,
            '/' => Self::Slash,
            '%' => Self::Percent,
            '!' => Self::Bang,
            _ => return Self::match_word(text),
        };
        Some((single, 1))
    }

    /// Word operators `and` / `or`, only as whole words.
    fn match_word(text: &str) -> Option<(Self, usize)> {
        let len = text
            .find(|c: char| !is_word_char(c))
            .unwrap_or(text.len());
        match &text[..len] {
            "and" => Some((Self::And, len)),
            "or" => Some((Self::Or, len)),
            _ => None,
        }
    }

    /// Binary precedence level, low to high.
    ///
    /// | Level | Operators |
    /// |-------|-----------|
    /// | 0 | `=` `&&` `\|\|` |
    /// | 1 | `==` `!=` `<` `>` `<=` `>=` |
    /// | 2 | `+` `-` |
    /// | 3 | `*` `/` `%` |
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::Assign | Self::And | Self::Or => Some(0),
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual => Some(1),
            Self::Plus | Self::Minus => Some(2),
            Self::Star | Self::Slash | Self::Percent => Some(3),
            Self::Bang | Self::Increment | Self::Decrement => None,
        }
    }

    /// Source spelling.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

// =============================================================================
// KEYWORD
// =============================================================================

/// Statement keywords. None of them may appear in expression position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Else,
    While,
    For,
    Break,
    Return,
}

impl Keyword {
    /// Look up a whole word.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "while" => Some(Self::While),
            "for" => Some(Self::For),
            "break" => Some(Self::Break),
            "return" => Some(Self::Return),
            _ => None,
        }
    }

    /// Source spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Break => "break",
            Self::Return => "return",
        }
    }
}

/// Characters that make up identifiers and numbers.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// =============================================================================
// TESTS
// =============================================================================
