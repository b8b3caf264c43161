use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::errors::*;

pub const ROUND_BRACKETS: u32 = 1;
pub const SQUARE_BRACKETS: u32 = 2;
pub const FLOOR_BRACKETS: u32 = 3;
pub const CEIL_BRACKETS: u32 = 4;

pub const PERCENT_SIGN: char = '%';
pub const FACTORIAL_SIGN: char = '!';
pub const DEGREE_SIGN: char = '\u{00B0}';
pub const GRAD_SIGN: char = '\u{1DA2}';
pub const PI_SIGN: char = '\u{03C0}';
pub const FI_SIGN: char = '\u{03C6}';
pub const E_SIGN: char = '\u{0190}';

/// List separator. It cannot be used by any table
pub const LIST_SEPARATOR: char = ';';

/// Node of an expression tree. Children are owned, so a tree has no cycles
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    /// Decimal literal as it is written in the expression
    Number(String),
    /// Binary operator
    Operator {
        symbol: char,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Unary minus
    Negative(Box<TreeNode>),
    Brackets {
        kind: u32,
        child: Box<TreeNode>,
    },
    /// Suffix operator repeated `count` times, e.g. `5!!`
    Suffix {
        symbol: char,
        count: usize,
        operand: Option<Box<TreeNode>>,
    },
    /// Function call: `sin(x)`, `sin30`, `log2(8)` or just `sin`
    Function {
        name: String,
        suffix: Option<Box<TreeNode>>,
        operand: Option<Box<TreeNode>>,
    },
    Constant(String),
    /// Semicolon separated items
    List(Vec<TreeNode>),
}

impl TreeNode {
    pub fn is_suffix_operator(&self, sym: char) -> bool {
        matches!(self, TreeNode::Suffix { symbol, .. } if *symbol == sym)
    }
}

/// A pair of brackets and the kind the evaluator receives for them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketsType {
    pub open: char,
    pub close: char,
    pub kind: u32,
}

impl BracketsType {
    pub fn new(open: char, close: char, kind: u32) -> Self {
        BracketsType { open, close, kind }
    }
}

/// Binary operator symbol. Operators with lower priority are evaluated later
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryOperator {
    pub symbol: char,
    pub priority: i32,
}

impl BinaryOperator {
    pub fn new(symbol: char, priority: i32) -> Self {
        BinaryOperator { symbol, priority }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuffixOperator {
    pub symbol: char,
}

impl SuffixOperator {
    pub fn new(symbol: char) -> Self {
        SuffixOperator { symbol }
    }
}

lazy_static! {
    pub static ref DEFAULT_BRACKETS: Vec<BracketsType> = vec![
        BracketsType::new('(', ')', ROUND_BRACKETS),
        BracketsType::new('[', ']', SQUARE_BRACKETS),
        BracketsType::new('\u{23A3}', '\u{23A6}', FLOOR_BRACKETS),
        BracketsType::new('\u{23A1}', '\u{23A4}', CEIL_BRACKETS),
    ];
    pub static ref DEFAULT_BINARY_OPERATORS: Vec<BinaryOperator> = vec![
        BinaryOperator::new('+', 0),
        BinaryOperator::new('-', 0),
        BinaryOperator::new('*', 1),
        BinaryOperator::new('/', 1),
        BinaryOperator::new('^', 2),
    ];
    pub static ref DEFAULT_SUFFIX_OPERATORS: Vec<SuffixOperator> = vec![
        SuffixOperator::new(FACTORIAL_SIGN),
        SuffixOperator::new(PERCENT_SIGN),
        SuffixOperator::new(DEGREE_SIGN),
        SuffixOperator::new(GRAD_SIGN),
    ];
}

/// Symbol tables used by the tree builder. Every character has at most one
/// meaning: it is either a bracket, a binary operator or a suffix operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    brackets: Vec<BracketsType>,
    operators: Vec<BinaryOperator>,
    suffixes: Vec<SuffixOperator>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            brackets: DEFAULT_BRACKETS.clone(),
            operators: DEFAULT_BINARY_OPERATORS.clone(),
            suffixes: DEFAULT_SUFFIX_OPERATORS.clone(),
        }
    }
}

// characters that cannot be redefined by tables
fn is_reserved(c: char) -> bool {
    c == LIST_SEPARATOR || c == '.' || c.is_ascii_digit() || c.is_whitespace()
}

impl TreeConfig {
    pub fn new(
        brackets: Vec<BracketsType>,
        operators: Vec<BinaryOperator>,
        suffixes: Vec<SuffixOperator>,
    ) -> Result<Self, ConfigError> {
        let cfg = TreeConfig {
            brackets,
            operators,
            suffixes,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_brackets(mut self, brackets: Vec<BracketsType>) -> Result<Self, ConfigError> {
        self.brackets = brackets;
        self.validate()?;
        Ok(self)
    }

    pub fn with_binary_operators(mut self, operators: Vec<BinaryOperator>) -> Result<Self, ConfigError> {
        self.operators = operators;
        self.validate()?;
        Ok(self)
    }

    pub fn with_suffix_operators(mut self, suffixes: Vec<SuffixOperator>) -> Result<Self, ConfigError> {
        self.suffixes = suffixes;
        self.validate()?;
        Ok(self)
    }

    pub fn brackets(&self) -> &[BracketsType] {
        &self.brackets
    }

    pub fn binary_operators(&self) -> &[BinaryOperator] {
        &self.operators
    }

    pub fn suffix_operators(&self) -> &[SuffixOperator] {
        &self.suffixes
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut kinds = HashSet::new();
        let mut bracket_chars = HashSet::new();
        for b in self.brackets.iter() {
            if b.open == b.close {
                return Err(ConfigError::SameOpenAndCloseBracket(b.open));
            }
            if !kinds.insert(b.kind) {
                return Err(ConfigError::DuplicateBracketType(b.kind));
            }
            for c in [b.open, b.close].iter() {
                if is_reserved(*c) {
                    return Err(ConfigError::ReservedSymbol(*c));
                }
                if !bracket_chars.insert(*c) {
                    return Err(ConfigError::DuplicateBracket(*c));
                }
            }
        }

        let mut op_chars = HashSet::new();
        for op in self.operators.iter() {
            if is_reserved(op.symbol) {
                return Err(ConfigError::ReservedSymbol(op.symbol));
            }
            if !op_chars.insert(op.symbol) {
                return Err(ConfigError::DuplicateBinaryOperator(op.symbol));
            }
            if bracket_chars.contains(&op.symbol) {
                return Err(ConfigError::AmbiguousSymbol(op.symbol));
            }
        }

        let mut suffix_chars = HashSet::new();
        for s in self.suffixes.iter() {
            if is_reserved(s.symbol) {
                return Err(ConfigError::ReservedSymbol(s.symbol));
            }
            if !suffix_chars.insert(s.symbol) {
                return Err(ConfigError::DuplicateSuffixOperator(s.symbol));
            }
            if bracket_chars.contains(&s.symbol) || op_chars.contains(&s.symbol) {
                return Err(ConfigError::AmbiguousSymbol(s.symbol));
            }
        }
        Ok(())
    }

    pub fn is_open_bracket(&self, c: char) -> bool {
        self.brackets.iter().any(|b| b.open == c)
    }

    pub fn is_close_bracket(&self, c: char) -> bool {
        self.brackets.iter().any(|b| b.close == c)
    }

    /// Kind of the bracket pair that `c` opens or closes
    pub fn bracket_kind(&self, c: char) -> Option<u32> {
        self.brackets.iter().find(|b| b.open == c || b.close == c).map(|b| b.kind)
    }

    pub fn operator_priority(&self, c: char) -> Option<i32> {
        self.operators.iter().find(|op| op.symbol == c).map(|op| op.priority)
    }

    pub fn is_suffix(&self, c: char) -> bool {
        self.suffixes.iter().any(|s| s.symbol == c)
    }

    /// Letters start names of functions and constants
    pub fn is_letter(&self, c: char) -> bool {
        c.is_alphabetic()
            && !self.is_suffix(c)
            && self.operator_priority(c).is_none()
            && self.bracket_kind(c).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = TreeConfig::default();
        assert_eq!(cfg.bracket_kind('['), Some(SQUARE_BRACKETS));
        assert_eq!(cfg.bracket_kind('\u{23A4}'), Some(CEIL_BRACKETS));
        assert_eq!(cfg.operator_priority('^'), Some(2));
        assert_eq!(cfg.operator_priority('%'), None);
        assert!(cfg.is_suffix(GRAD_SIGN));
        assert!(cfg.is_letter(PI_SIGN));
        assert!(cfg.is_letter(E_SIGN));
        assert!(cfg.is_letter('x'));
        assert!(!cfg.is_letter(GRAD_SIGN));
        assert!(!cfg.is_letter('5'));
    }

    #[test]
    fn test_invalid_config() {
        let cfg = TreeConfig::default();
        assert_eq!(
            cfg.clone().with_brackets(vec![BracketsType::new('|', '|', 1)]),
            Err(ConfigError::SameOpenAndCloseBracket('|'))
        );
        assert_eq!(
            cfg.clone()
                .with_brackets(vec![BracketsType::new('(', ')', 1), BracketsType::new('[', ']', 1)]),
            Err(ConfigError::DuplicateBracketType(1))
        );
        assert_eq!(
            cfg.clone()
                .with_brackets(vec![BracketsType::new('(', ')', 1), BracketsType::new('[', '(', 2)]),
            Err(ConfigError::DuplicateBracket('('))
        );
        assert_eq!(
            cfg.clone()
                .with_binary_operators(vec![BinaryOperator::new('+', 0), BinaryOperator::new('+', 1)]),
            Err(ConfigError::DuplicateBinaryOperator('+'))
        );
        assert_eq!(
            cfg.clone()
                .with_suffix_operators(vec![SuffixOperator::new('!'), SuffixOperator::new('!')]),
            Err(ConfigError::DuplicateSuffixOperator('!'))
        );
        assert_eq!(
            cfg.clone().with_suffix_operators(vec![SuffixOperator::new('*')]),
            Err(ConfigError::AmbiguousSymbol('*'))
        );
        assert_eq!(
            cfg.with_binary_operators(vec![BinaryOperator::new(';', 0)]),
            Err(ConfigError::ReservedSymbol(';'))
        );
    }

    #[test]
    fn test_custom_config() {
        let cfg = TreeConfig::new(
            vec![BracketsType::new('{', '}', 7)],
            vec![BinaryOperator::new('#', 3)],
            vec![SuffixOperator::new('?')],
        )
        .unwrap();
        assert_eq!(cfg.bracket_kind('}'), Some(7));
        assert!(!cfg.is_open_bracket('('));
        assert_eq!(cfg.operator_priority('#'), Some(3));
        assert!(cfg.is_suffix('?'));
    }
}
