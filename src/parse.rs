use tracing::trace;

use crate::errors::*;
use crate::tree::{TreeConfig, TreeNode, LIST_SEPARATOR};

// position of a binary operator in the whole expression
struct OperatorPosition {
    level: usize,
    priority: i32,
    pos: usize,
}

// position of a list separator in the whole expression
struct SemicolonPosition {
    level: usize,
    pos: usize,
}

// expression split into characters plus the positions collected by the pre-scan
struct Scan {
    chars: Vec<char>,
    operators: Vec<OperatorPosition>,
    semicolons: Vec<SemicolonPosition>,
}

/// Turns an expression into a tree without a separate tokenizer.
///
/// The expression is scanned once to find bracket levels of all binary
/// operators and list separators. After that the expression is split
/// recursively, every part is described by its range and bracket level:
/// 1. A part enclosed in brackets becomes a `Brackets` node.
/// 2. A part with separators of its own level becomes a `List` node.
/// 3. A part with binary operators of its own level is split at the
///    rightmost operator with the lowest priority, so `1-2-3` is `(1-2)-3`.
/// 4. A part that starts with a letter is a function or a constant.
/// 5. A part that ends with a suffix operator is a `Suffix` node.
/// 6. Anything else must be a decimal number.
pub struct TreeBuilder {
    config: TreeConfig,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new(TreeConfig::default())
    }
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        TreeBuilder { config }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TreeConfig) {
        self.config = config;
    }

    /// Builds a tree from an expression that is already normalized: no
    /// spaces, all brackets closed, all multiplication signs in place
    pub fn build_tree(&self, expr: &str) -> Result<TreeNode, TreeBuildError> {
        let scan = self.scan(expr)?;
        trace!("building tree for {:?}", expr);
        match self.build(&scan, 0, scan.chars.len(), 0)? {
            Some(node) => Ok(node),
            None => Err(TreeBuildError::EmptyExpression),
        }
    }

    fn scan(&self, expr: &str) -> Result<Scan, TreeBuildError> {
        let chars: Vec<char> = expr.chars().collect();
        let mut operators = Vec::new();
        let mut semicolons = Vec::new();
        let mut opened: Vec<u32> = Vec::new();

        for (pos, c) in chars.iter().enumerate() {
            let c = *c;
            if self.config.is_open_bracket(c) {
                if let Some(kind) = self.config.bracket_kind(c) {
                    opened.push(kind);
                }
            } else if self.config.is_close_bracket(c) {
                if opened.pop() != self.config.bracket_kind(c) {
                    return Err(TreeBuildError::InvalidBracketsSequence(pos));
                }
            } else if c == LIST_SEPARATOR {
                semicolons.push(SemicolonPosition {
                    level: opened.len(),
                    pos,
                });
            } else if let Some(priority) = self.config.operator_priority(c) {
                operators.push(OperatorPosition {
                    level: opened.len(),
                    priority,
                    pos,
                });
            }
        }
        if !opened.is_empty() {
            return Err(TreeBuildError::UnclosedBrackets);
        }

        Ok(Scan {
            chars,
            operators,
            semicolons,
        })
    }

    // minimal bracket depth of non-bracket characters inside the range,
    // `usize::MAX` if the range contains only brackets
    fn min_bracket_level(&self, scan: &Scan, start: usize, end: usize) -> Result<usize, TreeBuildError> {
        let mut opened: Vec<u32> = Vec::new();
        let mut min_level = usize::MAX;
        for pos in start..end {
            let c = scan.chars[pos];
            if self.config.is_open_bracket(c) {
                if let Some(kind) = self.config.bracket_kind(c) {
                    opened.push(kind);
                }
            } else if self.config.is_close_bracket(c) {
                match opened.pop() {
                    Some(kind) if Some(kind) == self.config.bracket_kind(c) => {}
                    _ => return Err(TreeBuildError::InvalidBracketsSequence(pos)),
                }
            } else {
                min_level = min_level.min(opened.len());
            }
        }
        Ok(min_level)
    }

    fn build(&self, scan: &Scan, start: usize, end: usize, level: usize) -> Result<Option<TreeNode>, TreeBuildError> {
        if start >= end {
            return Ok(None);
        }

        if self.min_bracket_level(scan, start, end)? >= 1 {
            let kind = self
                .config
                .bracket_kind(scan.chars[start])
                .ok_or(TreeBuildError::InvalidBracketsSequence(start))?;
            trace!("brackets of kind {} at {}..{}", kind, start, end);
            return match self.build(scan, start + 1, end - 1, level + 1)? {
                Some(child) => Ok(Some(TreeNode::Brackets {
                    kind,
                    child: Box::new(child),
                })),
                None => Err(TreeBuildError::EmptyBrackets(start)),
            };
        }

        let separators: Vec<usize> = scan
            .semicolons
            .iter()
            .filter(|s| s.level == level && s.pos >= start && s.pos < end)
            .map(|s| s.pos)
            .collect();
        if !separators.is_empty() {
            trace!("list with {} separators at {}..{}", separators.len(), start, end);
            let mut items = Vec::new();
            let mut from = start;
            for pos in separators.into_iter().chain(std::iter::once(end)) {
                // empty items are skipped: `1;;2` is the same as `1;2`
                if let Some(node) = self.build(scan, from, pos, level)? {
                    items.push(node);
                }
                from = pos + 1;
            }
            return Ok(Some(TreeNode::List(items)));
        }

        let mut found: Option<&OperatorPosition> = None;
        for op in scan.operators.iter() {
            if op.pos < start || op.level != level {
                continue;
            }
            if op.pos >= end {
                break;
            }
            match found {
                Some(f) if op.priority > f.priority => {}
                _ => found = Some(op),
            }
        }
        if let Some(op) = found {
            return self.build_operator(scan, start, end, level, op.pos).map(Some);
        }

        let first = scan.chars[start];
        if self.config.is_letter(first) {
            return self.parse_function(scan, start, end, level).map(Some);
        }
        if self.config.is_suffix(scan.chars[end - 1]) {
            return self.parse_suffix(scan, start, end, level).map(Some);
        }
        self.parse_number(scan, start, end).map(Some)
    }

    fn build_operator(
        &self,
        scan: &Scan,
        start: usize,
        end: usize,
        level: usize,
        pos: usize,
    ) -> Result<TreeNode, TreeBuildError> {
        let symbol = scan.chars[pos];
        trace!("operator '{}' at {}", symbol, pos);
        let missing = || TreeBuildError::MissingOperand(symbol, pos);

        if pos == start {
            let right = self.build(scan, pos + 1, end, level)?.ok_or_else(missing)?;
            return match symbol {
                '+' => Ok(right),
                '-' => Ok(TreeNode::Negative(Box::new(right))),
                _ => Err(missing()),
            };
        }

        let left = self.build(scan, start, pos, level)?.ok_or_else(missing)?;
        let right = self.build(scan, pos + 1, end, level)?.ok_or_else(missing)?;
        Ok(TreeNode::Operator {
            symbol,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    // `name`, `name(...)`, `name5`, `name5(...)`, `name5!`
    fn parse_function(&self, scan: &Scan, start: usize, end: usize, level: usize) -> Result<TreeNode, TreeBuildError> {
        let mut i = start;
        while i < end && self.config.is_letter(scan.chars[i]) {
            i += 1;
        }
        let name: String = scan.chars[start..i].iter().collect();

        if i == end {
            trace!("constant {}", name);
            return Ok(TreeNode::Constant(name));
        }

        if !scan.chars[i].is_ascii_digit() {
            trace!("function {} without suffix", name);
            let operand = self.build(scan, i, end, level)?;
            return Ok(TreeNode::Function {
                name,
                suffix: None,
                operand: operand.map(Box::new),
            });
        }

        // `sin30°` is `sin(30°)` and `log2(8)` uses 2 as a base, so the suffix
        // keeps digits and suffix operators
        let suffix_start = i;
        while i < end {
            let c = scan.chars[i];
            if !c.is_ascii_digit() && c != '.' && !self.config.is_suffix(c) {
                break;
            }
            i += 1;
        }
        trace!("function {} with suffix at {}..{}", name, suffix_start, i);
        let suffix = self.build(scan, suffix_start, i, level)?;
        let operand = self.build(scan, i, end, level)?;
        Ok(TreeNode::Function {
            name,
            suffix: suffix.map(Box::new),
            operand: operand.map(Box::new),
        })
    }

    fn parse_suffix(&self, scan: &Scan, start: usize, end: usize, level: usize) -> Result<TreeNode, TreeBuildError> {
        let symbol = scan.chars[end - 1];
        let mut i = end - 1;
        while i > start && scan.chars[i - 1] == symbol {
            i -= 1;
        }
        let count = end - i;
        trace!("suffix operator '{}' x{} at {}", symbol, count, i);
        let operand = self.build(scan, start, i, level)?;
        Ok(TreeNode::Suffix {
            symbol,
            count,
            operand: operand.map(Box::new),
        })
    }

    fn parse_number(&self, scan: &Scan, start: usize, end: usize) -> Result<TreeNode, TreeBuildError> {
        let text: String = scan.chars[start..end].iter().collect();
        if !is_decimal_literal(&text) {
            return Err(TreeBuildError::InvalidNumber(text));
        }
        Ok(TreeNode::Number(text))
    }
}

// digits with an optional decimal point and an optional unsigned exponent:
// `12`, `.5`, `3.`, `1.5e7`, `2E3`. A sign after `e` is always split off as a
// binary operator, so it never reaches here
fn is_decimal_literal(s: &str) -> bool {
    let (mantissa, exp) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };
    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }
    match exp {
        None => true,
        Some(e) => !e.is_empty() && e.chars().all(|c| c.is_ascii_digit()),
    }
}
