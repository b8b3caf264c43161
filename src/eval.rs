use tracing::debug;

use crate::decimal::{Decimal, RoundingMode};
use crate::errors::*;
use crate::math::MathContext;
use crate::resolvers::*;
use crate::tree::{TreeNode, PERCENT_SIGN};
use crate::value::Value;

/// Walks an expression tree and computes its value with the configured
/// resolvers. Scalar operations are applied to every element of a list, so
/// `2*(1;2)` gives `(2; 4)`
#[derive(Default)]
pub struct Evaluator {
    resolvers: Resolvers,
    ctx: MathContext,
}

impl Evaluator {
    pub fn new(ctx: MathContext) -> Self {
        Evaluator {
            resolvers: Resolvers::default(),
            ctx,
        }
    }

    pub fn with_resolvers(resolvers: Resolvers, ctx: MathContext) -> Self {
        Evaluator { resolvers, ctx }
    }

    pub fn context(&self) -> &MathContext {
        &self.ctx
    }

    pub fn set_context(&mut self, ctx: MathContext) {
        self.ctx = ctx;
    }

    /// Changes the number of digits after the decimal point in results.
    /// The working precision is adjusted as well
    pub fn set_round_scale(&mut self, round_scale: u32) {
        self.ctx = MathContext::with_round_scale(round_scale);
    }

    pub fn resolvers(&self) -> &Resolvers {
        &self.resolvers
    }

    pub fn set_resolvers(&mut self, resolvers: Resolvers) {
        self.resolvers = resolvers;
    }

    pub fn set_binary_operator_resolver<R: BinaryOperatorResolver + 'static>(&mut self, r: R) {
        self.resolvers.binary = Box::new(r);
    }

    pub fn set_brackets_resolver<R: BracketsResolver + 'static>(&mut self, r: R) {
        self.resolvers.brackets = Box::new(r);
    }

    pub fn set_functions_resolver<R: FunctionsResolver + 'static>(&mut self, r: R) {
        self.resolvers.functions = Box::new(r);
    }

    pub fn set_list_functions_resolver<R: ListFunctionsResolver + 'static>(&mut self, r: R) {
        self.resolvers.list_functions = Box::new(r);
    }

    pub fn set_suffix_operator_resolver<R: SuffixOperatorResolver + 'static>(&mut self, r: R) {
        self.resolvers.suffix = Box::new(r);
    }

    pub fn set_constants_resolver<R: ConstantsResolver + 'static>(&mut self, r: R) {
        self.resolvers.constants = Box::new(r);
    }

    /// Evaluates the tree. Numbers of the result have no trailing zeros and
    /// at most `round_scale` digits after the decimal point
    pub fn evaluate(&self, root: &TreeNode) -> CalcResult<Value> {
        let v = self.calc(root)?;
        let v = self.format_answer(&v)?;
        debug!("evaluated to {}", v);
        Ok(v)
    }

    fn format_answer(&self, v: &Value) -> CalcResult<Value> {
        let round_scale = self.ctx.round_scale as i64;
        v.try_map(&|x| {
            let x = x.strip_trailing_zeros();
            if x.scale() > round_scale {
                return Ok(x.set_scale(round_scale, RoundingMode::HalfEven).strip_trailing_zeros());
            }
            Ok(x)
        })
    }

    fn calc(&self, node: &TreeNode) -> CalcResult<Value> {
        let ctx = &self.ctx;
        match node {
            TreeNode::Number(text) => Ok(Value::of(text.parse::<Decimal>()?)),
            TreeNode::Negative(child) => self.calc(child)?.try_map(&|x| Ok(-x)),
            TreeNode::Brackets { kind, child } => self.calc(child)?.try_map(&|x| {
                match self.resolvers.brackets.resolve(*kind, x, ctx)? {
                    Some(v) => Ok(v),
                    None => {
                        debug!("unknown bracket type {}", kind);
                        Err(CalcError::UnknownBracketType(*kind))
                    }
                }
            }),
            TreeNode::Suffix { symbol, count, operand } => {
                let operand = match operand {
                    Some(op) => op,
                    None => return Err(CalcError::NoOperandForSuffixOperator(*symbol)),
                };
                self.calc(operand)?.try_map(&|x| match self.resolvers.suffix.resolve(*symbol, *count, x, ctx)? {
                    Some(v) => Ok(v),
                    None => {
                        debug!("unknown suffix operator '{}'", symbol);
                        Err(CalcError::UnknownSuffixOperator(*symbol))
                    }
                })
            }
            TreeNode::Constant(name) => match self.resolvers.constants.resolve(name, ctx)? {
                Some(v) => Ok(v),
                None => {
                    debug!("unknown constant {}", name);
                    Err(CalcError::UnknownConstant(name.clone()))
                }
            },
            TreeNode::List(children) => {
                let mut items = Vec::with_capacity(children.len());
                for child in children.iter() {
                    let v = self.calc(child)?;
                    match v.single_number().cloned() {
                        Some(d) => items.push(Value::Number(d)),
                        None => items.push(v),
                    }
                }
                Ok(Value::List(items))
            }
            TreeNode::Function { name, suffix, operand } => {
                self.calc_function(name, suffix.as_deref(), operand.as_deref())
            }
            TreeNode::Operator { symbol, left, right } => self.calc_operator(*symbol, left, right),
        }
    }

    fn calc_function(&self, name: &str, suffix: Option<&TreeNode>, operand: Option<&TreeNode>) -> CalcResult<Value> {
        let unknown = || {
            debug!("unknown function {}", name);
            CalcError::UnknownFunction(name.to_string())
        };
        let operand = match operand {
            Some(node) => Some(self.calc(node)?),
            None => None,
        };
        let suffix = match suffix {
            Some(node) => {
                match self.calc(node)?.single_number() {
                    Some(d) => Some(d.clone()),
                    None => return Err(CalcError::SuffixCannotBeList(name.to_string())),
                }
            }
            None => None,
        };

        match operand {
            Some(ref list) if !list.is_single_number() => {
                let functions: &dyn FunctionsResolver = &*self.resolvers.functions;
                self.resolvers
                    .list_functions
                    .resolve(name, suffix.as_ref(), list, functions, &self.ctx)?
                    .ok_or_else(unknown)
            }
            _ => {
                let arg = operand.as_ref().and_then(|v| v.single_number());
                let res = self
                    .resolvers
                    .functions
                    .resolve(name, suffix.as_ref(), arg, &self.ctx)?
                    .ok_or_else(unknown)?;
                Ok(Value::of(res))
            }
        }
    }

    fn calc_operator(&self, symbol: char, left: &TreeNode, right: &TreeNode) -> CalcResult<Value> {
        let ctx = &self.ctx;
        let r1 = self.calc(left)?;
        let r2 = self.calc(right)?;
        let (a, b) = (r1.single_number(), r2.single_number());
        if a.is_none() && b.is_none() {
            return Err(CalcError::BinaryOperatorCannotBeAppliedToLists(symbol));
        }

        let binary = &self.resolvers.binary;
        if right.is_suffix_operator(PERCENT_SIGN) {
            let invalid = || CalcError::InvalidOperatorForPercent(symbol);
            // `10-(25;50)%` or `(100;50)-50%`
            return match a {
                Some(base) => r2.try_map(&|p| binary.calculate_percent(symbol, base, p, ctx)?.ok_or_else(invalid)),
                None => match b {
                    Some(p) => r1.try_map(&|x| binary.calculate_percent(symbol, x, p, ctx)?.ok_or_else(invalid)),
                    None => Err(CalcError::BinaryOperatorCannotBeAppliedToLists(symbol)),
                },
            };
        }

        let unknown = || {
            debug!("unknown binary operator '{}'", symbol);
            CalcError::UnknownBinaryOperator(symbol)
        };
        match a {
            Some(x) => r2.try_map(&|y| binary.calculate(symbol, x, y, ctx)?.ok_or_else(unknown)),
            None => match b {
                Some(y) => r1.try_map(&|x| binary.calculate(symbol, x, y, ctx)?.ok_or_else(unknown)),
                None => Err(CalcError::BinaryOperatorCannotBeAppliedToLists(symbol)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::TreeBuilder;
    use crate::tree::ROUND_BRACKETS;

    fn num(s: &str) -> TreeNode {
        TreeNode::Number(s.to_string())
    }

    fn eval(expr: &str) -> String {
        let tree = TreeBuilder::default().build_tree(expr).unwrap();
        match Evaluator::default().evaluate(&tree) {
            Ok(v) => format!("{}", v),
            Err(e) => format!("{:?}", e),
        }
    }

    #[test]
    fn test_walk() {
        let exprs = [
            "2+2*2",
            "-(1;2)",
            "[2.5]+\u{23A3}-1.5\u{23A6}",
            "2*(1;2)",
            "(1;2)^2",
            "10-(25;50)%",
            "(100;50)-50%",
            "sqrt(4;(9;16))",
            "A(1;2;3;4)",
            "log2(8;16)",
            "1/3",
            "0.1+0.2",
            "2.50",
        ];
        let ress = [
            "6",
            "(-1; -2)",
            "1",
            "(2; 4)",
            "(1; 4)",
            "(7.5; 5)",
            "(50; 25)",
            "(2; (3; 4))",
            "2.5",
            "(3; 4)",
            "0.33333333",
            "0.3",
            "2.5",
        ];
        for (i, expr) in exprs.iter().enumerate() {
            assert_eq!(eval(expr), ress[i], "expression: {}", expr);
        }
    }

    #[test]
    fn test_errors() {
        let exprs = ["(1;2)+(3;4)", "2^(1;2)%", "foo(1)", "foo", "foo(1;2)", "!"];
        let ress = [
            CalcError::BinaryOperatorCannotBeAppliedToLists('+'),
            CalcError::InvalidOperatorForPercent('^'),
            CalcError::UnknownFunction("foo".to_string()),
            CalcError::UnknownConstant("foo".to_string()),
            CalcError::UnknownFunction("foo".to_string()),
            CalcError::NoOperandForSuffixOperator('!'),
        ];
        for (i, expr) in exprs.iter().enumerate() {
            assert_eq!(eval(expr), format!("{:?}", ress[i]), "expression: {}", expr);
        }
    }

    #[test]
    fn test_malformed_trees() {
        let ev = Evaluator::default();
        assert_eq!(ev.evaluate(&num("1x")), Err(CalcError::NumberFormat("1x".to_string())));

        let no_args = TreeNode::Function {
            name: "sin".to_string(),
            suffix: None,
            operand: None,
        };
        assert_eq!(
            ev.evaluate(&no_args),
            Err(CalcError::FunctionSuffixAndOperandAbsent("sin".to_string()))
        );

        let list_suffix = TreeNode::Function {
            name: "log".to_string(),
            suffix: Some(Box::new(TreeNode::List(vec![num("1"), num("2")]))),
            operand: Some(Box::new(num("8"))),
        };
        assert_eq!(ev.evaluate(&list_suffix), Err(CalcError::SuffixCannotBeList("log".to_string())));

        let weird_brackets = TreeNode::Brackets {
            kind: 42,
            child: Box::new(num("1")),
        };
        assert_eq!(ev.evaluate(&weird_brackets), Err(CalcError::UnknownBracketType(42)));

        let weird_suffix = TreeNode::Suffix {
            symbol: '?',
            count: 1,
            operand: Some(Box::new(num("1"))),
        };
        assert_eq!(ev.evaluate(&weird_suffix), Err(CalcError::UnknownSuffixOperator('?')));

        let weird_op = TreeNode::Operator {
            symbol: '&',
            left: Box::new(num("1")),
            right: Box::new(num("2")),
        };
        assert_eq!(ev.evaluate(&weird_op), Err(CalcError::UnknownBinaryOperator('&')));
    }

    #[test]
    fn test_list_nesting() {
        let ev = Evaluator::default();
        let tree = TreeNode::List(vec![
            num("1"),
            TreeNode::Brackets {
                kind: ROUND_BRACKETS,
                child: Box::new(TreeNode::List(vec![num("2"), num("3")])),
            },
        ]);
        let v = ev.evaluate(&tree).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Number(Decimal::from(1)),
                Value::List(vec![Value::Number(Decimal::from(2)), Value::Number(Decimal::from(3))])
            ])
        );
        assert_eq!(format!("{}", v), "(1; (2; 3))");
    }

    #[test]
    fn test_round_scale() {
        let tree = TreeBuilder::default().build_tree("2/3").unwrap();
        let mut ev = Evaluator::default();
        assert_eq!(ev.evaluate(&tree).map(|v| v.to_string()), Ok("0.66666667".to_string()));
        ev.set_round_scale(2);
        assert_eq!(ev.evaluate(&tree).map(|v| v.to_string()), Ok("0.67".to_string()));
        ev.set_round_scale(30);
        assert_eq!(ev.context().precision, 45);
        assert_eq!(
            ev.evaluate(&tree).map(|v| v.to_string()),
            Ok("0.666666666666666666666666666667".to_string())
        );
    }

    #[test]
    fn test_custom_resolvers() {
        let mut ev = Evaluator::default();
        ev.set_constants_resolver(|name: &str, _ctx: &MathContext| -> CalcResult<Option<Value>> {
            Ok(if name == "answer" { Some(Value::of(Decimal::from(42))) } else { None })
        });
        let tree = TreeBuilder::default().build_tree("answer/2").unwrap();
        assert_eq!(ev.evaluate(&tree).map(|v| v.to_string()), Ok("21".to_string()));
        let tree = TreeBuilder::default().build_tree("pi").unwrap();
        assert_eq!(ev.evaluate(&tree), Err(CalcError::UnknownConstant("pi".to_string())));
    }
}
