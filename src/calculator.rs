use tracing::debug;

use crate::errors::*;
use crate::eval::Evaluator;
use crate::math::MathContext;
use crate::parse::TreeBuilder;
use crate::resolvers::*;
use crate::tree::{BinaryOperator, BracketsType, SuffixOperator, TreeConfig, TreeNode};
use crate::value::Value;

/// Tree builder and evaluator with shared settings.
///
/// ```
/// use decicalc::Calculator;
///
/// let calc = Calculator::new();
/// assert_eq!(calc.calculate("2+2*2").unwrap().to_string(), "6");
/// assert_eq!(calc.calculate("2*(1;2)").unwrap().to_string(), "(2; 4)");
/// ```
#[derive(Default)]
pub struct Calculator {
    builder: TreeBuilder,
    evaluator: Evaluator,
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: TreeConfig, resolvers: Resolvers, ctx: MathContext) -> Self {
        Calculator {
            builder: TreeBuilder::new(config),
            evaluator: Evaluator::with_resolvers(resolvers, ctx),
        }
    }

    pub fn build_tree(&self, expr: &str) -> Result<TreeNode, TreeBuildError> {
        self.builder.build_tree(expr)
    }

    pub fn evaluate(&self, tree: &TreeNode) -> CalcResult<Value> {
        self.evaluator.evaluate(tree)
    }

    /// Builds a tree for a normalized expression and evaluates it
    pub fn calculate(&self, expr: &str) -> Result<Value, Error> {
        let tree = self.build_tree(expr)?;
        let v = self.evaluate(&tree)?;
        debug!("{} = {}", expr, v);
        Ok(v)
    }

    pub fn config(&self) -> &TreeConfig {
        self.builder.config()
    }

    pub fn context(&self) -> &MathContext {
        self.evaluator.context()
    }

    pub fn set_brackets(&mut self, brackets: Vec<BracketsType>) -> Result<(), ConfigError> {
        let cfg = self.builder.config().clone().with_brackets(brackets)?;
        self.builder.set_config(cfg);
        Ok(())
    }

    pub fn set_binary_operators(&mut self, operators: Vec<BinaryOperator>) -> Result<(), ConfigError> {
        let cfg = self.builder.config().clone().with_binary_operators(operators)?;
        self.builder.set_config(cfg);
        Ok(())
    }

    pub fn set_suffix_operators(&mut self, suffixes: Vec<SuffixOperator>) -> Result<(), ConfigError> {
        let cfg = self.builder.config().clone().with_suffix_operators(suffixes)?;
        self.builder.set_config(cfg);
        Ok(())
    }

    pub fn set_round_scale(&mut self, round_scale: u32) {
        self.evaluator.set_round_scale(round_scale);
    }

    pub fn set_context(&mut self, ctx: MathContext) {
        self.evaluator.set_context(ctx);
    }

    pub fn set_binary_operator_resolver<R: BinaryOperatorResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_binary_operator_resolver(r);
    }

    pub fn set_brackets_resolver<R: BracketsResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_brackets_resolver(r);
    }

    pub fn set_functions_resolver<R: FunctionsResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_functions_resolver(r);
    }

    pub fn set_list_functions_resolver<R: ListFunctionsResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_list_functions_resolver(r);
    }

    pub fn set_suffix_operator_resolver<R: SuffixOperatorResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_suffix_operator_resolver(r);
    }

    pub fn set_constants_resolver<R: ConstantsResolver + 'static>(&mut self, r: R) {
        self.evaluator.set_constants_resolver(r);
    }
}
