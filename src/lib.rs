//! # Expression tree builder and decimal calculator
//!
//! An expression is first turned into a tree of [`TreeNode`]s by a [`TreeBuilder`], and then
//! the tree is walked by an [`Evaluator`] that computes the result with arbitrary precision
//! decimal numbers. [`Calculator`] glues both steps together.
//!
//! The builder expects a normalized expression: no whitespace, no implicit multiplication.
//! Numbers may have an exponent, but only an unsigned one: `1.5e3` is fine, while `1e-3` is
//! split at the minus sign and fails. Write `1/1e3` instead.
//! The result of any evaluation is a [`Value`] list: a single number is printed as is, and
//! lists are printed in round brackets with `; ` between items: `(2; 4)`.
//!
//! Binary operators (starting from the highest priority):
//! * `^` - power, fractional exponents are rounded to 3 digits after the point
//! * `*`, `/` - multiplication and division
//! * `+`, `-` - addition and subtraction
//!
//! Operators with the same priority are evaluated from left to right: `2^3^2` is `64`.
//! A leading `-` is a unary minus, a leading `+` is skipped.
//!
//! Suffix operators:
//! * `!` - factorial, repeated sign means step: `5!!` = `5*3*1`
//! * `%` - percent. `100+10%` adds 10 percent of 100, `50%` alone is `0.5`
//! * `°` - degrees to radians
//! * `ᶢ` - gradians to radians
//!
//! Brackets:
//! * `(` `)` - grouping
//! * `[` `]` - rounding half up
//! * `⎣` `⎦` - floor
//! * `⎡` `⎤` - ceiling
//!
//! Functions may take an argument in brackets, right after the name, or both: `sin(pi/2)`,
//! `sin30°`, `log2(8)`. Built-in functions: `sqrt`, `log`, `ln`, `exp`, `abs`, `sin`, `cos`,
//! `tan`/`tg`, `cot`/`ctg`, `sec`, `csc`, and inverted trigonometric ones with `a` or `arc`
//! prefix. When a function gets a list, it is applied to every item. List functions
//! `A` (average), `sum`, `gcd`, and `lcm` fold the whole list into one number.
//!
//! Predefined constants: `pi` or `π`, `fi` or `φ`, `e` or `Ɛ`.
//!
//! Every table (brackets, operators, suffixes) and every resolver can be replaced,
//! see [`Calculator`] setters.
//!
//! Output is rounded to 8 digits after the point by default, trailing zeros are removed.
//! Use [`Calculator::set_round_scale`] to change it.

pub mod calculator;
pub mod decimal;
pub mod errors;
pub mod eval;
pub mod math;
pub mod parse;
pub mod resolvers;
pub mod tree;
pub mod value;

pub use calculator::Calculator;
pub use decimal::{Decimal, RoundingMode};
pub use errors::{CalcError, CalcResult, ConfigError, Error, TreeBuildError};
pub use eval::Evaluator;
pub use math::{AngleUnit, MathContext};
pub use parse::TreeBuilder;
pub use resolvers::Resolvers;
pub use tree::{BinaryOperator, BracketsType, SuffixOperator, TreeConfig, TreeNode};
pub use value::Value;
