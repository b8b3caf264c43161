//! Strategies the evaluator uses to give meaning to tree nodes.
//!
//! Every resolver returns `Ok(None)` for a symbol or a name it does not know,
//! the evaluator turns it into the matching `Unknown*` error. Resolvers are
//! shared between evaluations, so they must not keep mutable state.

use std::collections::HashMap;

use lazy_static::lazy_static;
use num_traits::Zero;

use crate::decimal::{Decimal, RoundingMode};
use crate::errors::*;
use crate::math::{self, AngleUnit, MathContext};
use crate::tree::{
    CEIL_BRACKETS, DEGREE_SIGN, E_SIGN, FACTORIAL_SIGN, FI_SIGN, FLOOR_BRACKETS, GRAD_SIGN, PERCENT_SIGN, PI_SIGN,
    ROUND_BRACKETS, SQUARE_BRACKETS,
};
use crate::value::Value;

pub trait BinaryOperatorResolver: Send + Sync {
    fn calculate(&self, op: char, a: &Decimal, b: &Decimal, ctx: &MathContext) -> CalcResult<Option<Decimal>>;

    /// `a op p%`, where `percent` is already divided by 100
    fn calculate_percent(
        &self,
        op: char,
        a: &Decimal,
        percent: &Decimal,
        ctx: &MathContext,
    ) -> CalcResult<Option<Decimal>>;
}

pub trait BracketsResolver: Send + Sync {
    fn resolve(&self, kind: u32, a: &Decimal, ctx: &MathContext) -> CalcResult<Option<Decimal>>;
}

pub trait FunctionsResolver: Send + Sync {
    fn resolve(
        &self,
        name: &str,
        suffix: Option<&Decimal>,
        operand: Option<&Decimal>,
        ctx: &MathContext,
    ) -> CalcResult<Option<Decimal>>;
}

/// Functions applied to a whole list, e.g. an average. `functions` is the
/// scalar resolver of the evaluator for element-wise fallbacks
pub trait ListFunctionsResolver: Send + Sync {
    fn resolve(
        &self,
        name: &str,
        suffix: Option<&Decimal>,
        list: &Value,
        functions: &dyn FunctionsResolver,
        ctx: &MathContext,
    ) -> CalcResult<Option<Value>>;
}

pub trait SuffixOperatorResolver: Send + Sync {
    fn resolve(&self, symbol: char, count: usize, operand: &Decimal, ctx: &MathContext) -> CalcResult<Option<Decimal>>;
}

pub trait ConstantsResolver: Send + Sync {
    fn resolve(&self, name: &str, ctx: &MathContext) -> CalcResult<Option<Value>>;
}

impl<F> FunctionsResolver for F
where
    F: Fn(&str, Option<&Decimal>, Option<&Decimal>, &MathContext) -> CalcResult<Option<Decimal>> + Send + Sync,
{
    fn resolve(
        &self,
        name: &str,
        suffix: Option<&Decimal>,
        operand: Option<&Decimal>,
        ctx: &MathContext,
    ) -> CalcResult<Option<Decimal>> {
        self(name, suffix, operand, ctx)
    }
}

impl<F> ConstantsResolver for F
where
    F: Fn(&str, &MathContext) -> CalcResult<Option<Value>> + Send + Sync,
{
    fn resolve(&self, name: &str, ctx: &MathContext) -> CalcResult<Option<Value>> {
        self(name, ctx)
    }
}

/// The set of resolvers used by one evaluator
pub struct Resolvers {
    pub binary: Box<dyn BinaryOperatorResolver>,
    pub brackets: Box<dyn BracketsResolver>,
    pub functions: Box<dyn FunctionsResolver>,
    pub list_functions: Box<dyn ListFunctionsResolver>,
    pub suffix: Box<dyn SuffixOperatorResolver>,
    pub constants: Box<dyn ConstantsResolver>,
}

impl Default for Resolvers {
    fn default() -> Self {
        Resolvers {
            binary: Box::new(DefaultBinaryOperatorResolver),
            brackets: Box::new(DefaultBracketsResolver),
            functions: Box::new(DefaultFunctionsResolver),
            list_functions: Box::new(DefaultListFunctionsResolver),
            suffix: Box::new(DefaultSuffixOperatorResolver),
            constants: Box::new(DefaultConstantsResolver),
        }
    }
}

/// `+ - * / ^`
pub struct DefaultBinaryOperatorResolver;

impl BinaryOperatorResolver for DefaultBinaryOperatorResolver {
    fn calculate(&self, op: char, a: &Decimal, b: &Decimal, ctx: &MathContext) -> CalcResult<Option<Decimal>> {
        let res = match op {
            '+' => a + b,
            '-' => a - b,
            '*' => a * b,
            '/' => a.div_with_scale(b, ctx.precision as i64, RoundingMode::HalfEven)?,
            '^' => math::pow(a, b, ctx)?,
            _ => return Ok(None),
        };
        Ok(Some(res))
    }

    fn calculate_percent(
        &self,
        op: char,
        a: &Decimal,
        percent: &Decimal,
        ctx: &MathContext,
    ) -> CalcResult<Option<Decimal>> {
        let part = a * percent;
        let res = match op {
            '+' => a + part,
            '-' => a - part,
            '*' => part,
            '/' => a.div_with_scale(percent, ctx.precision as i64, RoundingMode::HalfEven)?,
            _ => return Ok(None),
        };
        Ok(Some(res))
    }
}

/// `(x)` keeps the value, `[x]` rounds, `⎣x⎦` floors, `⎡x⎤` ceils
pub struct DefaultBracketsResolver;

impl BracketsResolver for DefaultBracketsResolver {
    fn resolve(&self, kind: u32, a: &Decimal, _ctx: &MathContext) -> CalcResult<Option<Decimal>> {
        let res = match kind {
            ROUND_BRACKETS => a.clone(),
            SQUARE_BRACKETS => math::round(a),
            FLOOR_BRACKETS => math::floor(a),
            CEIL_BRACKETS => math::ceil(a),
            _ => return Ok(None),
        };
        Ok(Some(res))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Func {
    Log,
    Ln,
    Exp,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
    Sqrt,
    Abs,
}

lazy_static! {
    static ref STD_FUNCS: HashMap<&'static str, Func> = {
        let mut m = HashMap::new();
        m.insert("log", Func::Log);
        m.insert("ln", Func::Ln);
        m.insert("exp", Func::Exp);
        m.insert("sin", Func::Sin);
        m.insert("cos", Func::Cos);
        m.insert("tan", Func::Tan);
        m.insert("tg", Func::Tan);
        m.insert("cot", Func::Cot);
        m.insert("ctg", Func::Cot);
        m.insert("sec", Func::Sec);
        m.insert("csc", Func::Csc);
        m.insert("asin", Func::Asin);
        m.insert("arcsin", Func::Asin);
        m.insert("acos", Func::Acos);
        m.insert("arccos", Func::Acos);
        m.insert("atan", Func::Atan);
        m.insert("arctan", Func::Atan);
        m.insert("arctg", Func::Atan);
        m.insert("atg", Func::Atan);
        m.insert("acot", Func::Acot);
        m.insert("arccot", Func::Acot);
        m.insert("arcctg", Func::Acot);
        m.insert("actg", Func::Acot);
        m.insert("asec", Func::Asec);
        m.insert("arcsec", Func::Asec);
        m.insert("acsc", Func::Acsc);
        m.insert("arccsc", Func::Acsc);
        m.insert("sqrt", Func::Sqrt);
        m.insert("abs", Func::Abs);
        m
    };
}

/// Built-in functions. The argument is the suffix if it exists, otherwise
/// the operand: `sin30` is `sin(30)`. Two functions use both: `log2(8)` is a
/// logarithm with base 2 and `sqrt3(8)` is a root of degree 3
pub struct DefaultFunctionsResolver;

impl FunctionsResolver for DefaultFunctionsResolver {
    fn resolve(
        &self,
        name: &str,
        suffix: Option<&Decimal>,
        operand: Option<&Decimal>,
        ctx: &MathContext,
    ) -> CalcResult<Option<Decimal>> {
        let func = match STD_FUNCS.get(name) {
            Some(f) => *f,
            None => return Ok(None),
        };
        let x = match (suffix, operand) {
            (Some(x), _) | (None, Some(x)) => x,
            (None, None) => return Err(CalcError::FunctionSuffixAndOperandAbsent(name.to_string())),
        };

        let res = match func {
            Func::Log => match (suffix, operand) {
                (Some(base), Some(x)) => math::log_with_base(x, base, ctx)?,
                _ => math::log10(x, ctx)?,
            },
            Func::Sqrt => match (suffix, operand) {
                (Some(degree), Some(x)) => math::root_with_base(x, degree, ctx)?,
                _ => math::sqrt(x, ctx)?,
            },
            Func::Ln => math::ln(x, ctx)?,
            Func::Exp => math::exp(x, ctx)?,
            Func::Sin => math::sin(x, ctx)?,
            Func::Cos => math::cos(x, ctx)?,
            Func::Tan => math::tan(x, ctx)?,
            Func::Cot => math::cot(x, ctx)?,
            Func::Sec => math::sec(x, ctx)?,
            Func::Csc => math::csc(x, ctx)?,
            Func::Asin => math::asin(x, ctx)?,
            Func::Acos => math::acos(x, ctx)?,
            Func::Atan => math::atan(x, ctx)?,
            Func::Acot => math::acot(x, ctx)?,
            Func::Asec => math::asec(x, ctx)?,
            Func::Acsc => math::acsc(x, ctx)?,
            Func::Abs => math::abs(x),
        };
        Ok(Some(res))
    }
}

/// `A` (average), `sum`, `gcd` and `lcm` work with all numbers of a list
/// including nested lists. Any other function is applied to every element
pub struct DefaultListFunctionsResolver;

impl ListFunctionsResolver for DefaultListFunctionsResolver {
    fn resolve(
        &self,
        name: &str,
        suffix: Option<&Decimal>,
        list: &Value,
        functions: &dyn FunctionsResolver,
        ctx: &MathContext,
    ) -> CalcResult<Option<Value>> {
        let res = match name {
            "A" => {
                let numbers = list.flatten();
                if numbers.is_empty() {
                    return Err(CalcError::AverageFunctionHasNoArguments);
                }
                let sum = numbers.iter().fold(Decimal::zero(), |acc, d| acc + d);
                let count = Decimal::from(numbers.len() as u64);
                Value::of(sum.div_with_scale(&count, ctx.precision as i64, RoundingMode::HalfEven)?)
            }
            "sum" => Value::of(list.flatten().iter().fold(Decimal::zero(), |acc, d| acc + d)),
            "gcd" => Value::of(math::gcd(&list.flatten())?),
            "lcm" => Value::of(math::lcm(&list.flatten())?),
            _ => list.try_map(&|x| match functions.resolve(name, suffix, Some(x), ctx)? {
                Some(v) => Ok(v),
                None => Err(CalcError::UnknownFunction(name.to_string())),
            })?,
        };
        Ok(Some(res))
    }
}

/// `!` factorial (`5!!` is a double factorial), `%` percent, `°` degrees and
/// `ᶢ` gradians converted to radians
pub struct DefaultSuffixOperatorResolver;

impl SuffixOperatorResolver for DefaultSuffixOperatorResolver {
    fn resolve(&self, symbol: char, count: usize, operand: &Decimal, ctx: &MathContext) -> CalcResult<Option<Decimal>> {
        let unit = match symbol {
            FACTORIAL_SIGN => return math::factorial(operand, count).map(Some),
            PERCENT_SIGN => {
                let hundredth = Decimal::new(1, 2).pow_u64(count as u64);
                return Ok(Some(operand * hundredth));
            }
            DEGREE_SIGN => AngleUnit::Degrees,
            GRAD_SIGN => AngleUnit::Gradians,
            _ => return Ok(None),
        };
        let mut angle = operand.clone();
        for _ in 0..count {
            angle = unit.convert(&angle, AngleUnit::Radians, ctx)?;
        }
        Ok(Some(angle))
    }
}

/// `pi`, `fi` (golden ratio) and `e`, plus their one letter forms
pub struct DefaultConstantsResolver;

impl ConstantsResolver for DefaultConstantsResolver {
    fn resolve(&self, name: &str, ctx: &MathContext) -> CalcResult<Option<Value>> {
        let mut chars = name.chars();
        let sign = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };
        let res = match (name, sign) {
            ("pi", _) | (_, Some(PI_SIGN)) => math::pi(ctx)?,
            ("fi", _) | (_, Some(FI_SIGN)) => math::phi(ctx)?,
            ("e", _) | (_, Some(E_SIGN)) => math::e(ctx)?,
            _ => return Ok(None),
        };
        Ok(Some(Value::of(res)))
    }
}
