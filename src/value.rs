use std::fmt;

use crate::decimal::Decimal;
use crate::errors::*;

/// Result of an evaluation: a number or a (possibly nested) list of results.
///
/// The evaluator always produces a `List`. A list that holds exactly one
/// `Number` is a scalar, see [`Value::is_single_number`].
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Number(Decimal),
    List(Vec<Value>),
}

impl Value {
    /// Scalar result: a list with a single number inside
    pub fn of(d: Decimal) -> Value {
        Value::List(vec![Value::Number(d)])
    }

    pub fn is_single_number(&self) -> bool {
        match self {
            Value::List(v) => v.len() == 1 && matches!(v[0], Value::Number(..)),
            Value::Number(..) => false,
        }
    }

    /// The number of a scalar result
    pub fn single_number(&self) -> Option<&Decimal> {
        match self {
            Value::List(v) if v.len() == 1 => match &v[0] {
                Value::Number(d) => Some(d),
                Value::List(..) => None,
            },
            _ => None,
        }
    }

    /// Applies `f` to every number and keeps the shape of lists
    pub fn try_map<F>(&self, f: &F) -> CalcResult<Value>
    where
        F: Fn(&Decimal) -> CalcResult<Decimal>,
    {
        match self {
            Value::Number(d) => Ok(Value::Number(f(d)?)),
            Value::List(v) => {
                let mut res = Vec::with_capacity(v.len());
                for item in v.iter() {
                    res.push(item.try_map(f)?);
                }
                Ok(Value::List(res))
            }
        }
    }

    /// All numbers of the value and its nested lists in order
    pub fn flatten(&self) -> Vec<Decimal> {
        let mut res = Vec::new();
        self.collect_numbers(&mut res);
        res
    }

    fn collect_numbers(&self, acc: &mut Vec<Decimal>) {
        match self {
            Value::Number(d) => acc.push(d.clone()),
            Value::List(v) => {
                for item in v.iter() {
                    item.collect_numbers(acc);
                }
            }
        }
    }

    /// Renders the value with a custom number formatter: a scalar becomes
    /// a bare number, a list becomes `(a; b; (c; d))`
    pub fn format_with(&self, fmt_num: &dyn Fn(&Decimal) -> String) -> String {
        if let Some(d) = self.single_number() {
            return fmt_num(d);
        }
        match self {
            Value::Number(d) => fmt_num(d),
            Value::List(v) => {
                let items: Vec<String> = v
                    .iter()
                    .map(|item| match item {
                        Value::Number(d) => fmt_num(d),
                        Value::List(..) => item.format_with(fmt_num),
                    })
                    .collect();
                format!("({})", items.join("; "))
            }
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::of(d)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format_with(&|d| d.to_string()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "Number({})", d),
            Value::List(v) => write!(f, "List({:?})", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn list(v: Vec<Value>) -> Value {
        Value::List(v)
    }

    fn num(s: &str) -> Value {
        Value::Number(d(s))
    }

    #[test]
    fn test_single_number() {
        assert!(Value::of(d("2")).is_single_number());
        assert_eq!(Value::of(d("2")).single_number(), Some(&d("2")));
        assert!(!list(vec![num("1"), num("2")]).is_single_number());
        assert!(!list(vec![list(vec![num("1")])]).is_single_number());
        assert!(!num("1").is_single_number());
        assert_eq!(list(vec![]).single_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::of(d("-1.5"))), "-1.5");
        assert_eq!(format!("{}", list(vec![num("1"), num("2")])), "(1; 2)");
        assert_eq!(
            format!("{}", list(vec![num("1"), list(vec![num("2"), num("3")])])),
            "(1; (2; 3))"
        );
        assert_eq!(format!("{}", list(vec![])), "()");
        let v = list(vec![num("1.25"), num("3")]);
        assert_eq!(v.format_with(&|d| format!("<{}>", d)), "(<1.25>; <3>)");
    }

    #[test]
    fn test_map_keeps_shape() {
        let v = list(vec![num("1"), list(vec![num("2"), num("3")])]);
        let doubled = v.try_map(&|x| Ok(x * &d("2"))).unwrap();
        assert_eq!(doubled, list(vec![num("2"), list(vec![num("4"), num("6")])]));

        let failed = v.try_map(&|x| {
            if *x == d("3") {
                Err(CalcError::DivisionByZero)
            } else {
                Ok(x.clone())
            }
        });
        assert_eq!(failed, Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_flatten() {
        let v = list(vec![num("1"), list(vec![num("2"), list(vec![num("3")])]), num("4")]);
        assert_eq!(v.flatten(), vec![d("1"), d("2"), d("3"), d("4")]);
    }
}
