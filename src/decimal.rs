use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::errors::*;

/// How digits dropped by [`Decimal::set_scale`] affect the last kept digit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to the even neighbour
    HalfEven,
    /// Round to nearest, ties away from zero
    HalfUp,
    /// Round to nearest, ties towards zero
    HalfDown,
    /// Truncate
    Down,
    /// Towards negative infinity
    Floor,
    /// Towards positive infinity
    Ceiling,
}

/// Arbitrary precision signed base-10 number: `int_val * 10^(-scale)`.
///
/// Equality and ordering compare numeric values, so `2.50 == 2.5`.
#[derive(Clone, Default)]
pub struct Decimal {
    int_val: BigInt,
    scale: i64,
}

pub(crate) fn ten_pow(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

// 10^exp for a scale difference, an exponent beyond `u32` is an error
pub(crate) fn checked_ten_pow(exp: i64) -> CalcResult<BigInt> {
    match u32::try_from(exp) {
        Ok(e) => Ok(ten_pow(e)),
        Err(_) => Err(CalcError::ExponentTooLarge(exp.to_string())),
    }
}

// integer division of num by den with the rounding applied to the quotient
fn round_div(num: &BigInt, den: &BigInt, mode: RoundingMode) -> BigInt {
    let q = num / den;
    let r = num - &q * den;
    if r.is_zero() {
        return q;
    }

    let positive = (num.sign() == Sign::Minus) == (den.sign() == Sign::Minus);
    let twice = r.abs() * BigInt::from(2);
    let half = twice.cmp(&den.abs());
    let away = match mode {
        RoundingMode::HalfEven => {
            half == Ordering::Greater || (half == Ordering::Equal && !(&q % BigInt::from(2)).is_zero())
        }
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::Down => false,
        RoundingMode::Floor => !positive,
        RoundingMode::Ceiling => positive,
    };
    if !away {
        q
    } else if positive {
        q + BigInt::one()
    } else {
        q - BigInt::one()
    }
}

impl Decimal {
    pub fn new<T: Into<BigInt>>(int_val: T, scale: i64) -> Self {
        Decimal {
            int_val: int_val.into(),
            scale,
        }
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// The integer that, divided by `10^scale`, gives the value
    pub fn unscaled(&self) -> &BigInt {
        &self.int_val
    }

    pub fn signum(&self) -> i32 {
        match self.int_val.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.int_val.is_negative()
    }

    pub fn abs(&self) -> Decimal {
        Decimal::new(self.int_val.abs(), self.scale)
    }

    // number of digits in the unscaled value
    fn digits(&self) -> i64 {
        if self.int_val.is_zero() {
            return 1;
        }
        self.int_val.magnitude().to_string().len() as i64
    }

    /// Power of ten of the most significant digit: `123.4` -> 2, `0.05` -> -2
    pub fn adjusted_exponent(&self) -> i64 {
        self.digits() - 1 - self.scale
    }

    // unscaled value expressed with a scale that is not less than the current one
    fn rescaled(&self, scale: i64) -> BigInt {
        if scale <= self.scale || self.int_val.is_zero() {
            return self.int_val.clone();
        }
        let mut diff = scale - self.scale;
        let mut int_val = self.int_val.clone();
        while diff > 0 {
            let step = diff.min(u32::MAX as i64);
            int_val *= ten_pow(step as u32);
            diff -= step;
        }
        int_val
    }

    /// Returns the same value with exactly `scale` digits after the decimal point
    pub fn set_scale(&self, scale: i64, mode: RoundingMode) -> Decimal {
        if scale >= self.scale {
            return Decimal::new(self.rescaled(scale), scale);
        }
        match u32::try_from(self.scale - scale) {
            Ok(diff) => Decimal::new(round_div(&self.int_val, &ten_pow(diff), mode), scale),
            // the divisor has more digits than the value: the quotient is 0 and the
            // remainder is below a half, the same as for `signum / 10`
            Err(_) => Decimal::new(round_div(&self.int_val.signum(), &BigInt::from(10u32), mode), scale),
        }
    }

    /// Rounds (half-even) to at most `precision` significant digits
    pub fn round_to_precision(&self, precision: u32) -> Decimal {
        let extra = self.digits() - precision.max(1) as i64;
        if extra <= 0 {
            return self.clone();
        }
        self.set_scale(self.scale - extra, RoundingMode::HalfEven)
    }

    /// Removes zeros at the end of the fractional part. The result never has a negative scale.
    pub fn strip_trailing_zeros(&self) -> Decimal {
        if self.int_val.is_zero() {
            return Decimal::zero();
        }
        if self.scale < 0 {
            return Decimal::new(self.rescaled(0), 0);
        }
        let ten = BigInt::from(10u32);
        let mut int_val = self.int_val.clone();
        let mut scale = self.scale;
        while scale > 0 && (&int_val % &ten).is_zero() {
            int_val /= &ten;
            scale -= 1;
        }
        Decimal::new(int_val, scale)
    }

    /// Quotient with exactly `scale` digits after the decimal point
    pub fn div_with_scale(&self, rhs: &Decimal, scale: i64, mode: RoundingMode) -> CalcResult<Decimal> {
        if rhs.int_val.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let exp = scale + rhs.scale - self.scale;
        let q = if exp >= 0 {
            round_div(&(&self.int_val * checked_ten_pow(exp)?), &rhs.int_val, mode)
        } else {
            round_div(&self.int_val, &(&rhs.int_val * checked_ten_pow(-exp)?), mode)
        };
        Ok(Decimal::new(q, scale))
    }

    /// Quotient rounded to `precision` significant digits
    pub fn div_with_precision(&self, rhs: &Decimal, precision: u32) -> CalcResult<Decimal> {
        if rhs.int_val.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        if self.int_val.is_zero() {
            return Ok(Decimal::zero());
        }
        let exp = self.adjusted_exponent() - rhs.adjusted_exponent();
        let scale = precision as i64 + 2 - exp;
        let q = self.div_with_scale(rhs, scale, RoundingMode::HalfEven)?;
        Ok(q.round_to_precision(precision))
    }

    /// Remainder of the truncated division, it has the sign of `self`
    pub fn rem(&self, rhs: &Decimal) -> CalcResult<Decimal> {
        if rhs.int_val.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let scale = self.scale.max(rhs.scale);
        Ok(Decimal::new(self.rescaled(scale) % rhs.rescaled(scale), scale))
    }

    pub fn is_integer(&self) -> bool {
        if self.scale <= 0 {
            return true;
        }
        match u32::try_from(self.scale) {
            Ok(scale) => (&self.int_val % ten_pow(scale)).is_zero(),
            Err(_) => self.int_val.is_zero(),
        }
    }

    /// Integer part, the fraction is dropped
    pub fn to_bigint(&self) -> BigInt {
        self.set_scale(0, RoundingMode::Down).int_val
    }

    /// Returns the value if it is an integer that fits `i64`
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.to_bigint().to_i64()
    }

    /// Returns the value if it is an integer that fits `u32`
    pub fn to_u32(&self) -> Option<u32> {
        if !self.is_integer() {
            return None;
        }
        self.to_bigint().to_u32()
    }

    /// Exact power with a non-negative integer exponent (exponentiation by squaring)
    pub fn pow_u64(&self, exp: u64) -> Decimal {
        let mut result = Decimal::one();
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.int_val.is_zero() && self.scale <= 0 {
            return write!(f, "0");
        }
        let sign = if self.int_val.is_negative() { "-" } else { "" };
        let digits = self.int_val.magnitude().to_string();
        if self.scale <= 0 {
            return write!(f, "{}{}{}", sign, digits, "0".repeat((-self.scale) as usize));
        }
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

/// Accepts `12`, `12.5`, `.5`, `12.`, `1.5e3`, `25e-3`, optionally signed.
/// The scale of the result must fit `i32`, so `1e4294967296` is rejected.
impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CalcError::NumberFormat(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (mantissa, exp) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp: i64 = body[pos + 1..].parse().map_err(|_| err())?;
                (&body[..pos], exp)
            }
            None => (body, 0),
        };
        let (int_part, frac_part) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(err());
        }

        let mut int_val: BigInt = format!("{}{}", int_part, frac_part).parse().map_err(|_| err())?;
        if negative {
            int_val = -int_val;
        }
        let scale = (frac_part.len() as i64).checked_sub(exp).ok_or_else(err)?;
        let scale = i32::try_from(scale).map_err(|_| err())?;
        Ok(Decimal::new(int_val, scale as i64))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Decimal) -> Ordering {
        if self.signum() != other.signum() {
            return self.signum().cmp(&other.signum());
        }
        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal::new(v, 0)
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Decimal::new(v, 0)
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Decimal::new(v, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(v: BigInt) -> Self {
        Decimal::new(v, 0)
    }
}

impl<'a, 'b> Add<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'b Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.rescaled(scale) + rhs.rescaled(scale), scale)
    }
}

impl<'a, 'b> Sub<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'b Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.rescaled(scale) - rhs.rescaled(scale), scale)
    }
}

impl<'a, 'b> Mul<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'b Decimal) -> Decimal {
        Decimal::new(&self.int_val * &rhs.int_val, self.scale + rhs.scale)
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &'a Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl<'a> $imp<Decimal> for &'a Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.int_val, self.scale)
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.int_val, self.scale)
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Decimal::new(0, 0)
    }

    fn is_zero(&self) -> bool {
        self.int_val.is_zero()
    }
}

impl One for Decimal {
    fn one() -> Self {
        Decimal::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let exprs = ["12", "12.50", ".5", "3.", "-0.007", "1.5e3", "25e-3", "0"];
        let ress = ["12", "12.50", "0.5", "3", "-0.007", "1500", "0.025", "0"];
        for (i, expr) in exprs.iter().enumerate() {
            assert_eq!(format!("{}", d(expr)), ress[i].to_string());
        }

        let bad_numbers = [
            "",
            ".",
            "1.2.3",
            "1a",
            "e5",
            "--1",
            "1e",
            "1e4294967296",
            "1e-4294967304",
            "1e-9223372036854775808",
            "1e99999999999999999999",
        ];
        for bad in bad_numbers.iter() {
            assert_eq!(bad.parse::<Decimal>(), Err(CalcError::NumberFormat(bad.to_string())));
        }
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(d("2.50"), d("2.5"));
        assert_eq!(d("100"), d("1e2"));
        assert!(d("-3") < d("0.1"));
        assert!(d("1.01") > d("1.009"));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(format!("{}", d("1.25") + d("2.5")), "3.75");
        assert_eq!(format!("{}", d("1") - d("2.5")), "-1.5");
        assert_eq!(format!("{}", d("1.5") * d("-0.2")), "-0.30");
        assert_eq!(format!("{}", -d("7.1")), "-7.1");
        assert_eq!(d("1.5").pow_u64(3), d("3.375"));
        assert_eq!(d("7").pow_u64(0), Decimal::one());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format!("{}", d("2.5").set_scale(0, RoundingMode::HalfEven)), "2");
        assert_eq!(format!("{}", d("3.5").set_scale(0, RoundingMode::HalfEven)), "4");
        assert_eq!(format!("{}", d("-2.5").set_scale(0, RoundingMode::HalfUp)), "-3");
        assert_eq!(format!("{}", d("2.5").set_scale(0, RoundingMode::HalfDown)), "2");
        assert_eq!(format!("{}", d("-2.1").set_scale(0, RoundingMode::Floor)), "-3");
        assert_eq!(format!("{}", d("-2.9").set_scale(0, RoundingMode::Ceiling)), "-2");
        assert_eq!(format!("{}", d("2.9").set_scale(0, RoundingMode::Down)), "2");
        assert_eq!(format!("{}", d("1.2").set_scale(3, RoundingMode::Down)), "1.200");
        assert_eq!(format!("{}", d("123456").round_to_precision(2)), "120000");
        assert_eq!(Decimal::new(7, 5_000_000_000).set_scale(0, RoundingMode::Down), Decimal::zero());
        assert_eq!(Decimal::new(7, 5_000_000_000).set_scale(0, RoundingMode::Ceiling), Decimal::one());
        assert_eq!(Decimal::new(-7, 5_000_000_000).set_scale(0, RoundingMode::HalfUp), Decimal::zero());
    }

    #[test]
    fn test_strip_trailing_zeros() {
        assert_eq!(format!("{}", d("1.2500").strip_trailing_zeros()), "1.25");
        assert_eq!(format!("{}", d("2.000").strip_trailing_zeros()), "2");
        assert_eq!(format!("{}", d("0.000").strip_trailing_zeros()), "0");
        assert_eq!(format!("{}", d("1e3").strip_trailing_zeros()), "1000");
        assert_eq!(d("1e3").strip_trailing_zeros().scale(), 0);
    }

    #[test]
    fn test_division() {
        let q = d("1").div_with_scale(&d("3"), 5, RoundingMode::HalfEven);
        assert_eq!(q.map(|v| format!("{}", v)), Ok("0.33333".to_string()));
        let q = d("2").div_with_precision(&d("3"), 4);
        assert_eq!(q.map(|v| format!("{}", v)), Ok("0.6667".to_string()));
        let q = d("1000").div_with_precision(&d("0.001"), 4);
        assert_eq!(q, Ok(d("1000000")));
        assert_eq!(d("1").div_with_scale(&Decimal::zero(), 5, RoundingMode::HalfEven), Err(CalcError::DivisionByZero));
        assert_eq!(
            d("1").div_with_scale(&d("3"), 5_000_000_000, RoundingMode::HalfEven),
            Err(CalcError::ExponentTooLarge("5000000000".to_string()))
        );
    }

    #[test]
    fn test_integers() {
        assert!(d("5.000").is_integer());
        assert!(!d("5.001").is_integer());
        assert!(!Decimal::new(7, 5_000_000_000).is_integer());
        assert!(Decimal::new(0, 5_000_000_000).is_integer());
        assert_eq!(d("-7.9").to_bigint(), BigInt::from(-7));
        assert_eq!(d("12.0").to_i64(), Some(12));
        assert_eq!(d("12.5").to_i64(), None);
        assert_eq!(d("7.5").rem(&d("2")), Ok(d("1.5")));
        assert_eq!(d("-7").rem(&d("2")), Ok(d("-1")));
    }
}
