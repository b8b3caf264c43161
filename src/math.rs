//! Numeric primitives over [`Decimal`].
//!
//! Series are summed at a fixed number of fractional digits a little larger
//! than the requested precision and the result is rounded to
//! [`MathContext::precision`] significant digits.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::decimal::{checked_ten_pow, Decimal, RoundingMode};
use crate::errors::*;

pub const DEFAULT_ROUND_SCALE: u32 = 8;
pub const DEFAULT_PRECISION: u32 = 20;
/// The largest argument of factorial
pub const FACTORIAL_LIMIT: u64 = 100_000;

// extra digits carried by series to absorb rounding of intermediate terms
const GUARD: u32 = 10;

/// Precision settings shared by every computation of one evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MathContext {
    /// Digits after the decimal point kept in a final result
    pub round_scale: u32,
    /// Significant digits of internal computations
    pub precision: u32,
}

impl Default for MathContext {
    fn default() -> Self {
        MathContext {
            round_scale: DEFAULT_ROUND_SCALE,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl MathContext {
    pub fn new(round_scale: u32, precision: u32) -> Self {
        MathContext { round_scale, precision }
    }

    /// Working precision follows the display scale: one and a half times
    /// larger, but never below the default
    pub fn with_round_scale(round_scale: u32) -> Self {
        MathContext {
            round_scale,
            precision: (round_scale * 3 / 2).max(DEFAULT_PRECISION),
        }
    }

    // fractional digits used by series
    fn series_scale(&self) -> i64 {
        (self.precision + GUARD) as i64
    }

    fn with_precision(&self, precision: u32) -> Self {
        MathContext {
            round_scale: self.round_scale,
            precision,
        }
    }
}

fn two() -> Decimal {
    Decimal::from(2)
}

fn half() -> Decimal {
    Decimal::new(5, 1)
}

// ------------------------------------------------------------------
// constants
// ------------------------------------------------------------------

// sum of x^(2k+1)/(2k+1), alternating when `alternate` is set
fn odd_power_series(x: &Decimal, scale: i64, alternate: bool) -> CalcResult<Decimal> {
    let x2 = (x * x).set_scale(scale, RoundingMode::HalfEven);
    let mut power = x.set_scale(scale, RoundingMode::HalfEven);
    let mut sum = power.clone();
    let mut k: i64 = 1;
    loop {
        power = (&power * &x2).set_scale(scale, RoundingMode::HalfEven);
        if power.is_zero() {
            break;
        }
        let term = power.div_with_scale(&Decimal::from(2 * k + 1), scale, RoundingMode::HalfEven)?;
        if term.is_zero() {
            break;
        }
        sum = if alternate && k % 2 == 1 { sum - term } else { sum + term };
        k += 1;
    }
    Ok(sum)
}

// pi with `scale` fractional digits, Machin's formula
fn pi_scaled(scale: i64) -> CalcResult<Decimal> {
    let inner = scale + 5;
    let a = Decimal::one().div_with_scale(&Decimal::from(5), inner, RoundingMode::HalfEven)?;
    let b = Decimal::one().div_with_scale(&Decimal::from(239), inner, RoundingMode::HalfEven)?;
    let pi = Decimal::from(16) * odd_power_series(&a, inner, true)? - Decimal::from(4) * odd_power_series(&b, inner, true)?;
    Ok(pi.set_scale(scale, RoundingMode::HalfEven))
}

pub fn pi(ctx: &MathContext) -> CalcResult<Decimal> {
    Ok(pi_scaled(ctx.series_scale())?.round_to_precision(ctx.precision))
}

pub fn e(ctx: &MathContext) -> CalcResult<Decimal> {
    exp(&Decimal::one(), ctx)
}

/// Golden ratio
pub fn phi(ctx: &MathContext) -> CalcResult<Decimal> {
    let wide = ctx.with_precision(ctx.precision + GUARD);
    let root = sqrt(&Decimal::from(5), &wide)?;
    Ok(((Decimal::one() + root) * half()).round_to_precision(ctx.precision))
}

// ------------------------------------------------------------------
// exponent and logarithms
// ------------------------------------------------------------------

pub fn exp(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }
    if x.is_negative() {
        let inv = exp(&-x, &ctx.with_precision(ctx.precision + GUARD))?;
        return Decimal::one().div_with_precision(&inv, ctx.precision);
    }

    // exp(x) = exp(x / 2^k)^(2^k)
    let mut reduced = x.clone();
    let mut halvings = 0i64;
    while reduced > half() {
        reduced = &reduced * &half();
        halvings += 1;
    }
    let scale = ctx.series_scale() + halvings * 3 / 10 + 1;
    let reduced = reduced.set_scale(scale, RoundingMode::HalfEven);

    let mut sum = Decimal::one();
    let mut term = Decimal::one();
    let mut n: i64 = 1;
    loop {
        term = (&term * &reduced).div_with_scale(&Decimal::from(n), scale, RoundingMode::HalfEven)?;
        if term.is_zero() {
            break;
        }
        sum = sum + &term;
        n += 1;
    }
    for _ in 0..halvings {
        sum = (&sum * &sum).set_scale(scale, RoundingMode::HalfEven);
    }
    Ok(sum.round_to_precision(ctx.precision))
}

// ln(2) and ln(10) are needed by every logarithm after range reduction
fn ln2_scaled(scale: i64) -> CalcResult<Decimal> {
    let third = Decimal::one().div_with_scale(&Decimal::from(3), scale, RoundingMode::HalfEven)?;
    Ok(two() * odd_power_series(&third, scale, false)?)
}

fn ln10_scaled(scale: i64) -> CalcResult<Decimal> {
    // 10 = 2^3 * 1.25 and ln(1.25) = 2 * atanh(1/9)
    let ninth = Decimal::one().div_with_scale(&Decimal::from(9), scale, RoundingMode::HalfEven)?;
    Ok(Decimal::from(3) * ln2_scaled(scale)? + two() * odd_power_series(&ninth, scale, false)?)
}

/// Natural logarithm
pub fn ln(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    if x.signum() <= 0 {
        return Err(CalcError::NegativeParameterOfLog(x.to_string()));
    }
    if *x == Decimal::one() {
        return Ok(Decimal::zero());
    }

    // x = m * 10^a with m in [1, 10), then m = y * 2^j with y in [0.75, 1.5]
    let a = x.adjusted_exponent();
    let m = Decimal::new(x.unscaled().clone(), x.scale() + a);
    let near_one = (x - Decimal::one()).abs();
    let extra = (-near_one.adjusted_exponent()).max(0);
    let scale = ctx.series_scale() + extra;

    let mut y = m;
    let mut j: i64 = 0;
    while y > Decimal::new(15, 1) {
        y = &y * &half();
        j += 1;
    }
    let z = (&y - Decimal::one()).div_with_scale(&(&y + Decimal::one()), scale, RoundingMode::HalfEven)?;
    let mut res = two() * odd_power_series(&z, scale, false)?;
    if j != 0 {
        res = res + Decimal::from(j) * ln2_scaled(scale)?;
    }
    if a != 0 {
        res = res + Decimal::from(a) * ln10_scaled(scale)?;
    }
    Ok(res.round_to_precision(ctx.precision))
}

/// Decimal logarithm
pub fn log10(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    log_with_base(x, &Decimal::from(10), ctx)
}

pub fn log_with_base(x: &Decimal, base: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    if x.signum() <= 0 {
        return Err(CalcError::NegativeParameterOfLog(x.to_string()));
    }
    let wide = ctx.with_precision(ctx.precision + GUARD);
    let ln_x = ln(x, &wide)?;
    let ln_base = ln(base, &wide)?;
    ln_x.div_with_precision(&ln_base, ctx.precision)
}

// ------------------------------------------------------------------
// powers and roots
// ------------------------------------------------------------------

// truncated n-th root of a non-negative number with `scale` fractional digits
fn nth_root_scaled(a: &Decimal, n: u32, scale: i64) -> CalcResult<Decimal> {
    let exp = n as i64 * scale - a.scale();
    let radicand = if exp >= 0 {
        a.unscaled() * checked_ten_pow(exp)?
    } else {
        a.unscaled() / checked_ten_pow(-exp)?
    };
    Ok(Decimal::new(radicand.nth_root(n), scale))
}

/// Root of an integer degree. Odd roots of negative numbers are negative.
pub fn root(a: &Decimal, n: u32, ctx: &MathContext) -> CalcResult<Decimal> {
    if n == 0 {
        return Err(CalcError::DivisionByZero);
    }
    if a.is_zero() {
        return Ok(Decimal::zero());
    }
    if a.is_negative() {
        if n % 2 == 0 {
            return Err(CalcError::RootOfEvenDegreeOfNegativeNumber(a.to_string()));
        }
        return Ok(-root(&a.abs(), n, ctx)?);
    }
    let scale = ctx.series_scale() - a.adjusted_exponent().div_euclid(n as i64);
    Ok(nth_root_scaled(a, n, scale)?.round_to_precision(ctx.precision))
}

pub fn sqrt(a: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    root(a, 2, ctx)
}

/// Root of an arbitrary degree `n`
pub fn root_with_base(a: &Decimal, n: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    if n.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    if a.is_zero() {
        return Ok(Decimal::zero());
    }
    if let Some(degree) = n.abs().to_u32() {
        let r = root(a, degree, ctx)?;
        if n.is_negative() {
            return Decimal::one().div_with_precision(&r, ctx.precision);
        }
        return Ok(r);
    }
    let wide = ctx.with_precision(ctx.precision + GUARD);
    let ln_a = ln(a, &wide)?;
    exp(&ln_a.div_with_precision(n, wide.precision)?, ctx)
}

/// `base` raised to `n`. A fractional exponent is rounded to three digits
/// and reduced to a fraction `p/q`, so the result is the q-th root of `base^p`.
pub fn pow(base: &Decimal, n: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    if base.is_zero() {
        return match n.signum() {
            -1 => Err(CalcError::NotANumber),
            0 => Err(CalcError::Undefined),
            _ => Ok(Decimal::zero()),
        };
    }
    if n.is_negative() {
        let positive = pow(base, &-n, &ctx.with_precision(ctx.precision + GUARD))?;
        let inv = Decimal::one().div_with_precision(&positive, ctx.precision)?;
        return Ok(inv.strip_trailing_zeros());
    }

    let n = if n.is_integer() {
        n.clone()
    } else {
        n.set_scale(3, RoundingMode::HalfDown)
    };
    if n.is_integer() {
        return pow_integer(base, &n.to_bigint());
    }

    let fraction = BigRational::new(n.unscaled().clone(), checked_ten_pow(n.scale())?);
    let powered = pow_integer(base, fraction.numer())?;
    // the denominator divides 1000
    let degree = fraction.denom().to_u32().unwrap_or(1000);
    root(&powered, degree, ctx)
}

fn pow_integer(base: &Decimal, n: &BigInt) -> CalcResult<Decimal> {
    if n.is_zero() {
        return Ok(Decimal::one());
    }
    if base.abs() == Decimal::one() {
        let odd = !(n % BigInt::from(2)).is_zero();
        return Ok(if base.is_negative() && odd { -Decimal::one() } else { Decimal::one() });
    }
    match n.to_u64() {
        Some(exp) => Ok(base.pow_u64(exp)),
        None => Err(CalcError::ExponentTooLarge(n.to_string())),
    }
}

// ------------------------------------------------------------------
// integer functions
// ------------------------------------------------------------------

// product of all integers in [l; r]
fn product_tree(l: u64, r: u64) -> BigInt {
    if l > r {
        return BigInt::one();
    }
    if l == r {
        return BigInt::from(l);
    }
    if r - l == 1 {
        return BigInt::from(l) * BigInt::from(r);
    }
    let m = l + (r - l) / 2;
    product_tree(l, m) * product_tree(m + 1, r)
}

/// Factorial with a step: `step = 2` gives the double factorial `n * (n-2) * ...`
pub fn factorial(n: &Decimal, step: usize) -> CalcResult<Decimal> {
    if *n > Decimal::from(FACTORIAL_LIMIT) {
        return Err(CalcError::FactorialLimitExceeded(n.to_string()));
    }
    let value = match n.to_i64() {
        Some(v) if v >= 0 => v as u64,
        _ => return Err(CalcError::InvalidFactorialArgument(n.to_string())),
    };
    if value == 0 {
        return Ok(Decimal::one());
    }
    if step <= 1 {
        return Ok(Decimal::from(product_tree(1, value)));
    }

    let step = step as u64;
    let mut ans = BigInt::one();
    let mut x = value;
    loop {
        ans *= BigInt::from(x);
        if x <= step {
            break;
        }
        x -= step;
    }
    Ok(Decimal::from(ans))
}

fn gcd_pair(a: &Decimal, b: &Decimal) -> CalcResult<Decimal> {
    let mut a = a.abs();
    let mut b = b.abs();
    while !a.is_zero() && !b.is_zero() {
        if a > b {
            a = a.rem(&b)?;
        } else {
            b = b.rem(&a)?;
        }
    }
    Ok(if a > b { a } else { b })
}

/// Greatest common divisor of two or more numbers
pub fn gcd(values: &[Decimal]) -> CalcResult<Decimal> {
    if values.len() < 2 {
        return Err(CalcError::TooFewArguments("gcd".to_string(), 2));
    }
    let mut r = gcd_pair(&values[0], &values[1])?;
    for v in &values[2..] {
        r = gcd_pair(&r, v)?;
    }
    Ok(r)
}

fn lcm_pair(a: &Decimal, b: &Decimal) -> CalcResult<Decimal> {
    let a = a.abs();
    let b = b.abs();
    let g = gcd_pair(&a, &b)?;
    // g divides a, so the integer quotient is exact
    Ok(a.div_with_scale(&g, 0, RoundingMode::Down)? * b)
}

/// Least common multiple of two or more numbers
pub fn lcm(values: &[Decimal]) -> CalcResult<Decimal> {
    if values.len() < 2 {
        return Err(CalcError::TooFewArguments("lcm".to_string(), 2));
    }
    let mut r = lcm_pair(&values[0], &values[1])?;
    for v in &values[2..] {
        r = lcm_pair(&r, v)?;
    }
    Ok(r)
}

pub fn abs(x: &Decimal) -> Decimal {
    x.abs()
}

pub fn floor(x: &Decimal) -> Decimal {
    x.set_scale(0, RoundingMode::Floor)
}

pub fn ceil(x: &Decimal) -> Decimal {
    x.set_scale(0, RoundingMode::Ceiling)
}

/// Nearest integer, halves go away from zero
pub fn round(x: &Decimal) -> Decimal {
    x.set_scale(0, RoundingMode::HalfUp)
}

// ------------------------------------------------------------------
// trigonometry
// ------------------------------------------------------------------

// angle moved into [-pi; pi] with `scale` fractional digits
fn reduce_angle(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    if x.abs() <= Decimal::from(3) {
        return Ok(x.set_scale(scale, RoundingMode::HalfEven));
    }
    let inner = scale + x.adjusted_exponent().max(0) + 2;
    let two_pi = two() * pi_scaled(inner)?;
    let turns = x.div_with_scale(&two_pi, 0, RoundingMode::HalfEven)?;
    Ok((x - turns * two_pi).set_scale(scale, RoundingMode::HalfEven))
}

// Taylor series of sin (first = x) or cos (first = 1)
fn sin_cos_series(x: &Decimal, scale: i64, cosine: bool) -> CalcResult<Decimal> {
    let x2 = (x * x).set_scale(scale, RoundingMode::HalfEven);
    let mut term = if cosine { Decimal::one() } else { x.clone() };
    let mut sum = term.clone();
    let mut n: i64 = if cosine { 1 } else { 2 };
    loop {
        let den = Decimal::from(n * (n + 1));
        term = -(&term * &x2).div_with_scale(&den, scale, RoundingMode::HalfEven)?;
        if term.is_zero() {
            break;
        }
        sum = sum + &term;
        n += 2;
    }
    Ok(sum)
}

fn sin_scaled(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    sin_cos_series(&reduce_angle(x, scale)?, scale, false)
}

fn cos_scaled(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    sin_cos_series(&reduce_angle(x, scale)?, scale, true)
}

pub fn sin(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    Ok(sin_scaled(x, ctx.series_scale())?.round_to_precision(ctx.precision))
}

pub fn cos(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    Ok(cos_scaled(x, ctx.series_scale())?.round_to_precision(ctx.precision))
}

// true when the value disappears after rounding to the working precision,
// the last two digits are noise of the argument rounding
fn vanishes(v: &Decimal, ctx: &MathContext) -> bool {
    v.set_scale(ctx.precision as i64 - 2, RoundingMode::HalfUp).is_zero()
}

pub fn tan(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale();
    let c = cos_scaled(x, scale)?;
    if vanishes(&c, ctx) {
        return Err(CalcError::InvalidValueForTangent(x.to_string()));
    }
    sin_scaled(x, scale)?.div_with_precision(&c, ctx.precision)
}

pub fn cot(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale();
    let s = sin_scaled(x, scale)?;
    if vanishes(&s, ctx) {
        return Err(CalcError::InvalidValueForCotangent(x.to_string()));
    }
    cos_scaled(x, scale)?.div_with_precision(&s, ctx.precision)
}

pub fn sec(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let c = cos_scaled(x, ctx.series_scale())?;
    if vanishes(&c, ctx) {
        return Err(CalcError::InvalidValueForSecant(x.to_string()));
    }
    Decimal::one().div_with_precision(&c, ctx.precision)
}

pub fn csc(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let s = sin_scaled(x, ctx.series_scale())?;
    if vanishes(&s, ctx) {
        return Err(CalcError::InvalidValueForCosecant(x.to_string()));
    }
    Decimal::one().div_with_precision(&s, ctx.precision)
}

// atan of a number in [0; 1]
fn atan_unit(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    // atan(x) = 2 * atan(x / (1 + sqrt(1 + x^2))), applied twice
    let mut y = x.clone();
    for _ in 0..2 {
        let hyp = nth_root_scaled(&(Decimal::one() + &y * &y), 2, scale)?;
        y = y.div_with_scale(&(Decimal::one() + hyp), scale, RoundingMode::HalfEven)?;
    }
    Ok(Decimal::from(4) * odd_power_series(&y, scale, true)?)
}

fn atan_scaled(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let ax = x.abs();
    let res = if ax > Decimal::one() {
        let inv = Decimal::one().div_with_scale(&ax, scale, RoundingMode::HalfEven)?;
        pi_scaled(scale)? * half() - atan_unit(&inv, scale)?
    } else {
        atan_unit(&ax, scale)?
    };
    Ok(if x.is_negative() { -res } else { res })
}

pub fn atan(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale() + (-x.adjusted_exponent()).max(0);
    Ok(atan_scaled(x, scale)?.round_to_precision(ctx.precision))
}

pub fn acot(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale();
    let res = pi_scaled(scale)? * half() - atan_scaled(x, scale)?;
    Ok(res.round_to_precision(ctx.precision))
}

fn asin_scaled(x: &Decimal, scale: i64) -> CalcResult<Decimal> {
    let ax = x.abs();
    if ax > Decimal::one() {
        return Err(CalcError::InvalidAsinAcosValue(x.to_string()));
    }
    let res = if ax == Decimal::one() {
        pi_scaled(scale)? * half()
    } else {
        let cos = nth_root_scaled(&(Decimal::one() - &ax * &ax), 2, scale)?;
        atan_scaled(&ax.div_with_scale(&cos, scale, RoundingMode::HalfEven)?, scale)?
    };
    Ok(if x.is_negative() { -res } else { res })
}

pub fn asin(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale() + (-x.adjusted_exponent()).max(0);
    Ok(asin_scaled(x, scale)?.round_to_precision(ctx.precision))
}

pub fn acos(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    let scale = ctx.series_scale();
    let res = pi_scaled(scale)? * half() - asin_scaled(x, scale)?;
    Ok(res.round_to_precision(ctx.precision))
}

fn check_asec_acsc(x: &Decimal) -> CalcResult<()> {
    if x.abs() < Decimal::one() {
        return Err(CalcError::InvalidAsecAcscValue(x.to_string()));
    }
    Ok(())
}

pub fn asec(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    check_asec_acsc(x)?;
    let inv = Decimal::one().div_with_precision(x, ctx.precision + GUARD)?;
    acos(&inv, ctx)
}

pub fn acsc(x: &Decimal, ctx: &MathContext) -> CalcResult<Decimal> {
    check_asec_acsc(x)?;
    let inv = Decimal::one().div_with_precision(x, ctx.precision + GUARD)?;
    asin(&inv, ctx)
}

// ------------------------------------------------------------------
// angles
// ------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
    Gradians,
}

impl AngleUnit {
    // size of a half turn in this unit
    fn half_turn(self, ctx: &MathContext) -> CalcResult<Decimal> {
        match self {
            AngleUnit::Degrees => Ok(Decimal::from(180)),
            AngleUnit::Radians => pi(&ctx.with_precision(ctx.precision + GUARD)),
            AngleUnit::Gradians => Ok(Decimal::from(200)),
        }
    }

    /// Converts `angle` measured in `self` units into `to` units
    pub fn convert(self, angle: &Decimal, to: AngleUnit, ctx: &MathContext) -> CalcResult<Decimal> {
        if self == to {
            return Ok(angle.clone());
        }
        let scaled = angle * to.half_turn(ctx)?;
        scaled.div_with_precision(&self.half_turn(ctx)?, ctx.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // rounds to 10 digits after the point and drops trailing zeros
    fn show(v: CalcResult<Decimal>) -> String {
        match v {
            Ok(v) => format!("{}", v.set_scale(10, RoundingMode::HalfEven).strip_trailing_zeros()),
            Err(e) => format!("{:?}", e),
        }
    }

    #[test]
    fn test_constants() {
        let ctx = MathContext::default();
        assert_eq!(format!("{}", pi(&ctx).unwrap()), "3.1415926535897932385");
        assert_eq!(format!("{}", e(&ctx).unwrap()), "2.7182818284590452354");
        assert_eq!(format!("{}", phi(&ctx).unwrap()), "1.6180339887498948482");
    }

    #[test]
    fn test_exp_ln() {
        let ctx = MathContext::default();
        assert_eq!(show(exp(&d("0"), &ctx)), "1");
        assert_eq!(show(exp(&d("2"), &ctx)), "7.3890560989");
        assert_eq!(show(exp(&d("-1"), &ctx)), "0.3678794412");
        assert_eq!(show(ln(&d("1"), &ctx)), "0");
        assert_eq!(show(ln(&d("10"), &ctx)), "2.302585093");
        assert_eq!(show(ln(&d("0.5"), &ctx)), "-0.6931471806");
        assert_eq!(show(ln(&d("1000"), &ctx)), "6.907755279");
        assert_eq!(show(log10(&d("1000"), &ctx)), "3");
        assert_eq!(show(log_with_base(&d("2"), &d("0.5"), &ctx)), "-1");
        assert_eq!(show(log_with_base(&d("8"), &d("2"), &ctx)), "3");
        assert_eq!(ln(&d("-1"), &ctx), Err(CalcError::NegativeParameterOfLog("-1".to_string())));
        assert_eq!(ln(&d("0"), &ctx), Err(CalcError::NegativeParameterOfLog("0".to_string())));
        assert_eq!(log_with_base(&d("5"), &d("1"), &ctx), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_pow() {
        let ctx = MathContext::default();
        assert_eq!(show(pow(&d("2"), &d("10"), &ctx)), "1024");
        assert_eq!(show(pow(&d("2"), &d("-2"), &ctx)), "0.25");
        assert_eq!(show(pow(&d("4"), &d("0.5"), &ctx)), "2");
        assert_eq!(show(pow(&d("-8"), &d("0.2"), &ctx)), "-1.5157165665");
        assert_eq!(show(pow(&d("1.5"), &d("2"), &ctx)), "2.25");
        assert_eq!(show(pow(&d("-1"), &d("12345678901234567890123"), &ctx)), "-1");
        assert_eq!(pow(&d("0"), &d("-1"), &ctx), Err(CalcError::NotANumber));
        assert_eq!(pow(&d("0"), &d("0"), &ctx), Err(CalcError::Undefined));
        assert_eq!(pow(&d("0"), &d("3"), &ctx), Ok(Decimal::zero()));
        assert_eq!(
            pow(&d("-4"), &d("0.5"), &ctx),
            Err(CalcError::RootOfEvenDegreeOfNegativeNumber("-4".to_string()))
        );
    }

    #[test]
    fn test_roots() {
        let ctx = MathContext::default();
        assert_eq!(show(sqrt(&d("4"), &ctx)), "2");
        assert_eq!(show(sqrt(&d("2"), &ctx)), "1.4142135624");
        assert_eq!(show(sqrt(&d("0.0001"), &ctx)), "0.01");
        assert_eq!(show(root(&d("-27"), 3, &ctx)), "-3");
        assert_eq!(show(root_with_base(&d("16"), &d("4"), &ctx)), "2");
        assert_eq!(show(root_with_base(&d("16"), &d("-2"), &ctx)), "0.25");
        assert_eq!(show(root_with_base(&d("9"), &d("0.5"), &ctx)), "81");
        assert_eq!(
            root(&d("-16"), 4, &ctx),
            Err(CalcError::RootOfEvenDegreeOfNegativeNumber("-16".to_string()))
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(&d("0"), 1), Ok(Decimal::one()));
        assert_eq!(factorial(&d("5"), 1), Ok(d("120")));
        assert_eq!(factorial(&d("20"), 1), Ok(d("2432902008176640000")));
        assert_eq!(factorial(&d("5"), 2), Ok(d("15")));
        assert_eq!(factorial(&d("6"), 2), Ok(d("48")));
        assert_eq!(factorial(&d("7"), 3), Ok(d("28")));
        assert_eq!(
            factorial(&d("100001"), 1),
            Err(CalcError::FactorialLimitExceeded("100001".to_string()))
        );
        assert_eq!(factorial(&d("2.5"), 1), Err(CalcError::InvalidFactorialArgument("2.5".to_string())));
        assert_eq!(factorial(&d("-3"), 1), Err(CalcError::InvalidFactorialArgument("-3".to_string())));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(&[d("12"), d("18")]), Ok(d("6")));
        assert_eq!(gcd(&[d("12"), d("-18"), d("8")]), Ok(d("2")));
        assert_eq!(gcd(&[d("1.5"), d("0.5")]), Ok(d("0.5")));
        assert_eq!(gcd(&[d("7"), d("0")]), Ok(d("7")));
        assert_eq!(gcd(&[d("7")]), Err(CalcError::TooFewArguments("gcd".to_string(), 2)));
        assert_eq!(lcm(&[d("4"), d("6")]), Ok(d("12")));
        assert_eq!(lcm(&[d("4"), d("6"), d("10")]), Ok(d("60")));
        assert_eq!(lcm(&[d("1.5"), d("0.5")]), Ok(d("1.5")));
        assert_eq!(
            lcm(&[d("1000000000000000000007"), d("1000000000000000000009")]),
            Ok(d("1000000000000000000016000000000000000000063"))
        );
        assert_eq!(lcm(&[d("0"), d("0")]), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_rounding() {
        let exprs = ["2.5", "2.4", "-2.5", "-2.4", "3", "-0.7"];
        let floors = ["2", "2", "-3", "-3", "3", "-1"];
        let ceils = ["3", "3", "-2", "-2", "3", "0"];
        let rounds = ["3", "2", "-3", "-2", "3", "-1"];
        for (i, expr) in exprs.iter().enumerate() {
            assert_eq!(format!("{}", floor(&d(expr))), floors[i]);
            assert_eq!(format!("{}", ceil(&d(expr))), ceils[i]);
            assert_eq!(format!("{}", round(&d(expr))), rounds[i]);
        }
    }

    #[test]
    fn test_trigonometry() {
        let ctx = MathContext::default();
        let pi = pi(&ctx).unwrap();
        assert_eq!(show(sin(&d("0"), &ctx)), "0");
        assert_eq!(show(sin(&(&pi * &d("0.5")), &ctx)), "1");
        assert_eq!(show(cos(&pi, &ctx)), "-1");
        assert_eq!(show(sin(&d("100"), &ctx)), "-0.5063656411");
        assert_eq!(show(tan(&d("1"), &ctx)), "1.5574077247");
        assert_eq!(show(cot(&d("1"), &ctx)), "0.6420926159");
        assert_eq!(show(atan(&d("1"), &ctx)), "0.7853981634");
        assert_eq!(show(atan(&d("-3"), &ctx)), "-1.2490457724");
        assert_eq!(show(asin(&d("0.5"), &ctx)), "0.5235987756");
        assert_eq!(show(acos(&d("0"), &ctx)), "1.5707963268");
        assert_eq!(show(acos(&d("1"), &ctx)), "0");
        assert_eq!(show(acot(&d("1"), &ctx)), "0.7853981634");
        assert_eq!(show(sec(&d("0"), &ctx)), "1");
        assert_eq!(show(asec(&d("2"), &ctx)), "1.0471975512");
        assert_eq!(show(acsc(&d("2"), &ctx)), "0.5235987756");
    }

    #[test]
    fn test_trigonometry_domain() {
        let ctx = MathContext::default();
        let half_pi = &pi(&ctx).unwrap() * &d("0.5");
        assert_eq!(tan(&half_pi, &ctx), Err(CalcError::InvalidValueForTangent(half_pi.to_string())));
        assert_eq!(cot(&d("0"), &ctx), Err(CalcError::InvalidValueForCotangent("0".to_string())));
        assert_eq!(csc(&d("0"), &ctx), Err(CalcError::InvalidValueForCosecant("0".to_string())));
        assert_eq!(asin(&d("1.1"), &ctx), Err(CalcError::InvalidAsinAcosValue("1.1".to_string())));
        assert_eq!(acos(&d("-2"), &ctx), Err(CalcError::InvalidAsinAcosValue("-2".to_string())));
        assert_eq!(asec(&d("0.5"), &ctx), Err(CalcError::InvalidAsecAcscValue("0.5".to_string())));
    }

    #[test]
    fn test_angles() {
        let ctx = MathContext::default();
        let deg = AngleUnit::Degrees;
        assert_eq!(show(deg.convert(&d("180"), AngleUnit::Radians, &ctx)), "3.1415926536");
        assert_eq!(show(deg.convert(&d("90"), AngleUnit::Gradians, &ctx)), "100");
        assert_eq!(show(AngleUnit::Gradians.convert(&d("50"), AngleUnit::Degrees, &ctx)), "45");
        assert_eq!(deg.convert(&d("12.5"), AngleUnit::Degrees, &ctx), Ok(d("12.5")));
    }
}
