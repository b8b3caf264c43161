use thiserror::Error;

/// Expression evaluation result: either value or error
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures detected while turning an expression string into a tree.
/// Every variant means the expression is malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeBuildError {
    #[error("Malformed expression: invalid brackets sequence at position {0}")]
    InvalidBracketsSequence(usize),
    #[error("Malformed expression: brackets are not closed")]
    UnclosedBrackets,
    #[error("Malformed expression: nothing inside brackets at position {0}")]
    EmptyBrackets(usize),
    #[error("Malformed expression: binary operator '{0}' at position {1} does not have left or right operand or both")]
    MissingOperand(char, usize),
    #[error("Malformed expression: failed to convert '{0}' to number")]
    InvalidNumber(String),
    #[error("Malformed expression: nothing to calculate")]
    EmptyExpression,
}

/// Failures detected while walking an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Unknown binary operator '{0}'")]
    UnknownBinaryOperator(char),
    #[error("Unknown bracket type {0}")]
    UnknownBracketType(u32),
    #[error("Unknown suffix operator '{0}'")]
    UnknownSuffixOperator(char),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Unknown constant '{0}'")]
    UnknownConstant(String),
    #[error("No operand for suffix operator '{0}'")]
    NoOperandForSuffixOperator(char),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid operator '{0}' for percent")]
    InvalidOperatorForPercent(char),
    #[error("Function '{0}' has neither suffix nor operand")]
    FunctionSuffixAndOperandAbsent(String),
    #[error("Suffix of function '{0}' can't be list")]
    SuffixCannotBeList(String),
    #[error("Binary operator '{0}' cannot be applied to lists")]
    BinaryOperatorCannotBeAppliedToLists(char),
    #[error("Average function has no arguments")]
    AverageFunctionHasNoArguments,
    #[error("Function '{0}' requires at least {1} arguments")]
    TooFewArguments(String, usize),
    #[error("Unable to find logarithm of negative number or of zero: {0}")]
    NegativeParameterOfLog(String),
    #[error("Unable to find root of even degree of negative number: {0}")]
    RootOfEvenDegreeOfNegativeNumber(String),
    #[error("Invalid asin or acos value: {0}")]
    InvalidAsinAcosValue(String),
    #[error("Invalid asec or acsc value: {0}")]
    InvalidAsecAcscValue(String),
    #[error("Invalid value for tangent: {0}")]
    InvalidValueForTangent(String),
    #[error("Invalid value for cotangent: {0}")]
    InvalidValueForCotangent(String),
    #[error("Invalid value for secant: {0}")]
    InvalidValueForSecant(String),
    #[error("Invalid value for cosecant: {0}")]
    InvalidValueForCosecant(String),
    #[error("Not a number")]
    NotANumber,
    #[error("Undefined")]
    Undefined,
    #[error("Exponent {0} is too large")]
    ExponentTooLarge(String),
    #[error("Factorial limit exceeded: {0}")]
    FactorialLimitExceeded(String),
    #[error("Factorial is defined only for non-negative integers: {0}")]
    InvalidFactorialArgument(String),
    #[error("Failed to convert '{0}' to number")]
    NumberFormat(String),
}

/// Rejected operator or bracket tables.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Bracket '{0}' cannot both open and close")]
    SameOpenAndCloseBracket(char),
    #[error("Bracket character '{0}' is registered more than once")]
    DuplicateBracket(char),
    #[error("Bracket type {0} is registered more than once")]
    DuplicateBracketType(u32),
    #[error("Binary operator '{0}' is registered more than once")]
    DuplicateBinaryOperator(char),
    #[error("Suffix operator '{0}' is registered more than once")]
    DuplicateSuffixOperator(char),
    #[error("Symbol '{0}' is registered in more than one table")]
    AmbiguousSymbol(char),
    #[error("Symbol '{0}' is reserved")]
    ReservedSymbol(char),
}

/// Any failure of [`Calculator::calculate`](crate::calculator::Calculator::calculate)
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] TreeBuildError),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(format!("{}", CalcError::DivisionByZero), "Division by zero");
        assert_eq!(
            format!("{}", CalcError::UnknownFunction("foo".to_string())),
            "Unknown function 'foo'"
        );
        assert_eq!(
            format!("{}", TreeBuildError::MissingOperand('*', 3)),
            "Malformed expression: binary operator '*' at position 3 does not have left or right operand or both"
        );
    }

    #[test]
    fn test_wrapping() {
        let e: Error = CalcError::Undefined.into();
        assert_eq!(e, Error::Calc(CalcError::Undefined));
        assert_eq!(format!("{}", e), "Undefined");
        let e: Error = TreeBuildError::UnclosedBrackets.into();
        assert_eq!(format!("{}", e), "Malformed expression: brackets are not closed");
    }
}
