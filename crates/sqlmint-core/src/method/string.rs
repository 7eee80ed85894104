use crate::{
    error::CompileError,
    expr::{BinaryOp, SqlExpression},
    method::{self, Arity, SqlMethod, check_arity},
    schema::TypeMapping,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use sqlmint_primitives::LogicalType;

///
/// StringTransform
///
/// Unary string-to-string operations. Folding trims spaces only, matching
/// SQL `TRIM`.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum StringTransform {
    Upper,
    Lower,
    Trim,
    TrimLeft,
    TrimRight,
}

impl StringTransform {
    pub const ALL: [Self; 5] = [
        Self::Upper,
        Self::Lower,
        Self::Trim,
        Self::TrimLeft,
        Self::TrimRight,
    ];

    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Upper => method::TO_UPPER_CASE,
            Self::Lower => method::TO_LOWER_CASE,
            Self::Trim => method::TRIM,
            Self::TrimLeft => method::TRIM_LEFT,
            Self::TrimRight => method::TRIM_RIGHT,
        }
    }

    /// Evaluate the transform in-process.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
            Self::Trim => text.trim_matches(' ').to_string(),
            Self::TrimLeft => text.trim_start_matches(' ').to_string(),
            Self::TrimRight => text.trim_end_matches(' ').to_string(),
        }
    }
}

///
/// StringTransformMethod
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringTransformMethod {
    transform: StringTransform,
    function: String,
}

impl StringTransformMethod {
    #[must_use]
    pub fn new(transform: StringTransform, function: impl Into<String>) -> Self {
        Self {
            transform,
            function: function.into(),
        }
    }

    #[must_use]
    pub const fn transform(&self) -> StringTransform {
        self.transform
    }

    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }
}

impl SqlMethod for StringTransformMethod {
    fn operation(&self) -> &str {
        self.transform.operation()
    }

    fn arity(&self) -> Arity {
        Arity::exactly(0)
    }

    fn accepts(&self, receiver: LogicalType) -> bool {
        receiver.supports_string_methods()
    }

    fn compile(
        &self,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, CompileError> {
        check_arity(self, &receiver, &args)?;

        // parameters are never literals, so they are never folded
        if let Some(text) = receiver.literal_text() {
            return Ok(receiver.with_literal(self.transform.apply(text)));
        }

        let mapping = TypeMapping::new(receiver.logical_type());

        Ok(SqlExpression::function(&self.function, vec![receiver], mapping))
    }
}

///
/// StringLengthMethod
///
/// Character count; the result is typed `Int`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringLengthMethod {
    function: String,
}

impl StringLengthMethod {
    #[must_use]
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }
}

impl SqlMethod for StringLengthMethod {
    fn operation(&self) -> &str {
        method::LENGTH
    }

    fn arity(&self) -> Arity {
        Arity::exactly(0)
    }

    fn accepts(&self, receiver: LogicalType) -> bool {
        receiver.supports_string_methods()
    }

    fn compile(
        &self,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, CompileError> {
        check_arity(self, &receiver, &args)?;

        if let Some(text) = receiver.literal_text() {
            let count = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);

            return Ok(SqlExpression::typed_literal(count, LogicalType::Int));
        }

        Ok(SqlExpression::function(
            &self.function,
            vec![receiver],
            TypeMapping::new(LogicalType::Int),
        ))
    }
}

///
/// SubstringMethod
///
/// `substring(begin[, end])` with a 0-based, end-exclusive range, lowered
/// to the 1-based `(start, length)` form SQL uses.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubstringMethod {
    function: String,
}

impl SubstringMethod {
    #[must_use]
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }

    fn check_arguments(&self, args: &[SqlExpression]) -> Result<(), CompileError> {
        for (index, arg) in args.iter().enumerate() {
            if !arg.logical_type().is_integral() {
                return Err(CompileError::ArgumentType {
                    operation: method::SUBSTRING.to_string(),
                    index,
                    found: arg.logical_type(),
                });
            }
        }

        let bounds = (
            args.first().and_then(SqlExpression::literal_int),
            args.get(1).and_then(SqlExpression::literal_int),
        );
        if let (Some(begin), Some(end)) = bounds
            && end < begin
        {
            return Err(CompileError::InvalidRange {
                operation: method::SUBSTRING.to_string(),
                begin,
                end,
            });
        }

        Ok(())
    }
}

impl SqlMethod for SubstringMethod {
    fn operation(&self) -> &str {
        method::SUBSTRING
    }

    fn arity(&self) -> Arity {
        Arity::between(1, 2)
    }

    fn accepts(&self, receiver: LogicalType) -> bool {
        receiver.supports_string_methods()
    }

    fn compile(
        &self,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, CompileError> {
        check_arity(self, &receiver, &args)?;
        self.check_arguments(&args)?;

        if let Some(folded) = fold_substring(&receiver, &args) {
            return Ok(folded);
        }

        let int = || TypeMapping::new(LogicalType::Int);
        let mapping = TypeMapping::new(receiver.logical_type());
        let mut args = args.into_iter();
        let Some(begin) = args.next() else {
            return Err(CompileError::Arity {
                operation: method::SUBSTRING.to_string(),
                receiver: receiver.logical_type(),
                expected: self.arity(),
                found: 0,
            });
        };
        let end = args.next();

        let start = match begin.literal_int() {
            Some(b) => SqlExpression::typed_literal(b.saturating_add(1), LogicalType::Int),
            None => SqlExpression::binary(
                BinaryOp::Add,
                begin.clone(),
                SqlExpression::typed_literal(1_i64, LogicalType::Int),
                int(),
            ),
        };

        let mut call_args = vec![receiver, start];
        if let Some(end) = end {
            let length = match (begin.literal_int(), end.literal_int()) {
                (Some(b), Some(e)) => {
                    SqlExpression::typed_literal(e.saturating_sub(b), LogicalType::Int)
                }
                _ => SqlExpression::binary(BinaryOp::Sub, end, begin, int()),
            };
            call_args.push(length);
        }

        Ok(SqlExpression::function(&self.function, call_args, mapping))
    }
}

/// Fold a literal receiver with literal bounds. Out-of-range bounds are
/// left for the datastore to evaluate.
fn fold_substring(receiver: &SqlExpression, args: &[SqlExpression]) -> Option<SqlExpression> {
    let text = receiver.literal_text()?;
    let count = text.chars().count();

    let begin = usize::try_from(args.first()?.literal_int()?).ok()?;
    let end = match args.get(1) {
        Some(end) => usize::try_from(end.literal_int()?).ok()?,
        None => count,
    };
    if begin > end || end > count {
        return None;
    }

    let slice: String = text.chars().skip(begin).take(end - begin).collect();

    Some(receiver.with_literal(slice))
}

///
/// TESTS
///
