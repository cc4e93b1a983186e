//! Filter construction for listing books.
//!
//! Listing accepts three optional filters (`name`, `reading`, `finished`). They arrive
//! from a transport as raw strings ([`ListParams`]), are normalized into a typed
//! [`ListFilter`], and finally lowered into a filter expression ([`Expr`]) that a backend
//! evaluates through the [`QueryVisitor`] trait.
//!
//! ```ignore
//! use bookshelf::query::{Filter, BookQuery};
//!
//! let query = BookQuery::builder()
//!     .filter(Filter::name_matches("dune").and(Filter::finished(true)))
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BookStoreError;

/// The book fields a filter can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Reading,
    Finished,
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Strict equality.
    Eq,
    /// Equality after lowercasing both sides. Only meaningful for text.
    EqIgnoreCase,
}

/// The right-hand side of a field comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

/// A filter expression over books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match). An empty list matches everything.
    And(Vec<Expr>),
    /// Field comparison expression.
    Field {
        field: BookField,
        op: FieldOp,
        value: FieldValue,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: BookField, op: FieldOp, value: FieldValue) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches books whose name equals `name`, ignoring case. Not a substring match.
    pub fn name_matches(name: impl Into<String>) -> Expr {
        Expr::field(BookField::Name, FieldOp::EqIgnoreCase, FieldValue::Text(name.into()))
    }

    /// Matches books whose stored `reading` flag is exactly `reading`.
    ///
    /// A book stored without a `reading` value never matches.
    pub fn reading(reading: bool) -> Expr {
        Expr::field(BookField::Reading, FieldOp::Eq, FieldValue::Bool(reading))
    }

    /// Matches books whose derived `finished` flag is `finished`.
    pub fn finished(finished: bool) -> Expr {
        Expr::field(BookField::Finished, FieldOp::Eq, FieldValue::Bool(finished))
    }

    /// Creates a logical AND filter expression.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }
}

/// A structured query for retrieving books. No filter means every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub filter: Option<Expr>,
}

impl BookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> BookQueryBuilder {
        BookQueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookQueryBuilder {
    query: BookQuery,
}

impl BookQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    pub fn build(self) -> BookQuery {
        self.query
    }
}

/// Walks a filter expression. Backends implement this to evaluate filters.
pub trait QueryVisitor {
    type Output;
    type Error: Into<BookStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: BookField,
        op: FieldOp,
        value: &FieldValue,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Field { field, op, value } => self.visit_field(*field, *op, value),
        }
    }
}

/// Typed listing filters. `None` means "do not filter on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn reading(mut self, reading: bool) -> Self {
        self.reading = Some(reading);
        self
    }

    pub fn finished(mut self, finished: bool) -> Self {
        self.finished = Some(finished);
        self
    }

    /// Lowers the present filters into a conjunctive query.
    pub fn into_query(self) -> BookQuery {
        let exprs = [
            self.name.map(Filter::name_matches),
            self.finished.map(Filter::finished),
            self.reading.map(Filter::reading),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        if exprs.is_empty() {
            return BookQuery::new();
        }

        BookQuery::builder().filter(Filter::and(exprs)).build()
    }
}

/// Listing filters exactly as they appear in a query string.
///
/// A parameter that is present but empty (`?finished=`) is still present; see
/// [`coerce_flag`] for how its value is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl From<ListParams> for ListFilter {
    fn from(params: ListParams) -> Self {
        ListFilter {
            name: params.name,
            reading: params.reading.as_deref().map(coerce_flag),
            finished: params.finished.as_deref().map(coerce_flag),
        }
    }
}

/// Reads a query-string flag as a number and returns whether it is non-zero.
///
/// The string is converted the way a loosely typed numeric cast would convert it:
/// surrounding whitespace is ignored, the empty string is `0`, decimal and exponent
/// forms and `0x`/`0o`/`0b` prefixed integers are numbers, and `Infinity` (optionally
/// signed) is a number. Anything else is NaN. Zero and NaN are `false`, every other
/// number is `true`.
///
/// So `"1"`, `"2"` and `"-1"` are `true`; `"0"`, `""`, `"0.0"`, `"true"` and `"yes"` are
/// `false`.
pub fn coerce_flag(raw: &str) -> bool {
    let s = raw.trim();

    if s.is_empty() {
        return false;
    }

    if matches!(s, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return false;
        }
        return digits.chars().any(|c| c != '0');
    }

    // `f64::from_str` also accepts "inf" and "nan" spellings, which are not numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return false;
    }

    match s.parse::<f64>() {
        Ok(value) => value != 0.0,
        Err(_) => false,
    }
}
