//! Filter expression evaluation for in-memory books.

use serde_json::Value;

use bookshelf_core::{
    book::Book,
    error::{BookStoreError, BookStoreResult},
    query::{BookField, Expr, FieldOp, FieldValue, QueryVisitor},
};

/// A book field or filter operand in a form that can be compared.
#[derive(Debug, PartialEq)]
pub(crate) enum Comparable<'a> {
    /// Missing or non-boolean value (e.g. a book stored without `reading`)
    Null,
    Bool(bool),
    Text(&'a str),
}

impl<'a> Comparable<'a> {
    pub(crate) fn of(book: &'a Book, field: BookField) -> Self {
        match field {
            BookField::Name => Comparable::Text(&book.name),
            BookField::Reading => match &book.reading {
                Some(Value::Bool(reading)) => Comparable::Bool(*reading),
                _ => Comparable::Null,
            },
            BookField::Finished => Comparable::Bool(book.finished),
        }
    }
}

impl<'a> From<&'a FieldValue> for Comparable<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Bool(value) => Comparable::Bool(*value),
            FieldValue::Text(value) => Comparable::Text(value),
        }
    }
}

pub(crate) struct BookEvaluator<'a> {
    book: &'a Book,
}

impl<'a> BookEvaluator<'a> {
    pub fn new(book: &'a Book) -> Self {
        Self { book }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> BookStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Clones every book matching `expr`, keeping the input order.
    pub fn filter_books(
        books: impl IntoIterator<Item = &'a Book>,
        expr: &Expr,
    ) -> BookStoreResult<Vec<Book>> {
        let mut matched = Vec::new();

        for book in books {
            if BookEvaluator::new(book).evaluate(expr)? {
                matched.push(book.clone());
            }
        }

        Ok(matched)
    }
}

impl<'a> QueryVisitor for BookEvaluator<'a> {
    type Output = bool;
    type Error = BookStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_field(
        &mut self,
        field: BookField,
        op: FieldOp,
        value: &FieldValue,
    ) -> Result<Self::Output, Self::Error> {
        let left = Comparable::of(self.book, field);
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::EqIgnoreCase => match (left, right) {
                (Comparable::Text(left), Comparable::Text(right)) => {
                    left.to_lowercase() == right.to_lowercase()
                }
                _ => false,
            },
        })
    }
}
