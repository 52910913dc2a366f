//! Query expressions over entity columns.
//!
//! Predicates are plain data rather than closures so the engine can translate
//! them into storage queries. Each entity declares its columns with
//! [`define_columns!`] and its eager-loadable relations as an `Include` enum.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::entity::{Entity, EntityId};

/// A queryable field of an entity.
pub trait Column: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The identity column.
    const ID: Self;

    /// Storage column name.
    fn name(self) -> &'static str;
}

/// A relation that can be eagerly attached when loading an entity.
pub trait Include: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn name(self) -> &'static str;
}

/// Relation set for entities that have no navigable relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoInclude {}

impl Include for NoInclude {
    fn name(self) -> &'static str {
        match self {}
    }
}

/// Declares a column enum and its [`Column`] impl.
///
/// The enum must contain an `Id` variant.
#[macro_export]
macro_rules! define_columns {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $column:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::query::Column for $name {
            const ID: Self = Self::Id;

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }
        }
    };
}

/// A literal bound into a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// Boolean test over an entity's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<C> {
    Compare {
        column: C,
        op: Comparison,
        value: Value,
    },
    IsNull(C),
    In(C, Vec<Value>),
    /// SQL `LIKE` pattern match (`%` and `_` wildcards).
    Like(C, String),
    And(Vec<Predicate<C>>),
    Or(Vec<Predicate<C>>),
    Not(Box<Predicate<C>>),
}

impl<C: Column> Predicate<C> {
    fn compare(column: C, op: Comparison, value: impl Into<Value>) -> Self {
        Self::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Eq, value)
    }

    pub fn ne(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Ne, value)
    }

    pub fn lt(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Lt, value)
    }

    pub fn le(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Le, value)
    }

    pub fn gt(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Gt, value)
    }

    pub fn ge(column: C, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Ge, value)
    }

    pub fn is_null(column: C) -> Self {
        Self::IsNull(column)
    }

    pub fn is_not_null(column: C) -> Self {
        Self::IsNull(column).negate()
    }

    pub fn is_in<V: Into<Value>>(column: C, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(column, values.into_iter().map(Into::into).collect())
    }

    pub fn like(column: C, pattern: impl Into<String>) -> Self {
        Self::Like(column, pattern.into())
    }

    /// Identity equality, the predicate behind `find_by_id`.
    pub fn id(id: EntityId) -> Self {
        Self::eq(C::ID, id)
    }

    /// Conjunction; nested `And`s are flattened.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (this, Self::And(mut right)) => {
                right.insert(0, this);
                Self::And(right)
            }
            (this, other) => Self::And(vec![this, other]),
        }
    }

    /// Disjunction; nested `Or`s are flattened.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), other) => {
                left.push(other);
                Self::Or(left)
            }
            (this, Self::Or(mut right)) => {
                right.insert(0, this);
                Self::Or(right)
            }
            (this, other) => Self::Or(vec![this, other]),
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Conjunction of every predicate; an empty input matches everything.
    pub fn all(predicates: impl IntoIterator<Item = Self>) -> Self {
        Self::And(predicates.into_iter().collect())
    }

    /// Disjunction of every predicate; an empty input matches nothing.
    pub fn any(predicates: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(predicates.into_iter().collect())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Everything needed to run a read: filter, relations, ordering and window.
#[derive(Debug, Clone)]
pub struct QuerySpec<E: Entity> {
    pub predicate: Option<Predicate<E::Column>>,
    pub includes: Vec<E::Include>,
    pub order_by: Vec<(E::Column, Direction)>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl<E: Entity> Default for QuerySpec<E> {
    fn default() -> Self {
        Self {
            predicate: None,
            includes: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl<E: Entity> QuerySpec<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows the query; repeated calls are combined with `AND`.
    pub fn filter(mut self, predicate: Predicate<E::Column>) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn include(mut self, include: E::Include) -> Self {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
        self
    }

    pub fn include_all(self, includes: &[E::Include]) -> Self {
        includes
            .iter()
            .fold(self, |spec, include| spec.include(*include))
    }

    pub fn order_by(mut self, column: E::Column, direction: Direction) -> Self {
        self.order_by.push((column, direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FitnessClass, FitnessClassColumn, FitnessClassInclude, LocationColumn};

    #[test]
    fn and_flattens_nested_conjunctions() {
        let predicate = Predicate::eq(LocationColumn::Name, "Studio A")
            .and(Predicate::eq(LocationColumn::Room, "1"))
            .and(Predicate::like(LocationColumn::Address, "%Main%"));

        match predicate {
            Predicate::And(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected conjunction, got {other:?}"),
        }
    }

    #[test]
    fn double_negation_cancels() {
        let predicate = Predicate::is_null(LocationColumn::Room).negate().negate();
        assert_eq!(predicate, Predicate::IsNull(LocationColumn::Room));
    }

    #[test]
    fn id_predicate_targets_identity_column() {
        assert_eq!(
            Predicate::<LocationColumn>::id(9),
            Predicate::Compare {
                column: LocationColumn::Id,
                op: Comparison::Eq,
                value: Value::Int(9),
            }
        );
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn spec_filters_accumulate_and_includes_dedupe() {
        let spec = QuerySpec::<FitnessClass>::new()
            .filter(Predicate::eq(FitnessClassColumn::Cancelled, false))
            .filter(Predicate::gt(FitnessClassColumn::Capacity, 0))
            .include(FitnessClassInclude::Instructor)
            .include(FitnessClassInclude::Instructor)
            .include_all(&[FitnessClassInclude::Location]);

        assert!(matches!(spec.predicate, Some(Predicate::And(ref parts)) if parts.len() == 2));
        assert_eq!(
            spec.includes,
            vec![FitnessClassInclude::Instructor, FitnessClassInclude::Location]
        );
    }
}
