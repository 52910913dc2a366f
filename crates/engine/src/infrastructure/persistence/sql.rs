//! SQL rendering for query specs.

use fitnessapp_domain::{Column, Comparison, Direction, Predicate, QuerySpec, Value};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use super::table::Table;
use crate::infrastructure::ports::RepoError;

pub(crate) type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A statement and the values for its placeholders, in order.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Statement {
    pub sql: String,
    pub binds: Vec<Value>,
}

impl Statement {
    pub fn query(&self) -> SqliteQuery<'_> {
        bind_all(sqlx::query(&self.sql), self.binds.iter().cloned())
    }
}

pub(crate) fn select<E: Table>(spec: &QuerySpec<E>) -> Statement {
    let mut statement = Statement {
        sql: format!("SELECT * FROM {}", E::TABLE),
        binds: Vec::new(),
    };
    push_where(&mut statement, spec.predicate.as_ref());

    if !spec.order_by.is_empty() {
        let terms: Vec<String> = spec
            .order_by
            .iter()
            .map(|(column, direction)| {
                let keyword = match direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                format!("{} {keyword}", column.name())
            })
            .collect();
        statement.sql.push_str(" ORDER BY ");
        statement.sql.push_str(&terms.join(", "));
    }

    match (spec.limit, spec.offset) {
        (None, None) => {}
        (limit, offset) => {
            statement.sql.push_str(" LIMIT ?");
            statement
                .binds
                .push(Value::Int(limit.map_or(-1, i64::from)));
            if let Some(offset) = offset {
                statement.sql.push_str(" OFFSET ?");
                statement.binds.push(Value::Int(i64::from(offset)));
            }
        }
    }

    statement
}

pub(crate) fn count<E: Table>(spec: &QuerySpec<E>) -> Statement {
    let mut statement = Statement {
        sql: format!("SELECT COUNT(*) FROM {}", E::TABLE),
        binds: Vec::new(),
    };
    push_where(&mut statement, spec.predicate.as_ref());
    statement
}

pub(crate) fn insert<E: Table>() -> String {
    let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        E::TABLE,
        E::COLUMNS.join(", ")
    )
}

pub(crate) fn update<E: Table>() -> String {
    let assignments: Vec<String> = E::COLUMNS.iter().map(|c| format!("{c} = ?")).collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        E::TABLE,
        assignments.join(", ")
    )
}

pub(crate) fn delete<E: Table>() -> String {
    format!("DELETE FROM {} WHERE id = ?", E::TABLE)
}

fn push_where<C: Column>(statement: &mut Statement, predicate: Option<&Predicate<C>>) {
    if let Some(predicate) = predicate {
        statement.sql.push_str(" WHERE ");
        write_predicate(predicate, statement);
    }
}

fn write_predicate<C: Column>(predicate: &Predicate<C>, out: &mut Statement) {
    match predicate {
        Predicate::Compare {
            column,
            op,
            value: Value::Null,
        } => match op {
            Comparison::Eq => out.sql.push_str(&format!("{} IS NULL", column.name())),
            Comparison::Ne => out.sql.push_str(&format!("{} IS NOT NULL", column.name())),
            // Ordering against NULL is never true.
            _ => out.sql.push_str("1 = 0"),
        },
        Predicate::Compare { column, op, value } => {
            out.sql.push_str(&format!("{} {} ?", column.name(), op.symbol()));
            out.binds.push(value.clone());
        }
        Predicate::IsNull(column) => out.sql.push_str(&format!("{} IS NULL", column.name())),
        Predicate::In(_, values) if values.is_empty() => out.sql.push_str("1 = 0"),
        Predicate::In(column, values) => {
            let placeholders = vec!["?"; values.len()].join(", ");
            out.sql.push_str(&format!("{} IN ({placeholders})", column.name()));
            out.binds.extend(values.iter().cloned());
        }
        Predicate::Like(column, pattern) => {
            out.sql.push_str(&format!("{} LIKE ?", column.name()));
            out.binds.push(Value::Text(pattern.clone()));
        }
        Predicate::And(parts) => write_group(parts, " AND ", "1 = 1", out),
        Predicate::Or(parts) => write_group(parts, " OR ", "1 = 0", out),
        Predicate::Not(inner) => {
            out.sql.push_str("NOT (");
            write_predicate(inner, out);
            out.sql.push(')');
        }
    }
}

fn write_group<C: Column>(parts: &[Predicate<C>], joiner: &str, empty: &str, out: &mut Statement) {
    if parts.is_empty() {
        out.sql.push_str(empty);
        return;
    }

    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            out.sql.push_str(joiner);
        }
        out.sql.push('(');
        write_predicate(part, out);
        out.sql.push(')');
    }
}

pub(crate) fn bind_all<'q>(
    mut query: SqliteQuery<'q>,
    values: impl IntoIterator<Item = Value>,
) -> SqliteQuery<'q> {
    for value in values {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Int(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
            Value::Bool(v) => query.bind(v),
            Value::Timestamp(v) => query.bind(v),
        };
    }
    query
}

/// Classifies a driver error, surfacing constraint failures separately.
pub(crate) fn db_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    use sqlx::error::ErrorKind;

    if let sqlx::Error::Database(db) = &error {
        if matches!(
            db.kind(),
            ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        ) {
            return RepoError::constraint(db.message());
        }
    }
    RepoError::database(operation, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitnessapp_domain::{
        FitnessClass, FitnessClassColumn, Location, LocationColumn, RegistrationRecord,
    };

    #[test]
    fn select_without_criteria_reads_whole_table() {
        let statement = select(&QuerySpec::<Location>::new());
        assert_eq!(statement.sql, "SELECT * FROM locations");
        assert!(statement.binds.is_empty());
    }

    #[test]
    fn select_renders_filter_order_and_window() {
        let spec = QuerySpec::<FitnessClass>::new()
            .filter(Predicate::eq(FitnessClassColumn::Cancelled, false))
            .filter(Predicate::ge(FitnessClassColumn::Capacity, 10))
            .order_by(FitnessClassColumn::StartTime, Direction::Asc)
            .order_by(FitnessClassColumn::Id, Direction::Desc)
            .limit(5)
            .offset(10);

        let statement = select(&spec);
        assert_eq!(
            statement.sql,
            "SELECT * FROM fitness_classes WHERE (cancelled = ?) AND (capacity >= ?) \
             ORDER BY start_time ASC, id DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            statement.binds,
            vec![
                Value::Bool(false),
                Value::Int(10),
                Value::Int(5),
                Value::Int(10)
            ]
        );
    }

    #[test]
    fn offset_without_limit_uses_unbounded_limit() {
        let statement = select(&QuerySpec::<Location>::new().offset(3));
        assert!(statement.sql.ends_with("LIMIT ? OFFSET ?"));
        assert_eq!(statement.binds, vec![Value::Int(-1), Value::Int(3)]);
    }

    #[test]
    fn null_comparisons_become_null_tests() {
        let spec = QuerySpec::<Location>::new()
            .filter(Predicate::eq(LocationColumn::Room, None::<String>))
            .filter(Predicate::ne(LocationColumn::Address, None::<String>));

        let statement = select(&spec);
        assert!(statement
            .sql
            .ends_with("WHERE (room IS NULL) AND (address IS NOT NULL)"));
        assert!(statement.binds.is_empty());
    }

    #[test]
    fn empty_groups_and_sets_have_fixed_truth() {
        let nothing = Predicate::<LocationColumn>::any(Vec::new());
        let everything = Predicate::<LocationColumn>::all(Vec::new());
        let no_ids = Predicate::is_in(LocationColumn::Id, Vec::<i64>::new());

        assert!(select(&QuerySpec::<Location>::new().filter(nothing))
            .sql
            .ends_with("WHERE 1 = 0"));
        assert!(select(&QuerySpec::<Location>::new().filter(everything))
            .sql
            .ends_with("WHERE 1 = 1"));
        assert!(select(&QuerySpec::<Location>::new().filter(no_ids))
            .sql
            .ends_with("WHERE 1 = 0"));
    }

    #[test]
    fn nested_or_and_not_are_parenthesized() {
        let predicate = Predicate::like(LocationColumn::Name, "Studio%")
            .or(Predicate::is_in(LocationColumn::Id, [1_i64, 2]))
            .negate();

        let statement = select(&QuerySpec::<Location>::new().filter(predicate));
        assert!(statement
            .sql
            .ends_with("WHERE NOT ((name LIKE ?) OR (id IN (?, ?)))"));
        assert_eq!(
            statement.binds,
            vec![Value::Text("Studio%".into()), Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn count_ignores_ordering() {
        let spec = QuerySpec::<Location>::new()
            .filter(Predicate::id(4))
            .order_by(LocationColumn::Name, Direction::Asc)
            .limit(1);

        let statement = count(&spec);
        assert_eq!(statement.sql, "SELECT COUNT(*) FROM locations WHERE id = ?");
        assert_eq!(statement.binds, vec![Value::Int(4)]);
    }

    #[test]
    fn write_statements_cover_every_column() {
        assert_eq!(
            insert::<RegistrationRecord>(),
            "INSERT INTO registration_records (fitness_class_id, user_id, registered_at) \
             VALUES (?, ?, ?)"
        );
        assert_eq!(
            update::<Location>(),
            "UPDATE locations SET name = ?, address = ?, room = ? WHERE id = ?"
        );
        assert_eq!(delete::<Location>(), "DELETE FROM locations WHERE id = ?");
    }
}
