//! Compilation of `SelectQuery` into parameterized SQLite SQL.
//!
//! Identifiers cannot be bound as parameters, so every relation and column
//! name is checked against `[A-Za-z_][A-Za-z0-9_]*` before it is spliced in.
//! Values are always bound.

use harambee_core::errors::{StoreError, StoreResult};
use harambee_core::traits::{FilterValue, SelectQuery};
use rusqlite::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSelect {
    pub sql: String,
    pub params: Vec<Value>,
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn checked(name: &str) -> StoreResult<&str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(StoreError::InvalidQuery(format!("invalid identifier: {name:?}")))
    }
}

fn bind(value: &FilterValue) -> Value {
    match value {
        FilterValue::Integer(v) => Value::Integer(*v),
        FilterValue::Text(v) => Value::Text(v.clone()),
    }
}

pub fn compile_select(query: &SelectQuery) -> StoreResult<CompiledSelect> {
    let relation = checked(&query.relation)?;

    let columns = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query
            .columns
            .iter()
            .map(|c| checked(c))
            .collect::<StoreResult<Vec<_>>>()?
            .join(", ")
    };

    let mut sql = format!("SELECT {columns} FROM {relation}");
    let mut params = Vec::with_capacity(query.filters.len());

    for (i, filter) in query.filters.iter().enumerate() {
        let column = checked(&filter.column)?;
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        params.push(bind(&filter.value));
        sql.push_str(&format!("{column} {} ?{}", filter.op.as_sql(), params.len()));
    }

    for (i, order) in query.order.iter().enumerate() {
        let column = checked(&order.column)?;
        sql.push_str(if i == 0 { " ORDER BY " } else { ", " });
        sql.push_str(column);
        sql.push_str(if order.ascending { " ASC" } else { " DESC" });
    }

    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    Ok(CompiledSelect { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiles_full_query() {
        let q = SelectQuery::table("projects")
            .select(&["id"])
            .eq("tenant_id", "t1")
            .eq("module_key", "jpp")
            .order_by("display_order", true)
            .order_by("created_at", true)
            .limit(1);
        let compiled = compile_select(&q).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT id FROM projects WHERE tenant_id = ?1 AND module_key = ?2 \
             ORDER BY display_order ASC, created_at ASC LIMIT 1"
        );
        assert_eq!(
            compiled.params,
            vec![Value::Text("t1".into()), Value::Text("jpp".into())]
        );
    }

    #[test]
    fn test_empty_columns_select_star() {
        let compiled = compile_select(&SelectQuery::table("tenants")).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM tenants");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn test_integer_filters_bind_as_integers() {
        let q = SelectQuery::table("projects").gte("display_order", 3).order_by("id", false);
        let compiled = compile_select(&q).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM projects WHERE display_order >= ?1 ORDER BY id DESC");
        assert_eq!(compiled.params, vec![Value::Integer(3)]);
    }

    #[test]
    fn test_rejects_injected_identifiers() {
        let q = SelectQuery::table("projects; DROP TABLE tenants");
        assert!(matches!(compile_select(&q), Err(StoreError::InvalidQuery(_))));

        let q = SelectQuery::table("projects").eq("id = 1 OR 1", 1);
        assert!(matches!(compile_select(&q), Err(StoreError::InvalidQuery(_))));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("module_key"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1col"));
        assert!(!is_identifier("a.b"));
    }
}
