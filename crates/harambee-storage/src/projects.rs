//! Tenant and project rows: seeding and column introspection.

use harambee_core::errors::StoreResult;
use harambee_core::{ModuleKey, ProjectId, TenantId};
use rusqlite::{params, Connection};

use crate::errors::map_sqlite_error;
use crate::sql::is_identifier;

/// A project row to insert. `module_key` requires schema v2.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    pub display_order: i64,
    pub module_key: Option<ModuleKey>,
    /// Unix seconds; `None` lets the column default apply.
    pub created_at: Option<i64>,
}

impl NewProject {
    pub fn new(tenant_id: impl Into<TenantId>, code: &str, name: &str) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            code: code.to_string(),
            name: name.to_string(),
            display_order: 0,
            module_key: None,
            created_at: None,
        }
    }

    pub fn with_module(mut self, module: ModuleKey) -> Self {
        self.module_key = Some(module);
        self
    }

    pub fn with_display_order(mut self, display_order: i64) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_created_at(mut self, unix_seconds: i64) -> Self {
        self.created_at = Some(unix_seconds);
        self
    }
}

pub fn insert_tenant(conn: &Connection, tenant: &TenantId, name: &str) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO tenants (id, name) VALUES (?1, ?2)",
        params![tenant.as_str(), name],
    )
    .map_err(|e| map_sqlite_error(e, Some("tenants")))?;
    Ok(())
}

/// Insert a project. On a v1 schema a project carrying a module key fails
/// with `StoreError::MissingColumn`.
pub fn insert_project(conn: &Connection, project: &NewProject) -> StoreResult<ProjectId> {
    let created_at = project.created_at;
    let result = match &project.module_key {
        Some(module) => conn.execute(
            "INSERT INTO projects (tenant_id, code, name, display_order, module_key, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, unixepoch()))",
            params![
                project.tenant_id.as_str(),
                project.code,
                project.name,
                project.display_order,
                module.as_str(),
                created_at,
            ],
        ),
        None => conn.execute(
            "INSERT INTO projects (tenant_id, code, name, display_order, created_at)
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, unixepoch()))",
            params![
                project.tenant_id.as_str(),
                project.code,
                project.name,
                project.display_order,
                created_at,
            ],
        ),
    };
    result.map_err(|e| map_sqlite_error(e, Some("projects")))?;
    Ok(ProjectId(conn.last_insert_rowid()))
}

/// Whether `table` has `column`. Unknown tables report `false`.
pub fn has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    if !is_identifier(table) {
        return Ok(false);
    }
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| map_sqlite_error(e, Some(table)))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| map_sqlite_error(e, Some(table)))?;
    for name in names {
        if name.map_err(|e| map_sqlite_error(e, Some(table)))? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
