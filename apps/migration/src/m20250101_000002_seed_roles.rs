//! Built-in roles: `user` may read templates, `admin` may also write them.

use sea_orm_migration::prelude::*;
use serde_json::json;

#[derive(DeriveMigrationName)]
pub struct Migration;

const BUILT_IN_ROLES: [&str; 2] = ["user", "admin"];

/// Permissions column value: JSON text cast to `json` on the server side.
fn permissions(list: serde_json::Value) -> SimpleExpr {
    Expr::val(list.to_string()).cast_as(Alias::new("json"))
}

fn seed_roles() -> InsertStatement {
    Query::insert()
        .into_table(Roles::Table)
        .columns([Roles::Name, Roles::Permissions])
        .values_panic(["user".into(), permissions(json!(["templates:read"]))])
        .values_panic([
            "admin".into(),
            permissions(json!(["templates:read", "templates:write"])),
        ])
        .to_owned()
}

fn remove_roles() -> DeleteStatement {
    Query::delete()
        .from_table(Roles::Table)
        .and_where(Expr::col(Roles::Name).is_in(BUILT_IN_ROLES))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(seed_roles()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(remove_roles()).await
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Name,
    Permissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_casts_permissions_to_json() {
        let sql = seed_roles().to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"INSERT INTO "roles" ("name", "permissions")"#));
        assert!(sql.contains(r#"CAST('["templates:read"]' AS json)"#));
        assert!(sql.contains(r#"CAST('["templates:read","templates:write"]' AS json)"#));
    }

    #[test]
    fn test_down_removes_only_built_in_roles() {
        let sql = remove_roles().to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"DELETE FROM "roles" WHERE "name" IN ('user', 'admin')"#
        );
    }
}
