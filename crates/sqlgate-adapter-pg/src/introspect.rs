use sqlgate_core::{ColumnDescriptor, SchemaDescription};
use sqlx::{PgPool, Row};

/// Every ordinary or partitioned table the current role holds any privilege
/// on, outside the system schemas. One row per column; tables without columns
/// still produce one row with null column fields.
const CATALOG_QUERY: &str = r#"
select
  n.nspname as table_schema,
  c.relname as table_name,
  pg_catalog.pg_table_is_visible(c.oid) as on_search_path,
  a.attname as column_name,
  pg_catalog.format_type(a.atttypid, a.atttypmod) as data_type,
  not a.attnotnull as nullable
from pg_catalog.pg_class c
join pg_catalog.pg_namespace n on n.oid = c.relnamespace
left join pg_catalog.pg_attribute a
  on a.attrelid = c.oid
 and a.attnum > 0
 and not a.attisdropped
where c.relkind in ('r', 'p')
  and n.nspname <> 'information_schema'
  and n.nspname !~ '^pg_'
  and pg_catalog.has_table_privilege(
        c.oid, 'SELECT, INSERT, UPDATE, DELETE, TRUNCATE, REFERENCES, TRIGGER')
order by n.nspname, c.relname, a.attnum
"#;

/// Introspect the live catalog into a [`SchemaDescription`].
///
/// Tables reachable through the connection's `search_path` are keyed by bare
/// name; anything else is keyed `schema.table`. Types are reported exactly as
/// `format_type` renders them.
pub async fn describe_schema(pool: &PgPool) -> Result<SchemaDescription, sqlx::Error> {
    let rows = sqlx::query(CATALOG_QUERY).fetch_all(pool).await?;

    let mut schema = SchemaDescription::new();
    for row in rows {
        let table_schema: String = row.try_get("table_schema")?;
        let table_name: String = row.try_get("table_name")?;
        let on_search_path: bool = row.try_get("on_search_path")?;

        let key = table_key(&table_schema, &table_name, on_search_path);
        let columns = schema.add_table(key);

        let column_name: Option<String> = row.try_get("column_name")?;
        if let Some(name) = column_name {
            let data_type: Option<String> = row.try_get("data_type")?;
            let nullable: Option<bool> = row.try_get("nullable")?;
            columns.push(ColumnDescriptor {
                name,
                data_type: data_type.unwrap_or_default(),
                nullable: nullable.unwrap_or(true),
            });
        }
    }

    Ok(schema)
}

fn table_key(table_schema: &str, table_name: &str, on_search_path: bool) -> String {
    if on_search_path {
        table_name.to_string()
    } else {
        format!("{}.{}", table_schema, table_name)
    }
}
