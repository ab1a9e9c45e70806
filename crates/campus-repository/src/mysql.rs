//! MySQL repository shared by every record type.
//!
//! Statements are assembled from the record's serialized field names, so a
//! record type only needs `sqlx::FromRow` and a table to be persisted.

use crate::{DatabasePool, EntityRepository, FieldValue, Filter, StatusFilter};
use async_trait::async_trait;
use campus_core::{CrmError, CrmResult, Entity};
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Columns maintained by MySQL defaults.
const MANAGED_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// MySQL repository for `E`.
pub struct MySqlRepository<E> {
    pool: Arc<DatabasePool>,
    _record: PhantomData<fn() -> E>,
}

impl<E> MySqlRepository<E> {
    /// Creates a new MySQL repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

impl<E> Clone for MySqlRepository<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.pool))
    }
}

/// Serialized fields of `record`, minus the key and managed timestamps.
fn writable_columns<E: Entity>(record: &E) -> CrmResult<Vec<(String, Value)>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(column, _)| {
                column != E::ID_COLUMN && !MANAGED_COLUMNS.contains(&column.as_str())
            })
            .collect()),
        _ => Err(CrmError::internal(format!(
            "{} does not serialize to a row",
            E::NAME
        ))),
    }
}

fn push_value(qb: &mut QueryBuilder<'_, MySql>, value: Value) {
    match value {
        Value::Null => qb.push_bind(None::<String>),
        Value::Bool(flag) => qb.push_bind(flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => qb.push_bind(int),
            None => qb.push_bind(number.as_f64()),
        },
        Value::String(text) => qb.push_bind(text),
        nested => qb.push_bind(nested.to_string()),
    };
}

fn push_filter(qb: &mut QueryBuilder<'_, MySql>, filter: &Filter) {
    qb.push(" WHERE 1 = 1");

    for (column, value) in filter.equals() {
        qb.push(format!(" AND `{column}` = "));
        match value {
            FieldValue::Int(int) => qb.push_bind(*int),
            FieldValue::Text(text) => qb.push_bind(text.clone()),
        };
    }

    match filter.status() {
        StatusFilter::Any => {}
        StatusFilter::Is(status) => {
            qb.push(" AND `status` = ").push_bind(*status);
        }
        StatusFilter::Not(status) => {
            qb.push(" AND `status` <> ").push_bind(*status);
        }
        StatusFilter::In(statuses) if statuses.is_empty() => {
            qb.push(" AND 1 = 0");
        }
        StatusFilter::In(statuses) => {
            qb.push(" AND `status` IN (");
            let mut list = qb.separated(", ");
            for status in statuses {
                list.push_bind(*status);
            }
            list.push_unseparated(")");
        }
    }
}

impl<E> MySqlRepository<E>
where
    E: Entity + for<'r> FromRow<'r, MySqlRow>,
{
    async fn select_one(&self, filter: &Filter) -> CrmResult<Option<E>> {
        let mut qb = QueryBuilder::<MySql>::new(format!("SELECT * FROM `{}`", E::TABLE));
        push_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<E>()
            .fetch_optional(self.pool.inner())
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl<E> EntityRepository<E> for MySqlRepository<E>
where
    E: Entity + for<'r> FromRow<'r, MySqlRow>,
{
    async fn create(&self, record: &E) -> CrmResult<E> {
        let columns = writable_columns(record)?;
        debug!("Inserting into {}", E::TABLE);

        let mut qb = QueryBuilder::<MySql>::new(format!("INSERT INTO `{}` (", E::TABLE));
        for (i, (column, _)) in columns.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format!("`{column}`"));
        }
        qb.push(") VALUES (");
        for (i, (_, value)) in columns.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_value(&mut qb, value);
        }
        qb.push(")");

        let result = qb.build().execute(self.pool.inner()).await?;
        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| CrmError::internal(format!("insert id out of range: {e}")))?;

        self.select_one(&Filter::by_id::<E>(id))
            .await?
            .ok_or_else(|| CrmError::internal(format!("{} {} vanished after insert", E::NAME, id)))
    }

    async fn find_one(&self, filter: &Filter) -> CrmResult<Option<E>> {
        debug!("Finding one {} by {:?}", E::TABLE, filter);
        self.select_one(filter).await
    }

    async fn find_all(&self, filter: &Filter) -> CrmResult<Vec<E>> {
        debug!("Finding all {} by {:?}", E::TABLE, filter);

        let mut qb = QueryBuilder::<MySql>::new(format!("SELECT * FROM `{}`", E::TABLE));
        push_filter(&mut qb, filter);
        qb.push(format!(" ORDER BY `{}`", E::ID_COLUMN));

        let rows = qb
            .build_query_as::<E>()
            .fetch_all(self.pool.inner())
            .await?;
        Ok(rows)
    }

    async fn update(&self, record: &E) -> CrmResult<E> {
        let id = record.id();
        let columns = writable_columns(record)?;
        debug!("Updating {} row {}", E::TABLE, id);

        let mut qb = QueryBuilder::<MySql>::new(format!("UPDATE `{}` SET ", E::TABLE));
        for (i, (column, value)) in columns.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format!("`{column}` = "));
            push_value(&mut qb, value);
        }
        qb.push(format!(" WHERE `{}` = ", E::ID_COLUMN)).push_bind(id);
        qb.build().execute(self.pool.inner()).await?;

        self.select_one(&Filter::by_id::<E>(id))
            .await?
            .ok_or_else(|| CrmError::not_found(E::NAME, id))
    }
}
