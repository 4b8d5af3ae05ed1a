use crate::db::schema::SQLITE_INIT;
use crate::error::StoreError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Read the value stored under a key.
    Get(String, RpcReplyPort<Result<Option<String>, StoreError>>),

    /// Insert or replace the value stored under a key.
    Put(String, String, RpcReplyPort<Result<(), StoreError>>),

    /// Delete a key; deleting a missing key is not an error.
    Delete(String, RpcReplyPort<Result<(), StoreError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Get, key.to_string())
            .map_err(|e| StoreError::Ractor(format!("DbActor Get RPC failed: {e}")))?
    }

    pub async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        ractor::call!(self.actor, DbActorMessage::Put, key.to_string(), value)
            .map_err(|e| StoreError::Ractor(format!("DbActor Put RPC failed: {e}")))?
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        ractor::call!(self.actor, DbActorMessage::Delete, key.to_string())
            .map_err(|e| StoreError::Ractor(format!("DbActor Delete RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Get(key, reply) => {
                let res = self.get(&state.pool, &key).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Put(key, value, reply) => {
                let res = self.put(&state.pool, &key, &value).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(key, reply) => {
                let res = self.delete(&state.pool, &key).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn get(&self, pool: &SqlitePool, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> =
            sqlx::query_scalar(r#"SELECT value FROM kv_store WHERE key = ?"#)
                .bind(key)
                .fetch_optional(pool)
                .await?;

        Ok(value)
    }

    async fn put(&self, pool: &SqlitePool, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now();
        sqlx::query(
            r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;

        debug!(key, "kv_store value written");
        Ok(())
    }

    async fn delete(&self, pool: &SqlitePool, key: &str) -> Result<(), StoreError> {
        let res = sqlx::query(r#"DELETE FROM kv_store WHERE key = ?"#)
            .bind(key)
            .execute(pool)
            .await?;

        debug!(key, removed = res.rows_affected(), "kv_store key deleted");
        Ok(())
    }
}

/// Spawn the storage actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, StoreError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| StoreError::Ractor(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
