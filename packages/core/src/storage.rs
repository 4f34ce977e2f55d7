// ABOUTME: Tarefa storage layer using SQLite
// ABOUTME: Handles CRUD operations and the transactional bulk reorder

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::debug;

use crate::types::{OrdemUpdate, Tarefa, TarefaInput};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Tarefa not found")]
    NotFound,
    #[error("Duplicate tarefa name: {0}")]
    DuplicateNome(String),
    #[error("Duplicate ordem value")]
    DuplicateOrdem,
}

pub type StorageResult<T> = Result<T, StorageError>;

pub struct TarefaStorage {
    pool: SqlitePool,
}

impl TarefaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all tarefas ordered ascending by `ordem`
    pub async fn list_tarefas(&self) -> StorageResult<Vec<Tarefa>> {
        debug!("Fetching all tarefas");

        let rows = sqlx::query("SELECT * FROM tarefas ORDER BY ordem")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_tarefa(row)).collect()
    }

    /// Get a single tarefa by ID
    pub async fn get_tarefa(&self, id: i64) -> StorageResult<Tarefa> {
        debug!("Fetching tarefa: {}", id);

        let row = sqlx::query("SELECT * FROM tarefas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        self.row_to_tarefa(&row)
    }

    /// Create a new tarefa at the end of the order.
    ///
    /// The `ordem` is computed as `max(existing) + 1` (1 when the table is
    /// empty) inside the INSERT itself, so two concurrent creates cannot read
    /// the same maximum. A duplicate `nome` surfaces as `DuplicateNome` via
    /// the unique index rather than a pre-insert existence check.
    pub async fn create_tarefa(&self, input: TarefaInput) -> StorageResult<Tarefa> {
        let now = Utc::now();

        debug!("Creating tarefa (nome: {})", input.nome);

        let result = sqlx::query(
            r#"
            INSERT INTO tarefas (nome, custo, data_limite, ordem, created_at, updated_at)
            VALUES (?, ?, ?, (SELECT COALESCE(MAX(ordem), 0) + 1 FROM tarefas), ?, ?)
            "#,
        )
        .bind(&input.nome)
        .bind(input.custo)
        .bind(input.data_limite)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| Self::translate_nome_violation(&input.nome, err))?;

        self.get_tarefa(result.last_insert_rowid()).await
    }

    /// Update a tarefa. All three fields are replaced; `ordem` is untouched.
    pub async fn update_tarefa(&self, id: i64, input: TarefaInput) -> StorageResult<Tarefa> {
        let now = Utc::now();

        debug!("Updating tarefa: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE tarefas
            SET nome = ?, custo = ?, data_limite = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.nome)
        .bind(input.custo)
        .bind(input.data_limite)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Self::translate_nome_violation(&input.nome, err))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_tarefa(id).await
    }

    /// Delete a tarefa by ID
    pub async fn delete_tarefa(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting tarefa: {}", id);

        let result = sqlx::query("DELETE FROM tarefas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Apply a bulk reorder atomically.
    ///
    /// All updates run inside a single transaction on one pooled connection,
    /// in two phases: first every referenced row's `ordem` is negated (moving
    /// it out of the positive range without breaking uniqueness), then the
    /// final values are written. Two tarefas may therefore trade `ordem`
    /// values even though the column is unique — the transient state never
    /// holds two equal values. Any failure (unknown id, collision with a row
    /// outside the payload) returns early, which rolls the transaction back;
    /// nothing partial is ever visible.
    ///
    /// The caller is expected to have validated the payload: distinct ids,
    /// distinct ordem values, all of them >= 1.
    pub async fn reorder_tarefas(&self, updates: &[OrdemUpdate]) -> StorageResult<()> {
        debug!("Reordering {} tarefas", updates.len());

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        for update in updates {
            let result = sqlx::query("UPDATE tarefas SET ordem = -ordem WHERE id = ?")
                .bind(update.id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;

            if result.rows_affected() == 0 {
                return Err(StorageError::NotFound);
            }
        }

        let now = Utc::now();
        for update in updates {
            sqlx::query("UPDATE tarefas SET ordem = ?, updated_at = ? WHERE id = ?")
                .bind(update.ordem)
                .bind(now)
                .bind(update.id)
                .execute(&mut *tx)
                .await
                .map_err(|err| match &err {
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                        StorageError::DuplicateOrdem
                    }
                    _ => StorageError::Sqlx(err),
                })?;
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(())
    }

    fn row_to_tarefa(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Tarefa> {
        Ok(Tarefa {
            id: row.try_get("id")?,
            nome: row.try_get("nome")?,
            custo: row.try_get("custo")?,
            data_limite: row.try_get("data_limite")?,
            ordem: row.try_get("ordem")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn translate_nome_violation(nome: &str, err: sqlx::Error) -> StorageError {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation() && db_err.message().contains("tarefas.nome") =>
            {
                StorageError::DuplicateNome(nome.to_string())
            }
            _ => StorageError::Sqlx(err),
        }
    }
}
