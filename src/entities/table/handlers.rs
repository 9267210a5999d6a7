//! Table HTTP handlers

use super::model::{NewTable, Table, TableUpdate};
use crate::core::entity::{Document, changes};
use crate::core::error::{EntityError, ServiceResult};
use crate::core::validation::Validated;
use crate::server::AppState;
use crate::storage::{Filter, Repository};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_tables(State(state): State<AppState>) -> ServiceResult<Json<Vec<Table>>> {
    let tables = state.repository.list::<Table>(&Filter::all()).await?;
    Ok(Json(tables))
}

pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
) -> ServiceResult<Json<Table>> {
    state.repository.get::<Table>(&table_id).await.map(Json)
}

pub async fn create_table(
    State(state): State<AppState>,
    Validated(payload): Validated<NewTable>,
) -> ServiceResult<(StatusCode, Json<Table>)> {
    ensure_number_free(&state.repository, payload.table_number, None).await?;

    let table = Table::new(payload.number_of_guests, payload.table_number);
    state.repository.insert(&table).await?;

    tracing::info!(table_id = %table.key(), table_number = table.table_number, "table created");
    Ok((StatusCode::CREATED, Json(table)))
}

pub async fn update_table(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    Validated(payload): Validated<TableUpdate>,
) -> ServiceResult<Json<Table>> {
    if let Some(number) = payload.table_number {
        ensure_number_free(&state.repository, number, Some(&table_id)).await?;
    }

    let set = changes(&payload)?;
    state.repository.update::<Table>(&table_id, set).await.map(Json)
}

/// Fail with a conflict when another table already uses `table_number`
async fn ensure_number_free(
    repository: &Repository,
    table_number: i64,
    except: Option<&str>,
) -> ServiceResult<()> {
    let existing = repository
        .find_by::<Table>(&Filter::by("table_number", table_number))
        .await?;

    match existing {
        Some(table) if Some(table.key()) != except => Err(EntityError::AlreadyExists {
            entity_type: Table::entity_type().to_string(),
            field: "table_number".to_string(),
            value: table_number.to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}
