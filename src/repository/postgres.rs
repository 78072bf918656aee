use sqlx::{FromRow, PgExecutor, PgPool};
use tracing::debug;

use crate::error::{AppError, DomainError};
use crate::models::{Event, Spot, SpotStatus, Ticket};
use crate::repository::EventRepository;

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Статус хранится текстом, в домен переводим вручную
#[derive(FromRow)]
struct SpotRow {
    id: String,
    event_id: String,
    name: String,
    status: String,
    ticket_id: Option<String>,
}

impl TryFrom<SpotRow> for Spot {
    type Error = AppError;

    fn try_from(row: SpotRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<SpotStatus>()
            .map_err(|e| AppError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Spot {
            id: row.id,
            event_id: row.event_id,
            name: row.name,
            status,
            ticket_id: row.ticket_id,
        })
    }
}

const EVENT_COLUMNS: &str =
    "id, name, location, organization, rating, date, image_url, capacity, price, partner_id";

impl EventRepository for PgEventRepository {
    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY date",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn find_event_by_id(&self, event_id: &str) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))
    }

    async fn find_spots_by_event_id(&self, event_id: &str) -> Result<Vec<Spot>, AppError> {
        let rows = sqlx::query_as::<_, SpotRow>(
            "SELECT id, event_id, name, status, ticket_id
             FROM spots
             WHERE event_id = $1
             ORDER BY name",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Spot::try_from).collect()
    }

    async fn find_spot_by_name(&self, event_id: &str, name: &str) -> Result<Spot, AppError> {
        let row = sqlx::query_as::<_, SpotRow>(
            "SELECT id, event_id, name, status, ticket_id
             FROM spots
             WHERE event_id = $1 AND name = $2",
        )
        .bind(event_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::SpotNotFound(name.to_string()))?;

        Spot::try_from(row)
    }

    async fn create_ticket(&self, ticket: &Ticket) -> Result<(), AppError> {
        insert_ticket(&self.pool, ticket).await
    }

    async fn reserve_spot(&self, spot_id: &str, ticket_id: &str) -> Result<(), AppError> {
        if mark_spot_sold(&self.pool, spot_id, ticket_id).await? > 0 {
            return Ok(());
        }
        Err(self.reserve_failure(spot_id).await)
    }

    async fn sell_spot(&self, ticket: &Ticket) -> Result<(), AppError> {
        // Билет пишется первым: spots.ticket_id ссылается на tickets(id)
        let mut tx = self.pool.begin().await?;

        insert_ticket(&mut *tx, ticket).await?;
        if mark_spot_sold(&mut *tx, &ticket.spot.id, &ticket.id).await? == 0 {
            tx.rollback().await?;
            return Err(self.reserve_failure(&ticket.spot.id).await);
        }

        tx.commit().await?;
        Ok(())
    }
}

impl PgEventRepository {
    // Условная запись не прошла: отличаем проданное место от несуществующего
    async fn reserve_failure(&self, spot_id: &str) -> AppError {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM spots WHERE id = $1)")
            .bind(spot_id)
            .fetch_one(&self.pool)
            .await;

        match exists {
            Ok(true) => {
                debug!("conditional reserve lost for spot {}", spot_id);
                DomainError::SpotAlreadyReserved.into()
            }
            Ok(false) => AppError::SpotNotFound(spot_id.to_string()),
            Err(e) => e.into(),
        }
    }
}

async fn insert_ticket<'e, E: PgExecutor<'e>>(executor: E, ticket: &Ticket) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO tickets (id, event_id, spot_id, ticket_type, price)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&ticket.id)
    .bind(&ticket.event_id)
    .bind(&ticket.spot.id)
    .bind(ticket.ticket_type.as_str())
    .bind(ticket.price)
    .execute(executor)
    .await?;
    Ok(())
}

// available -> sold одним UPDATE, второй писатель увидит 0 строк
async fn mark_spot_sold<'e, E: PgExecutor<'e>>(
    executor: E,
    spot_id: &str,
    ticket_id: &str,
) -> Result<u64, AppError> {
    let updated = sqlx::query(
        "UPDATE spots
         SET status = 'sold', ticket_id = $1
         WHERE id = $2 AND status = 'available'",
    )
    .bind(ticket_id)
    .bind(spot_id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(updated)
}
