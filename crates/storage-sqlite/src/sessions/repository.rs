use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use focusgoals_core::gamification::{FocusSession, FocusSessionRepositoryTrait, NewFocusSession};
use focusgoals_core::Result;

use super::model::{FocusSessionDB, NewFocusSessionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::focus_sessions;

pub struct FocusSessionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FocusSessionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FocusSessionRepository { pool, writer }
    }
}

#[async_trait]
impl FocusSessionRepositoryTrait for FocusSessionRepository {
    fn get_total_points(&self) -> Result<i64> {
        use diesel::dsl::sql;
        use diesel::sql_types::BigInt;

        let mut conn = get_connection(&self.pool)?;
        focus_sessions::table
            .select(sql::<BigInt>("COALESCE(SUM(points_earned), 0)"))
            .first::<i64>(&mut conn)
            .into_core()
    }

    fn list_sessions(&self, limit: i64) -> Result<Vec<FocusSession>> {
        let mut conn = get_connection(&self.pool)?;
        let sessions = focus_sessions::table
            .order((focus_sessions::ended_at.desc(), focus_sessions::id.desc()))
            .limit(limit)
            .select(FocusSessionDB::as_select())
            .load::<FocusSessionDB>(&mut conn)
            .into_core()?;
        Ok(sessions.into_iter().map(FocusSession::from).collect())
    }

    async fn insert_session(&self, new_session: NewFocusSession) -> Result<FocusSession> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FocusSession> {
                let row = NewFocusSessionDB::from_domain(Uuid::new_v4().to_string(), new_session);
                let inserted = diesel::insert_into(focus_sessions::table)
                    .values(&row)
                    .returning(FocusSessionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(FocusSession::from(inserted))
            })
            .await
    }
}
