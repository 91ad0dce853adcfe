use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use focusgoals_core::gamification::{FocusSession, NewFocusSession};

/// Database model for focus sessions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::focus_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FocusSessionDB {
    pub id: String,
    pub goal_id: Option<String>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub duration_seconds: i64,
    pub points_earned: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::focus_sessions)]
pub struct NewFocusSessionDB {
    pub id: String,
    pub goal_id: Option<String>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub duration_seconds: i64,
    pub points_earned: i64,
}

impl NewFocusSessionDB {
    pub fn from_domain(id: String, session: NewFocusSession) -> Self {
        Self {
            id,
            goal_id: session.goal_id,
            started_at: session.started_at.naive_utc(),
            ended_at: session.ended_at.naive_utc(),
            duration_seconds: session.duration_seconds,
            points_earned: session.points_earned,
        }
    }
}

impl From<FocusSessionDB> for FocusSession {
    fn from(db: FocusSessionDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            started_at: Utc.from_utc_datetime(&db.started_at),
            ended_at: Utc.from_utc_datetime(&db.ended_at),
            duration_seconds: db.duration_seconds,
            points_earned: db.points_earned,
        }
    }
}
