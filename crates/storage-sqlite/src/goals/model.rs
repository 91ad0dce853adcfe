//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use focusgoals_core::goals::{ParentGoal, SubGoal};

/// Database model for parent goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::parent_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParentGoalDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub position: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a parent goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::parent_goals)]
pub struct NewParentGoalDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub position: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for sub-goals
#[derive(
    Insertable, Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(ParentGoalDB, foreign_key = parent_goal_id))]
#[diesel(table_name = crate::schema::sub_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubGoalDB {
    pub id: String,
    pub parent_goal_id: String,
    pub title: String,
    pub description: String,
    pub progress: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<SubGoalDB> for SubGoal {
    fn from(db: SubGoalDB) -> Self {
        Self {
            id: Some(db.id),
            title: db.title,
            description: db.description,
            progress: db.progress,
            parent_goal_id: Some(db.parent_goal_id),
        }
    }
}

impl ParentGoalDB {
    /// Builds the domain goal with its already-loaded sub-goals.
    pub fn into_domain(self, sub_goals: Vec<SubGoalDB>) -> ParentGoal {
        ParentGoal {
            id: Some(self.id),
            title: self.title,
            description: self.description,
            position: self.position,
            goals: sub_goals.into_iter().map(SubGoal::from).collect(),
        }
    }
}
