use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use focusgoals_core::goals::{
    GoalRepositoryTrait, NewParentGoal, NewSubGoal, ParentGoal, ParentGoalUpdate, SubGoal,
};
use focusgoals_core::Result;

use super::model::{NewParentGoalDB, ParentGoalDB, SubGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found, IntoCore};
use crate::schema::{parent_goals, sub_goals};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

/// Parents by position (unpositioned last), newest first within a position,
/// each with its sub-goals in creation order.
fn load_ordered_parent_goals(conn: &mut SqliteConnection) -> Result<Vec<ParentGoal>> {
    let mut parents = parent_goals::table
        .order(parent_goals::created_at.desc())
        .select(ParentGoalDB::as_select())
        .load::<ParentGoalDB>(conn)
        .into_core()?;
    // Stable sort keeps created_at DESC inside equal positions.
    parents.sort_by_key(|p| (p.position.is_none(), p.position));

    let children = SubGoalDB::belonging_to(&parents)
        .order((sub_goals::created_at.asc(), sub_goals::id.asc()))
        .select(SubGoalDB::as_select())
        .load::<SubGoalDB>(conn)
        .into_core()?
        .grouped_by(&parents);

    Ok(parents
        .into_iter()
        .zip(children)
        .map(|(parent, goals)| parent.into_domain(goals))
        .collect())
}

fn load_parent_goal(conn: &mut SqliteConnection, parent_goal_id: &str) -> Result<ParentGoal> {
    let parent = parent_goals::table
        .find(parent_goal_id)
        .select(ParentGoalDB::as_select())
        .first::<ParentGoalDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| not_found("parent goal", parent_goal_id))?;

    let goals = SubGoalDB::belonging_to(&parent)
        .order((sub_goals::created_at.asc(), sub_goals::id.asc()))
        .select(SubGoalDB::as_select())
        .load::<SubGoalDB>(conn)
        .into_core()?;

    Ok(parent.into_domain(goals))
}

fn load_sub_goal(conn: &mut SqliteConnection, sub_goal_id: &str) -> Result<SubGoal> {
    sub_goals::table
        .find(sub_goal_id)
        .select(SubGoalDB::as_select())
        .first::<SubGoalDB>(conn)
        .optional()
        .into_core()?
        .map(SubGoal::from)
        .ok_or_else(|| not_found("sub goal", sub_goal_id))
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_parent_goals(&self) -> Result<Vec<ParentGoal>> {
        let mut conn = get_connection(&self.pool)?;
        load_ordered_parent_goals(&mut conn)
    }

    fn get_parent_goal(&self, parent_goal_id: &str) -> Result<ParentGoal> {
        let mut conn = get_connection(&self.pool)?;
        load_parent_goal(&mut conn, parent_goal_id)
    }

    fn get_sub_goal(&self, sub_goal_id: &str) -> Result<SubGoal> {
        let mut conn = get_connection(&self.pool)?;
        load_sub_goal(&mut conn, sub_goal_id)
    }

    async fn insert_parent_goal(&self, new_goal: NewParentGoal) -> Result<ParentGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ParentGoal> {
                let now = Utc::now().naive_utc();
                let row = NewParentGoalDB {
                    id: Uuid::new_v4().to_string(),
                    title: new_goal.title,
                    description: new_goal.description,
                    position: new_goal.position,
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(parent_goals::table)
                    .values(&row)
                    .returning(ParentGoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into_domain(Vec::new()))
            })
            .await
    }

    async fn update_parent_goal(&self, goal_update: ParentGoalUpdate) -> Result<ParentGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ParentGoal> {
                let updated = diesel::update(parent_goals::table.find(&goal_update.id))
                    .set((
                        parent_goals::title.eq(&goal_update.title),
                        parent_goals::description.eq(&goal_update.description),
                        parent_goals::position.eq(goal_update.position),
                        parent_goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(not_found("parent goal", &goal_update.id));
                }
                load_parent_goal(conn, &goal_update.id)
            })
            .await
    }

    async fn delete_parent_goal(&self, parent_goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let removed_children = diesel::delete(
                    sub_goals::table.filter(sub_goals::parent_goal_id.eq(&parent_goal_id)),
                )
                .execute(conn)
                .into_core()?;
                let removed = diesel::delete(parent_goals::table.find(&parent_goal_id))
                    .execute(conn)
                    .into_core()?;
                debug!(
                    "Deleted parent goal {} with {} sub-goals",
                    parent_goal_id, removed_children
                );
                Ok(removed)
            })
            .await
    }

    async fn update_positions(&self, ordered_ids: Vec<String>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let mut affected_rows = 0;
                for (index, goal_id) in ordered_ids.iter().enumerate() {
                    affected_rows += diesel::update(parent_goals::table.find(goal_id))
                        .set((
                            parent_goals::position.eq(Some(index as i32)),
                            parent_goals::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .into_core()?;
                }
                Ok(affected_rows)
            })
            .await
    }

    async fn insert_sub_goal(&self, new_sub_goal: NewSubGoal) -> Result<SubGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SubGoal> {
                let now = Utc::now().naive_utc();
                let row = SubGoalDB {
                    id: Uuid::new_v4().to_string(),
                    parent_goal_id: new_sub_goal.parent_goal_id,
                    title: new_sub_goal.title,
                    description: new_sub_goal.description,
                    progress: new_sub_goal.progress,
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(sub_goals::table)
                    .values(&row)
                    .returning(SubGoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(SubGoal::from(inserted))
            })
            .await
    }

    async fn update_sub_goal(&self, sub_goal: SubGoal) -> Result<SubGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SubGoal> {
                let sub_goal_id = sub_goal.id.clone().unwrap_or_default();
                let existing = load_sub_goal(conn, &sub_goal_id)?;
                let parent_goal_id = sub_goal
                    .parent_goal_id
                    .or(existing.parent_goal_id)
                    .unwrap_or_default();

                diesel::update(sub_goals::table.find(&sub_goal_id))
                    .set((
                        sub_goals::title.eq(&sub_goal.title),
                        sub_goals::description.eq(&sub_goal.description),
                        sub_goals::progress.eq(sub_goal.progress),
                        sub_goals::parent_goal_id.eq(&parent_goal_id),
                        sub_goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                load_sub_goal(conn, &sub_goal_id)
            })
            .await
    }

    async fn update_sub_goal_progress(
        &self,
        sub_goal_id: String,
        progress: f64,
    ) -> Result<SubGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SubGoal> {
                let updated = diesel::update(sub_goals::table.find(&sub_goal_id))
                    .set((
                        sub_goals::progress.eq(progress),
                        sub_goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(not_found("sub goal", &sub_goal_id));
                }
                load_sub_goal(conn, &sub_goal_id)
            })
            .await
    }

    async fn delete_sub_goals(&self, sub_goal_ids: Vec<String>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(sub_goals::table.filter(sub_goals::id.eq_any(&sub_goal_ids)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use focusgoals_core::errors::{DatabaseError, Error};
    use tempfile::tempdir;

    /// Creates a repository over a fresh temp database. The temp dir must be
    /// kept alive for the duration of the test.
    fn create_test_repository() -> (GoalRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (GoalRepository::new(pool, writer), temp_dir)
    }

    fn new_parent(title: &str, position: Option<i32>) -> NewParentGoal {
        NewParentGoal {
            title: title.to_string(),
            description: String::new(),
            position,
        }
    }

    fn new_sub(parent_goal_id: &str, title: &str) -> NewSubGoal {
        NewSubGoal {
            parent_goal_id: parent_goal_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            progress: 0.0,
        }
    }

    #[tokio::test]
    async fn test_parents_listed_by_position_with_sub_goals() {
        let (repo, _temp_dir) = create_test_repository();

        let second = repo.insert_parent_goal(new_parent("Second", Some(1))).await.unwrap();
        let unpositioned = repo.insert_parent_goal(new_parent("Loose", None)).await.unwrap();
        let first = repo.insert_parent_goal(new_parent("First", Some(0))).await.unwrap();

        let first_id = first.id.clone().unwrap();
        repo.insert_sub_goal(new_sub(&first_id, "a")).await.unwrap();
        repo.insert_sub_goal(new_sub(&first_id, "b")).await.unwrap();

        let goals = repo.load_parent_goals().unwrap();
        let ids: Vec<Option<String>> = goals.iter().map(|g| g.id.clone()).collect();
        assert_eq!(ids, vec![first.id, second.id, unpositioned.id]);
        assert_eq!(goals[0].goals.len(), 2);
        assert!(goals[1].goals.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_parent_removes_sub_goals() {
        let (repo, _temp_dir) = create_test_repository();
        let parent = repo.insert_parent_goal(new_parent("Trip", None)).await.unwrap();
        let parent_id = parent.id.unwrap();
        let sub = repo.insert_sub_goal(new_sub(&parent_id, "Tickets")).await.unwrap();

        let deleted = repo.delete_parent_goal(parent_id.clone()).await.unwrap();
        assert_eq!(deleted, 1);

        let lookup = repo.get_sub_goal(sub.id.as_deref().unwrap());
        assert!(matches!(
            lookup,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert!(repo.get_parent_goal(&parent_id).is_err());
    }

    #[tokio::test]
    async fn test_sub_goal_requires_existing_parent() {
        let (repo, _temp_dir) = create_test_repository();
        let result = repo.insert_sub_goal(new_sub("missing", "Orphan")).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_progress_update_and_missing_row() {
        let (repo, _temp_dir) = create_test_repository();
        let parent = repo.insert_parent_goal(new_parent("Fitness", None)).await.unwrap();
        let sub = repo
            .insert_sub_goal(new_sub(parent.id.as_deref().unwrap(), "Pushups"))
            .await
            .unwrap();

        let updated = repo
            .update_sub_goal_progress(sub.id.clone().unwrap(), 65.0)
            .await
            .unwrap();
        assert_eq!(updated.progress, 65.0);

        let missing = repo.update_sub_goal_progress("nope".to_string(), 10.0).await;
        assert!(matches!(
            missing,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_positions_reorders() {
        let (repo, _temp_dir) = create_test_repository();
        let a = repo.insert_parent_goal(new_parent("A", Some(0))).await.unwrap();
        let b = repo.insert_parent_goal(new_parent("B", Some(1))).await.unwrap();

        let affected = repo
            .update_positions(vec![b.id.clone().unwrap(), a.id.clone().unwrap()])
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let titles: Vec<String> = repo
            .load_parent_goals()
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_update_sub_goal_and_batch_delete() {
        let (repo, _temp_dir) = create_test_repository();
        let parent = repo.insert_parent_goal(new_parent("Home", None)).await.unwrap();
        let parent_id = parent.id.unwrap();
        let a = repo.insert_sub_goal(new_sub(&parent_id, "Paint")).await.unwrap();
        let b = repo.insert_sub_goal(new_sub(&parent_id, "Tiles")).await.unwrap();

        let edited = repo
            .update_sub_goal(SubGoal {
                title: "Paint walls".to_string(),
                progress: 20.0,
                ..a.clone()
            })
            .await
            .unwrap();
        assert_eq!(edited.title, "Paint walls");
        assert_eq!(edited.parent_goal_id.as_deref(), Some(parent_id.as_str()));

        let deleted = repo
            .delete_sub_goals(vec![a.id.unwrap(), b.id.unwrap()])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(repo.get_parent_goal(&parent_id).unwrap().goals.is_empty());
    }
}
