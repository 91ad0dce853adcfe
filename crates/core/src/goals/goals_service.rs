use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::goals_model::{
    GoalSummary, NewParentGoal, NewSubGoal, ParentGoal, ParentGoalFormValues, ParentGoalUpdate,
    SubGoal, SubGoalData, SubGoalFormValues,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        GoalService {
            goal_repo,
            event_sink,
        }
    }

    fn require_title(title: &str) -> Result<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        Ok(trimmed.to_string())
    }

    fn require_id(id: &str, field: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                field.to_string(),
            )));
        }
        Ok(())
    }

    /// Progress is stored unclamped, but NaN and infinities are rejected.
    fn require_finite_progress(progress: f64) -> Result<f64> {
        if !progress.is_finite() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "progress must be a finite number, got {}",
                progress
            ))));
        }
        Ok(progress)
    }

    fn notify_changed(&self, parent_goal_ids: Vec<String>) {
        self.event_sink
            .emit(DomainEvent::goals_changed(parent_goal_ids));
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_parent_goals(&self) -> Result<Vec<ParentGoal>> {
        self.goal_repo.load_parent_goals()
    }

    fn get_parent_goal(&self, parent_goal_id: &str) -> Result<ParentGoal> {
        self.goal_repo.get_parent_goal(parent_goal_id)
    }

    fn get_goal_summaries(&self) -> Result<Vec<GoalSummary>> {
        Ok(self
            .goal_repo
            .load_parent_goals()?
            .into_iter()
            .map(GoalSummary::from)
            .collect())
    }

    async fn create_parent_goal(&self, values: ParentGoalFormValues) -> Result<ParentGoal> {
        let new_goal = NewParentGoal {
            title: Self::require_title(&values.title)?,
            description: values.description,
            position: values.position,
        };
        let created = self.goal_repo.insert_parent_goal(new_goal).await?;
        debug!("Created parent goal {:?}", created.id);
        self.notify_changed(created.id.iter().cloned().collect());
        Ok(created)
    }

    async fn update_parent_goal(&self, goal_update: ParentGoalUpdate) -> Result<ParentGoal> {
        Self::require_id(&goal_update.id, "id")?;
        let goal_update = ParentGoalUpdate {
            title: Self::require_title(&goal_update.title)?,
            ..goal_update
        };
        let updated = self.goal_repo.update_parent_goal(goal_update).await?;
        self.notify_changed(updated.id.iter().cloned().collect());
        Ok(updated)
    }

    async fn delete_parent_goal(&self, parent_goal_id: String) -> Result<usize> {
        Self::require_id(&parent_goal_id, "id")?;
        let deleted = self
            .goal_repo
            .delete_parent_goal(parent_goal_id.clone())
            .await?;
        if deleted > 0 {
            self.notify_changed(vec![parent_goal_id]);
        }
        Ok(deleted)
    }

    async fn reorder_parent_goals(&self, ordered_ids: Vec<String>) -> Result<usize> {
        if ordered_ids.is_empty() {
            return Ok(0);
        }
        let updated = self
            .goal_repo
            .update_positions(ordered_ids.clone())
            .await?;
        self.notify_changed(ordered_ids);
        Ok(updated)
    }

    async fn create_sub_goal(
        &self,
        parent_goal_id: String,
        values: SubGoalFormValues,
    ) -> Result<SubGoal> {
        Self::require_id(&parent_goal_id, "parentGoalId")?;
        let new_sub_goal = NewSubGoal {
            parent_goal_id: parent_goal_id.clone(),
            title: Self::require_title(&values.title)?,
            description: values.description,
            progress: 0.0,
        };
        let created = self.goal_repo.insert_sub_goal(new_sub_goal).await?;
        self.notify_changed(vec![parent_goal_id]);
        Ok(created)
    }

    async fn update_sub_goal(&self, data: SubGoalData) -> Result<SubGoal> {
        let sub_goal_id = data.id.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("id".to_string()))
        })?;
        let existing = self.goal_repo.get_sub_goal(&sub_goal_id)?;

        let progress = match data.progress {
            Some(p) => Self::require_finite_progress(p)?,
            None => existing.progress,
        };
        let merged = SubGoal {
            id: Some(sub_goal_id),
            title: Self::require_title(&data.title)?,
            description: data.description,
            progress,
            parent_goal_id: data.parent_goal_id.or(existing.parent_goal_id.clone()),
        };

        let updated = self.goal_repo.update_sub_goal(merged).await?;

        let mut touched: Vec<String> = existing.parent_goal_id.into_iter().collect();
        if let Some(parent_id) = &updated.parent_goal_id {
            if !touched.contains(parent_id) {
                touched.push(parent_id.clone());
            }
        }
        self.notify_changed(touched);
        Ok(updated)
    }

    async fn update_sub_goal_progress(
        &self,
        sub_goal_id: String,
        progress: f64,
    ) -> Result<SubGoal> {
        Self::require_id(&sub_goal_id, "id")?;
        let progress = Self::require_finite_progress(progress)?;
        let updated = self
            .goal_repo
            .update_sub_goal_progress(sub_goal_id, progress)
            .await?;
        self.notify_changed(updated.parent_goal_id.iter().cloned().collect());
        Ok(updated)
    }

    async fn delete_sub_goal(&self, sub_goal_id: String) -> Result<usize> {
        self.delete_sub_goals(vec![sub_goal_id]).await
    }

    async fn delete_sub_goals(&self, sub_goal_ids: Vec<String>) -> Result<usize> {
        let ids: Vec<String> = sub_goal_ids
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let mut parent_ids: Vec<String> = Vec::new();
        for id in &ids {
            let parent_id = match self.goal_repo.get_sub_goal(id) {
                Ok(sub_goal) => sub_goal.parent_goal_id,
                // Already gone; the delete below reports the real count.
                Err(Error::Database(DatabaseError::NotFound(_))) => None,
                Err(e) => return Err(e),
            };
            if let Some(parent_id) = parent_id {
                if !parent_ids.contains(&parent_id) {
                    parent_ids.push(parent_id);
                }
            }
        }

        let deleted = self.goal_repo.delete_sub_goals(ids).await?;
        if deleted > 0 {
            self.notify_changed(parent_ids);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct InMemoryGoalRepository {
        parents: RwLock<Vec<ParentGoal>>,
        next_id: RwLock<u32>,
        lookups_fail: AtomicBool,
    }

    impl InMemoryGoalRepository {
        fn next_id(&self, prefix: &str) -> String {
            let mut next = self.next_id.write().unwrap();
            *next += 1;
            format!("{}-{}", prefix, *next)
        }

        fn not_found(id: &str) -> Error {
            Error::Database(DatabaseError::NotFound(id.to_string()))
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for InMemoryGoalRepository {
        fn load_parent_goals(&self) -> Result<Vec<ParentGoal>> {
            let mut parents = self.parents.read().unwrap().clone();
            parents.sort_by_key(|p| p.position.unwrap_or(i32::MAX));
            Ok(parents)
        }

        fn get_parent_goal(&self, parent_goal_id: &str) -> Result<ParentGoal> {
            self.parents
                .read()
                .unwrap()
                .iter()
                .find(|p| p.id.as_deref() == Some(parent_goal_id))
                .cloned()
                .ok_or_else(|| Self::not_found(parent_goal_id))
        }

        fn get_sub_goal(&self, sub_goal_id: &str) -> Result<SubGoal> {
            if self.lookups_fail.load(Ordering::SeqCst) {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "disk I/O error".to_string(),
                )));
            }
            self.parents
                .read()
                .unwrap()
                .iter()
                .flat_map(|p| p.goals.iter())
                .find(|g| g.id.as_deref() == Some(sub_goal_id))
                .cloned()
                .ok_or_else(|| Self::not_found(sub_goal_id))
        }

        async fn insert_parent_goal(&self, new_goal: NewParentGoal) -> Result<ParentGoal> {
            let goal = ParentGoal {
                id: Some(self.next_id("parent")),
                title: new_goal.title,
                description: new_goal.description,
                position: new_goal.position,
                goals: Vec::new(),
            };
            self.parents.write().unwrap().push(goal.clone());
            Ok(goal)
        }

        async fn update_parent_goal(&self, goal_update: ParentGoalUpdate) -> Result<ParentGoal> {
            let mut parents = self.parents.write().unwrap();
            let parent = parents
                .iter_mut()
                .find(|p| p.id.as_deref() == Some(goal_update.id.as_str()))
                .ok_or_else(|| Self::not_found(&goal_update.id))?;
            parent.title = goal_update.title;
            parent.description = goal_update.description;
            parent.position = goal_update.position;
            Ok(parent.clone())
        }

        async fn delete_parent_goal(&self, parent_goal_id: String) -> Result<usize> {
            let mut parents = self.parents.write().unwrap();
            let before = parents.len();
            parents.retain(|p| p.id.as_deref() != Some(parent_goal_id.as_str()));
            Ok(before - parents.len())
        }

        async fn update_positions(&self, ordered_ids: Vec<String>) -> Result<usize> {
            let mut parents = self.parents.write().unwrap();
            let mut updated = 0;
            for (index, id) in ordered_ids.iter().enumerate() {
                if let Some(parent) = parents
                    .iter_mut()
                    .find(|p| p.id.as_deref() == Some(id.as_str()))
                {
                    parent.position = Some(index as i32);
                    updated += 1;
                }
            }
            Ok(updated)
        }

        async fn insert_sub_goal(&self, new_sub_goal: NewSubGoal) -> Result<SubGoal> {
            let sub_goal = SubGoal {
                id: Some(self.next_id("sub")),
                title: new_sub_goal.title,
                description: new_sub_goal.description,
                progress: new_sub_goal.progress,
                parent_goal_id: Some(new_sub_goal.parent_goal_id.clone()),
            };
            let mut parents = self.parents.write().unwrap();
            let parent = parents
                .iter_mut()
                .find(|p| p.id.as_deref() == Some(new_sub_goal.parent_goal_id.as_str()))
                .ok_or_else(|| {
                    Error::Database(DatabaseError::ForeignKeyViolation(
                        new_sub_goal.parent_goal_id.clone(),
                    ))
                })?;
            parent.goals.push(sub_goal.clone());
            Ok(sub_goal)
        }

        async fn update_sub_goal(&self, sub_goal: SubGoal) -> Result<SubGoal> {
            let id = sub_goal.id.clone().unwrap_or_default();
            let mut parents = self.parents.write().unwrap();
            for parent in parents.iter_mut() {
                parent.goals.retain(|g| g.id.as_deref() != Some(id.as_str()));
            }
            let target = sub_goal.parent_goal_id.clone().unwrap_or_default();
            let parent = parents
                .iter_mut()
                .find(|p| p.id.as_deref() == Some(target.as_str()))
                .ok_or_else(|| Self::not_found(&target))?;
            parent.goals.push(sub_goal.clone());
            Ok(sub_goal)
        }

        async fn update_sub_goal_progress(
            &self,
            sub_goal_id: String,
            progress: f64,
        ) -> Result<SubGoal> {
            let mut parents = self.parents.write().unwrap();
            let sub_goal = parents
                .iter_mut()
                .flat_map(|p| p.goals.iter_mut())
                .find(|g| g.id.as_deref() == Some(sub_goal_id.as_str()))
                .ok_or_else(|| Self::not_found(&sub_goal_id))?;
            sub_goal.progress = progress;
            Ok(sub_goal.clone())
        }

        async fn delete_sub_goals(&self, sub_goal_ids: Vec<String>) -> Result<usize> {
            let mut parents = self.parents.write().unwrap();
            let mut deleted = 0;
            for parent in parents.iter_mut() {
                let before = parent.goals.len();
                parent.goals.retain(|g| {
                    !g.id
                        .as_ref()
                        .map(|id| sub_goal_ids.contains(id))
                        .unwrap_or(false)
                });
                deleted += before - parent.goals.len();
            }
            Ok(deleted)
        }
    }

    fn service() -> (GoalService, MockDomainEventSink) {
        let sink = MockDomainEventSink::new();
        let service = GoalService::new(
            Arc::new(InMemoryGoalRepository::default()),
            Arc::new(sink.clone()),
        );
        (service, sink)
    }

    fn parent_form(title: &str, position: Option<i32>) -> ParentGoalFormValues {
        ParentGoalFormValues {
            title: title.to_string(),
            description: String::new(),
            position,
        }
    }

    fn sub_form(title: &str) -> SubGoalFormValues {
        SubGoalFormValues {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_parent_goal_rejects_blank_title() {
        let (service, sink) = service();
        let result = service.create_parent_goal(parent_form("   ", None)).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_create_parent_goal_trims_title_and_emits_event() {
        let (service, sink) = service();
        let goal = service
            .create_parent_goal(parent_form("  Ship v1  ", Some(0)))
            .await
            .unwrap();
        assert_eq!(goal.title, "Ship v1");
        assert_eq!(
            sink.events(),
            vec![DomainEvent::goals_changed(vec![goal.id.unwrap()])]
        );
    }

    #[tokio::test]
    async fn test_summaries_roll_up_sub_goal_progress() {
        let (service, _) = service();
        let parent = service
            .create_parent_goal(parent_form("Marathon", Some(0)))
            .await
            .unwrap();
        let parent_id = parent.id.unwrap();

        let a = service
            .create_sub_goal(parent_id.clone(), sub_form("10k"))
            .await
            .unwrap();
        let b = service
            .create_sub_goal(parent_id.clone(), sub_form("Half"))
            .await
            .unwrap();
        assert_eq!(a.progress, 0.0);

        service
            .update_sub_goal_progress(a.id.unwrap(), 50.0)
            .await
            .unwrap();
        service
            .update_sub_goal_progress(b.id.unwrap(), 100.0)
            .await
            .unwrap();

        let summaries = service.get_goal_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].progress, 75);
        assert_eq!(summaries[0].sub_goal_count, 2);
    }

    #[tokio::test]
    async fn test_progress_must_be_finite() {
        let (service, _) = service();
        let parent = service
            .create_parent_goal(parent_form("Guitar", None))
            .await
            .unwrap();
        let sub = service
            .create_sub_goal(parent.id.unwrap(), sub_form("Chords"))
            .await
            .unwrap();

        let result = service
            .update_sub_goal_progress(sub.id.clone().unwrap(), f64::NAN)
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));

        // Out-of-range values are stored as given.
        let updated = service
            .update_sub_goal_progress(sub.id.unwrap(), 140.0)
            .await
            .unwrap();
        assert_eq!(updated.progress, 140.0);
    }

    #[tokio::test]
    async fn test_update_sub_goal_requires_id_and_keeps_progress() {
        let (service, _) = service();
        let parent = service
            .create_parent_goal(parent_form("Garden", None))
            .await
            .unwrap();
        let sub = service
            .create_sub_goal(parent.id.clone().unwrap(), sub_form("Beds"))
            .await
            .unwrap();
        service
            .update_sub_goal_progress(sub.id.clone().unwrap(), 30.0)
            .await
            .unwrap();

        let missing_id = service
            .update_sub_goal(SubGoalData {
                title: "Beds".to_string(),
                ..SubGoalData::default()
            })
            .await;
        assert!(missing_id.is_err());

        let updated = service
            .update_sub_goal(SubGoalData {
                id: sub.id.clone(),
                title: "Raised beds".to_string(),
                description: "cedar".to_string(),
                progress: None,
                parent_goal_id: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.title, "Raised beds");
        assert_eq!(updated.progress, 30.0);
        assert_eq!(updated.parent_goal_id, parent.id);
    }

    #[tokio::test]
    async fn test_batch_delete_skips_blank_ids_and_reports_parents() {
        let (service, sink) = service();
        let parent = service
            .create_parent_goal(parent_form("Books", None))
            .await
            .unwrap();
        let parent_id = parent.id.unwrap();
        let a = service
            .create_sub_goal(parent_id.clone(), sub_form("Dune"))
            .await
            .unwrap();
        let b = service
            .create_sub_goal(parent_id.clone(), sub_form("Emma"))
            .await
            .unwrap();
        sink.clear();

        let deleted = service
            .delete_sub_goals(vec![a.id.unwrap(), b.id.unwrap(), " ".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(
            sink.events(),
            vec![DomainEvent::goals_changed(vec![parent_id.clone()])]
        );
        assert!(service.get_parent_goal(&parent_id).unwrap().goals.is_empty());

        assert_eq!(service.delete_sub_goals(vec![]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reorder_assigns_positions_in_order() {
        let (service, _) = service();
        let first = service
            .create_parent_goal(parent_form("First", Some(0)))
            .await
            .unwrap();
        let second = service
            .create_parent_goal(parent_form("Second", Some(1)))
            .await
            .unwrap();

        let updated = service
            .reorder_parent_goals(vec![second.id.clone().unwrap(), first.id.clone().unwrap()])
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let titles: Vec<String> = service
            .get_parent_goals()
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_delete_missing_parent_emits_nothing() {
        let (service, sink) = service();
        let deleted = service
            .delete_parent_goal("nope".to_string())
            .await
            .unwrap();
        assert_eq!(deleted, 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_batch_delete_propagates_lookup_failures() {
        let repo = Arc::new(InMemoryGoalRepository::default());
        let sink = MockDomainEventSink::new();
        let service = GoalService::new(repo.clone(), Arc::new(sink.clone()));
        let parent = service
            .create_parent_goal(parent_form("Books", None))
            .await
            .unwrap();
        let parent_id = parent.id.unwrap();
        let sub_goal = service
            .create_sub_goal(parent_id.clone(), sub_form("Dune"))
            .await
            .unwrap();
        sink.clear();

        // Unknown ids are skipped rather than failing the batch.
        let deleted = service
            .delete_sub_goals(vec!["missing".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 0);

        repo.lookups_fail.store(true, Ordering::SeqCst);
        let err = service
            .delete_sub_goals(vec![sub_goal.id.unwrap()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::QueryFailed(_))
        ));
        assert!(sink.is_empty());

        repo.lookups_fail.store(false, Ordering::SeqCst);
        assert_eq!(service.get_parent_goal(&parent_id).unwrap().goals.len(), 1);
    }
}
