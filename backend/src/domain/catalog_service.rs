//! Task catalog service.
//!
//! Implements the [`TaskCatalogService`] driving port: ambassador-facing
//! catalog reads annotated with availability, admin CRUD, and first-boot
//! seeding of the default programme.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::eligibility::{EligibleTask, available_tasks};
use crate::domain::ports::{
    Clock, CreateTaskRequest, SubmissionLedger, TaskCatalogService, TaskRepository,
    UpdateTaskRequest,
};
use crate::domain::task::{NewTask, Task, TaskChanges, TaskId, TaskKind};
use crate::domain::user::User;

const DEFAULT_POINTS_REWARD: i32 = 50;
const ORIENTATION_POINTS: i32 = 100;
const SEEDED_PROGRAMME_DAYS: i32 = 15;

/// Activities seeded for days 1 through 15 of a fresh programme.
const DEFAULT_PROMOTIONS: [&str; 15] = [
    "Share brand story on social media",
    "Connect with 5 potential customers",
    "Create engaging content about our products",
    "Host a brand awareness event",
    "Write a product review blog post",
    "Organize a campus meetup",
    "Partner with student organizations",
    "Create video testimonials",
    "Run Instagram/TikTok campaigns",
    "Distribute promotional materials",
    "Conduct product demos",
    "Get feedback from 10 students",
    "Create brand awareness posters",
    "Network at college events",
    "Launch referral campaigns",
];

/// Catalog service implementing the [`TaskCatalogService`] driving port.
#[derive(Clone)]
pub struct TaskCatalogServiceImpl<T, L, C> {
    tasks: Arc<T>,
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<T, L, C> TaskCatalogServiceImpl<T, L, C> {
    /// Create the service over its collaborating ports.
    pub fn new(tasks: Arc<T>, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            ledger,
            clock,
        }
    }
}

fn validate_day(day: i32) -> Result<(), Error> {
    if day < 0 {
        return Err(Error::invalid_request("day must not be negative"));
    }
    Ok(())
}

fn validate_reward(points_reward: i32) -> Result<(), Error> {
    if points_reward < 0 {
        return Err(Error::invalid_request("points_reward must not be negative"));
    }
    Ok(())
}

fn required_field(value: &str, field: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

#[async_trait]
impl<T, L, C> TaskCatalogService for TaskCatalogServiceImpl<T, L, C>
where
    T: TaskRepository,
    L: SubmissionLedger,
    C: Clock,
{
    async fn tasks_for_user(&self, user: &User) -> Result<Vec<EligibleTask>, Error> {
        let catalog = self.tasks.list_active().await?;
        let completed = self.ledger.completed_task_ids(&user.id).await?;
        Ok(available_tasks(
            user.registered_at,
            self.clock.now(),
            catalog,
            &completed,
        ))
    }

    async fn all_tasks(&self) -> Result<Vec<Task>, Error> {
        Ok(self.tasks.list_active().await?)
    }

    async fn admin_tasks(&self) -> Result<Vec<Task>, Error> {
        Ok(self.tasks.list_all().await?)
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error> {
        validate_day(request.day)?;
        let title = required_field(&request.title, "title")?;
        let description = required_field(&request.description, "description")?;
        let points_reward = request.points_reward.unwrap_or(DEFAULT_POINTS_REWARD);
        validate_reward(points_reward)?;
        let task_type = request.task_type.unwrap_or(if request.day == 0 {
            TaskKind::Orientation
        } else {
            TaskKind::Daily
        });

        let task = self
            .tasks
            .insert(NewTask {
                day: request.day,
                title,
                description,
                task_type,
                points_reward,
                is_active: request.is_active.unwrap_or(true),
            })
            .await?;
        tracing::info!(task_id = %task.id, day = task.day, "created catalog task");
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> Result<Task, Error> {
        if let Some(day) = request.day {
            validate_day(day)?;
        }
        if let Some(points_reward) = request.points_reward {
            validate_reward(points_reward)?;
        }
        let title = request
            .title
            .map(|value| required_field(&value, "title"))
            .transpose()?;
        let description = request
            .description
            .map(|value| required_field(&value, "description"))
            .transpose()?;

        let changes = TaskChanges {
            day: request.day,
            title,
            description,
            task_type: request.task_type,
            points_reward: request.points_reward,
            is_active: request.is_active,
        };
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }

        let task = self.tasks.update(&id, changes).await?;
        tracing::info!(task_id = %task.id, "updated catalog task");
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Error> {
        self.tasks.delete(&id).await?;
        tracing::info!(task_id = %id, "deleted catalog task");
        Ok(())
    }

    async fn seed_default_catalog(&self) -> Result<usize, Error> {
        if self.tasks.count().await? > 0 {
            return Ok(0);
        }

        self.tasks
            .insert(NewTask {
                day: 0,
                title: "Complete Orientation".to_owned(),
                description: "Watch the orientation video and read the company documents. \
                              This will help you understand our mission and how to be an \
                              effective ambassador."
                    .to_owned(),
                task_type: TaskKind::Orientation,
                points_reward: ORIENTATION_POINTS,
                is_active: true,
            })
            .await?;

        for day in 1..=SEEDED_PROGRAMME_DAYS {
            let index = usize::try_from(day - 1).unwrap_or_default() % DEFAULT_PROMOTIONS.len();
            let activity = DEFAULT_PROMOTIONS[index];
            // Rewards ramp up as the programme progresses.
            let points_reward = DEFAULT_POINTS_REWARD + day * 5;
            self.tasks
                .insert(NewTask {
                    day,
                    title: format!("Day {day}: {activity}"),
                    description: format!(
                        "{activity}. Track your progress and share proof of your \
                         promotional activities."
                    ),
                    task_type: TaskKind::Daily,
                    points_reward,
                    is_active: true,
                })
                .await?;
        }

        let seeded = usize::try_from(SEEDED_PROGRAMME_DAYS).unwrap_or_default() + 1;
        tracing::info!(seeded, "seeded default task catalog");
        Ok(seeded)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
