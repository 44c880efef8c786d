use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::config::Game;
use crate::domain::validation::require_client_name;
use crate::domain::{AuthContext, DateValidator, Earnings, JobRecord, JobStatus};
use crate::errors::TrackerError;
use crate::ladder::{build_ladder, resolve_range_in, Ladder};
use crate::storage::keys::jobs_key;
use crate::storage::{KeyLocks, KeyValueStore};
use crate::stores::jobs::{self, JobList};
use crate::stores::prices;

/// Raw form input for a new job
#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub client_name: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

/// Job list workflows. Jobs are priced on the Call of Duty: Mobile ladder.
///
/// Positions are 0-based indexes into the stored list.
pub struct JobService<S> {
    store: Arc<S>,
    ladder: Ladder,
    dates: DateValidator,
    locks: KeyLocks,
}

impl<S: KeyValueStore> JobService<S> {
    pub fn new(store: Arc<S>) -> Result<Self> {
        Ok(Self {
            store,
            ladder: build_ladder(),
            dates: DateValidator::new()?,
            locks: KeyLocks::new(),
        })
    }

    pub async fn create(&self, context: &AuthContext, form: &NewJob) -> Result<JobRecord> {
        let client_name = require_client_name(&form.client_name)?;
        let date = self.dates.parse(&form.date)?;
        let range = resolve_range_in(&self.ladder, &form.start, &form.end)?;

        let table = prices::load_prices(
            self.store.as_ref(),
            &context.username,
            Game::CallOfDutyMobile,
        )
        .await?;
        let total = range.total(&table);
        if range.is_empty() || total <= 0.0 {
            return Err(TrackerError::MissingData(
                "Please calculate a valid grind range with a non-zero total".to_string(),
            )
            .into());
        }

        let job = JobRecord::pending(client_name, date, range, total, Utc::now().timestamp_millis());

        let _guard = self.locks.lock(&jobs_key(&context.username)).await;
        jobs::append_job(self.store.as_ref(), &context.username, job.clone()).await?;

        info!(
            "{} saved job for {} ({} steps, total {})",
            context.username,
            job.client_name,
            job.range.len(),
            job.total
        );
        Ok(job)
    }

    pub async fn list(&self, context: &AuthContext) -> Result<Vec<JobRecord>> {
        jobs::list_jobs(self.store.as_ref(), &context.username).await
    }

    /// Jobs with the given status, paired with their list position
    pub async fn list_by_status(
        &self,
        context: &AuthContext,
        status: JobStatus,
    ) -> Result<Vec<(usize, JobRecord)>> {
        let all = self.list(context).await?;
        Ok(all
            .into_iter()
            .enumerate()
            .filter(|(_, job)| job.status == status)
            .collect())
    }

    pub async fn edit(
        &self,
        context: &AuthContext,
        position: usize,
        client_name: &str,
        date: &str,
    ) -> Result<JobRecord> {
        let client_name = require_client_name(client_name)?.to_string();
        let date = self.dates.parse(date)?;

        self.mutate(context, |list| {
            let job = job_at(list, position)?;
            job.client_name = client_name;
            job.date = date;
            Ok(job.clone())
        })
        .await
    }

    pub async fn set_status(
        &self,
        context: &AuthContext,
        position: usize,
        status: JobStatus,
    ) -> Result<JobRecord> {
        self.mutate(context, |list| {
            let job = job_at(list, position)?;
            job.status = status;
            Ok(job.clone())
        })
        .await
    }

    /// Remove permanently; returns the removed job
    pub async fn delete(&self, context: &AuthContext, position: usize) -> Result<JobRecord> {
        self.mutate(context, |list| {
            list.remove(position).ok_or(TrackerError::JobNotFound(position))
        })
        .await
    }

    pub async fn earnings(&self, context: &AuthContext) -> Result<Earnings> {
        let all = self.list(context).await?;
        Ok(Earnings::from_jobs(&all))
    }

    /// Read the whole list, change it in memory, write it back.
    /// Nothing is written when `change` fails; unreadable entries are kept.
    async fn mutate<T, F>(&self, context: &AuthContext, change: F) -> Result<T>
    where
        F: FnOnce(&mut JobList) -> Result<T, TrackerError>,
    {
        let _guard = self.locks.lock(&jobs_key(&context.username)).await;

        let mut list = jobs::load_job_list(self.store.as_ref(), &context.username).await?;
        let outcome = change(&mut list)?;
        jobs::save_job_list(self.store.as_ref(), &context.username, &list).await?;

        Ok(outcome)
    }
}

fn job_at(list: &mut JobList, position: usize) -> Result<&mut JobRecord, TrackerError> {
    list.get_mut(position)
        .ok_or(TrackerError::JobNotFound(position))
}
