use anyhow::{bail, Result};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::domain::JobRecord;
use crate::storage::keys::jobs_key;
use crate::storage::{load_json, save_json, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum StoredEntry {
    Job(JobRecord),
    /// Written back exactly as it was read
    Unreadable(Value),
}

/// A user's stored job list.
///
/// Entries that do not decode into a valid [`JobRecord`] keep their slot and
/// are written back untouched. Positions count readable jobs only, in
/// stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JobList {
    entries: Vec<StoredEntry>,
}

impl JobList {
    pub fn jobs(&self) -> impl Iterator<Item = &JobRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            StoredEntry::Job(job) => Some(job),
            StoredEntry::Unreadable(_) => None,
        })
    }

    pub fn into_jobs(self) -> Vec<JobRecord> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                StoredEntry::Job(job) => Some(job),
                StoredEntry::Unreadable(_) => None,
            })
            .collect()
    }

    /// Readable jobs
    pub fn len(&self) -> usize {
        self.jobs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unreadable(&self) -> usize {
        self.entries.len() - self.len()
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut JobRecord> {
        let slot = self.slot_of(position)?;
        match &mut self.entries[slot] {
            StoredEntry::Job(job) => Some(job),
            StoredEntry::Unreadable(_) => None,
        }
    }

    pub fn remove(&mut self, position: usize) -> Option<JobRecord> {
        let slot = self.slot_of(position)?;
        match self.entries.remove(slot) {
            StoredEntry::Job(job) => Some(job),
            StoredEntry::Unreadable(_) => None,
        }
    }

    pub fn push(&mut self, job: JobRecord) {
        self.entries.push(StoredEntry::Job(job));
    }

    fn slot_of(&self, position: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches!(entry, StoredEntry::Job(_)))
            .nth(position)
            .map(|(slot, _)| slot)
    }
}

pub async fn load_job_list<S: KeyValueStore>(store: &S, username: &str) -> Result<JobList> {
    let key = jobs_key(username);
    let Some(raw) = load_json::<S, Value>(store, &key).await? else {
        return Ok(JobList::default());
    };

    let Value::Array(entries) = raw else {
        bail!("Expected a list of jobs under {key}");
    };

    let list = JobList {
        entries: entries
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| decode_entry(idx, entry))
            .collect(),
    };
    if list.unreadable() > 0 {
        warn!("{} unreadable jobs kept as stored under {}", list.unreadable(), key);
    }
    Ok(list)
}

fn decode_entry(idx: usize, entry: Value) -> StoredEntry {
    match serde_json::from_value::<JobRecord>(entry.clone()) {
        Ok(job) if job.is_well_formed() => StoredEntry::Job(job),
        Ok(_) => {
            warn!("Malformed job at position {idx}");
            StoredEntry::Unreadable(entry)
        }
        Err(e) => {
            warn!("Unreadable job at position {idx}: {e}");
            StoredEntry::Unreadable(entry)
        }
    }
}

/// Every readable job for a user, in insertion order
pub async fn list_jobs<S: KeyValueStore>(store: &S, username: &str) -> Result<Vec<JobRecord>> {
    Ok(load_job_list(store, username).await?.into_jobs())
}

/// Not atomic: callers must hold the key lock across load + append.
pub async fn append_job<S: KeyValueStore>(store: &S, username: &str, job: JobRecord) -> Result<()> {
    let mut list = load_job_list(store, username).await?;
    list.push(job);
    save_job_list(store, username, &list).await
}

pub async fn save_job_list<S: KeyValueStore>(
    store: &S,
    username: &str,
    list: &JobList,
) -> Result<()> {
    let key = jobs_key(username);
    save_json(store, &key, list).await?;
    debug!("Wrote {} jobs to {}", list.entries.len(), key);
    Ok(())
}
