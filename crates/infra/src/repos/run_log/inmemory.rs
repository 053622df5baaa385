use super::IRunLogRepo;
use crate::repos::shared::inmemory_repo::*;
use zelo_reminder_domain::{RunLogEntry, ID};

pub struct InMemoryRunLogRepo {
    runs: std::sync::Mutex<Vec<RunLogEntry>>,
}

impl InMemoryRunLogRepo {
    pub fn new() -> Self {
        Self {
            runs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRunLogRepo for InMemoryRunLogRepo {
    async fn insert(&self, entry: &RunLogEntry) -> anyhow::Result<()> {
        insert(entry, &self.runs);
        Ok(())
    }

    async fn patch(&self, entry: &RunLogEntry) -> anyhow::Result<()> {
        save(entry, &self.runs);
        Ok(())
    }

    async fn find(&self, run_id: &ID) -> Option<RunLogEntry> {
        find(run_id, &self.runs)
    }
}
