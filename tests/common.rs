//! Common test utilities and in-memory collaborators
//!
//! Shared fakes for the backend, the cover storage and the confirmation
//! capability, used across the workflow tests. All backend and storage
//! calls are appended to a shared event log so tests can assert ordering
//! guarantees (upload before create, refetch after mutation).

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

use tana::api::RecordStore;
use tana::storage::CoverStorage;
use tana::types::{CreateManga, MangaRecord, ReadingStatus, ReleaseStatus, UpdateManga};
use tana::view::Confirm;
use tana::{Error, Result};

/// Shared, ordered log of backend and storage calls.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_of(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position_of(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

/// In-memory record store with switchable failures.
pub struct MockStore {
    log: CallLog,
    pub records: Mutex<Vec<MangaRecord>>,
    pub created: Mutex<Vec<CreateManga>>,
    pub updated: Mutex<Vec<(u64, UpdateManga)>>,
    pub fail_list: Mutex<bool>,
    pub fail_writes: Mutex<bool>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            records: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            fail_list: Mutex::new(false),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn with_records(log: CallLog, records: Vec<MangaRecord>) -> Self {
        let store = Self::new(log);
        *store.records.lock().unwrap() = records;
        store
    }

    pub fn set_fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn list(&self) -> Result<Vec<MangaRecord>> {
        self.log.push("list");
        if *self.fail_list.lock().unwrap() {
            return Err(Error::api(503, "backend unavailable"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, payload: &CreateManga) -> Result<()> {
        self.log.push("create");
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::api(500, "create rejected"));
        }
        self.created.lock().unwrap().push(payload.clone());

        let mut records = self.records.lock().unwrap();
        let next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(MangaRecord {
            id: Some(next_id),
            name: payload.name.clone(),
            total_chapters: payload.total_chapters,
            completed_chapters: payload.completed_chapters,
            comment: payload.comment.clone(),
            status: payload.status,
            release_status: payload.release_status,
            cover_image: payload.cover_image.clone(),
            user_id: Some(payload.user_id),
        });
        Ok(())
    }

    async fn update(&self, id: u64, payload: &UpdateManga) -> Result<()> {
        self.log.push(format!("update:{}", id));
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::api(500, "update rejected"));
        }
        self.updated.lock().unwrap().push((id, payload.clone()));

        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == Some(id)) {
            record.name = payload.name.clone();
            record.total_chapters = payload.total_chapters;
            record.completed_chapters = payload.completed_chapters;
            record.comment = payload.comment.clone();
            record.status = payload.status;
            record.release_status = payload.release_status;
            record.cover_image = payload.cover_image.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.log.push(format!("delete:{}", id));
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::api(500, "delete rejected"));
        }
        self.records.lock().unwrap().retain(|r| r.id != Some(id));
        Ok(())
    }
}

/// In-memory cover storage returning deterministic URLs.
pub struct MockCovers {
    log: CallLog,
    pub fail: Mutex<bool>,
}

#[allow(dead_code)]
impl MockCovers {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail: Mutex::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl CoverStorage for MockCovers {
    async fn upload(&self, file_name: &str, _data: Bytes) -> Result<String> {
        self.log.push("upload");
        if *self.fail.lock().unwrap() {
            return Err(Error::upload("bucket quota exceeded"));
        }
        Ok(format!("https://covers.test/{}", file_name))
    }
}

/// Scripted confirmation capability recording every prompt.
pub struct ScriptedConfirm {
    pub answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// A tracked record for seeding test collections.
#[allow(dead_code)]
pub fn sample_record(id: u64, name: &str, status: ReadingStatus) -> MangaRecord {
    MangaRecord {
        id: Some(id),
        name: name.to_string(),
        total_chapters: 100,
        completed_chapters: 50,
        comment: None,
        status,
        release_status: ReleaseStatus::Ongoing,
        cover_image: None,
        user_id: Some(1),
    }
}
