#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use medremind_core::{
    KeyValueRepository, NotificationBackend, NotificationRequest, NotifyError, RepoError,
    RepoResult,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("unambiguous local time")
}

pub fn local_utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    local(y, mo, d, h, mi).with_timezone(&Utc)
}

/// Backend that records every posted request.
pub struct RecordingBackend {
    granted: bool,
    posted: Mutex<Vec<NotificationRequest>>,
}

impl RecordingBackend {
    pub fn granting() -> Self {
        Self {
            granted: true,
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn denying() -> Self {
        Self {
            granted: false,
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<NotificationRequest> {
        self.posted.lock().unwrap().clone()
    }
}

impl NotificationBackend for RecordingBackend {
    fn request_permission(&self) -> bool {
        self.granted
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.posted.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// In-memory repository whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyRepository {
    values: RefCell<HashMap<String, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl FlakyRepository {
    pub fn with_value(key: &str, value: &str) -> Self {
        let repo = Self::default();
        repo.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        repo
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueRepository for FlakyRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(RepoError::MissingTable("kv_entries"));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_value(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::MissingTable("kv_entries"));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
