//! Persistent medicine store.

use crate::model::medicine::MedicineRecord;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Durable key holding the JSON array of medicines.
pub const MEDICINES_KEY: &str = "medicines";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    OutOfRange { index: usize, len: usize },
    /// Durable read failed; memory untouched.
    Read(RepoError),
    /// Durable write failed; memory already holds the change.
    Write(RepoError),
    /// Stored value is not a valid medicine array; memory untouched.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} medicine(s)")
            }
            Self::Read(err) => write!(f, "failed to read medicines: {err}"),
            Self::Write(err) => write!(f, "failed to persist medicines: {err}"),
            Self::Decode(err) => write!(f, "stored medicines are malformed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode medicines: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfRange { .. } => None,
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

/// Ordered medicine collection mirrored to a key-value repository.
///
/// Starts empty; call [`MedicineStore::load`] to hydrate.
pub struct MedicineStore<R: KeyValueRepository> {
    repo: R,
    medicines: Vec<MedicineRecord>,
}

impl<R: KeyValueRepository> MedicineStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            medicines: Vec::new(),
        }
    }

    /// Replaces memory with the durable collection.
    ///
    /// Returns the number of medicines now held. An absent key counts as
    /// "never written" and leaves memory as it is.
    pub fn load(&mut self) -> StoreResult<usize> {
        let stored = match self.repo.get_value(MEDICINES_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                error!("event=medicines_load module=store status=error error_code=read_failed error={err}");
                return Err(StoreError::Read(err));
            }
        };

        let Some(raw) = stored else {
            info!(
                "event=medicines_load module=store status=ok source=empty count={}",
                self.medicines.len()
            );
            return Ok(self.medicines.len());
        };

        match serde_json::from_str::<Vec<MedicineRecord>>(&raw) {
            Ok(medicines) => {
                self.medicines = medicines;
                info!(
                    "event=medicines_load module=store status=ok source=durable count={}",
                    self.medicines.len()
                );
                Ok(self.medicines.len())
            }
            Err(err) => {
                error!("event=medicines_load module=store status=error error_code=decode_failed error={err}");
                Err(StoreError::Decode(err))
            }
        }
    }

    /// Appends `record` and rewrites the durable collection.
    ///
    /// On `Err(StoreError::Write)` the record stays in memory.
    pub fn add(&mut self, record: MedicineRecord) -> StoreResult<usize> {
        self.medicines.push(record);
        let index = self.medicines.len() - 1;
        self.persist("medicines_add")?;
        Ok(index)
    }

    /// Removes the medicine at `index`, keeping the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<MedicineRecord> {
        let len = self.medicines.len();
        if index >= len {
            warn!("event=medicines_remove module=store status=error error_code=out_of_range index={index} len={len}");
            return Err(StoreError::OutOfRange { index, len });
        }
        let removed = self.medicines.remove(index);
        self.persist("medicines_remove")?;
        Ok(removed)
    }

    pub fn medicines(&self) -> &[MedicineRecord] {
        &self.medicines
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Medicines whose schedule falls on local calendar day `date`,
    /// paired with their store index.
    pub fn medicines_on(&self, date: NaiveDate) -> Vec<(usize, &MedicineRecord)> {
        self.medicines
            .iter()
            .enumerate()
            .filter(|(_, record)| record.schedule_time.with_timezone(&Local).date_naive() == date)
            .collect()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn persist(&self, event: &str) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.medicines).map_err(|err| {
            error!("event={event} module=store status=error error_code=encode_failed error={err}");
            StoreError::Encode(err)
        })?;
        match self.repo.set_value(MEDICINES_KEY, &encoded) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok count={}",
                    self.medicines.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=store status=error error_code=write_failed count={} error={err}",
                    self.medicines.len()
                );
                Err(StoreError::Write(err))
            }
        }
    }
}
