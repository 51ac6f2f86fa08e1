//! Domain records and the reminder-bearing abstraction.
//!
//! # Responsibility
//! - Define medicine, appointment and inventory records.
//! - Project every record onto one canonical `Reminder` shape.
//!
//! # Invariants
//! - Only hour and minute of `schedule_time` matter for reminder matching.
//! - Persisted timestamps are ISO-8601 UTC strings with millisecond precision.

pub mod appointment;
pub mod inventory;
pub mod medicine;
pub mod reminder;

/// Serde adapter writing `DateTime<Utc>` as `2026-10-14T09:00:00.000Z`.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
