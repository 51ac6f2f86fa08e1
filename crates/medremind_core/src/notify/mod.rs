//! Notification scheduler boundary.
//!
//! # Responsibility
//! - Define the platform seam that posts local notifications.
//! - Gate every schedule request on a freshly requested permission.
//!
//! # Invariants
//! - Triggers are hour/minute of day in local time and repeat daily.
//! - A denied permission or backend failure is logged and swallowed;
//!   callers only see the `ScheduleOutcome`.

use chrono::{DateTime, Local, Timelike, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    Backend(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "notification backend failed: {message}"),
        }
    }
}

impl Error for NotifyError {}

/// Daily-repeating time-of-day trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

impl DailyTrigger {
    /// Derives the trigger from the local hour and minute of `at`.
    pub fn from_time(at: DateTime<Utc>) -> Self {
        let local = at.with_timezone(&Local);
        Self {
            hour: local.hour(),
            minute: local.minute(),
            repeats: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub trigger: DailyTrigger,
}

/// Platform adapters implement this to deliver notifications.
pub trait NotificationBackend: Send + Sync {
    fn request_permission(&self) -> bool;
    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

impl<B: NotificationBackend + ?Sized> NotificationBackend for &B {
    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        (**self).post(request)
    }
}

impl<B: NotificationBackend + ?Sized> NotificationBackend for Arc<B> {
    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        (**self).post(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled,
    PermissionDenied,
    Failed,
}

/// Permission-gated front of a [`NotificationBackend`].
pub struct Notifier<B: NotificationBackend> {
    backend: B,
}

impl<B: NotificationBackend> Notifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Requests a daily notification at the local time-of-day of `trigger_time`.
    pub fn schedule(
        &self,
        title: &str,
        body: &str,
        trigger_time: DateTime<Utc>,
    ) -> ScheduleOutcome {
        if !self.backend.request_permission() {
            warn!("event=notification_schedule module=notify status=skipped reason=permission_denied");
            return ScheduleOutcome::PermissionDenied;
        }

        let request = NotificationRequest {
            title: title.to_string(),
            body: body.to_string(),
            trigger: DailyTrigger::from_time(trigger_time),
        };
        match self.backend.post(&request) {
            Ok(()) => {
                info!(
                    "event=notification_schedule module=notify status=ok hour={} minute={} repeats={}",
                    request.trigger.hour, request.trigger.minute, request.trigger.repeats
                );
                ScheduleOutcome::Scheduled
            }
            Err(err) => {
                error!("event=notification_schedule module=notify status=error error={err}");
                ScheduleOutcome::Failed
            }
        }
    }
}

/// Backend that grants permission and only logs posted triggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationBackend;

impl NotificationBackend for LogNotificationBackend {
    fn request_permission(&self) -> bool {
        true
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        info!(
            "event=notification_post module=notify status=ok backend=log hour={:02} minute={:02}",
            request.trigger.hour, request.trigger.minute
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationBackend, NotificationRequest, Notifier, NotifyError, ScheduleOutcome};
    use chrono::{Local, TimeZone, Utc};
    use std::sync::Mutex;

    struct ScriptedBackend {
        granted: bool,
        fail: bool,
        posted: Mutex<Vec<NotificationRequest>>,
    }

    impl ScriptedBackend {
        fn new(granted: bool, fail: bool) -> Self {
            Self {
                granted,
                fail,
                posted: Mutex::new(Vec::new()),
            }
        }
    }

    impl NotificationBackend for ScriptedBackend {
        fn request_permission(&self) -> bool {
            self.granted
        }

        fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Backend("offline".to_string()));
            }
            self.posted.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    #[test]
    fn trigger_uses_local_hour_and_minute_and_repeats() {
        let at = Local
            .with_ymd_and_hms(2026, 10, 14, 21, 45, 30)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let notifier = Notifier::new(ScriptedBackend::new(true, false));

        assert_eq!(
            notifier.schedule("t", "b", at),
            ScheduleOutcome::Scheduled
        );
        let posted = notifier.backend().posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].trigger.hour, 21);
        assert_eq!(posted[0].trigger.minute, 45);
        assert!(posted[0].trigger.repeats);
    }

    #[test]
    fn denied_permission_posts_nothing() {
        let notifier = Notifier::new(ScriptedBackend::new(false, false));
        let outcome = notifier.schedule("t", "b", Utc::now());
        assert_eq!(outcome, ScheduleOutcome::PermissionDenied);
        assert!(notifier.backend().posted.lock().unwrap().is_empty());
    }

    #[test]
    fn backend_failure_is_reported_as_failed() {
        let notifier = Notifier::new(ScriptedBackend::new(true, true));
        assert_eq!(notifier.schedule("t", "b", Utc::now()), ScheduleOutcome::Failed);
    }
}
