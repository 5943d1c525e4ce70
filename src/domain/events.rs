use crate::domain::indicators::{IndicatorKind, Symbol};

/// Events raised by dashboard use cases
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    IndicatorLoaded { symbol: Symbol, kind: IndicatorKind, points: usize },
    IndicatorFailed { kind: IndicatorKind, reason: String },
    HistoryPageLoaded { page: u32, records: usize },
    /// `reason` is the bare collaborator message
    HistoryFetchFailed { reason: String },
    HistoryRecordDeleted { id: i64 },
    HistoryDeleteFailed { id: i64, reason: String },
    RecordDetailsFailed { id: i64, reason: String },
}

impl DashboardEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::IndicatorLoaded { .. } => "IndicatorLoaded",
            DashboardEvent::IndicatorFailed { .. } => "IndicatorFailed",
            DashboardEvent::HistoryPageLoaded { .. } => "HistoryPageLoaded",
            DashboardEvent::HistoryFetchFailed { .. } => "HistoryFetchFailed",
            DashboardEvent::HistoryRecordDeleted { .. } => "HistoryRecordDeleted",
            DashboardEvent::HistoryDeleteFailed { .. } => "HistoryDeleteFailed",
            DashboardEvent::RecordDetailsFailed { .. } => "RecordDetailsFailed",
        }
    }

    /// Text for a one-shot toast, `None` for events that stay silent
    pub fn notification(&self) -> Option<(NotificationLevel, String)> {
        match self {
            DashboardEvent::IndicatorFailed { reason, .. } => Some((NotificationLevel::Error, reason.clone())),
            DashboardEvent::HistoryFetchFailed { reason } => {
                Some((NotificationLevel::Error, format!("Error loading history: {}", reason)))
            }
            DashboardEvent::HistoryDeleteFailed { reason, .. } => {
                Some((NotificationLevel::Error, format!("Error deleting record: {}", reason)))
            }
            DashboardEvent::RecordDetailsFailed { reason, .. } => {
                Some((NotificationLevel::Error, format!("Error loading details: {}", reason)))
            }
            DashboardEvent::HistoryRecordDeleted { .. } => {
                Some((NotificationLevel::Success, "History record deleted successfully".to_string()))
            }
            DashboardEvent::IndicatorLoaded { .. } | DashboardEvent::HistoryPageLoaded { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

pub trait EventDispatcher {
    fn publish(&self, event: DashboardEvent);
}

/// Synchronous fan-out to registered handlers
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    handlers: Vec<Box<dyn Fn(&DashboardEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&DashboardEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish(&self, event: DashboardEvent) {
        crate::log_debug!(
            crate::domain::logging::LogComponent::Domain("Events"),
            "publish {}",
            event.event_type()
        );
        for handler in &self.handlers {
            handler(&event);
        }
    }
}
