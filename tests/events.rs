use insight_dashboard_wasm::domain::events::{
    DashboardEvent, EventDispatcher, InMemoryEventDispatcher, NotificationLevel,
};
use insight_dashboard_wasm::domain::indicators::{IndicatorKind, Symbol};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn dispatcher_fans_out_to_every_handler() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = InMemoryEventDispatcher::new();
    for tag in ["a", "b"] {
        let seen = Rc::clone(&seen);
        dispatcher.subscribe(move |event| seen.borrow_mut().push(format!("{}:{}", tag, event.event_type())));
    }

    dispatcher.publish(DashboardEvent::HistoryRecordDeleted { id: 7 });
    assert_eq!(*seen.borrow(), vec!["a:HistoryRecordDeleted", "b:HistoryRecordDeleted"]);
}

#[test]
fn failures_become_error_toasts() {
    let fetch = DashboardEvent::HistoryFetchFailed { reason: "timeout".to_string() };
    assert_eq!(fetch.notification(), Some((NotificationLevel::Error, "Error loading history: timeout".to_string())));

    let delete = DashboardEvent::HistoryDeleteFailed { id: 3, reason: "Not Found".to_string() };
    assert_eq!(delete.notification(), Some((NotificationLevel::Error, "Error deleting record: Not Found".to_string())));

    let details = DashboardEvent::RecordDetailsFailed { id: 3, reason: "Not Found".to_string() };
    assert_eq!(details.notification().unwrap().1, "Error loading details: Not Found");
}

#[test]
fn delete_success_is_announced() {
    let event = DashboardEvent::HistoryRecordDeleted { id: 1 };
    assert_eq!(
        event.notification(),
        Some((NotificationLevel::Success, "History record deleted successfully".to_string()))
    );
}

#[test]
fn loads_are_silent() {
    let symbol = Symbol::new("aapl").unwrap();
    assert_eq!(symbol.value(), "AAPL");
    let loaded = DashboardEvent::IndicatorLoaded { symbol, kind: IndicatorKind::Rsi, points: 100 };
    assert!(loaded.notification().is_none());
    assert!(DashboardEvent::HistoryPageLoaded { page: 0, records: 25 }.notification().is_none());
}
