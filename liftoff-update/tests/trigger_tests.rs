//! Timer, activation, and startup triggers as seen through the service.

mod common;

use common::{TestSetup, started_service, supported_environment};
use liftoff_config::UpdateConfig;
use liftoff_update::{EngineEvent, RequestOutcome, SkipReason, StartOutcome, TriggerScheduler};
use std::time::{Duration, Instant};

#[test]
fn test_timer_requests_once_per_interval() {
    let (mut service, calls) = started_service();
    let interval = service.scheduler().interval();
    let due = service.scheduler().next_tick().unwrap();

    assert_eq!(service.tick(due - Duration::from_secs(1)), None);
    assert_eq!(
        service.tick(due),
        Some(RequestOutcome::Issued { generation: 1 })
    );
    // Same instant again: already re-armed
    assert_eq!(service.tick(due), None);
    assert_eq!(calls.checks(), 1);

    service.handle_engine_event(EngineEvent::UpdateNotAvailable);
    assert_eq!(service.tick(due + interval - Duration::from_millis(1)), None);
    assert_eq!(
        service.tick(due + interval),
        Some(RequestOutcome::Issued { generation: 2 })
    );
    assert_eq!(calls.checks(), 2);
}

#[test]
fn test_second_start_does_not_add_a_timer() {
    let (mut service, calls) = TestSetup::default().build();
    service.start(&supported_environment(), false);
    let due = service.scheduler().next_tick().unwrap();

    assert_eq!(
        service.start(&supported_environment(), false),
        StartOutcome::AlreadyStarted
    );
    assert_eq!(service.scheduler().next_tick(), Some(due));

    service.tick(due);
    assert_eq!(calls.checks(), 1);
}

#[test]
fn test_register_timer_is_idempotent() {
    let mut scheduler = TriggerScheduler::new(Duration::from_secs(60));
    let t0 = Instant::now();
    assert!(scheduler.register_timer(t0));
    assert!(!scheduler.register_timer(t0 + Duration::from_secs(30)));
    assert_eq!(scheduler.next_tick(), Some(t0 + Duration::from_secs(60)));

    let fired = (0..=120)
        .filter(|s| scheduler.tick(t0 + Duration::from_secs(*s)))
        .count();
    assert_eq!(fired, 2);
}

#[test]
fn test_configured_interval_is_used() {
    let (service, _calls) = TestSetup {
        config: UpdateConfig {
            check_interval_ms: 5_000,
            ..UpdateConfig::default()
        },
        ..TestSetup::default()
    }
    .start();
    assert_eq!(service.scheduler().interval(), Duration::from_secs(5));
}

#[test]
fn test_tick_while_busy_is_gated() {
    let (mut service, calls) = started_service();
    let due = service.scheduler().next_tick().unwrap();
    service.request_update();

    assert_eq!(
        service.tick(due),
        Some(RequestOutcome::Skipped(SkipReason::Busy))
    );
    assert_eq!(calls.checks(), 1);
}

#[test]
fn test_stop_disarms_timer() {
    let (mut service, calls) = started_service();
    let due = service.scheduler().next_tick().unwrap();
    service.stop();

    assert!(!service.scheduler().has_timer());
    assert_eq!(service.tick(due + Duration::from_secs(3600)), None);
    assert_eq!(calls.checks(), 0);
}

#[test]
fn test_each_activation_is_a_trigger() {
    let (mut service, calls) = started_service();
    service.on_activate();
    service.handle_engine_event(EngineEvent::UpdateNotAvailable);
    service.on_activate();
    assert_eq!(calls.checks(), 2);
}
