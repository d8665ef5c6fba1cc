mod common;

use chrono::NaiveDate;
use serde_json::json;
use smart_agenda_shared::HttpMethod;
use smart_agenda_shared::booking::BookingWizard;
use smart_agenda_shared::cache::{MONTH_QUERY_STALE_MS, Mutation, QueryCache, StalePolicy, keys};
use smart_agenda_shared::calendar::{CalendarLayout, PickerPosition};
use smart_agenda_shared::schedule::FixedScheduleOracle;

use common::fixtures::{self, ORG, RecordingTransport};

fn june_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

#[test]
fn test_booking_happy_path_sends_one_post() {
    common::init_test_logging();
    let oracle = FixedScheduleOracle::new();
    let mut transport = RecordingTransport::default();
    let mut wizard = BookingWizard::new();

    // Step 1
    wizard.service_id = fixtures::service().id;
    wizard.space_of_service_id = fixtures::space().id;
    wizard.select_customer(&fixtures::customer("c1", "Ana Souza", "11999999999"));
    wizard.description = "Primeira visita".to_string();
    assert!(wizard.next());

    // Step 2
    wizard.select_date(Some(june_10()));
    assert_eq!(CalendarLayout::for_state(wizard.calendar()).picker, PickerPosition::Offset);
    wizard.select_slot("08:00", &oracle);
    assert!(CalendarLayout::for_state(wizard.calendar()).summary_visible);
    assert!(wizard.next());

    // Step 3
    let summary = wizard.summary(&[fixtures::service()], &[fixtures::space()]);
    assert_eq!(summary.service, "Corte");
    assert_eq!(summary.space_of_service, "Sala 1");
    assert_eq!(summary.customer, "Ana Souza - 11999999999");
    assert_eq!(summary.date, "10/06/2025");
    assert_eq!(summary.time, "08:00");

    transport.send(wizard.submit(ORG).unwrap());

    assert_eq!(transport.sent.len(), 1);
    let request = &transport.sent[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/organizations/org_1/appointments");
    assert_eq!(
        request.body,
        Some(json!({
            "date": "2025-06-10T08:00:00Z",
            "description": "Primeira visita",
            "serviceId": "svc_1",
            "spaceOfServiceId": "space_1",
            "customerPhone": "11999999999"
        }))
    );
}

#[test]
fn test_taken_slot_keeps_next_disabled() {
    let oracle = FixedScheduleOracle::new();
    let mut wizard = BookingWizard::new();
    wizard.service_id = "svc_1".to_string();
    wizard.space_of_service_id = "space_1".to_string();
    wizard.select_customer(&fixtures::customer("c1", "Ana", "11999999999"));
    wizard.next();

    wizard.select_date(Some(june_10()));
    wizard.select_slot("08:30", &oracle);

    assert!(!wizard.can_advance());
    assert!(!wizard.next());
    assert_eq!(wizard.step(), 2);
    assert!(wizard.submit(ORG).is_err());
}

#[test]
fn test_success_invalidates_month_views_and_resets() {
    let oracle = FixedScheduleOracle::new();
    let mut cache = QueryCache::new();
    let month_key = keys::appointments_by_month(ORG, 6, 2025);
    cache.insert(month_key.clone(), &Vec::<String>::new(), StalePolicy::After(MONTH_QUERY_STALE_MS), 0);

    let mut wizard = BookingWizard::new();
    wizard.service_id = "svc_1".to_string();
    wizard.space_of_service_id = "space_1".to_string();
    wizard.select_customer(&fixtures::customer("c1", "Ana", "11999999999"));
    wizard.select_date(Some(june_10()));
    wizard.select_slot("09:00", &oracle);
    assert!(wizard.submit(ORG).is_ok());

    // Server answered 201
    cache.apply(&Mutation::Appointment { organization_id: ORG.to_string() });
    wizard.reset();

    assert!(!cache.is_fresh(&month_key, 1));
    assert_eq!(wizard.step(), 1);
    assert!(wizard.customer().is_none());
}
