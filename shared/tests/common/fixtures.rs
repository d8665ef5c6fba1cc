use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use smart_agenda_shared::{ApiRequest, Customer, Service, SpaceOfService};

// Test fixtures for one organization's catalogue

pub const ORG: &str = "org_1";

pub fn customer(id: &str, name: &str, phone: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        organization_id: ORG.to_string(),
    }
}

pub fn service() -> Service {
    Service {
        id: "svc_1".to_string(),
        organization_id: Some(ORG.to_string()),
        name: "Corte".to_string(),
        description: "Corte masculino".to_string(),
        price: Decimal::new(4500, 2),
        duration: 30,
        observations: None,
        image: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

pub fn space() -> SpaceOfService {
    SpaceOfService {
        id: "space_1".to_string(),
        organization_id: Some(ORG.to_string()),
        name: "Sala 1".to_string(),
        description: "Cadeira principal".to_string(),
        created_at: "2025-01-01T12:00:00.000Z".to_string(),
        updated_at: None,
    }
}

/// Stand-in for the HTTP executor: records every request it is handed,
/// along with the `Authorization` header it would carry.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<ApiRequest>,
    pub authorizations: Vec<Option<String>>,
}

impl RecordingTransport {
    pub fn send(&mut self, request: ApiRequest) {
        self.send_authorized(request, None);
    }

    pub fn send_authorized(&mut self, request: ApiRequest, authorization: Option<String>) {
        self.sent.push(request);
        self.authorizations.push(authorization);
    }
}
