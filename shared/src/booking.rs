//! Three-step appointment booking wizard.
//!
//! 1. service, space, customer and notes
//! 2. date and slot ([`CalendarState`])
//! 3. read-only summary and confirmation
//!
//! Steps move linearly. The only gate is on step 2: the wizard will not
//! leave it while no slot is chosen or the chosen slot is taken.

use chrono::NaiveDate;

use crate::calendar::CalendarState;
use crate::endpoints::{self, ApiRequest};
use crate::error::{FieldErrors, SubmitError};
use crate::format;
use crate::models::{CreateAppointmentRequest, Customer, Service, SpaceOfService};
use crate::schedule::AvailabilityOracle;
use crate::validation::Validator;

pub const STEPS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCustomer {
    pub phone: String,
    /// "name - phone"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWizard {
    step: u8,
    pub service_id: String,
    pub space_of_service_id: String,
    pub description: String,
    customer: Option<SelectedCustomer>,
    calendar: CalendarState,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self {
            step: 1,
            service_id: String::new(),
            space_of_service_id: String::new(),
            description: String::new(),
            customer: None,
            calendar: CalendarState::NoDateSelected,
        }
    }
}

/// Values rendered on the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub service: String,
    pub space_of_service: String,
    pub customer: String,
    /// dd/MM/yyyy
    pub date: String,
    /// HH:mm
    pub time: String,
    pub description: String,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn customer(&self) -> Option<&SelectedCustomer> {
        self.customer.as_ref()
    }

    pub fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    /// Availability of the chosen slot; false while none is chosen.
    pub fn is_available(&self) -> bool {
        self.calendar.slot().is_some_and(|slot| slot.available)
    }

    pub fn can_advance(&self) -> bool {
        match self.step {
            2 => self.is_available(),
            step => step < STEPS,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.step > 1
    }

    /// Advance one step. Returns false when refused.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            tracing::debug!(step = self.step, "wizard refused to advance");
            return false;
        }
        self.step += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.step -= 1;
        true
    }

    pub fn select_customer(&mut self, customer: &Customer) {
        self.customer = Some(SelectedCustomer {
            phone: customer.phone.clone(),
            label: customer.label(),
        });
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.calendar = self.calendar.select_date(date);
    }

    pub fn select_slot(&mut self, time: &str, oracle: &dyn AvailabilityOracle) {
        self.calendar = self.calendar.select_slot(time, oracle);
    }

    /// Replace the calendar state wholesale (the widget owns its transitions).
    pub fn set_calendar(&mut self, calendar: CalendarState) {
        self.calendar = calendar;
    }

    /// Build the creation payload. The appointment instant is the chosen
    /// date at the slot's start time, in UTC.
    pub fn payload(&self) -> Result<CreateAppointmentRequest, FieldErrors> {
        let start = match (&self.calendar, self.calendar.slot().and_then(|s| s.start())) {
            (CalendarState::SlotSelected { date, .. }, Some(time)) => Some(date.and_time(time)),
            _ => None,
        };

        Validator::new()
            .required(&self.service_id, "serviceId", "Selecione um serviço")
            .required(&self.space_of_service_id, "spaceOfServiceId", "Selecione um espaço de serviço")
            .error_if(self.customer.is_none(), "customerPhone", "Selecione um cliente")
            .error_if(start.is_none(), "date", "Selecione um horário")
            .error_if(
                start.is_some() && !self.is_available(),
                "date",
                "Horário indisponível",
            )
            .finish()?;

        match (start, &self.customer) {
            (Some(start), Some(customer)) => Ok(CreateAppointmentRequest {
                date: start.and_utc(),
                description: self.description.clone(),
                service_id: self.service_id.clone(),
                space_of_service_id: self.space_of_service_id.clone(),
                customer_phone: customer.phone.clone(),
            }),
            _ => Err(FieldErrors::default()),
        }
    }

    /// The single `POST .../appointments` performed on confirmation.
    pub fn submit(&self, organization_id: &str) -> Result<ApiRequest, SubmitError> {
        let payload = self.payload()?;
        Ok(endpoints::appointments::create(organization_id, &payload)?)
    }

    /// Names are looked up in the organization's lists; unknown ids show "-".
    pub fn summary(&self, services: &[Service], spaces: &[SpaceOfService]) -> BookingSummary {
        let service = services
            .iter()
            .find(|s| s.id == self.service_id)
            .map(|s| s.name.clone());
        let space = spaces
            .iter()
            .find(|s| s.id == self.space_of_service_id)
            .map(|s| s.name.clone());

        BookingSummary {
            service: service.unwrap_or_else(|| "-".to_string()),
            space_of_service: space.unwrap_or_else(|| "-".to_string()),
            customer: self
                .customer
                .as_ref()
                .map(|c| c.label.clone())
                .unwrap_or_else(|| "-".to_string()),
            date: self
                .calendar
                .date()
                .map(format::date_br)
                .unwrap_or_else(|| "-".to_string()),
            time: self
                .calendar
                .slot()
                .and_then(|s| s.start())
                .map(format::time_br)
                .unwrap_or_else(|| "-".to_string()),
            description: self.description.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::FixedScheduleOracle;
    use chrono::{TimeZone, Utc};

    fn ana() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Ana".to_string(),
            phone: "11999999999".to_string(),
            organization_id: "org_1".to_string(),
        }
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn filled() -> BookingWizard {
        let mut wizard = BookingWizard::new();
        wizard.service_id = "svc_1".to_string();
        wizard.space_of_service_id = "space_1".to_string();
        wizard.select_customer(&ana());
        wizard
    }

    #[test]
    fn test_step_one_advances_without_gate() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.can_go_back());
        assert!(wizard.next());
        assert_eq!(wizard.step(), 2);
    }

    #[test]
    fn test_step_two_requires_available_slot() {
        let oracle = FixedScheduleOracle::new();
        let mut wizard = filled();
        wizard.next();

        // No slot yet
        assert!(!wizard.next());

        wizard.select_date(Some(june_10()));
        wizard.select_slot("08:30", &oracle);
        assert!(!wizard.is_available());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), 2);

        wizard.select_slot("08:00", &oracle);
        assert!(wizard.next());
        assert_eq!(wizard.step(), 3);
        assert!(!wizard.next());
    }

    #[test]
    fn test_back_stops_at_first_step() {
        let mut wizard = BookingWizard::new();
        wizard.next();
        assert!(wizard.back());
        assert!(!wizard.back());
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_changing_date_drops_slot() {
        let oracle = FixedScheduleOracle::new();
        let mut wizard = filled();
        wizard.select_date(Some(june_10()));
        wizard.select_slot("08:00", &oracle);
        wizard.select_date(NaiveDate::from_ymd_opt(2025, 6, 11));
        assert!(!wizard.is_available());
        assert!(wizard.calendar().slot().is_none());
    }

    #[test]
    fn test_payload_composes_date_and_slot() {
        let oracle = FixedScheduleOracle::new();
        let mut wizard = filled();
        wizard.description = "Primeira visita".to_string();
        wizard.select_date(Some(june_10()));
        wizard.select_slot("09:00", &oracle);

        let payload = wizard.payload().unwrap();
        assert_eq!(payload.date, Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap());
        assert_eq!(payload.customer_phone, "11999999999");
        assert_eq!(payload.service_id, "svc_1");
        assert_eq!(payload.space_of_service_id, "space_1");
    }

    #[test]
    fn test_payload_reports_missing_fields() {
        let err = BookingWizard::new().payload().unwrap_err();
        assert!(err.has("serviceId"));
        assert!(err.has("spaceOfServiceId"));
        assert!(err.has("customerPhone"));
        assert_eq!(err.first("date"), Some("Selecione um horário"));
    }

    #[test]
    fn test_payload_rejects_taken_slot() {
        let oracle = FixedScheduleOracle::new();
        let mut wizard = filled();
        wizard.select_date(Some(june_10()));
        wizard.select_slot("08:30", &oracle);
        let err = wizard.payload().unwrap_err();
        assert_eq!(err.first("date"), Some("Horário indisponível"));
    }

    #[test]
    fn test_summary_and_reset() {
        let oracle = FixedScheduleOracle::new();
        let mut wizard = filled();
        wizard.select_date(Some(june_10()));
        wizard.select_slot("10:00", &oracle);

        let summary = wizard.summary(&[], &[]);
        assert_eq!(summary.customer, "Ana - 11999999999");
        assert_eq!(summary.date, "10/06/2025");
        assert_eq!(summary.time, "10:00");
        assert_eq!(summary.service, "-");

        wizard.reset();
        assert_eq!(wizard, BookingWizard::new());
    }
}
