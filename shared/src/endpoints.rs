//! Catalogue of backend REST calls.
//!
//! Each function describes exactly one HTTP request; the frontend's executor
//! attaches the bearer token and performs it. Keeping the description pure
//! lets the request shape be asserted without a browser.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the API origin, always starting with '/'
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Prefix for errors raised by this operation
    pub context: &'static str,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: String, context: &'static str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            context,
        }
    }

    fn get(path: String, context: &'static str) -> Self {
        Self::new(HttpMethod::Get, path, context)
    }

    fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn with_body<B: Serialize>(
        method: HttpMethod,
        path: String,
        context: &'static str,
        body: &B,
    ) -> ApiResult<Self> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::new(context, ApiErrorKind::Encode(e.to_string())))?;
        Ok(Self {
            body: Some(body),
            ..Self::new(method, path, context)
        })
    }

    /// Full URL for the given origin, query string included.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

fn org_path(organization_id: &str, rest: &str) -> String {
    format!("/organizations/{}{}", urlencoding::encode(organization_id), rest)
}

fn iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub mod organizations {
    use super::*;

    pub fn list() -> ApiRequest {
        ApiRequest::get("/organizations".to_string(), "Failed to fetch organizations")
    }

    pub fn create(data: &CreateOrganizationRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Post,
            "/organizations".to_string(),
            "Failed to create organization",
            data,
        )
    }

    pub fn update(id: &str, data: &UpdateOrganizationRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Put,
            format!("/organizations/{}", urlencoding::encode(id)),
            "Failed to update organization",
            data,
        )
    }
}

pub mod customers {
    use super::*;

    pub fn list(organization_id: &str) -> ApiRequest {
        ApiRequest::get(org_path(organization_id, "/customers"), "Failed to fetch customers")
    }

    pub fn by_id(organization_id: &str, id: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/customers/id/{}", urlencoding::encode(id))),
            "Failed to fetch customer by id",
        )
    }

    pub fn by_phone(organization_id: &str, phone: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/customers/phone/{}", urlencoding::encode(phone))),
            "Failed to fetch customer by phone",
        )
    }

    pub fn by_name(organization_id: &str, name: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/customers/name/{}", urlencoding::encode(name))),
            "Failed to fetch customers by name",
        )
    }

    pub fn create(data: &CreateCustomerRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Post,
            org_path(&data.organization_id, "/customers"),
            "Failed to create customer",
            data,
        )
    }

    pub fn update(
        organization_id: &str,
        id: &str,
        data: &UpdateCustomerRequest,
    ) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Patch,
            org_path(organization_id, &format!("/customers/id/{}", urlencoding::encode(id))),
            "Failed to update customer",
            data,
        )
    }
}

pub mod services {
    use super::*;

    pub fn list(organization_id: &str) -> ApiRequest {
        ApiRequest::get(org_path(organization_id, "/services"), "Failed to fetch services")
    }

    pub fn by_id(organization_id: &str, id: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/services/id/{}", urlencoding::encode(id))),
            "Failed to fetch service by id",
        )
    }

    pub fn by_name(organization_id: &str, name: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/services/name/{}", urlencoding::encode(name))),
            "Failed to fetch service by name",
        )
    }

    pub fn create(data: &CreateServiceRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Post,
            org_path(&data.organization_id, "/services"),
            "Failed to create service",
            data,
        )
    }

    pub fn update(
        organization_id: &str,
        id: &str,
        data: &UpdateServiceRequest,
    ) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Patch,
            org_path(organization_id, &format!("/services/id/{}", urlencoding::encode(id))),
            "Failed to update service",
            data,
        )
    }
}

pub mod spaces {
    use super::*;

    pub fn list(organization_id: &str) -> ApiRequest {
        // The backend route is registered with the trailing slash
        ApiRequest::get(
            org_path(organization_id, "/spaceofservices/"),
            "Failed to fetch spaces of service",
        )
    }

    pub fn by_id(organization_id: &str, id: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/spaceofservices/id/{}", urlencoding::encode(id))),
            "Failed to fetch space of service by id",
        )
    }

    pub fn by_name(organization_id: &str, name: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/spaceofservices/name/{}", urlencoding::encode(name))),
            "Failed to fetch space of service by name",
        )
    }

    pub fn create(data: &CreateSpaceOfServiceRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Post,
            org_path(&data.organization_id, "/spaceofservices"),
            "Failed to create space of service",
            data,
        )
    }

    pub fn update(
        organization_id: &str,
        id: &str,
        data: &UpdateSpaceOfServiceRequest,
    ) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Put,
            org_path(organization_id, &format!("/spaceofservices/{}", urlencoding::encode(id))),
            "Failed to update space of service",
            data,
        )
    }
}

pub mod appointments {
    use super::*;

    /// Status transitions exposed as dedicated PATCH routes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Transition {
        Cancel,
        Complete,
        Delete,
    }

    impl Transition {
        fn segment(&self) -> &'static str {
            match self {
                Transition::Cancel => "cancel",
                Transition::Complete => "complete",
                Transition::Delete => "delete",
            }
        }

        fn context(&self) -> &'static str {
            match self {
                Transition::Cancel => "Failed to cancel appointment",
                Transition::Complete => "Failed to complete appointment",
                Transition::Delete => "Failed to delete appointment",
            }
        }
    }

    pub fn list(organization_id: &str) -> ApiRequest {
        ApiRequest::get(org_path(organization_id, "/appointments"), "Failed to fetch appointments")
    }

    pub fn by_id(organization_id: &str, id: &str) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, &format!("/appointments/id/{}", urlencoding::encode(id))),
            "Failed to fetch appointment",
        )
    }

    /// `month` is 1-based
    pub fn by_month(organization_id: &str, month: u32, year: i32) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, "/appointments/by-month"),
            "Failed to fetch appointments by month",
        )
        .with_query("month", month)
        .with_query("year", year)
    }

    pub fn by_date_range(
        organization_id: &str,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> ApiRequest {
        ApiRequest::get(
            org_path(organization_id, "/appointments/list/by-date-range"),
            "Failed to fetch appointments by date range",
        )
        .with_query("startDate", iso(start))
        .with_query("endDate", iso(end))
    }

    pub fn create(organization_id: &str, data: &CreateAppointmentRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Post,
            org_path(organization_id, "/appointments"),
            "Failed to create appointment",
            data,
        )
    }

    pub fn update(organization_id: &str, data: &UpdateAppointmentRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Put,
            org_path(organization_id, "/appointments"),
            "Failed to update appointment",
            data,
        )
    }

    pub fn transition(organization_id: &str, id: &str, transition: Transition) -> ApiRequest {
        ApiRequest::new(
            HttpMethod::Patch,
            org_path(
                organization_id,
                &format!("/appointments/{}/{}", urlencoding::encode(id), transition.segment()),
            ),
            transition.context(),
        )
    }

    pub fn reschedule(
        organization_id: &str,
        id: &str,
        data: &RescheduleAppointmentRequest,
    ) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(
            HttpMethod::Patch,
            org_path(organization_id, &format!("/appointments/{}/reschedule", urlencoding::encode(id))),
            "Failed to reschedule appointment",
            data,
        )
    }
}

pub mod users {
    use super::*;

    pub fn current() -> ApiRequest {
        ApiRequest::get("/users".to_string(), "Failed to fetch users")
    }

    pub fn sign_in(data: &SessionRequest) -> ApiResult<ApiRequest> {
        ApiRequest::with_body(HttpMethod::Post, "/sessions".to_string(), "Failed to sign in", data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_list_paths() {
        assert_eq!(customers::list("org_1").path, "/organizations/org_1/customers");
        assert_eq!(services::list("org_1").path, "/organizations/org_1/services");
        assert_eq!(spaces::list("org_1").path, "/organizations/org_1/spaceofservices/");
        assert_eq!(organizations::list().path, "/organizations");
        assert_eq!(users::current().method, HttpMethod::Get);
    }

    #[test]
    fn test_search_path_is_encoded() {
        let request = customers::by_name("org_1", "Ana Clara");
        assert_eq!(request.path, "/organizations/org_1/customers/name/Ana%20Clara");
        assert_eq!(request.context, "Failed to fetch customers by name");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let request = appointments::by_date_range("org 1", &start, &start);
        assert_eq!(
            request.url("http://localhost:3333"),
            "http://localhost:3333/organizations/org%201/appointments/list/by-date-range\
             ?startDate=2025-06-01T00%3A00%3A00.000Z&endDate=2025-06-01T00%3A00%3A00.000Z"
        );
    }

    #[test]
    fn test_by_month_query() {
        let request = appointments::by_month("org_1", 6, 2025);
        assert_eq!(
            request.url("http://localhost:3333/"),
            "http://localhost:3333/organizations/org_1/appointments/by-month?month=6&year=2025"
        );
    }

    #[test]
    fn test_date_range_uses_iso_timestamps() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();
        let request = appointments::by_date_range("org_1", &start, &end);
        assert_eq!(
            request.query,
            vec![
                ("startDate".to_string(), "2025-06-01T00:00:00.000Z".to_string()),
                ("endDate".to_string(), "2025-06-30T23:59:59.000Z".to_string()),
            ]
        );
    }

    #[test]
    fn test_transitions_are_patches_without_body() {
        let request = appointments::transition("org_1", "apt_7", appointments::Transition::Delete);
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.path, "/organizations/org_1/appointments/apt_7/delete");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_update_customer_sends_only_changed_fields() {
        let data = UpdateCustomerRequest {
            name: Some("Ana".to_string()),
            phone: None,
        };
        let request = customers::update("org_1", "c1", &data).unwrap();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.path, "/organizations/org_1/customers/id/c1");
        assert_eq!(request.body, Some(json!({ "name": "Ana" })));
    }

    #[test]
    fn test_space_update_is_put() {
        let request = spaces::update("org_1", "s1", &UpdateSpaceOfServiceRequest::default()).unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/organizations/org_1/spaceofservices/s1");
    }
}
