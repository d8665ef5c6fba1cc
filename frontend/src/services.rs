// API service layer for communicating with backend
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, de::DeserializeOwned};

use smart_agenda_shared::session::{SessionGuard, SessionStore};
use smart_agenda_shared::{ApiError, ApiErrorKind, ApiRequest, ApiResult, HttpMethod};

use crate::config::AppConfig;

// ============================================
// SESSION
// ============================================

/// Session keys live in the browser's local storage.
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::set(key, value) {
            tracing::warn!(key, error = %e, "could not persist session value");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

thread_local! {
    static CONFIG: AppConfig = AppConfig::from_env();
    static SESSION: SessionGuard<BrowserSessionStore> = SessionGuard::new(BrowserSessionStore);
}

pub fn with_session<R>(f: impl FnOnce(&SessionGuard<BrowserSessionStore>) -> R) -> R {
    SESSION.with(f)
}

/// Full page navigation, dropping all in-memory state.
pub fn hard_redirect(route: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(route) {
        tracing::error!(route, error = ?e, "navigation failed");
    }
}

// ============================================
// HTTP CLIENT
// ============================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct ApiClient;

impl ApiClient {
    fn builder(request: &ApiRequest) -> RequestBuilder {
        let url = CONFIG.with(|config| request.url(&config.api_url));
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Patch => Request::patch(&url),
        };
        if let Some(authorization) = with_session(|session| session.authorization()) {
            builder = builder.header("Authorization", &authorization);
        }
        builder
    }

    async fn send(request: &ApiRequest) -> ApiResult<Response> {
        let builder = Self::builder(request);
        tracing::debug!(method = request.method.as_str(), path = %request.path, "request");

        let sent = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ApiError::new(request.context, ApiErrorKind::Encode(e.to_string())))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent
            .map_err(|e| ApiError::new(request.context, ApiErrorKind::Network(e.to_string())))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        if let Some(route) = with_session(|session| session.on_status(status)) {
            hard_redirect(route);
        }
        if status == 401 {
            return Err(ApiError::new(request.context, ApiErrorKind::Unauthorized));
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_default();
        tracing::warn!(status, context = request.context, %message, "request failed");
        Err(ApiError::new(request.context, ApiErrorKind::Status { status, message }))
    }

    pub async fn execute<T: DeserializeOwned>(request: ApiRequest) -> ApiResult<T> {
        let response = Self::send(&request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(request.context, ApiErrorKind::Decode(e.to_string())))
    }

    /// For calls whose response body is not used.
    pub async fn execute_unit(request: ApiRequest) -> ApiResult<()> {
        Self::send(&request).await.map(|_| ())
    }
}

// ============================================
// USERS & SESSIONS
// ============================================

pub mod users {
    use super::*;
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::{SessionRequest, SessionResponse, User, UserEnvelope};

    pub async fn current() -> ApiResult<User> {
        let envelope: UserEnvelope = ApiClient::execute(endpoints::users::current()).await?;
        Ok(envelope.user)
    }

    /// Exchange credentials for a token and store it.
    pub async fn sign_in(email: String, password: String) -> ApiResult<()> {
        let request = endpoints::users::sign_in(&SessionRequest { email, password })?;
        let context = request.context;
        let response: SessionResponse = ApiClient::execute(request).await?;
        match response.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                with_session(|session| session.sign_in(&token));
                tracing::info!("signed in");
                Ok(())
            }
            None => Err(ApiError::new(
                context,
                ApiErrorKind::Decode("missing access_token".to_string()),
            )),
        }
    }
}

// ============================================
// ORGANIZATIONS
// ============================================

pub mod organizations {
    use super::*;
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::{CreateOrganizationRequest, Organization, OrganizationsEnvelope};

    pub async fn list() -> ApiResult<Vec<Organization>> {
        let envelope: OrganizationsEnvelope =
            ApiClient::execute(endpoints::organizations::list()).await?;
        Ok(envelope.organizations.into_iter().map(Organization::from).collect())
    }

    pub async fn create(name: String) -> ApiResult<()> {
        let request = endpoints::organizations::create(&CreateOrganizationRequest { name })?;
        ApiClient::execute_unit(request).await
    }
}

// ============================================
// CUSTOMERS
// ============================================

pub mod customers {
    use super::*;
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::{Customer, CustomerSearchResponse, CustomersEnvelope};

    pub async fn list(organization_id: String) -> ApiResult<Vec<Customer>> {
        let envelope: CustomersEnvelope =
            ApiClient::execute(endpoints::customers::list(&organization_id)).await?;
        Ok(envelope.customers)
    }

    pub async fn search(organization_id: String, name: String) -> ApiResult<Vec<Customer>> {
        let response: CustomerSearchResponse =
            ApiClient::execute(endpoints::customers::by_name(&organization_id, &name)).await?;
        Ok(response.into_customers())
    }
}

// ============================================
// SERVICES
// ============================================

pub mod services {
    use super::*;
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::{
        CreateServiceRequest, Service, ServicesEnvelope, UpdateServiceRequest,
    };

    pub async fn list(organization_id: String) -> ApiResult<Vec<Service>> {
        let envelope: ServicesEnvelope =
            ApiClient::execute(endpoints::services::list(&organization_id)).await?;
        Ok(envelope.services)
    }

    pub async fn create(data: CreateServiceRequest) -> ApiResult<()> {
        ApiClient::execute_unit(endpoints::services::create(&data)?).await
    }

    pub async fn update(
        organization_id: String,
        id: String,
        data: UpdateServiceRequest,
    ) -> ApiResult<()> {
        ApiClient::execute_unit(endpoints::services::update(&organization_id, &id, &data)?).await
    }
}

// ============================================
// SPACES OF SERVICE
// ============================================

pub mod spaces {
    use super::*;
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::{
        CreateSpaceOfServiceRequest, SpaceOfService, SpacesOfServiceEnvelope,
        UpdateSpaceOfServiceRequest,
    };

    pub async fn list(organization_id: String) -> ApiResult<Vec<SpaceOfService>> {
        let envelope: SpacesOfServiceEnvelope =
            ApiClient::execute(endpoints::spaces::list(&organization_id)).await?;
        Ok(envelope.spaces_of_service)
    }

    pub async fn create(data: CreateSpaceOfServiceRequest) -> ApiResult<()> {
        ApiClient::execute_unit(endpoints::spaces::create(&data)?).await
    }

    pub async fn update(
        organization_id: String,
        id: String,
        data: UpdateSpaceOfServiceRequest,
    ) -> ApiResult<()> {
        ApiClient::execute_unit(endpoints::spaces::update(&organization_id, &id, &data)?).await
    }
}

// ============================================
// APPOINTMENTS
// ============================================

pub mod appointments {
    use super::*;
    use chrono::{DateTime, Utc};
    use smart_agenda_shared::endpoints;
    use smart_agenda_shared::endpoints::appointments::Transition;
    use smart_agenda_shared::{Appointment, RescheduleAppointmentRequest};

    pub async fn by_month(organization_id: String, month: u32, year: i32) -> ApiResult<Vec<Appointment>> {
        ApiClient::execute(endpoints::appointments::by_month(&organization_id, month, year)).await
    }

    pub async fn by_id(organization_id: String, id: String) -> ApiResult<Appointment> {
        ApiClient::execute(endpoints::appointments::by_id(&organization_id, &id)).await
    }

    pub async fn transition(organization_id: String, id: String, transition: Transition) -> ApiResult<()> {
        ApiClient::execute_unit(endpoints::appointments::transition(&organization_id, &id, transition))
            .await
    }

    pub async fn reschedule(organization_id: String, id: String, date: DateTime<Utc>) -> ApiResult<()> {
        let request = endpoints::appointments::reschedule(
            &organization_id,
            &id,
            &RescheduleAppointmentRequest { date },
        )?;
        ApiClient::execute_unit(request).await
    }
}
