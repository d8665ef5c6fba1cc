use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================
// ORGANIZATIONS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub members: Vec<serde_json::Value>,
    pub owner_id: String,
}

/// Value-object id as the backend serializes it: `{ "value": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityId {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProps {
    pub name: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub members: Vec<serde_json::Value>,
    pub owner_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDto {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub props: OrganizationProps,
}

impl From<OrganizationDto> for Organization {
    fn from(dto: OrganizationDto) -> Self {
        Self {
            id: dto.id.value,
            name: dto.props.name,
            created_at: dto.props.created_at,
            updated_at: dto.props.updated_at,
            members: dto.props.members,
            owner_id: dto.props.owner_id.value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationsEnvelope {
    #[serde(default)]
    pub organizations: Vec<OrganizationDto>,
}

// ============================================
// USERS & SESSIONS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub access_token: Option<String>,
}

// ============================================
// CUSTOMERS
// ============================================

/// A contact of the organization. The phone is unique per organization and
/// is what appointments reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub organization_id: String,
}

impl Customer {
    /// Label shown in the booking form: "name - phone"
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub organization_id: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomersEnvelope {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// The name-search endpoint answers either with a bare list or with the
/// same envelope as the full listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CustomerSearchResponse {
    List(Vec<Customer>),
    Envelope(CustomersEnvelope),
}

impl CustomerSearchResponse {
    pub fn into_customers(self) -> Vec<Customer> {
        match self {
            CustomerSearchResponse::List(customers) => customers,
            CustomerSearchResponse::Envelope(envelope) => envelope.customers,
        }
    }
}

// ============================================
// SERVICES
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Minutes
    pub duration: u32,
    pub observations: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub organization_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: u32,
    pub image: Option<String>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesEnvelope {
    #[serde(default)]
    pub services: Vec<Service>,
}

// ============================================
// SPACES OF SERVICE
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceOfService {
    pub id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub name: String,
    pub description: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceOfServiceRequest {
    pub organization_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSpaceOfServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacesOfServiceEnvelope {
    #[serde(default)]
    pub spaces_of_service: Vec<SpaceOfService>,
}

// ============================================
// APPOINTMENTS
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
    Paid,
    Finished,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Canceled => "CANCELED",
            AppointmentStatus::Paid => "PAID",
            AppointmentStatus::Finished => "FINISHED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendente",
            AppointmentStatus::Confirmed => "Confirmado",
            AppointmentStatus::Canceled => "Cancelado",
            AppointmentStatus::Paid => "Pago",
            AppointmentStatus::Finished => "Finalizado",
        }
    }

    /// Cancel and complete only make sense while the appointment is still open.
    pub fn is_open(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub status: AppointmentStatus,
    pub service_id: String,
    pub space_of_service_id: String,
    pub customer_phone: String,
    pub organization_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub date: DateTime<Utc>,
    pub description: String,
    pub service_id: String,
    pub space_of_service_id: String,
    pub customer_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_of_service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescheduleAppointmentRequest {
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentsEnvelope {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organization_dto_mapping() {
        let envelope: OrganizationsEnvelope = serde_json::from_value(json!({
            "organizations": [{
                "_id": { "value": "org_1" },
                "props": {
                    "name": "Barbearia Centro",
                    "createdAt": "2025-01-02T10:00:00.000Z",
                    "updatedAt": null,
                    "members": [],
                    "ownerId": { "value": "user_9" }
                }
            }]
        }))
        .unwrap();

        let organizations: Vec<Organization> =
            envelope.organizations.into_iter().map(Organization::from).collect();
        assert_eq!(organizations.len(), 1);
        assert_eq!(organizations[0].id, "org_1");
        assert_eq!(organizations[0].owner_id, "user_9");
        assert!(organizations[0].updated_at.is_none());
    }

    #[test]
    fn test_customer_search_accepts_both_shapes() {
        let bare: CustomerSearchResponse = serde_json::from_value(json!([
            { "id": "c1", "name": "Ana", "phone": "11999999999", "organizationId": "org_1" }
        ]))
        .unwrap();
        assert_eq!(bare.into_customers().len(), 1);

        let wrapped: CustomerSearchResponse = serde_json::from_value(json!({
            "customers": [
                { "id": "c1", "name": "Ana", "phone": "11999999999" },
                { "id": "c2", "name": "Bruno", "phone": "11988888888" }
            ]
        }))
        .unwrap();
        assert_eq!(wrapped.into_customers().len(), 2);
    }

    #[test]
    fn test_appointment_status_wire_format() {
        let status: AppointmentStatus = serde_json::from_value(json!("CANCELED")).unwrap();
        assert_eq!(status, AppointmentStatus::Canceled);
        assert!(!status.is_open());
        assert_eq!(serde_json::to_value(AppointmentStatus::Pending).unwrap(), json!("PENDING"));
    }

    #[test]
    fn test_service_price_is_a_number_on_the_wire() {
        let request = CreateServiceRequest {
            organization_id: "org_1".to_string(),
            name: "Corte".to_string(),
            description: "Corte simples".to_string(),
            price: Decimal::new(4550, 2),
            duration: 30,
            image: None,
            observations: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["price"], json!(45.5));
        assert_eq!(body["organizationId"], json!("org_1"));
    }

    #[test]
    fn test_customer_label() {
        let customer = Customer {
            id: "c1".to_string(),
            name: "Ana Souza".to_string(),
            phone: "11999999999".to_string(),
            organization_id: "org_1".to_string(),
        };
        assert_eq!(customer.label(), "Ana Souza - 11999999999");
    }
}
