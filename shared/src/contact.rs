//! Contact dialog modes.
//!
//! The dialog is always in exactly one mode, so the edit form can never
//! exist without the customer it edits.

use crate::cache::Mutation;
use crate::error::SubmitError;
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::validation::{self, ValidationResult, Validator};
use crate::{ApiRequest, endpoints};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        let validator = validation::customer_name(Validator::new(), &self.name);
        validation::customer_phone(validator, &self.phone).finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactDialog {
    Create { draft: ContactDraft },
    View { customer: Customer },
    Edit { customer: Customer, draft: ContactDraft },
}

/// A validated request ready to send, plus what it invalidates on success.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmit {
    pub request: ApiRequest,
    pub mutation: Mutation,
}

impl ContactDialog {
    pub fn create() -> Self {
        ContactDialog::Create {
            draft: ContactDraft::default(),
        }
    }

    pub fn view(customer: Customer) -> Self {
        ContactDialog::View { customer }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ContactDialog::Create { .. } => "Adicionar Novo Contato",
            ContactDialog::View { .. } | ContactDialog::Edit { .. } => "Gerenciar Contato",
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, ContactDialog::View { .. })
    }

    pub fn draft(&self) -> Option<&ContactDraft> {
        match self {
            ContactDialog::Create { draft } | ContactDialog::Edit { draft, .. } => Some(draft),
            ContactDialog::View { .. } => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut ContactDraft> {
        match self {
            ContactDialog::Create { draft } | ContactDialog::Edit { draft, .. } => Some(draft),
            ContactDialog::View { .. } => None,
        }
    }

    /// View -> Edit, prefilled with the customer's current values.
    pub fn start_edit(self) -> Self {
        match self {
            ContactDialog::View { customer } => ContactDialog::Edit {
                draft: ContactDraft::from_customer(&customer),
                customer,
            },
            other => other,
        }
    }

    /// Edit -> View, discarding the draft.
    pub fn cancel_edit(self) -> Self {
        match self {
            ContactDialog::Edit { customer, .. } => ContactDialog::View { customer },
            other => other,
        }
    }

    /// Validate the draft and build the create or update request.
    ///
    /// `Ok(None)` in `View` mode. Updates only carry the fields that changed.
    pub fn submit(&self, organization_id: &str) -> Result<Option<ContactSubmit>, SubmitError> {
        match self {
            ContactDialog::View { .. } => Ok(None),
            ContactDialog::Create { draft } => {
                draft.validate()?;
                let request = endpoints::customers::create(&CreateCustomerRequest {
                    organization_id: organization_id.to_string(),
                    name: draft.name.clone(),
                    phone: draft.phone.clone(),
                })?;
                Ok(Some(ContactSubmit {
                    request,
                    mutation: Mutation::CreateCustomer {
                        organization_id: organization_id.to_string(),
                    },
                }))
            }
            ContactDialog::Edit { customer, draft } => {
                draft.validate()?;
                let changes = UpdateCustomerRequest {
                    name: (draft.name != customer.name).then(|| draft.name.clone()),
                    phone: (draft.phone != customer.phone).then(|| draft.phone.clone()),
                };
                let request = endpoints::customers::update(organization_id, &customer.id, &changes)?;
                Ok(Some(ContactSubmit {
                    request,
                    mutation: Mutation::UpdateCustomer {
                        organization_id: organization_id.to_string(),
                    },
                }))
            }
        }
    }

    /// After a successful submit the dialog shows the saved contact.
    pub fn saved(self, organization_id: &str) -> Self {
        match self {
            ContactDialog::Create { draft } => ContactDialog::View {
                customer: Customer {
                    id: String::new(),
                    name: draft.name,
                    phone: draft.phone,
                    organization_id: organization_id.to_string(),
                },
            },
            ContactDialog::Edit { customer, draft } => ContactDialog::View {
                customer: Customer {
                    name: draft.name,
                    phone: draft.phone,
                    ..customer
                },
            },
            view => view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HttpMethod;
    use serde_json::json;

    fn ana() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Ana".to_string(),
            phone: "11999999999".to_string(),
            organization_id: "org_1".to_string(),
        }
    }

    #[test]
    fn test_view_edit_cancel_cycle() {
        let dialog = ContactDialog::view(ana());
        assert!(!dialog.is_editable());
        assert!(dialog.draft().is_none());

        let dialog = dialog.start_edit();
        assert_eq!(dialog.draft(), Some(&ContactDraft::from_customer(&ana())));
        assert_eq!(dialog.title(), "Gerenciar Contato");

        assert_eq!(dialog.cancel_edit(), ContactDialog::view(ana()));
    }

    #[test]
    fn test_view_submits_nothing() {
        assert_eq!(ContactDialog::view(ana()).submit("org_1"), Ok(None));
    }

    #[test]
    fn test_create_validates_before_building_request() {
        let mut dialog = ContactDialog::create();
        let err = dialog.submit("org_1").unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ref e) if e.has("name") && e.has("phone")));

        if let Some(draft) = dialog.draft_mut() {
            draft.name = "Bruno Lima".to_string();
            draft.phone = "(11) 98888-7777".to_string();
        }
        let submit = dialog.submit("org_1").unwrap().unwrap();
        assert_eq!(submit.request.method, HttpMethod::Post);
        assert_eq!(submit.request.path, "/organizations/org_1/customers");
        assert_eq!(
            submit.request.body,
            Some(json!({
                "organizationId": "org_1",
                "name": "Bruno Lima",
                "phone": "(11) 98888-7777"
            }))
        );
        assert_eq!(
            submit.mutation,
            Mutation::CreateCustomer { organization_id: "org_1".to_string() }
        );
    }

    #[test]
    fn test_edit_sends_changed_fields_and_returns_to_view() {
        let mut dialog = ContactDialog::view(ana()).start_edit();
        if let Some(draft) = dialog.draft_mut() {
            draft.name = "Ana Paula".to_string();
        }
        let submit = dialog.submit("org_1").unwrap().unwrap();
        assert_eq!(submit.request.path, "/organizations/org_1/customers/id/c1");
        assert_eq!(submit.request.body, Some(json!({ "name": "Ana Paula" })));

        let saved = dialog.saved("org_1");
        match saved {
            ContactDialog::View { customer } => {
                assert_eq!(customer.id, "c1");
                assert_eq!(customer.name, "Ana Paula");
            }
            other => panic!("expected view mode, got {:?}", other),
        }
    }
}
