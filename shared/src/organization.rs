//! Route-scoped organization guard.
//!
//! Every page under `/organizations/:id` depends on the id. A missing id,
//! an empty one, or the literal `"null"` left behind by a stale link shows
//! the not-found notice and sends the user back to the default route.

pub const NOT_FOUND_REDIRECT_MS: u32 = 3000;
pub const DEFAULT_ROUTE: &str = "/home";
pub const NOT_FOUND_MESSAGE: &str = "Organização não encontrada. Redirecionando...";
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Página não encontrada. Redirecionando...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationGuard {
    Valid(String),
    /// Render the notice, then navigate to `redirect_to` after `delay_ms`.
    NotFound {
        redirect_to: &'static str,
        delay_ms: u32,
    },
}

pub fn validate_organization_id(raw: Option<&str>) -> OrganizationGuard {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() && id != "null" => OrganizationGuard::Valid(id.to_string()),
        _ => {
            tracing::warn!(id = ?raw, "invalid organization id in route");
            OrganizationGuard::NotFound {
                redirect_to: DEFAULT_ROUTE,
                delay_ms: NOT_FOUND_REDIRECT_MS,
            }
        }
    }
}

impl OrganizationGuard {
    pub fn id(&self) -> Option<&str> {
        match self {
            OrganizationGuard::Valid(id) => Some(id),
            OrganizationGuard::NotFound { .. } => None,
        }
    }
}

/// Notice for a path no route matched. The router cannot match an empty
/// segment, so `/organizations//agenda` ends up here rather than in the guard.
pub fn unmatched_path_notice(path: &str) -> &'static str {
    if path.starts_with("/organizations/") {
        NOT_FOUND_MESSAGE
    } else {
        PAGE_NOT_FOUND_MESSAGE
    }
}

/// Routes of the organization-scoped sidebar.
pub fn agenda_path(organization_id: &str) -> String {
    format!("/organizations/{}/agenda", organization_id)
}
