//! Keyed query cache with prefix invalidation.
//!
//! Entries are stored as JSON values so one cache serves every resource.
//! Time is passed in as milliseconds so callers decide the clock.

use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt;

/// Month-scoped appointment listings expire after five minutes.
pub const MONTH_QUERY_STALE_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Keys for every cached resource: `[resource, organizationId, ...params]`.
pub mod keys {
    use super::QueryKey;

    pub fn organizations() -> QueryKey {
        QueryKey::new(["organizations"])
    }

    pub fn user() -> QueryKey {
        QueryKey::new(["users"])
    }

    pub fn customers(organization_id: &str) -> QueryKey {
        QueryKey::new(["customers", organization_id])
    }

    pub fn customer_search(organization_id: &str, name: &str) -> QueryKey {
        customers(organization_id).child("search").child(name)
    }

    pub fn services(organization_id: &str) -> QueryKey {
        QueryKey::new(["services", organization_id])
    }

    pub fn spaces(organization_id: &str) -> QueryKey {
        QueryKey::new(["spaces", organization_id])
    }

    pub fn appointments(organization_id: &str) -> QueryKey {
        QueryKey::new(["appointments", organization_id])
    }

    pub fn appointments_by_month(organization_id: &str, month: u32, year: i32) -> QueryKey {
        appointments(organization_id)
            .child("by-month")
            .child(month.to_string())
            .child(year.to_string())
    }

    pub fn appointment(organization_id: &str, id: &str) -> QueryKey {
        appointments(organization_id).child("id").child(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Cached until explicitly invalidated
    #[default]
    Never,
    /// Considered stale `ms` milliseconds after it was stored
    After(u64),
}

/// Mutations and the cache prefixes they invalidate on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateOrganization,
    UpdateOrganization,
    CreateCustomer { organization_id: String },
    UpdateCustomer { organization_id: String },
    CreateService { organization_id: String },
    UpdateService { organization_id: String },
    CreateSpace { organization_id: String },
    UpdateSpace { organization_id: String },
    /// Create, update, status transitions and reschedules
    Appointment { organization_id: String },
}

impl Mutation {
    pub fn invalidates(&self) -> Vec<QueryKey> {
        match self {
            Mutation::CreateOrganization | Mutation::UpdateOrganization => {
                vec![keys::organizations()]
            }
            Mutation::CreateCustomer { organization_id }
            | Mutation::UpdateCustomer { organization_id } => vec![keys::customers(organization_id)],
            Mutation::CreateService { organization_id }
            | Mutation::UpdateService { organization_id } => vec![keys::services(organization_id)],
            Mutation::CreateSpace { organization_id }
            | Mutation::UpdateSpace { organization_id } => vec![keys::spaces(organization_id)],
            Mutation::Appointment { organization_id } => vec![keys::appointments(organization_id)],
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: serde_json::Value,
    stored_at: u64,
    policy: StalePolicy,
    invalidated: bool,
}

impl Entry {
    fn is_fresh(&self, now_ms: u64) -> bool {
        if self.invalidated {
            return false;
        }
        match self.policy {
            StalePolicy::Never => true,
            StalePolicy::After(ms) => now_ms.saturating_sub(self.stored_at) < ms,
        }
    }
}

/// Last write wins; there is no ordering between concurrent writers.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key` if present and fresh at `now_ms`.
    pub fn get_fresh<T: DeserializeOwned>(&self, key: &QueryKey, now_ms: u64) -> Option<T> {
        let entry = self.entries.get(key).filter(|e| e.is_fresh(now_ms))?;
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cached value has unexpected shape");
                None
            }
        }
    }

    /// Value for `key` even when stale, so views can keep showing it while refetching.
    pub fn get_any<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|e| serde_json::from_value(e.value.clone()).ok())
    }

    pub fn is_fresh(&self, key: &QueryKey, now_ms: u64) -> bool {
        self.entries.get(key).is_some_and(|e| e.is_fresh(now_ms))
    }

    pub fn insert<T: Serialize>(&mut self, key: QueryKey, value: &T, policy: StalePolicy, now_ms: u64) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(
                    key,
                    Entry {
                        value,
                        stored_at: now_ms,
                        policy,
                        invalidated: false,
                    },
                );
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "value could not be cached"),
        }
    }

    /// Mark every entry under `prefix` stale. Returns how many were affected.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) && !entry.invalidated {
                entry.invalidated = true;
                count += 1;
            }
        }
        tracing::debug!(prefix = %prefix, count, "cache entries invalidated");
        count
    }

    pub fn apply(&mut self, mutation: &Mutation) -> usize {
        mutation.invalidates().iter().map(|prefix| self.invalidate(prefix)).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tags fetches so only the newest one may update a view.
///
/// Older responses are still worth caching under their own key; they just must not
/// replace what the view currently shows.
#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: u64,
}

impl FetchSequence {
    /// Start a fetch; every earlier tag stops being current.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, tag: u64) -> bool {
        tag == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_stale_until_invalidated() {
        let mut cache = QueryCache::new();
        let key = keys::services("org_1");
        cache.insert(key.clone(), &vec!["svc_1".to_string()], StalePolicy::Never, 0);

        let later = 10 * 24 * 60 * 60 * 1000;
        assert_eq!(cache.get_fresh::<Vec<String>>(&key, later), Some(vec!["svc_1".to_string()]));

        cache.invalidate(&keys::services("org_1"));
        assert!(cache.get_fresh::<Vec<String>>(&key, later).is_none());
        // The stale value remains available for display
        assert!(cache.get_any::<Vec<String>>(&key).is_some());
    }

    #[test]
    fn test_month_query_expires_after_five_minutes() {
        let mut cache = QueryCache::new();
        let key = keys::appointments_by_month("org_1", 6, 2025);
        cache.insert(key.clone(), &Vec::<String>::new(), StalePolicy::After(MONTH_QUERY_STALE_MS), 1_000);

        assert!(cache.is_fresh(&key, 1_000 + MONTH_QUERY_STALE_MS - 1));
        assert!(!cache.is_fresh(&key, 1_000 + MONTH_QUERY_STALE_MS));
    }

    #[test]
    fn test_invalidation_is_scoped_by_organization() {
        let mut cache = QueryCache::new();
        cache.insert(keys::customers("org_1"), &1, StalePolicy::Never, 0);
        cache.insert(keys::customer_search("org_1", "ana"), &2, StalePolicy::Never, 0);
        cache.insert(keys::customers("org_2"), &3, StalePolicy::Never, 0);
        cache.insert(keys::services("org_1"), &4, StalePolicy::Never, 0);

        let affected = cache.apply(&Mutation::CreateCustomer {
            organization_id: "org_1".to_string(),
        });
        assert_eq!(affected, 2);
        assert!(!cache.is_fresh(&keys::customers("org_1"), 0));
        assert!(!cache.is_fresh(&keys::customer_search("org_1", "ana"), 0));
        assert!(cache.is_fresh(&keys::customers("org_2"), 0));
        assert!(cache.is_fresh(&keys::services("org_1"), 0));
    }

    #[test]
    fn test_appointment_mutation_invalidates_month_views() {
        let mut cache = QueryCache::new();
        let month = keys::appointments_by_month("org_1", 6, 2025);
        cache.insert(month.clone(), &0, StalePolicy::After(MONTH_QUERY_STALE_MS), 0);

        cache.apply(&Mutation::Appointment {
            organization_id: "org_1".to_string(),
        });
        assert!(!cache.is_fresh(&month, 0));
    }

    #[test]
    fn test_reinsert_after_invalidation_is_fresh() {
        let mut cache = QueryCache::new();
        let key = keys::organizations();
        cache.insert(key.clone(), &1, StalePolicy::Never, 0);
        cache.apply(&Mutation::CreateOrganization);
        cache.insert(key.clone(), &2, StalePolicy::Never, 5);
        assert_eq!(cache.get_fresh::<i32>(&key, 6), Some(2));
    }

    #[test]
    fn test_prefix_matching() {
        let prefix = QueryKey::new(["customers", "org_1"]);
        assert!(keys::customer_search("org_1", "ana").starts_with(&prefix));
        assert!(!keys::customers("org_10").starts_with(&prefix));
        assert!(!QueryKey::new(["customers"]).starts_with(&prefix));
    }

    #[test]
    fn test_late_response_for_previous_month_is_not_current() {
        let mut cache = QueryCache::new();
        let mut sequence = FetchSequence::default();
        let june = keys::appointments_by_month("org_1", 6, 2025);
        let july = keys::appointments_by_month("org_1", 7, 2025);

        let june_tag = sequence.begin();
        let july_tag = sequence.begin();

        // July answers first, then June arrives late.
        assert!(sequence.is_current(july_tag));
        cache.insert(july.clone(), &vec!["apt_july".to_string()], StalePolicy::Never, 0);
        assert!(!sequence.is_current(june_tag));
        cache.insert(june.clone(), &vec!["apt_june".to_string()], StalePolicy::Never, 10);

        assert_eq!(cache.get_any::<Vec<String>>(&june), Some(vec!["apt_june".to_string()]));
        assert_eq!(cache.get_any::<Vec<String>>(&july), Some(vec!["apt_july".to_string()]));
    }
}
