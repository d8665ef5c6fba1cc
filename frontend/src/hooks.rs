//! Cached, organization-scoped data hooks.
//!
//! A single [`QueryCache`] lives in [`QueryProvider`]. Mutations go through
//! [`QueryClient::apply`], which invalidates the affected prefixes and
//! re-renders consumers so stale queries refetch.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use smart_agenda_shared::cache::{FetchSequence, MONTH_QUERY_STALE_MS, Mutation, QueryCache, QueryKey, StalePolicy, keys};
use smart_agenda_shared::search::{ContactSearch, SearchTicket};
use smart_agenda_shared::{
    ApiError, ApiResult, Appointment, Customer, Organization, Service, SpaceOfService, User,
};

use crate::services;

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[derive(Clone)]
pub struct QueryClient {
    cache: Rc<RefCell<QueryCache>>,
    version: u64,
    on_change: Callback<()>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cache, &other.cache) && self.version == other.version
    }
}

impl QueryClient {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get_fresh<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.cache.borrow().get_fresh(key, now_ms())
    }

    pub fn get_any<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.cache.borrow().get_any(key)
    }

    pub fn insert<T: Serialize>(&self, key: QueryKey, value: &T, policy: StalePolicy) {
        self.cache.borrow_mut().insert(key, value, policy, now_ms());
    }

    /// Invalidate what the mutation touched and notify consumers.
    pub fn apply(&self, mutation: &Mutation) {
        let count = self.cache.borrow_mut().apply(mutation);
        tracing::debug!(?mutation, count, "mutation applied");
        self.on_change.emit(());
    }
}

#[derive(Properties, PartialEq)]
pub struct QueryProviderProps {
    pub children: Children,
}

#[function_component(QueryProvider)]
pub fn query_provider(props: &QueryProviderProps) -> Html {
    let cache = use_mut_ref(QueryCache::new);
    let version = use_mut_ref(|| 0u64);
    let force_update = use_force_update();

    let on_change = {
        let version = version.clone();
        Callback::from(move |_| {
            *version.borrow_mut() += 1;
            force_update.force_update();
        })
    };

    let client = QueryClient {
        cache,
        version: *version.borrow(),
        on_change,
    };

    html! {
        <ContextProvider<QueryClient> context={client}>
            {props.children.clone()}
        </ContextProvider<QueryClient>>
    }
}

#[hook]
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient not found")
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Serve `key` from the cache while fresh, otherwise fetch it. Stale data
/// stays visible while the refetch is in flight. `None` disables the query.
///
/// A response that arrives after the key changed is cached but not shown.
#[hook]
pub fn use_query<T, F, Fut>(key: Option<QueryKey>, policy: StalePolicy, fetch: F) -> QueryState<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let client = use_query_client();
    let state = use_state(QueryState::<T>::default);
    let sequence = use_mut_ref(FetchSequence::default);

    {
        let state = state.clone();
        let client = client.clone();
        use_effect_with((key, client.version()), move |(key, _)| {
            let tag = sequence.borrow_mut().begin();
            if let Some(key) = key.clone() {
                if let Some(data) = client.get_fresh::<T>(&key) {
                    state.set(QueryState {
                        data: Some(data),
                        loading: false,
                        error: None,
                    });
                } else {
                    state.set(QueryState {
                        data: client.get_any::<T>(&key),
                        loading: true,
                        error: None,
                    });
                    spawn_local(async move {
                        let result = fetch().await;
                        if let Ok(data) = &result {
                            client.insert(key.clone(), data, policy);
                        }
                        if !sequence.borrow().is_current(tag) {
                            tracing::debug!(key = %key, "discarding response for a superseded query");
                            return;
                        }
                        match result {
                            Ok(data) => {
                                state.set(QueryState {
                                    data: Some(data),
                                    loading: false,
                                    error: None,
                                });
                            }
                            Err(e) => {
                                tracing::warn!(key = %key, error = %e, "query failed");
                                state.set(QueryState {
                                    data: client.get_any::<T>(&key),
                                    loading: false,
                                    error: Some(e),
                                });
                            }
                        }
                    });
                }
            }
            || ()
        });
    }

    (*state).clone()
}

// ============================================
// RESOURCE HOOKS
// ============================================

#[hook]
pub fn use_current_user() -> QueryState<User> {
    use_query(Some(keys::user()), StalePolicy::Never, services::users::current)
}

#[hook]
pub fn use_organizations() -> QueryState<Vec<Organization>> {
    use_query(Some(keys::organizations()), StalePolicy::Never, services::organizations::list)
}

#[hook]
pub fn use_customers(organization_id: &str) -> QueryState<Vec<Customer>> {
    let id = organization_id.to_string();
    use_query(Some(keys::customers(organization_id)), StalePolicy::Never, move || {
        services::customers::list(id)
    })
}

#[hook]
pub fn use_services(organization_id: &str) -> QueryState<Vec<Service>> {
    let id = organization_id.to_string();
    use_query(Some(keys::services(organization_id)), StalePolicy::Never, move || {
        services::services::list(id)
    })
}

#[hook]
pub fn use_spaces(organization_id: &str) -> QueryState<Vec<SpaceOfService>> {
    let id = organization_id.to_string();
    use_query(Some(keys::spaces(organization_id)), StalePolicy::Never, move || {
        services::spaces::list(id)
    })
}

#[hook]
pub fn use_appointments_by_month(
    organization_id: &str,
    month: u32,
    year: i32,
) -> QueryState<Vec<Appointment>> {
    let id = organization_id.to_string();
    use_query(
        Some(keys::appointments_by_month(organization_id, month, year)),
        StalePolicy::After(MONTH_QUERY_STALE_MS),
        move || services::appointments::by_month(id, month, year),
    )
}

#[hook]
pub fn use_appointment(organization_id: &str, id: &str) -> QueryState<Appointment> {
    let (organization, appointment) = (organization_id.to_string(), id.to_string());
    use_query(
        Some(keys::appointment(organization_id, id)),
        StalePolicy::Never,
        move || services::appointments::by_id(organization, appointment),
    )
}

// ============================================
// CONTACT SEARCH
// ============================================

/// Debounced name search shared by the contacts page and the booking picker.
#[derive(Clone)]
pub struct ContactSearchHandle {
    pub search: Rc<RefCell<ContactSearch>>,
    /// Feed every keystroke here
    pub set_query: Callback<String>,
    /// Re-run the active search right away, e.g. after a contact changed
    pub rerun: Callback<()>,
}

impl ContactSearchHandle {
    pub fn query(&self) -> String {
        self.search.borrow().query().to_string()
    }

    pub fn is_searching(&self) -> bool {
        self.search.borrow().is_searching()
    }

    pub fn is_pending(&self) -> bool {
        self.search.borrow().is_pending()
    }

    pub fn displayed(&self, all: &[Customer]) -> Vec<Customer> {
        self.search.borrow().displayed(all).to_vec()
    }
}

fn run_search(
    search: Rc<RefCell<ContactSearch>>,
    ticket: SearchTicket,
    client: QueryClient,
    force_update: UseForceUpdateHandle,
) {
    spawn_local(async move {
        let result =
            services::customers::search(ticket.organization_id.clone(), ticket.name.clone()).await;
        match result {
            Ok(customers) => {
                client.insert(
                    keys::customer_search(&ticket.organization_id, &ticket.name),
                    &customers,
                    StalePolicy::Never,
                );
                search.borrow_mut().complete(&ticket, customers);
            }
            Err(e) => {
                tracing::warn!(error = %e, name = %ticket.name, "customer search failed");
                search.borrow_mut().fail(&ticket);
            }
        }
        force_update.force_update();
    });
}

#[hook]
pub fn use_contact_search(organization_id: &str) -> ContactSearchHandle {
    let organization_id = organization_id.to_string();
    let search = use_mut_ref(move || ContactSearch::new(organization_id));
    let timer = use_mut_ref(|| None::<Timeout>);
    let client = use_query_client();
    let force_update = use_force_update();

    let set_query = {
        let search = search.clone();
        let client = client.clone();
        let force_update = force_update.clone();
        Callback::from(move |query: String| {
            let now = now_ms();
            let deadline = search.borrow_mut().set_query(query, now);
            let delay = deadline.saturating_sub(now) as u32;

            let search = search.clone();
            let client = client.clone();
            let fire_update = force_update.clone();
            let fire = move || {
                let ticket = search.borrow_mut().poll(now_ms());
                if let Some(ticket) = ticket {
                    run_search(search, ticket, client, fire_update.clone());
                }
                fire_update.force_update();
            };
            // Replacing the pending timer cancels it
            *timer.borrow_mut() = Some(Timeout::new(delay, fire));
            force_update.force_update();
        })
    };

    let rerun = {
        let search = search.clone();
        Callback::from(move |_| {
            let ticket = search.borrow_mut().issue();
            if let Some(ticket) = ticket {
                run_search(search.clone(), ticket, client.clone(), force_update.clone());
                force_update.force_update();
            }
        })
    };

    ContactSearchHandle {
        search,
        set_query,
        rerun,
    }
}
