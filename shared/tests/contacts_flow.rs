mod common;

use smart_agenda_shared::cache::{Mutation, QueryCache, StalePolicy, keys};
use smart_agenda_shared::contact::ContactDialog;
use smart_agenda_shared::endpoints;
use smart_agenda_shared::organization::{OrganizationGuard, validate_organization_id};
use smart_agenda_shared::search::{ContactSearch, SEARCH_DEBOUNCE_MS};

use common::fixtures::{self, ORG};

#[test]
fn test_search_then_create_reruns_active_search() {
    common::init_test_logging();
    let mut cache = QueryCache::new();
    let mut search = ContactSearch::new(ORG);
    let all = vec![
        fixtures::customer("c1", "Ana", "11999999999"),
        fixtures::customer("c2", "Bruno", "11988888888"),
    ];
    cache.insert(keys::customers(ORG), &all, StalePolicy::Never, 0);

    search.set_query("an", 0);
    let ticket = search.poll(SEARCH_DEBOUNCE_MS).unwrap();
    let request = endpoints::customers::by_name(&ticket.organization_id, &ticket.name);
    assert_eq!(request.path, "/organizations/org_1/customers/name/an");
    search.complete(&ticket, vec![all[0].clone()]);
    assert_eq!(search.displayed(&all).len(), 1);

    let mut dialog = ContactDialog::create();
    if let Some(draft) = dialog.draft_mut() {
        draft.name = "Antônio".to_string();
        draft.phone = "(11) 97777-6666".to_string();
    }
    let submit = dialog.submit(ORG).unwrap().unwrap();
    assert_eq!(cache.apply(&submit.mutation), 1);
    assert!(!cache.is_fresh(&keys::customers(ORG), 0));

    let rerun = search.issue().unwrap();
    assert!(rerun.seq > ticket.seq);
    assert!(matches!(dialog.saved(ORG), ContactDialog::View { .. }));
}

#[test]
fn test_invalid_organization_ids_redirect_home() {
    for raw in [None, Some(""), Some("null")] {
        match validate_organization_id(raw) {
            OrganizationGuard::NotFound { redirect_to, delay_ms } => {
                assert_eq!(redirect_to, "/home");
                assert_eq!(delay_ms, 3000);
            }
            OrganizationGuard::Valid(id) => panic!("{:?} accepted as {}", raw, id),
        }
    }
    assert_eq!(validate_organization_id(Some(ORG)), OrganizationGuard::Valid(ORG.to_string()));
}
