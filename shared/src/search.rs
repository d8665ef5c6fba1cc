//! Debounced customer search.
//!
//! Keystrokes only move a deadline; a request is issued once the input has
//! been idle for [`SEARCH_DEBOUNCE_MS`]. Every request carries a sequence
//! number and only the response for the latest issued request is applied,
//! so a slow answer to an abandoned query never replaces a newer one.

use crate::models::Customer;

pub const SEARCH_DEBOUNCE_MS: u64 = 300;
pub const MIN_SEARCH_CHARS: usize = 2;

/// Trailing-edge debounce driven by caller-provided timestamps.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Register activity at `now_ms`; returns the new deadline.
    pub fn touch(&mut self, now_ms: u64) -> u64 {
        let deadline = now_ms + self.delay_ms;
        self.deadline = Some(deadline);
        deadline
    }

    /// True exactly once, at the first poll at or after the deadline.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// One name-search request to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub organization_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ContactSearch {
    organization_id: String,
    query: String,
    debouncer: Debouncer,
    next_seq: u64,
    latest_issued: Option<u64>,
    in_flight: bool,
    /// Last applied results and the term they answer
    results: Option<(String, Vec<Customer>)>,
}

impl ContactSearch {
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            query: String::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE_MS),
            next_seq: 0,
            latest_issued: None,
            in_flight: false,
            results: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn term(&self) -> &str {
        self.query.trim()
    }

    /// Whether the view shows search results rather than the full list.
    pub fn is_searching(&self) -> bool {
        self.term().chars().count() >= MIN_SEARCH_CHARS
    }

    /// Results for the current term are not in yet: the debounce is still
    /// running or the request is in flight.
    pub fn is_pending(&self) -> bool {
        self.is_searching() && (self.in_flight || self.debouncer.is_pending())
    }

    /// Record a keystroke. Returns the deadline at which [`poll`](Self::poll)
    /// should be called.
    pub fn set_query(&mut self, query: impl Into<String>, now_ms: u64) -> u64 {
        self.query = query.into();
        self.debouncer.touch(now_ms)
    }

    /// Issue the debounced request once the input has been idle long enough.
    pub fn poll(&mut self, now_ms: u64) -> Option<SearchTicket> {
        if self.debouncer.fire(now_ms) {
            self.issue()
        } else {
            None
        }
    }

    /// Issue a request for the current term immediately (no debounce).
    /// Used to re-run an active search after a contact was created or edited.
    pub fn issue(&mut self) -> Option<SearchTicket> {
        if !self.is_searching() {
            return None;
        }
        self.next_seq += 1;
        self.latest_issued = Some(self.next_seq);
        self.in_flight = true;
        Some(SearchTicket {
            seq: self.next_seq,
            organization_id: self.organization_id.clone(),
            name: self.term().to_string(),
        })
    }

    /// Apply a response. Returns false when the ticket was superseded and the
    /// results were discarded.
    pub fn complete(&mut self, ticket: &SearchTicket, results: Vec<Customer>) -> bool {
        if self.latest_issued != Some(ticket.seq) {
            tracing::debug!(
                seq = ticket.seq,
                latest = ?self.latest_issued,
                "discarding superseded search response"
            );
            return false;
        }
        self.in_flight = false;
        self.results = Some((ticket.name.clone(), results));
        true
    }

    /// A request failed; only the latest one clears the pending flag.
    pub fn fail(&mut self, ticket: &SearchTicket) {
        if self.latest_issued == Some(ticket.seq) {
            self.in_flight = false;
        }
    }

    /// Customers to render: for terms of two or more characters, the results
    /// of a search for exactly that term (empty until they arrive), otherwise
    /// the full list.
    pub fn displayed<'a>(&'a self, all: &'a [Customer]) -> &'a [Customer] {
        if !self.is_searching() {
            return all;
        }
        match &self.results {
            Some((term, results)) if term.as_str() == self.term() => results.as_slice(),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            phone: format!("1199999{}", id.len()),
            organization_id: "org_1".to_string(),
        }
    }

    #[test]
    fn test_debouncer_fires_once_after_idle() {
        let mut debouncer = Debouncer::new(300);
        debouncer.touch(0);
        debouncer.touch(100);
        debouncer.touch(250);
        assert!(!debouncer.fire(400));
        assert!(debouncer.fire(550));
        assert!(!debouncer.fire(900));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_one_request_per_burst_of_keystrokes() {
        let mut search = ContactSearch::new("org_1");
        let mut issued = Vec::new();

        // "a", "an", "ana" typed 100 ms apart, polled every 50 ms
        let keystrokes = [(0, "a"), (100, "an"), (200, "ana")];
        let mut next = keystrokes.iter().peekable();
        for now in (0..=1_000).step_by(50) {
            while let Some((at, text)) = next.peek() {
                if *at == now {
                    search.set_query(*text, now);
                    next.next();
                } else {
                    break;
                }
            }
            if let Some(ticket) = search.poll(now) {
                issued.push((now, ticket));
            }
        }

        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].0, 500);
        assert_eq!(issued[0].1.name, "ana");
    }

    #[test]
    fn test_short_terms_show_full_list_and_never_search() {
        let all = vec![customer("c1", "Ana"), customer("c2", "Bruno")];
        let mut search = ContactSearch::new("org_1");

        for query in ["", " ", "a", " b ", "  c"] {
            search.set_query(query, 0);
            assert!(search.poll(SEARCH_DEBOUNCE_MS).is_none());
            assert_eq!(search.displayed(&all), &all[..]);
        }
    }

    #[test]
    fn test_term_is_trimmed() {
        let mut search = ContactSearch::new("org_1");
        search.set_query("  an  ", 0);
        let ticket = search.poll(SEARCH_DEBOUNCE_MS).unwrap();
        assert_eq!(ticket.name, "an");
        assert_eq!(ticket.organization_id, "org_1");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let all = vec![customer("c1", "Ana"), customer("c2", "Bruno")];
        let mut search = ContactSearch::new("org_1");

        search.set_query("an", 0);
        let first = search.poll(300).unwrap();
        search.set_query("bru", 400);
        let second = search.poll(700).unwrap();
        assert!(search.is_pending());

        // The newer request answers first
        assert!(search.complete(&second, vec![customer("c2", "Bruno")]));
        // The older one arrives late and must not overwrite it
        assert!(!search.complete(&first, vec![customer("c1", "Ana")]));

        assert_eq!(search.displayed(&all), &[customer("c2", "Bruno")][..]);
        assert!(!search.is_pending());
    }

    #[test]
    fn test_results_for_previous_term_are_hidden() {
        let all = vec![customer("c1", "Ana"), customer("c2", "Bruno")];
        let mut search = ContactSearch::new("org_1");

        search.set_query("ana", 0);
        let ticket = search.poll(300).unwrap();
        search.complete(&ticket, vec![customer("c1", "Ana")]);
        assert_eq!(search.displayed(&all), &[customer("c1", "Ana")][..]);

        // New term typed, debounce still running
        search.set_query("bru", 400);
        assert!(search.is_pending());
        assert!(search.displayed(&all).is_empty());

        // Request in flight
        let ticket = search.poll(700).unwrap();
        assert!(search.displayed(&all).is_empty());

        search.complete(&ticket, vec![customer("c2", "Bruno")]);
        assert!(!search.is_pending());
        assert_eq!(search.displayed(&all), &[customer("c2", "Bruno")][..]);
    }

    #[test]
    fn test_rerun_after_contact_change() {
        let mut search = ContactSearch::new("org_1");
        assert!(search.issue().is_none());

        search.set_query("ana", 0);
        let first = search.poll(300).unwrap();
        search.complete(&first, vec![]);

        let rerun = search.issue().unwrap();
        assert!(rerun.seq > first.seq);
        assert_eq!(rerun.name, "ana");
    }

    #[test]
    fn test_failed_latest_request_clears_pending() {
        let mut search = ContactSearch::new("org_1");
        search.set_query("ana", 0);
        let ticket = search.poll(300).unwrap();
        search.fail(&ticket);
        assert!(!search.is_pending());
        assert!(search.displayed(&[]).is_empty());
    }
}
