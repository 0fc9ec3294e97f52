//! Single-writer state container for the user list screen.
//!
//! The list is a cache of server state: replaced wholesale on fetch and
//! patched one record at a time after an individual mutation succeeds.
//! Every mutation goes through one of four reducers so the reconciliation
//! rules can be tested without any rendering.

pub mod filter;

use std::collections::BTreeSet;

use crate::models::UserRecord;

/// List state, search term, fetch status and per-record action locks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStore {
    users: Vec<UserRecord>,
    search: String,
    loading: bool,
    error: Option<String>,
    in_progress: BTreeSet<String>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `users`, as if a fetch had just succeeded.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// The full list as last fetched and patched.
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Records matching the current search term, recomputed on each call.
    pub fn visible(&self) -> Vec<&UserRecord> {
        filter::filter_users(&self.users, &self.search)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last fetch error, cleared by the next successful fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Fetch lifecycle ─────────────────────────────────────────────

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Record a failed fetch. The previously shown list is kept.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    // ── Reducers ────────────────────────────────────────────────────

    /// Replace the whole list with a fresh server copy.
    pub fn replace_list(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.loading = false;
        self.error = None;
    }

    /// Replace the record held under `id`, keeping its position.
    ///
    /// Returns `false` (and changes nothing) if no such record is held.
    pub fn replace_one(&mut self, id: &str, record: UserRecord) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Set only the blocked flag of one record.
    pub fn patch_blocked(&mut self, id: &str, blocked: bool) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_blocked = blocked;
                true
            }
            None => false,
        }
    }

    /// Remove one record, preserving the order of the rest.
    pub fn remove_one(&mut self, id: &str) -> bool {
        match self.users.iter().position(|u| u.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    // ── Per-record action locks ─────────────────────────────────────

    /// Mark `id` as having an action in flight.
    ///
    /// Returns `false` if an action on `id` is already running.
    pub fn try_begin_action(&mut self, id: &str) -> bool {
        self.in_progress.insert(id.to_string())
    }

    pub fn end_action(&mut self, id: &str) {
        self.in_progress.remove(id);
    }

    pub fn is_in_progress(&self, id: &str) -> bool {
        self.in_progress.contains(id)
    }

    pub fn in_progress(&self) -> impl Iterator<Item = &str> {
        self.in_progress.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(id: &str, name: &str) -> UserRecord {
        UserRecord {
            full_name: Some(name.to_string()),
            email: Some(format!("{id}@example.com")),
            ..UserRecord::new(id)
        }
    }

    fn store() -> UserStore {
        UserStore::with_users(vec![
            named("u1", "John Doe"),
            named("u2", "Alice Smith"),
            named("u3", "Bob Stone"),
        ])
    }

    #[test]
    fn replace_list_clears_error_and_loading() {
        let mut s = store();
        s.begin_fetch();
        s.fail_fetch("offline");
        assert_eq!(s.error(), Some("offline"));
        s.begin_fetch();
        s.replace_list(vec![named("u9", "Zed")]);
        assert!(!s.is_loading());
        assert_eq!(s.error(), None);
        assert_eq!(s.users().len(), 1);
    }

    #[test]
    fn failed_fetch_keeps_previous_list() {
        let mut s = store();
        let before = s.users().to_vec();
        s.begin_fetch();
        assert!(s.is_loading());
        s.fail_fetch("timeout");
        assert!(!s.is_loading());
        assert_eq!(s.users(), before.as_slice());
    }

    #[test]
    fn replace_one_changes_only_target() {
        let mut s = store();
        let mut updated = named("u2", "Alice Jones");
        updated.city = Some("Oslo".into());
        assert!(s.replace_one("u2", updated.clone()));

        let expected = vec![named("u1", "John Doe"), updated, named("u3", "Bob Stone")];
        assert_eq!(s.users(), expected.as_slice());
    }

    #[test]
    fn replace_one_unknown_id_is_noop() {
        let mut s = store();
        let before = s.clone();
        assert!(!s.replace_one("u404", named("u404", "Ghost")));
        assert_eq!(s, before);
    }

    #[test]
    fn replace_one_targets_requested_id() {
        let mut s = store();
        let echoed = named("U2", "Alice Jones");
        assert!(s.replace_one("u2", echoed.clone()));

        let expected = vec![named("u1", "John Doe"), echoed, named("u3", "Bob Stone")];
        assert_eq!(s.users(), expected.as_slice());
    }

    #[test]
    fn patch_blocked_flips_only_flag() {
        let mut s = store();
        assert!(s.patch_blocked("u1", true));
        let mut expected = named("u1", "John Doe");
        expected.is_blocked = true;
        assert_eq!(s.get("u1"), Some(&expected));
        assert_eq!(s.get("u2"), Some(&named("u2", "Alice Smith")));
        assert_eq!(s.get("u3"), Some(&named("u3", "Bob Stone")));
    }

    #[test]
    fn remove_one_preserves_order() {
        let mut s = store();
        assert!(s.remove_one("u2"));
        let ids: Vec<_> = s.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3"]);
        assert!(!s.remove_one("u2"));
        assert_eq!(s.users().len(), 2);
    }

    #[test]
    fn visible_follows_search_without_mutating_list() {
        let mut s = store();
        s.set_search("JOHN");
        let visible: Vec<_> = s.visible().into_iter().map(|u| u.id.clone()).collect();
        assert_eq!(visible, vec!["u1"]);
        assert_eq!(s.users().len(), 3);
        s.set_search("");
        assert_eq!(s.visible().len(), 3);
    }

    #[test]
    fn action_locks_are_per_record() {
        let mut s = store();
        assert!(s.try_begin_action("u1"));
        assert!(!s.try_begin_action("u1"));
        assert!(s.try_begin_action("u2"));
        assert!(s.is_in_progress("u1"));
        assert_eq!(s.in_progress().collect::<Vec<_>>(), vec!["u1", "u2"]);
        s.end_action("u1");
        assert!(!s.is_in_progress("u1"));
        assert!(s.try_begin_action("u1"));
    }
}
