//! Client-side search over the locally held list.

use crate::models::UserRecord;

/// Normalise a search term: trimmed and case-folded.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Returns `true` if `user` matches the already-normalised `needle`.
///
/// A record matches when the needle is a substring of its full name,
/// mobile, email or id. An empty needle matches everything.
pub fn matches(user: &UserRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    user.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records of `users` matching `term`, in their original order.
pub fn filter_users<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    let needle = normalize_term(term);
    users.iter().filter(|u| matches(u, &needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: Option<&str>, mobile: Option<&str>, email: Option<&str>) -> UserRecord {
        UserRecord {
            full_name: name.map(String::from),
            mobile: mobile.map(String::from),
            email: email.map(String::from),
            ..UserRecord::new(id)
        }
    }

    fn sample() -> Vec<UserRecord> {
        vec![
            user("u1", Some("John Doe"), Some("9876543210"), Some("jd@example.com")),
            user("u2", Some("Alice Smith"), Some("5550001111"), Some("alice@example.com")),
            user("u3", Some("Bob Stone"), None, Some("bob@corp.example")),
        ]
    }

    fn ids(users: &[&UserRecord]) -> Vec<String> {
        users.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn search_john_matches_one_user() {
        let users = sample();
        let filtered = filter_users(&users, "john");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].full_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let users = sample();
        assert_eq!(ids(&filter_users(&users, "")), vec!["u1", "u2", "u3"]);
        assert_eq!(ids(&filter_users(&users, "   ")), vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn term_is_trimmed_and_case_insensitive() {
        let users = sample();
        assert_eq!(ids(&filter_users(&users, "  ALICE ")), vec!["u2"]);
    }

    #[test]
    fn matches_mobile_email_and_id() {
        let users = sample();
        assert_eq!(ids(&filter_users(&users, "555000")), vec!["u2"]);
        assert_eq!(ids(&filter_users(&users, "corp.example")), vec!["u3"]);
        assert_eq!(ids(&filter_users(&users, "U3")), vec!["u3"]);
        assert_eq!(ids(&filter_users(&users, "example.com")), vec!["u1", "u2"]);
    }

    #[test]
    fn missing_fields_never_match() {
        let users = vec![UserRecord::new("x1")];
        assert!(filter_users(&users, "doe").is_empty());
    }

    #[test]
    fn filtered_is_subset_and_every_element_contains_term() {
        let users = sample();
        for term in ["o", "e", "5", "u", "zzz", "Example", "s"] {
            let needle = normalize_term(term);
            let filtered = filter_users(&users, term);
            for u in &filtered {
                assert!(users.iter().any(|orig| orig == *u));
                assert!(
                    u.search_fields()
                        .into_iter()
                        .flatten()
                        .any(|f| f.to_lowercase().contains(&needle)),
                    "{} should contain {term:?}",
                    u.id
                );
            }
            let expected = users.iter().filter(|u| matches(u, &needle)).count();
            assert_eq!(filtered.len(), expected);
        }
    }
}
