//! Client-side filtering over fetched collections
//!
//! Lists are filtered locally, never re-queried: a case-insensitive
//! substring match over each entity's searchable fields, plus a status
//! filter for decided records.

use crate::models::{
    Administrator, Association, Citizen, Department, Grant, Grantee, LogEntry, Permission,
    PublicService, Request,
};
use crate::status::{Decided, GrantStatus};
use chrono::{DateTime, Utc};

/// Entities that expose text for the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

/// Whether `item` matches `query`. A blank query matches everything.
pub fn matches_query<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `query`, in their original order.
pub fn filter_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .cloned()
        .collect()
}

/// Items whose derived status at `now` equals `status`.
pub fn filter_by_status<T: Decided + Clone>(
    items: &[T],
    status: GrantStatus,
    now: DateTime<Utc>,
) -> Vec<T> {
    items
        .iter()
        .filter(|item| GrantStatus::of(*item, now) == status)
        .cloned()
        .collect()
}

impl Searchable for Citizen {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.user_name.clone(),
            self.full_name(),
            self.email.clone(),
            self.national_id.clone(),
        ]
    }
}

impl Searchable for Department {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.email.clone(),
        ]
    }
}

impl Searchable for Association {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.email.clone(),
            crate::models::ref_label(&self.department),
        ]
    }
}

impl Searchable for PublicService {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.machine_name.clone(),
            self.description.clone(),
            crate::models::ref_label(&self.association),
        ]
    }
}

impl Searchable for Grantee {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.grantee_user_name.clone(),
            crate::models::ref_label(&self.citizen),
            crate::models::ref_label(&self.association),
        ]
    }
}

impl Searchable for Administrator {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.administrator_user_name.clone(),
            self.first_email.clone(),
        ];
        fields.extend(self.second_email.clone());
        fields
    }
}

impl Searchable for Request {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.subject.clone(),
            self.message.clone(),
            self.service_label(),
            self.citizen_label(),
        ]
    }
}

impl Searchable for Grant {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.message.clone(),
            self.request_label(),
            self.grantee_label(),
        ]
    }
}

impl Searchable for Permission {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.target_label(),
        ]
    }
}

impl Searchable for LogEntry {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.method.clone(),
            self.object.clone(),
            self.citizen_label(),
        ];
        fields.extend(self.message.clone());
        fields.extend(self.actor().map(str::to_string));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note(&'static str, &'static str);

    impl Searchable for Note {
        fn search_fields(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn notes() -> Vec<Note> {
        vec![
            Note("Licence renewal", "Roads"),
            Note("Passport", "Home Affairs"),
            Note("Vehicle licence", "Roads"),
        ]
    }

    #[test]
    fn test_blank_query_returns_everything() {
        assert_eq!(filter_by_query(&notes(), "").len(), 3);
        assert_eq!(filter_by_query(&notes(), "   ").len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let hits = filter_by_query(&notes(), "LICENCE");
        assert_eq!(hits.len(), 2);
        assert_eq!(filter_by_query(&notes(), "affairs"), vec![notes()[1].clone()]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        for query in ["", "licence", "roads", "nothing"] {
            let once = filter_by_query(&notes(), query);
            let twice = filter_by_query(&once, query);
            assert_eq!(once, twice);
        }
    }
}
