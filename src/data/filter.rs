use crate::data::record::StudentRecord;

/// Derive the filtered view of `records` without touching the source order.
///
/// A record is kept iff every active constraint holds: `course` and `status`
/// are exact, case-sensitive equality checks; `query` matches
/// case-insensitively as a substring of name, course, email or phone. An
/// empty string means "no constraint" for all three inputs.
pub fn compute_view<'a>(
    records: &'a [StudentRecord],
    query: &str,
    course: &str,
    status: &str,
) -> Vec<&'a StudentRecord> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|s| {
            (course.is_empty() || s.course == course)
                && (status.is_empty() || s.status == status)
                && (needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.course.to_lowercase().contains(&needle)
                    || s.email.to_lowercase().contains(&needle)
                    || s.phone.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str, course: &str, status: &str) -> StudentRecord {
        serde_json::from_str(&format!(
            r#"{{"id":{id},"name":"{name}","age":20,"course":"{course}",
                 "email":"{name}@x.com","phone":"555-0{id}",
                 "address":{{"city":"X","area":"Y","zip":"1"}},"status":"{status}"}}"#
        ))
        .unwrap()
    }

    fn roster() -> Vec<StudentRecord> {
        vec![
            record(1, "Ann", "CS", "Active"),
            record(2, "Bob", "Math", "Inactive"),
            record(3, "Carol", "CS", "Active"),
            record(4, "Dan", "Physics", "Graduated"),
        ]
    }

    #[test]
    fn test_empty_inputs_match_everything() {
        let records = roster();
        let view = compute_view(&records, "", "", "");
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let records = vec![record(1, "Ann", "CS", "Active")];
        let view = compute_view(&records, "ann", "", "");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Ann");
    }

    #[test]
    fn test_course_filter_is_exact() {
        let records = vec![record(1, "Ann", "CS", "Active")];
        assert!(compute_view(&records, "", "Math", "").is_empty());
        // case-sensitive, unlike the text query
        assert!(compute_view(&records, "", "cs", "").is_empty());
        assert_eq!(compute_view(&records, "", "CS", "").len(), 1);
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let records = roster();
        let view = compute_view(&records, "ann", "CS", "Active");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, 1);

        // right name, wrong status
        assert!(compute_view(&records, "ann", "CS", "Inactive").is_empty());
    }

    #[test]
    fn test_query_searches_email_and_phone() {
        let records = roster();
        assert_eq!(compute_view(&records, "bob@x.com", "", "").len(), 1);
        assert_eq!(compute_view(&records, "555-04", "", "").len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let records = roster();
        let once: Vec<u64> = compute_view(&records, "", "CS", "")
            .iter()
            .map(|r| r.id)
            .collect();

        let cloned: Vec<StudentRecord> = compute_view(&records, "", "CS", "")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<u64> = compute_view(&cloned, "", "CS", "")
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(once, vec![1, 3]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let records = roster();
        let before = records.clone();
        let _ = compute_view(&records, "zzz", "CS", "Active");
        assert_eq!(records, before);
    }
}
