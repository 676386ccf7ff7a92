//! Quick filter over the locally cached collection.

use crate::models::Student;

/// Narrow `students` to the rows whose name or email contains `query`.
///
/// Matching ignores case and surrounding whitespace of the query. An empty
/// query keeps every row. The input slice is never modified.
pub fn quick_filter<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return students.iter().collect();
    }

    students
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle) || s.email.to_lowercase().contains(&needle)
        })
        .collect()
}
