//! Display helpers shared by the views.

/// Groups digits the en-IN way: the last three together, then pairs.
///
/// `67391582` → `"6,73,91,582"`.
pub fn population(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Joins a list for display, or returns an empty string.
pub fn list(items: &[String]) -> String {
    items.join(", ")
}
