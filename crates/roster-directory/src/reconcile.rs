//! Reconciliation of directory identifiers against a reference list.

use crate::page::MemberRecord;
use serde_json::Value;
use std::collections::HashSet;

/// Identifiers split by presence in the reference list, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Identifiers present in the reference list
    pub matching: Vec<Value>,
    /// Identifiers absent from the reference list
    pub different: Vec<Value>,
}

impl Reconciliation {
    /// Number of identifiers reconciled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matching.len() + self.different.len()
    }

    /// Whether nothing was reconciled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render an identifier the way the reference list spells it.
///
/// Strings are taken as-is, numbers and booleans in their JSON form, and
/// `null` as the empty string.
#[must_use]
pub fn identifier_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Partition the `id_field` values of `members` by whether their text form
/// appears in `reference`.
///
/// The output keeps the original identifier values; a record without the
/// field contributes `null`.
#[must_use]
pub fn reconcile<S>(id_field: &str, members: &[MemberRecord], reference: &[S]) -> Reconciliation
where
    S: AsRef<str>,
{
    let reference: HashSet<&str> = reference.iter().map(AsRef::as_ref).collect();
    let mut result = Reconciliation::default();

    for member in members {
        let id = member.get(id_field).cloned().unwrap_or(Value::Null);
        if reference.contains(identifier_text(&id).as_str()) {
            result.matching.push(id);
        } else {
            result.different.push(id);
        }
    }

    tracing::debug!(
        matching = result.matching.len(),
        different = result.different.len(),
        "Reconciled directory members"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn members(ids: &[Value]) -> Vec<MemberRecord> {
        ids.iter()
            .map(|id| MemberRecord::from_value(json!({ "id": id })).expect("object"))
            .collect()
    }

    #[test]
    fn test_reconcile_string_ids() {
        let members = members(&[json!("123"), json!("456"), json!("789")]);
        let result = reconcile("id", &members, &["123", "789"]);

        assert_eq!(result.matching, vec![json!("123"), json!("789")]);
        assert_eq!(result.different, vec![json!("456")]);
    }

    #[test]
    fn test_numeric_ids_compared_as_text() {
        let members = members(&[json!(9_077_557), json!(1033), json!(62)]);
        let reference = vec!["1033".to_string(), "9077557".to_string()];

        let result = reconcile("id", &members, &reference);

        assert_eq!(result.matching, vec![json!(9_077_557), json!(1033)]);
        assert_eq!(result.different, vec![json!(62)]);
    }

    #[test]
    fn test_empty_input() {
        let result = reconcile::<&str>("id", &[], &["1"]);
        assert!(result.is_empty());
        assert_eq!(result, Reconciliation::default());
    }

    #[test]
    fn test_outputs_partition_input() {
        let ids: Vec<Value> = (0..50).map(|n| json!(n * 7)).collect();
        let reference: Vec<String> = (0..120).step_by(3).map(|n| n.to_string()).collect();
        let members = members(&ids);

        let result = reconcile("id", &members, &reference);

        assert_eq!(result.len(), ids.len());
        for id in &ids {
            let in_matching = result.matching.contains(id);
            let in_different = result.different.contains(id);
            assert!(in_matching ^ in_different, "{id} must land in exactly one side");
            assert_eq!(in_matching, reference.contains(&identifier_text(id)));
        }
    }

    #[test]
    fn test_missing_id_field_is_different() {
        let members = vec![MemberRecord::from_value(json!({"fullname": "Ada"})).expect("object")];
        let result = reconcile("id", &members, &["1"]);
        assert_eq!(result.different, vec![Value::Null]);
    }

    #[test]
    fn test_identifier_text() {
        assert_eq!(identifier_text(&json!("0042")), "0042");
        assert_eq!(identifier_text(&json!(42)), "42");
        assert_eq!(identifier_text(&json!(true)), "true");
        assert_eq!(identifier_text(&Value::Null), "");
    }
}
