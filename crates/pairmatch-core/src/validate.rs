//! Structural checks on decoded payloads.
//!
//! These run on the raw JSON value before typed deserialization, so a
//! payload that is missing a required part can be rejected with a precise
//! reason. Both predicates are pure.

use serde_json::Value;

/// Names the first required session field that is missing or malformed.
pub fn missing_session_field(obj: &Value) -> Option<&'static str> {
    let Some(map) = obj.as_object() else {
        return Some("payload object");
    };

    if !map.get("creatorProfile").is_some_and(Value::is_object) {
        return Some("creatorProfile");
    }
    if !map
        .get("creatorAnswers")
        .and_then(Value::as_object)
        .is_some_and(|a| !a.is_empty())
    {
        return Some("creatorAnswers");
    }
    if !map
        .get("questions")
        .and_then(Value::as_array)
        .is_some_and(|q| !q.is_empty())
    {
        return Some("questions");
    }
    if !map.get("narrativeBands").is_some_and(Value::is_object) {
        return Some("narrativeBands");
    }
    if !map.get("quizTitle").is_some_and(Value::is_string) {
        return Some("quizTitle");
    }
    None
}

/// Names the first required result field that is missing or malformed.
pub fn missing_result_field(obj: &Value) -> Option<&'static str> {
    if let Some(field) = missing_session_field(obj) {
        return Some(field);
    }
    if !obj.get("partnerProfile").is_some_and(Value::is_object) {
        return Some("partnerProfile");
    }
    if !obj.get("partnerAnswers").is_some_and(Value::is_object) {
        return Some("partnerAnswers");
    }
    None
}

/// `true` if `obj` has everything a partner needs to start their half.
pub fn validate_session(obj: &Value) -> bool {
    missing_session_field(obj).is_none()
}

/// `true` if `obj` is a session that also carries the partner's half.
pub fn validate_result(obj: &Value) -> bool {
    missing_result_field(obj).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session_value() -> Value {
        json!({
            "creatorProfile": {"name": "Ana", "relationshipType": "dating"},
            "creatorAnswers": {"1": "X"},
            "questions": [{"id": 1, "text": "Pick one", "options": ["X", "Y"]}],
            "narrativeBands": {
                "range0_25": "a", "range26_50": "b", "range51_75": "c", "range76_100": "d"
            },
            "quizTitle": "Us"
        })
    }

    #[test]
    fn complete_session_passes() {
        let v = session_value();
        assert!(validate_session(&v));
        assert!(!validate_result(&v));
        // pure: same answer on repeat
        assert!(validate_session(&v));
        assert!(!validate_result(&v));
    }

    #[test]
    fn each_required_field_is_checked() {
        for (field, broken) in [
            ("creatorProfile", Value::Null),
            ("creatorAnswers", json!({})),
            ("questions", json!([])),
            ("narrativeBands", Value::Null),
            ("quizTitle", json!(42)),
        ] {
            let mut v = session_value();
            v[field] = broken;
            assert!(!validate_session(&v), "{field} should be required");
            assert_eq!(missing_session_field(&v), Some(field));
        }
    }

    #[test]
    fn result_requires_partner_half() {
        let mut v = session_value();
        v["partnerProfile"] = json!({"name": "Ben", "relationshipType": "dating"});
        assert_eq!(missing_result_field(&v), Some("partnerAnswers"));

        v["partnerAnswers"] = json!({});
        assert!(validate_result(&v));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(!validate_session(&json!([1, 2, 3])));
        assert!(!validate_result(&json!("session")));
    }
}
