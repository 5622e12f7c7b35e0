use memo_core::{InvalidPriority, Memo, Priority};

#[test]
fn priority_parse_is_case_insensitive_across_all_values() {
    assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
    assert_eq!("低".parse::<Priority>().ok(), None);
}

#[test]
fn priority_round_trips_through_display() {
    for priority in Priority::ALL {
        assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
    }
}

#[test]
fn priority_parse_error_names_the_invalid_value() {
    let err = "bogus".parse::<Priority>().unwrap_err();
    assert_eq!(err, InvalidPriority("bogus".to_string()));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn priority_total_order_matches_rank() {
    let mut values = Priority::ALL.to_vec();
    values.sort();
    assert_eq!(
        values,
        vec![
            Priority::None,
            Priority::Low,
            Priority::Medium,
            Priority::High
        ]
    );
}

#[test]
fn memo_serialization_uses_expected_wire_fields() {
    let memo = Memo {
        id: Some(7),
        title: "release checklist".to_string(),
        content: Some("tag the build".to_string()),
        priority: Priority::High,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
    };

    let json = serde_json::to_value(&memo).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "release checklist");
    assert_eq!(json["content"], "tag the build");
    assert_eq!(json["priority"], "HIGH");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_360_000_i64);

    let decoded: Memo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, memo);
}

#[test]
fn memo_deserialization_defaults_absent_optional_fields() {
    let decoded: Memo = serde_json::from_str(r#"{"title": "bare"}"#).unwrap();

    assert_eq!(decoded.id, None);
    assert_eq!(decoded.title, "bare");
    assert_eq!(decoded.content, None);
    assert_eq!(decoded.priority, Priority::None);
    assert_eq!(decoded.created_at, 0);
    assert_eq!(decoded.updated_at, 0);
}
