use super::*;
use crate::{
    directive::{
        filter::{Filter, FilterKind},
        force::Force,
        order::OrderBy,
        projection::{Columns, With},
        scope::{OnlyTrashed, WithTrashed},
        window::{Limit, Offset},
    },
    query::{
        CompareOp, Conjunction, OrderDirection, Predicate, Queryable, SoftDeleteScope,
        value::Value,
    },
    test_fixtures::{POSTS, USERS},
};

fn compare(kind: FilterKind, raw: &str) -> Result<Filter, ArgumentError> {
    let mut filter = Filter::new(Conjunction::And, kind);
    filter.tokenize(raw)?;
    Ok(filter)
}

// ----------------------------------------------------------------------
// Soft-delete toggles
// ----------------------------------------------------------------------

#[test]
fn toggles_tolerate_any_argument_and_have_no_tokens() {
    let mut with = WithTrashed::default();
    let mut only = OnlyTrashed::default();

    with.tokenize("").unwrap();
    only.tokenize("ignored").unwrap();

    assert!(with.tokens().is_empty());
    assert!(only.tokens().is_empty());
}

#[test]
fn toggles_set_scope_on_supporting_entity() {
    let mut query = USERS.query();
    OnlyTrashed::default().apply(&mut query).unwrap();
    assert_eq!(query.scope(), SoftDeleteScope::OnlyTrashed);

    WithTrashed::default().apply(&mut query).unwrap();
    assert_eq!(query.scope(), SoftDeleteScope::WithTrashed);
}

#[test]
fn toggles_fail_on_entity_without_soft_delete() {
    let mut query = POSTS.query();

    assert!(matches!(
        OnlyTrashed::default().apply(&mut query),
        Err(QueryError::SoftDeleteUnsupported { .. })
    ));
    assert!(matches!(
        WithTrashed::default().apply(&mut query),
        Err(QueryError::SoftDeleteUnsupported { .. })
    ));
}

#[test]
fn force_parses_scope_names() {
    let mut force = Force::default();
    force.tokenize(" only_trashed ").unwrap();

    assert_eq!(force.scope(), Some(SoftDeleteScope::OnlyTrashed));
    assert_eq!(force.tokens(), ["only_trashed".to_string()]);
}

#[test]
fn force_rejects_unknown_or_missing_scope() {
    assert_eq!(
        Force::default().tokenize("everything"),
        Err(ArgumentError::UnknownScope("everything".to_string()))
    );
    assert!(matches!(
        Force::default().tokenize(""),
        Err(ArgumentError::Shape { .. })
    ));
}

// ----------------------------------------------------------------------
// Filters
// ----------------------------------------------------------------------

#[test]
fn where_tokenizes_field_operator_value() {
    let filter = compare(FilterKind::Compare, "age:gte:21").unwrap();

    assert_eq!(filter.tokens(), ["age", "gte", "21"].map(String::from));
    assert_eq!(
        filter.predicate(),
        Some(&Predicate::compare("age", CompareOp::Gte, Value::Int(21)))
    );
}

#[test]
fn where_value_may_contain_separator() {
    let filter = compare(FilterKind::Compare, "starts_at:eq:10:30").unwrap();

    assert_eq!(
        filter.predicate(),
        Some(&Predicate::compare(
            "starts_at",
            CompareOp::Eq,
            Value::from("10:30")
        ))
    );
}

#[test]
fn where_null_comparisons_lower_to_null_checks() {
    let eq = compare(FilterKind::Compare, "deleted_at:eq:null").unwrap();
    let ne = compare(FilterKind::Compare, "deleted_at:noteq:null").unwrap();

    assert_eq!(eq.predicate(), Some(&Predicate::is_null("deleted_at")));
    assert_eq!(ne.predicate(), Some(&Predicate::is_not_null("deleted_at")));
}

#[test]
fn like_patterns_stay_text() {
    let filter = compare(FilterKind::Compare, "zip:lk:90%").unwrap();

    assert_eq!(
        filter.predicate(),
        Some(&Predicate::compare("zip", CompareOp::Like, Value::from("90%")))
    );
}

#[test]
fn where_rejects_bad_shapes() {
    assert!(matches!(
        compare(FilterKind::Compare, "age:gte"),
        Err(ArgumentError::Shape { .. })
    ));
    assert_eq!(
        compare(FilterKind::Compare, "age:about:3").unwrap_err(),
        ArgumentError::UnknownOperator("about".to_string())
    );
    assert_eq!(
        compare(FilterKind::Compare, " :eq:3").unwrap_err(),
        ArgumentError::EmptyField
    );
}

#[test]
fn where_in_accepts_parenthesised_and_bare_lists() {
    let wrapped = compare(FilterKind::In { negated: false }, "id:(1, 2,3)").unwrap();
    let bare = compare(FilterKind::In { negated: true }, "name:ada,bob").unwrap();

    assert_eq!(wrapped.tokens(), ["id", "1", "2", "3"].map(String::from));
    assert_eq!(
        wrapped.predicate(),
        Some(&Predicate::In {
            field: "id".to_string(),
            values: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
            negated: false,
        })
    );
    assert_eq!(
        bare.predicate(),
        Some(&Predicate::In {
            field: "name".to_string(),
            values: vec![Value::from("ada"), Value::from("bob")],
            negated: true,
        })
    );
}

#[test]
fn where_in_rejects_empty_lists() {
    assert!(matches!(
        compare(FilterKind::In { negated: false }, "id:()"),
        Err(ArgumentError::Shape { .. })
    ));
    assert!(matches!(
        compare(FilterKind::In { negated: false }, "id"),
        Err(ArgumentError::Shape { .. })
    ));
}

#[test]
fn where_in_rejects_unbalanced_parentheses() {
    for raw in ["id:(1,2", "id:1,2)", "id:(", "id:)"] {
        assert_eq!(
            compare(FilterKind::In { negated: false }, raw).unwrap_err(),
            ArgumentError::Shape {
                expected: "field:(value,value,...)"
            },
            "{raw}"
        );
    }

    let bare = compare(FilterKind::In { negated: true }, " id : 1,2 ").unwrap();
    assert_eq!(bare.tokens(), ["id", "1", "2"].map(String::from));
}

#[test]
fn where_between_requires_numeric_bounds() {
    let range = compare(FilterKind::Between { negated: false }, "age:18:-2.5").unwrap();
    assert_eq!(range.tokens(), ["age", "18", "-2.5"].map(String::from));

    assert_eq!(
        compare(FilterKind::Between { negated: false }, "age:18:old").unwrap_err(),
        ArgumentError::NonNumericBound("old".to_string())
    );
    assert!(matches!(
        compare(FilterKind::Between { negated: true }, "age:18"),
        Err(ArgumentError::Shape { .. })
    ));
}

#[test]
fn where_null_takes_a_field() {
    let filter = compare(FilterKind::Null { negated: true }, " email ").unwrap();

    assert_eq!(filter.predicate(), Some(&Predicate::is_not_null("email")));
    assert_eq!(
        compare(FilterKind::Null { negated: false }, "").unwrap_err(),
        ArgumentError::EmptyField
    );
}

#[test]
fn or_filter_joins_with_or() {
    let mut query = USERS.query();
    let first = compare(FilterKind::Compare, "age:lt:18").unwrap();
    let mut second = Filter::new(Conjunction::Or, FilterKind::Compare);
    second.tokenize("name:eq:ada").unwrap();

    first.apply(&mut query).unwrap();
    second.apply(&mut query).unwrap();

    assert_eq!(
        query.predicate(),
        Some(&Predicate::Or(vec![
            Predicate::compare("age", CompareOp::Lt, Value::Int(18)),
            Predicate::compare("name", CompareOp::Eq, Value::from("ada")),
        ]))
    );
}

// ----------------------------------------------------------------------
// Ordering, projection, window
// ----------------------------------------------------------------------

#[test]
fn order_by_reads_direction_prefixes() {
    let mut order = OrderBy::default();
    order.tokenize("-age, name,+id").unwrap();

    assert_eq!(
        order.keys(),
        [
            ("age".to_string(), OrderDirection::Desc),
            ("name".to_string(), OrderDirection::Asc),
            ("id".to_string(), OrderDirection::Asc),
        ]
    );
    assert_eq!(order.tokens(), ["-age", "name", "+id"].map(String::from));
    assert_eq!(
        OrderBy::default().tokenize("-").unwrap_err(),
        ArgumentError::EmptyField
    );
}

#[test]
fn columns_and_with_need_at_least_one_name() {
    assert!(matches!(
        Columns::default().tokenize(" , "),
        Err(ArgumentError::Shape { .. })
    ));
    assert!(matches!(
        With::default().tokenize(""),
        Err(ArgumentError::Shape { .. })
    ));
}

#[test]
fn with_surfaces_unknown_relations() {
    let mut with = With::default();
    with.tokenize("posts,comments").unwrap();

    let mut query = USERS.query();
    assert!(matches!(
        with.apply(&mut query),
        Err(QueryError::UnknownRelation { relation, .. }) if relation == "comments"
    ));
}

#[test]
fn limit_and_offset_parse_non_negative_integers() {
    let mut limit = Limit::default();
    limit.tokenize(" 5 ").unwrap();
    assert_eq!(limit.value(), Some(5));
    assert_eq!(limit.tokens(), ["5".to_string()]);

    assert_eq!(
        Limit::default().tokenize("-1").unwrap_err(),
        ArgumentError::NotAnInteger("-1".to_string())
    );
    assert_eq!(
        Offset::default().tokenize("ten").unwrap_err(),
        ArgumentError::NotAnInteger("ten".to_string())
    );
}

#[test]
fn limit_and_offset_report_overflow_as_out_of_range() {
    let err = Limit::default().tokenize("5000000000").unwrap_err();
    assert_eq!(
        err,
        ArgumentError::OutOfRange {
            raw: "5000000000".to_string(),
            max: u32::MAX,
        }
    );
    assert_eq!(err.to_string(), "'5000000000' exceeds the maximum of 4294967295");

    let mut offset = Offset::default();
    offset.tokenize("4294967295").unwrap();
    assert_eq!(offset.tokens(), ["4294967295".to_string()]);
}

#[test]
fn split_list_drops_blank_items() {
    assert_eq!(split_list(" a,, b ,"), vec!["a", "b"]);
    assert!(split_list("").is_empty());
}
