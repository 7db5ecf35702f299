//! Tests for filter expression construction

use serde_json::json;

use crate::error::ReportError;
use crate::filter::{
    and_filter, dimension_filter, dimension_filter_with_case, metric_filter, not_filter, or_filter,
    DimensionOp, FilterExpression, FilterKind, MatchType, MetricOp, NumericOperation, NumericValue,
};

fn leaf_string(expr: &FilterExpression) -> (&str, &crate::filter::StringFilter) {
    let leaf = expr.as_leaf().expect("expected a leaf");
    match &leaf.kind {
        FilterKind::StringFilter(s) => (leaf.field_name.as_str(), s),
        other => panic!("expected a string filter, got {:?}", other),
    }
}

#[test]
fn test_dimension_op_parse() {
    assert_eq!(DimensionOp::parse("==").unwrap(), DimensionOp::Equals);
    assert_eq!(DimensionOp::parse("equals").unwrap(), DimensionOp::Equals);
    assert_eq!(DimensionOp::parse("!=").unwrap(), DimensionOp::NotEquals);
    assert_eq!(
        DimensionOp::parse("not_equals").unwrap(),
        DimensionOp::NotEquals
    );
    assert_eq!(
        DimensionOp::parse("contains").unwrap(),
        DimensionOp::Contains
    );
    assert_eq!(
        DimensionOp::parse("not_contains").unwrap(),
        DimensionOp::NotContains
    );
    assert_eq!(
        DimensionOp::parse("starts_with").unwrap(),
        DimensionOp::BeginsWith
    );
    assert_eq!(
        DimensionOp::parse("begins_with").unwrap(),
        DimensionOp::BeginsWith
    );
    assert_eq!(
        DimensionOp::parse("ends_with").unwrap(),
        DimensionOp::EndsWith
    );
    assert_eq!(DimensionOp::parse("regex").unwrap(), DimensionOp::FullRegexp);
    assert_eq!(
        DimensionOp::parse("matches_regex").unwrap(),
        DimensionOp::FullRegexp
    );
    assert_eq!(DimensionOp::parse("in").unwrap(), DimensionOp::In);
    assert_eq!(DimensionOp::parse("not_in").unwrap(), DimensionOp::NotIn);
    assert_eq!(DimensionOp::parse("is_null").unwrap(), DimensionOp::IsNull);
    assert_eq!(DimensionOp::parse("is_empty").unwrap(), DimensionOp::IsNull);
    assert_eq!(
        DimensionOp::parse("is_not_null").unwrap(),
        DimensionOp::IsNotNull
    );
    assert_eq!(
        DimensionOp::parse("is_not_empty").unwrap(),
        DimensionOp::IsNotNull
    );
}

#[test]
fn test_dimension_op_parse_normalizes() {
    assert_eq!(DimensionOp::parse(" CONTAINS ").unwrap(), DimensionOp::Contains);
    assert_eq!(DimensionOp::parse("Equals").unwrap(), DimensionOp::Equals);
}

#[test]
fn test_dimension_op_parse_invalid() {
    let err = DimensionOp::parse("almost_equals").unwrap_err();
    match err {
        ReportError::InvalidOperator {
            kind,
            operator,
            supported,
        } => {
            assert_eq!(kind, "dimension");
            assert_eq!(operator, "almost_equals");
            assert!(supported.contains("starts_with"));
        }
        other => panic!("expected InvalidOperator, got {:?}", other),
    }
}

#[test]
fn test_metric_op_parse() {
    assert_eq!(MetricOp::parse("==").unwrap(), MetricOp::Equals);
    assert_eq!(MetricOp::parse("!=").unwrap(), MetricOp::NotEquals);
    assert_eq!(MetricOp::parse("<").unwrap(), MetricOp::LessThan);
    assert_eq!(MetricOp::parse("less_than").unwrap(), MetricOp::LessThan);
    assert_eq!(MetricOp::parse("<=").unwrap(), MetricOp::LessThanOrEqual);
    assert_eq!(MetricOp::parse(">").unwrap(), MetricOp::GreaterThan);
    assert_eq!(
        MetricOp::parse(">=").unwrap(),
        MetricOp::GreaterThanOrEqual
    );
    assert_eq!(MetricOp::parse("between").unwrap(), MetricOp::Between);
    assert!(MetricOp::parse("contains").is_err());
}

#[test]
fn test_dimension_equals() {
    let expr = dimension_filter("country", "==", "United States").unwrap();
    let (field, string) = leaf_string(&expr);
    assert_eq!(field, "country");
    assert_eq!(string.value, "United States");
    assert_eq!(string.match_type, MatchType::Exact);
    assert!(!string.case_sensitive);
}

#[test]
fn test_dimension_equals_alias() {
    let expr = dimension_filter("city", "equals", "New York").unwrap();
    let (field, string) = leaf_string(&expr);
    assert_eq!(field, "city");
    assert_eq!(string.value, "New York");
}

#[test]
fn test_dimension_field_name_preserved() {
    for op in ["==", "contains", "starts_with", "ends_with", "regex"] {
        let expr = dimension_filter("pagePath", op, "/blog").unwrap();
        assert_eq!(expr.field_name(), Some("pagePath"));
    }
}

#[test]
fn test_dimension_not_equals_is_negated_equals() {
    let positive = dimension_filter("country", "==", "United States").unwrap();
    let negative = dimension_filter("country", "!=", "United States").unwrap();

    let inner = negative.as_negated().expect("expected a negation");
    assert_eq!(inner, &positive);
}

#[test]
fn test_dimension_contains() {
    let expr = dimension_filter("city", "contains", "New").unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.match_type, MatchType::Contains);
    assert_eq!(string.value, "New");
}

#[test]
fn test_dimension_not_contains_wraps_fresh_contains_leaf() {
    let expr = dimension_filter("city", "not_contains", "Test").unwrap();
    let inner = expr.as_negated().expect("expected a negation");
    let (field, string) = leaf_string(inner);
    assert_eq!(field, "city");
    assert_eq!(string.match_type, MatchType::Contains);
    assert_eq!(string.value, "Test");
}

#[test]
fn test_dimension_starts_with() {
    let expr = dimension_filter("browser", "starts_with", "Chrome").unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.match_type, MatchType::BeginsWith);

    let alias = dimension_filter("browser", "begins_with", "Chrome").unwrap();
    assert_eq!(alias, expr);
}

#[test]
fn test_dimension_ends_with() {
    let expr = dimension_filter("pagePath", "ends_with", ".html").unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.match_type, MatchType::EndsWith);
    assert_eq!(string.value, ".html");
}

#[test]
fn test_dimension_regex() {
    let expr = dimension_filter("pagePath", "regex", "^/blog/.*").unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.match_type, MatchType::FullRegexp);
    assert_eq!(string.value, "^/blog/.*");

    let alias = dimension_filter("pagePath", "matches_regex", "^/blog/.*").unwrap();
    assert_eq!(alias, expr);
}

#[test]
fn test_dimension_case_sensitive_flag() {
    let expr = dimension_filter_with_case("country", "==", "US", true).unwrap();
    let (_, string) = leaf_string(&expr);
    assert!(string.case_sensitive);
}

#[test]
fn test_dimension_numeric_scalar_is_stringified() {
    let expr = dimension_filter("eventCount", "==", 5).unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.value, "5");

    let expr = dimension_filter("bounceRate", "contains", 0.5).unwrap();
    let (_, string) = leaf_string(&expr);
    assert_eq!(string.value, "0.5");
}

#[test]
fn test_dimension_in_list() {
    let expr = dimension_filter("country", "in", vec!["United States", "Canada", "Mexico"])
        .unwrap();
    let leaf = expr.as_leaf().unwrap();
    match &leaf.kind {
        FilterKind::InListFilter(list) => {
            assert_eq!(list.values, vec!["United States", "Canada", "Mexico"]);
            assert!(!list.case_sensitive);
        }
        other => panic!("expected an in-list filter, got {:?}", other),
    }
}

#[test]
fn test_dimension_in_list_stringifies_scalars() {
    let expr = dimension_filter("eventCount", "in", vec![1, 2, 3]).unwrap();
    let leaf = expr.as_leaf().unwrap();
    match &leaf.kind {
        FilterKind::InListFilter(list) => assert_eq!(list.values, vec!["1", "2", "3"]),
        other => panic!("expected an in-list filter, got {:?}", other),
    }
}

#[test]
fn test_dimension_not_in_equals_negated_in() {
    let values = vec!["Chrome", "Firefox"];
    let not_in = dimension_filter("browser", "not_in", values.clone()).unwrap();
    let negated = not_filter(dimension_filter("browser", "in", values).unwrap());
    assert_eq!(not_in, negated);
}

#[test]
fn test_dimension_in_requires_list() {
    let err = dimension_filter("country", "in", "US").unwrap_err();
    match err {
        ReportError::InvalidValueType { operator, expected } => {
            assert_eq!(operator, "in");
            assert_eq!(expected, "a list of values");
        }
        other => panic!("expected InvalidValueType, got {:?}", other),
    }
}

#[test]
fn test_dimension_string_operator_rejects_list() {
    let err = dimension_filter("country", "==", vec!["US", "UK"]).unwrap_err();
    assert!(matches!(err, ReportError::InvalidValueType { .. }));
    assert!(err.to_string().contains("a string or numeric value"));
}

#[test]
fn test_dimension_is_null() {
    let expr = dimension_filter("landingPage", "is_null", "ignored").unwrap();
    let leaf = expr.as_leaf().unwrap();
    assert_eq!(leaf.field_name, "landingPage");
    assert!(matches!(leaf.kind, FilterKind::NullFilter(true)));

    let alias = dimension_filter("landingPage", "is_empty", "ignored").unwrap();
    assert_eq!(alias, expr);
}

#[test]
fn test_dimension_is_not_null() {
    let expr = dimension_filter("landingPage", "is_not_null", "ignored").unwrap();
    let inner = expr.as_negated().expect("expected a negation");
    assert!(matches!(
        inner.as_leaf().unwrap().kind,
        FilterKind::NullFilter(true)
    ));
}

#[test]
fn test_metric_greater_than() {
    let expr = metric_filter("activeUsers", ">", 1000).unwrap();
    let leaf = expr.as_leaf().unwrap();
    assert_eq!(leaf.field_name, "activeUsers");
    match &leaf.kind {
        FilterKind::NumericFilter(n) => {
            assert_eq!(n.operation, NumericOperation::GreaterThan);
            assert_eq!(n.value, NumericValue::Int64Value(1000));
        }
        other => panic!("expected a numeric filter, got {:?}", other),
    }
}

#[test]
fn test_metric_integer_literal_stays_integer() {
    let expr = metric_filter("sessions", "==", 5).unwrap();
    match &expr.as_leaf().unwrap().kind {
        FilterKind::NumericFilter(n) => assert_eq!(n.value, NumericValue::Int64Value(5)),
        other => panic!("expected a numeric filter, got {:?}", other),
    }
}

#[test]
fn test_metric_float_literal_stays_double() {
    let expr = metric_filter("bounceRate", "==", 5.0).unwrap();
    match &expr.as_leaf().unwrap().kind {
        FilterKind::NumericFilter(n) => assert_eq!(n.value, NumericValue::DoubleValue(5.0)),
        other => panic!("expected a numeric filter, got {:?}", other),
    }
}

#[test]
fn test_metric_not_equals_is_negated_equal() {
    let expr = metric_filter("sessions", "!=", 100).unwrap();
    let inner = expr.as_negated().expect("expected a negation");
    match &inner.as_leaf().unwrap().kind {
        FilterKind::NumericFilter(n) => assert_eq!(n.operation, NumericOperation::Equal),
        other => panic!("expected a numeric filter, got {:?}", other),
    }
}

#[test]
fn test_metric_between_integer_bounds() {
    let expr = metric_filter("sessions", "between", vec![100, 500]).unwrap();
    match &expr.as_leaf().unwrap().kind {
        FilterKind::BetweenFilter(b) => {
            assert_eq!(b.from_value, NumericValue::Int64Value(100));
            assert_eq!(b.to_value, NumericValue::Int64Value(500));
        }
        other => panic!("expected a between filter, got {:?}", other),
    }
}

#[test]
fn test_metric_between_float_bounds() {
    let expr = metric_filter("bounceRate", "between", vec![0.2, 0.8]).unwrap();
    match &expr.as_leaf().unwrap().kind {
        FilterKind::BetweenFilter(b) => {
            assert_eq!(b.from_value, NumericValue::DoubleValue(0.2));
            assert_eq!(b.to_value, NumericValue::DoubleValue(0.8));
        }
        other => panic!("expected a between filter, got {:?}", other),
    }
}

#[test]
fn test_metric_between_out_of_order_bounds_pass_through() {
    let expr = metric_filter("sessions", "between", vec![500, 100]).unwrap();
    match &expr.as_leaf().unwrap().kind {
        FilterKind::BetweenFilter(b) => {
            assert_eq!(b.from_value, NumericValue::Int64Value(500));
            assert_eq!(b.to_value, NumericValue::Int64Value(100));
        }
        other => panic!("expected a between filter, got {:?}", other),
    }
}

#[test]
fn test_metric_between_requires_two_element_list() {
    assert!(metric_filter("sessions", "between", vec![100]).is_err());
    assert!(metric_filter("sessions", "between", vec![1, 2, 3]).is_err());
    let err = metric_filter("sessions", "between", 100).unwrap_err();
    assert!(err.to_string().contains("[min, max]"));
}

#[test]
fn test_metric_comparison_requires_numeric() {
    let err = metric_filter("sessions", ">", "lots").unwrap_err();
    match err {
        ReportError::InvalidValueType { operator, expected } => {
            assert_eq!(operator, ">");
            assert_eq!(expected, "a numeric value");
        }
        other => panic!("expected InvalidValueType, got {:?}", other),
    }
}

#[test]
fn test_metric_invalid_operator() {
    let err = metric_filter("sessions", "almost", 1).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'almost'"));
    assert!(message.contains("between"));
}

#[test]
fn test_and_filter_combines() {
    let a = dimension_filter("country", "==", "US").unwrap();
    let b = metric_filter("sessions", ">", 100).unwrap();
    let combined = and_filter(vec![a.clone(), b.clone()]).unwrap();

    match combined {
        FilterExpression::AndGroup(group) => {
            assert_eq!(group.expressions, vec![a, b]);
        }
        other => panic!("expected an AND group, got {:?}", other),
    }
}

#[test]
fn test_or_filter_combines() {
    let a = dimension_filter("country", "==", "US").unwrap();
    let b = dimension_filter("country", "==", "UK").unwrap();
    let combined = or_filter(vec![a.clone(), b.clone()]).unwrap();

    match combined {
        FilterExpression::OrGroup(group) => {
            assert_eq!(group.expressions, vec![a, b]);
        }
        other => panic!("expected an OR group, got {:?}", other),
    }
}

#[test]
fn test_group_preserves_order() {
    let children: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|f| dimension_filter(*f, "==", "x").unwrap())
        .collect();
    let combined = and_filter(children.clone()).unwrap();

    match combined {
        FilterExpression::AndGroup(group) => assert_eq!(group.expressions, children),
        other => panic!("expected an AND group, got {:?}", other),
    }
}

#[test]
fn test_singleton_group_returns_child_unchanged() {
    let single = dimension_filter("country", "==", "US").unwrap();
    assert_eq!(and_filter(vec![single.clone()]).unwrap(), single);
    assert_eq!(or_filter(vec![single.clone()]).unwrap(), single);
}

#[test]
fn test_empty_group_is_an_error() {
    assert!(matches!(
        and_filter(vec![]).unwrap_err(),
        ReportError::EmptyFilterList("and_filter")
    ));
    assert!(matches!(
        or_filter(vec![]).unwrap_err(),
        ReportError::EmptyFilterList("or_filter")
    ));
}

#[test]
fn test_double_negation_is_not_simplified() {
    let base = dimension_filter("country", "==", "US").unwrap();
    let double = not_filter(not_filter(base.clone()));

    let outer = double.as_negated().expect("expected outer negation");
    let inner = outer.as_negated().expect("expected inner negation");
    assert_eq!(inner, &base);
    assert_ne!(double, base);
}

#[test]
fn test_string_leaf_wire_shape() {
    let expr = dimension_filter("country", "==", "US").unwrap();
    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "filter": {
                "fieldName": "country",
                "stringFilter": {
                    "matchType": "EXACT",
                    "value": "US",
                    "caseSensitive": false
                }
            }
        })
    );
}

#[test]
fn test_regex_leaf_wire_shape() {
    let expr = dimension_filter("pagePath", "regex", "^/blog/.*").unwrap();
    let value = serde_json::to_value(&expr).unwrap();
    assert_eq!(
        value["filter"]["stringFilter"]["matchType"],
        json!("FULL_REGEXP")
    );
}

#[test]
fn test_numeric_leaf_wire_shape() {
    let int_expr = metric_filter("sessions", ">=", 10).unwrap();
    assert_eq!(
        serde_json::to_value(&int_expr).unwrap(),
        json!({
            "filter": {
                "fieldName": "sessions",
                "numericFilter": {
                    "operation": "GREATER_THAN_OR_EQUAL",
                    "value": { "int64Value": 10 }
                }
            }
        })
    );

    let float_expr = metric_filter("bounceRate", "<", 0.5).unwrap();
    assert_eq!(
        serde_json::to_value(&float_expr).unwrap()["filter"]["numericFilter"]["value"],
        json!({ "doubleValue": 0.5 })
    );
}

#[test]
fn test_composite_wire_shape() {
    let expr = and_filter(vec![
        dimension_filter("country", "==", "US").unwrap(),
        not_filter(dimension_filter("browser", "in", vec!["IE"]).unwrap()),
    ])
    .unwrap();

    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "andGroup": {
                "expressions": [
                    {
                        "filter": {
                            "fieldName": "country",
                            "stringFilter": {
                                "matchType": "EXACT",
                                "value": "US",
                                "caseSensitive": false
                            }
                        }
                    },
                    {
                        "notExpression": {
                            "filter": {
                                "fieldName": "browser",
                                "inListFilter": {
                                    "values": ["IE"],
                                    "caseSensitive": false
                                }
                            }
                        }
                    }
                ]
            }
        })
    );
}

#[test]
fn test_null_leaf_wire_shape() {
    let expr = dimension_filter("landingPage", "is_null", "").unwrap();
    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "filter": {
                "fieldName": "landingPage",
                "nullFilter": true
            }
        })
    );
}

#[test]
fn test_filter_expression_roundtrip() {
    let expr = or_filter(vec![
        metric_filter("sessions", "between", vec![100, 500]).unwrap(),
        dimension_filter("city", "contains", "New").unwrap(),
    ])
    .unwrap();

    let encoded = serde_json::to_string(&expr).unwrap();
    let decoded: FilterExpression = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, expr);
}
