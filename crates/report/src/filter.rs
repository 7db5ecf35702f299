//! Filter expression construction for report requests
//!
//! Translates a small operator vocabulary (`==`, `contains`, `in`, `between`, ...)
//! plus AND/OR/NOT combinators into the nested filter expression tree the GA4
//! Data API consumes. Every function here is a pure mapping from inputs to a
//! finished tree or an error; nodes are never mutated after construction.

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Accepted dimension filter operators, as listed in error messages
pub const DIMENSION_OPERATORS: &str = "==, equals, !=, not_equals, contains, not_contains, \
     starts_with, begins_with, ends_with, regex, matches_regex, in, not_in, \
     is_null, is_empty, is_not_null, is_not_empty";

/// Accepted metric filter operators, as listed in error messages
pub const METRIC_OPERATORS: &str = "==, equals, !=, not_equals, <, less_than, \
     <=, less_than_or_equal, >, greater_than, >=, greater_than_or_equal, between";

/// A node in a filter expression tree
///
/// Serializes to the GA4 Data API v1beta JSON shape (`andGroup`, `orGroup`,
/// `notExpression`, or a single `filter` leaf). Children of a group keep the
/// order they were supplied in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpression {
    /// All child expressions must hold
    AndGroup(FilterExpressionList),
    /// At least one child expression must hold
    OrGroup(FilterExpressionList),
    /// Inverts the truth value of exactly one child
    NotExpression(Box<FilterExpression>),
    /// A single field comparison
    Filter(FieldFilter),
}

impl FilterExpression {
    /// The leaf comparison, if this node is one
    pub fn as_leaf(&self) -> Option<&FieldFilter> {
        match self {
            Self::Filter(f) => Some(f),
            _ => None,
        }
    }

    /// The negated child, if this node is a negation
    pub fn as_negated(&self) -> Option<&FilterExpression> {
        match self {
            Self::NotExpression(inner) => Some(inner),
            _ => None,
        }
    }

    /// Field name of the leaf, if this node is one
    pub fn field_name(&self) -> Option<&str> {
        self.as_leaf().map(|f| f.field_name.as_str())
    }
}

/// Ordered children of an AND/OR group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpressionList {
    /// Child expressions, caller order preserved
    pub expressions: Vec<FilterExpression>,
}

/// A leaf comparison against a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilter {
    /// Dimension or metric name (e.g. "country", "sessions")
    pub field_name: String,
    /// The comparison applied to the field, exactly one kind
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// The comparison carried by a leaf
///
/// A leaf holds exactly one of these; the enum makes carrying two kinds at
/// once unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// String match (exact, substring, prefix, suffix, or regex)
    StringFilter(StringFilter),
    /// Membership in an ordered list of string values
    InListFilter(InListFilter),
    /// Numeric comparison against a single value
    NumericFilter(NumericFilter),
    /// Inclusive numeric range
    BetweenFilter(BetweenFilter),
    /// Field is absent or empty
    NullFilter(bool),
}

/// String comparison leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    /// How the value is matched
    pub match_type: MatchType,
    /// Literal to match against
    pub value: String,
    /// Whether matching is case-sensitive (API default is false)
    pub case_sensitive: bool,
}

/// In-list comparison leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InListFilter {
    /// Values to match, caller order preserved
    pub values: Vec<String>,
    /// Whether matching is case-sensitive
    pub case_sensitive: bool,
}

/// Numeric comparison leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericFilter {
    /// Comparison operation
    pub operation: NumericOperation,
    /// Value to compare against
    pub value: NumericValue,
}

/// Inclusive range leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenFilter {
    /// Lower bound (inclusive)
    pub from_value: NumericValue,
    /// Upper bound (inclusive)
    pub to_value: NumericValue,
}

/// String match modes supported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Exact match of the full string
    Exact,
    /// Contains the value as a substring
    Contains,
    /// Starts with the value
    BeginsWith,
    /// Ends with the value
    EndsWith,
    /// Full match of a regular expression
    FullRegexp,
}

/// Numeric comparison operations supported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericOperation {
    /// Equal
    Equal,
    /// Strictly less than
    LessThan,
    /// Less than or equal
    LessThanOrEqual,
    /// Strictly greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanOrEqual,
}

/// A numeric literal carried as exactly one representation
///
/// The representation follows the caller's literal type: an `i64` stays an
/// integer, an `f64` stays a double. No string parsing is involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericValue {
    /// 64-bit signed integer
    Int64Value(i64),
    /// 64-bit floating point
    DoubleValue(f64),
}

/// A caller-supplied filter value: a scalar or a list of scalars
///
/// `From` conversions let call sites pass literals directly:
/// `dimension_filter("country", "==", "US")`,
/// `metric_filter("sessions", "between", vec![100, 500])`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String scalar
    Str(String),
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// List of scalars (for `in`, `not_in`, `between`)
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Canonical string form for string-mode leaves; `None` for lists
    fn to_filter_string(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::List(_) => None,
        }
    }

    /// Typed numeric form; `None` for strings and lists
    fn as_numeric(&self) -> Option<NumericValue> {
        match self {
            Self::Int(i) => Some(NumericValue::Int64Value(*i)),
            Self::Float(f) => Some(NumericValue::DoubleValue(*f)),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(FilterValue::from).collect())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v.into_iter().map(FilterValue::from).collect())
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(v: Vec<i64>) -> Self {
        Self::List(v.into_iter().map(FilterValue::from).collect())
    }
}

impl From<Vec<i32>> for FilterValue {
    fn from(v: Vec<i32>) -> Self {
        Self::List(v.into_iter().map(FilterValue::from).collect())
    }
}

impl From<Vec<f64>> for FilterValue {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v.into_iter().map(FilterValue::from).collect())
    }
}

/// Canonical dimension filter operators, resolved from their string aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionOp {
    /// `==`, `equals`
    Equals,
    /// `!=`, `not_equals`
    NotEquals,
    /// `contains`
    Contains,
    /// `not_contains`
    NotContains,
    /// `starts_with`, `begins_with`
    BeginsWith,
    /// `ends_with`
    EndsWith,
    /// `regex`, `matches_regex`
    FullRegexp,
    /// `in`
    In,
    /// `not_in`
    NotIn,
    /// `is_null`, `is_empty`
    IsNull,
    /// `is_not_null`, `is_not_empty`
    IsNotNull,
}

impl DimensionOp {
    /// Resolve an operator string (case-insensitive, trimmed) to its tag
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "==" | "equals" => Ok(Self::Equals),
            "!=" | "not_equals" => Ok(Self::NotEquals),
            "contains" => Ok(Self::Contains),
            "not_contains" => Ok(Self::NotContains),
            "starts_with" | "begins_with" => Ok(Self::BeginsWith),
            "ends_with" => Ok(Self::EndsWith),
            "regex" | "matches_regex" => Ok(Self::FullRegexp),
            "in" => Ok(Self::In),
            "not_in" => Ok(Self::NotIn),
            "is_null" | "is_empty" => Ok(Self::IsNull),
            "is_not_null" | "is_not_empty" => Ok(Self::IsNotNull),
            other => Err(ReportError::InvalidOperator {
                kind: "dimension",
                operator: other.to_string(),
                supported: DIMENSION_OPERATORS,
            }),
        }
    }
}

/// Canonical metric filter operators, resolved from their string aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricOp {
    /// `==`, `equals`
    Equals,
    /// `!=`, `not_equals`
    NotEquals,
    /// `<`, `less_than`
    LessThan,
    /// `<=`, `less_than_or_equal`
    LessThanOrEqual,
    /// `>`, `greater_than`
    GreaterThan,
    /// `>=`, `greater_than_or_equal`
    GreaterThanOrEqual,
    /// `between`
    Between,
}

impl MetricOp {
    /// Resolve an operator string (case-insensitive, trimmed) to its tag
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "==" | "equals" => Ok(Self::Equals),
            "!=" | "not_equals" => Ok(Self::NotEquals),
            "<" | "less_than" => Ok(Self::LessThan),
            "<=" | "less_than_or_equal" => Ok(Self::LessThanOrEqual),
            ">" | "greater_than" => Ok(Self::GreaterThan),
            ">=" | "greater_than_or_equal" => Ok(Self::GreaterThanOrEqual),
            "between" => Ok(Self::Between),
            other => Err(ReportError::InvalidOperator {
                kind: "metric",
                operator: other.to_string(),
                supported: METRIC_OPERATORS,
            }),
        }
    }
}

/// Build a dimension filter (case-insensitive matching)
///
/// Scalars passed to string-mode operators are stringified (`5` becomes `"5"`).
/// `in` / `not_in` require a list value; `is_null` / `is_not_null` ignore the
/// value entirely.
///
/// # Example
///
/// ```
/// use ga4_report::filter::dimension_filter;
///
/// let by_country = dimension_filter("country", "==", "United States").unwrap();
/// let browsers = dimension_filter("browser", "in", vec!["Chrome", "Firefox"]).unwrap();
/// ```
pub fn dimension_filter(
    field: impl Into<String>,
    operator: &str,
    value: impl Into<FilterValue>,
) -> Result<FilterExpression> {
    dimension_filter_with_case(field, operator, value, false)
}

/// Build a dimension filter with an explicit case-sensitivity flag
pub fn dimension_filter_with_case(
    field: impl Into<String>,
    operator: &str,
    value: impl Into<FilterValue>,
    case_sensitive: bool,
) -> Result<FilterExpression> {
    let field = field.into();
    let operator = operator.trim().to_lowercase();
    let value = value.into();

    // Resolve the operator before touching the value so unknown operators are
    // rejected with the full supported set, whatever the value looks like.
    let op = DimensionOp::parse(&operator)?;

    match op {
        DimensionOp::IsNull => Ok(null_leaf(field)),
        DimensionOp::IsNotNull => Ok(not_filter(null_leaf(field))),
        DimensionOp::In | DimensionOp::NotIn => {
            let values = list_values(&operator, &value)?;
            let leaf = in_list_leaf(field, values, case_sensitive);
            if op == DimensionOp::NotIn {
                Ok(not_filter(leaf))
            } else {
                Ok(leaf)
            }
        }
        _ => {
            let text = value
                .to_filter_string()
                .ok_or_else(|| ReportError::invalid_value(&operator, "a string or numeric value"))?;

            // Each negated operator constructs its own leaf rather than
            // reusing one built for the positive form.
            Ok(match op {
                DimensionOp::Equals => string_leaf(field, MatchType::Exact, text, case_sensitive),
                DimensionOp::NotEquals => {
                    not_filter(string_leaf(field, MatchType::Exact, text, case_sensitive))
                }
                DimensionOp::Contains => {
                    string_leaf(field, MatchType::Contains, text, case_sensitive)
                }
                DimensionOp::NotContains => {
                    not_filter(string_leaf(field, MatchType::Contains, text, case_sensitive))
                }
                DimensionOp::BeginsWith => {
                    string_leaf(field, MatchType::BeginsWith, text, case_sensitive)
                }
                DimensionOp::EndsWith => {
                    string_leaf(field, MatchType::EndsWith, text, case_sensitive)
                }
                DimensionOp::FullRegexp => {
                    string_leaf(field, MatchType::FullRegexp, text, case_sensitive)
                }
                // Handled above
                DimensionOp::In
                | DimensionOp::NotIn
                | DimensionOp::IsNull
                | DimensionOp::IsNotNull => unreachable!(),
            })
        }
    }
}

/// Build a metric filter
///
/// Comparison operators require a numeric scalar; `between` requires exactly a
/// two-element list of `[min, max]`. Each bound keeps the representation of its
/// literal: an integer stays an integer, a float stays a double.
///
/// # Example
///
/// ```
/// use ga4_report::filter::metric_filter;
///
/// let busy = metric_filter("activeUsers", ">", 1000).unwrap();
/// let mid = metric_filter("sessions", "between", vec![100, 500]).unwrap();
/// ```
pub fn metric_filter(
    field: impl Into<String>,
    operator: &str,
    value: impl Into<FilterValue>,
) -> Result<FilterExpression> {
    let field = field.into();
    let operator = operator.trim().to_lowercase();
    let value = value.into();

    let op = MetricOp::parse(&operator)?;

    if op == MetricOp::Between {
        let (from_value, to_value) = between_bounds(&operator, &value)?;
        // Bounds are passed through as given: the API receives out-of-order
        // ranges unchanged.
        return Ok(FilterExpression::Filter(FieldFilter {
            field_name: field,
            kind: FilterKind::BetweenFilter(BetweenFilter {
                from_value,
                to_value,
            }),
        }));
    }

    let numeric = value
        .as_numeric()
        .ok_or_else(|| ReportError::invalid_value(&operator, "a numeric value"))?;

    let operation = match op {
        MetricOp::Equals | MetricOp::NotEquals => NumericOperation::Equal,
        MetricOp::LessThan => NumericOperation::LessThan,
        MetricOp::LessThanOrEqual => NumericOperation::LessThanOrEqual,
        MetricOp::GreaterThan => NumericOperation::GreaterThan,
        MetricOp::GreaterThanOrEqual => NumericOperation::GreaterThanOrEqual,
        MetricOp::Between => unreachable!(),
    };

    let leaf = numeric_leaf(field, operation, numeric);
    if op == MetricOp::NotEquals {
        Ok(not_filter(leaf))
    } else {
        Ok(leaf)
    }
}

/// Combine filters with AND logic
///
/// Errors on an empty list; a single filter is returned unchanged rather than
/// wrapped in a one-element group. Child order is preserved.
pub fn and_filter(mut filters: Vec<FilterExpression>) -> Result<FilterExpression> {
    if filters.is_empty() {
        return Err(ReportError::EmptyFilterList("and_filter"));
    }
    if filters.len() == 1 {
        return Ok(filters.remove(0));
    }
    Ok(FilterExpression::AndGroup(FilterExpressionList {
        expressions: filters,
    }))
}

/// Combine filters with OR logic
///
/// Same contract as [`and_filter`].
pub fn or_filter(mut filters: Vec<FilterExpression>) -> Result<FilterExpression> {
    if filters.is_empty() {
        return Err(ReportError::EmptyFilterList("or_filter"));
    }
    if filters.len() == 1 {
        return Ok(filters.remove(0));
    }
    Ok(FilterExpression::OrGroup(FilterExpressionList {
        expressions: filters,
    }))
}

/// Negate a filter expression
///
/// Always wraps, even when the input is already a negation; nested NOTs are
/// never collapsed.
pub fn not_filter(filter: FilterExpression) -> FilterExpression {
    FilterExpression::NotExpression(Box::new(filter))
}

fn string_leaf(
    field: String,
    match_type: MatchType,
    value: String,
    case_sensitive: bool,
) -> FilterExpression {
    FilterExpression::Filter(FieldFilter {
        field_name: field,
        kind: FilterKind::StringFilter(StringFilter {
            match_type,
            value,
            case_sensitive,
        }),
    })
}

fn in_list_leaf(field: String, values: Vec<String>, case_sensitive: bool) -> FilterExpression {
    FilterExpression::Filter(FieldFilter {
        field_name: field,
        kind: FilterKind::InListFilter(InListFilter {
            values,
            case_sensitive,
        }),
    })
}

fn numeric_leaf(
    field: String,
    operation: NumericOperation,
    value: NumericValue,
) -> FilterExpression {
    FilterExpression::Filter(FieldFilter {
        field_name: field,
        kind: FilterKind::NumericFilter(NumericFilter { operation, value }),
    })
}

fn null_leaf(field: String) -> FilterExpression {
    FilterExpression::Filter(FieldFilter {
        field_name: field,
        kind: FilterKind::NullFilter(true),
    })
}

/// Stringify the elements of a list value for an in-list leaf
fn list_values(operator: &str, value: &FilterValue) -> Result<Vec<String>> {
    let items = match value {
        FilterValue::List(items) => items,
        _ => return Err(ReportError::invalid_value(operator, "a list of values")),
    };

    items
        .iter()
        .map(|item| {
            item.to_filter_string()
                .ok_or_else(|| ReportError::invalid_value(operator, "a list of scalar values"))
        })
        .collect()
}

/// Extract the two typed bounds of a `between` value
fn between_bounds(operator: &str, value: &FilterValue) -> Result<(NumericValue, NumericValue)> {
    const EXPECTED: &str = "a list of two values: [min, max]";

    let items = match value {
        FilterValue::List(items) if items.len() == 2 => items,
        _ => return Err(ReportError::invalid_value(operator, EXPECTED)),
    };

    let from_value = items[0]
        .as_numeric()
        .ok_or_else(|| ReportError::invalid_value(operator, EXPECTED))?;
    let to_value = items[1]
        .as_numeric()
        .ok_or_else(|| ReportError::invalid_value(operator, EXPECTED))?;

    Ok((from_value, to_value))
}
