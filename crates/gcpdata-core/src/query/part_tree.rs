//! Module: query::part_tree
//! Responsibility: derive query structure from a repository method name.
//! Does not own: SQL generation or value binding (host `QueryFactory`).

use crate::{
    model::{entity::PersistentEntity, property::PropertyDescriptor},
    query::QueryError,
};
use convert_case::{Case, Casing};
use derive_more::Display;
use serde::Serialize;

const SUBJECTS: [(&str, Subject); 10] = [
    ("find", Subject::Find),
    ("read", Subject::Find),
    ("get", Subject::Find),
    ("query", Subject::Find),
    ("search", Subject::Find),
    ("stream", Subject::Find),
    ("count", Subject::Count),
    ("exists", Subject::Exists),
    ("delete", Subject::Delete),
    ("remove", Subject::Delete),
];

// Checked in order; longer spellings before their suffixes.
const OPERATORS: [(&str, PartOp); 32] = [
    ("IsNotNull", PartOp::IsNotNull),
    ("NotNull", PartOp::IsNotNull),
    ("IsNull", PartOp::IsNull),
    ("Null", PartOp::IsNull),
    ("IsNotEmpty", PartOp::IsNotEmpty),
    ("NotEmpty", PartOp::IsNotEmpty),
    ("IsEmpty", PartOp::IsEmpty),
    ("Empty", PartOp::IsEmpty),
    ("GreaterThanEqual", PartOp::Gte),
    ("GreaterThan", PartOp::Gt),
    ("LessThanEqual", PartOp::Lte),
    ("LessThan", PartOp::Lt),
    ("After", PartOp::Gt),
    ("Before", PartOp::Lt),
    ("IsNotIn", PartOp::NotIn),
    ("NotIn", PartOp::NotIn),
    ("IsIn", PartOp::In),
    ("In", PartOp::In),
    ("Containing", PartOp::Contains),
    ("Contains", PartOp::Contains),
    ("StartingWith", PartOp::StartsWith),
    ("StartsWith", PartOp::StartsWith),
    ("EndingWith", PartOp::EndsWith),
    ("EndsWith", PartOp::EndsWith),
    ("IsTrue", PartOp::IsTrue),
    ("True", PartOp::IsTrue),
    ("IsFalse", PartOp::IsFalse),
    ("False", PartOp::IsFalse),
    ("IsNot", PartOp::Ne),
    ("Not", PartOp::Ne),
    ("Equals", PartOp::Eq),
    ("Is", PartOp::Eq),
];

///
/// Subject
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Subject {
    Count,
    Delete,
    Exists,
    Find,
}

///
/// PartOp
///
/// Comparison applied by one criterion.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum PartOp {
    Contains,
    EndsWith,
    Eq,
    Gt,
    Gte,
    In,
    IsEmpty,
    IsFalse,
    IsNotEmpty,
    IsNotNull,
    IsNull,
    IsTrue,
    Lt,
    Lte,
    Ne,
    NotIn,
    StartsWith,
}

impl PartOp {
    /// Number of method parameters this operator consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::IsEmpty
            | Self::IsFalse
            | Self::IsNotEmpty
            | Self::IsNotNull
            | Self::IsNull
            | Self::IsTrue => 0,
            _ => 1,
        }
    }

    const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }
}

///
/// Part
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Part {
    pub field: &'static str,
    pub mapped_name: String,
    pub op: PartOp,
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// Order
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Order {
    pub field: &'static str,
    pub mapped_name: String,
    pub direction: Direction,
}

///
/// PartTree
///
/// Parsed form of a derived query method name such as
/// `findTop3ByActionAndSymbolOrderByPriceDesc`. `criteria` is a disjunction
/// of conjunctions.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PartTree {
    pub subject: Subject,
    pub distinct: bool,
    pub limit: Option<usize>,
    pub criteria: Vec<Vec<Part>>,
    pub order_by: Vec<Order>,
}

impl PartTree {
    pub fn parse(method: &str, entity: &PersistentEntity) -> Result<Self, QueryError> {
        let (subject, rest) = SUBJECTS
            .iter()
            .find_map(|(prefix, subject)| {
                method
                    .strip_prefix(prefix)
                    .filter(|rest| rest.is_empty() || starts_upper(rest))
                    .map(|rest| (*subject, rest))
            })
            .ok_or_else(|| QueryError::invalid_method(method, "unknown subject prefix"))?;

        if rest.ends_with("OrderBy") {
            return Err(QueryError::invalid_method(method, "OrderBy names no property"));
        }

        let (head, order_text) = match keyword_positions(rest, "OrderBy").first() {
            Some(&at) => (&rest[..at], Some(&rest[at + 7..])),
            None => (rest, None),
        };
        let (subject_text, criteria_text) = match keyword_positions(head, "By").first() {
            Some(&at) => (&head[..at], &head[at + 2..]),
            None => (head, ""),
        };

        if criteria_text.is_empty() && subject_text.ends_with("By") {
            return Err(QueryError::invalid_method(method, "By names no criteria"));
        }

        let distinct = subject_text.contains("Distinct");
        let limit = parse_limit(method, subject_text)?;

        let criteria = if criteria_text.is_empty() {
            Vec::new()
        } else {
            split_keyword(criteria_text, "Or")
                .into_iter()
                .map(|branch| {
                    split_keyword(branch, "And")
                        .into_iter()
                        .map(|token| resolve_part(method, entity, token))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let order_by = match order_text {
            Some(text) => parse_order(method, entity, text)?,
            None => Vec::new(),
        };

        Ok(Self {
            subject,
            distinct,
            limit,
            criteria,
            order_by,
        })
    }

    /// Values the criteria consume, in declaration order.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parts().map(|part| part.op.arity()).sum()
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.criteria.iter().flatten()
    }
}

//
// tokenizing
//

fn starts_upper(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

// Offsets where `keyword` starts a new word: followed by an uppercase letter.
fn keyword_positions(s: &str, keyword: &str) -> Vec<usize> {
    s.match_indices(keyword)
        .map(|(at, _)| at)
        .filter(|at| starts_upper(&s[at + keyword.len()..]))
        .collect()
}

fn split_keyword<'a>(s: &'a str, keyword: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for at in keyword_positions(s, keyword) {
        if at > start {
            parts.push(&s[start..at]);
            start = at + keyword.len();
        }
    }
    parts.push(&s[start..]);

    parts
}

fn parse_limit(method: &str, subject_text: &str) -> Result<Option<usize>, QueryError> {
    // `First`/`Top` count only as a whole word, optionally followed by digits.
    let Some(after) = ["First", "Top"].iter().find_map(|kw| {
        subject_text
            .match_indices(kw)
            .map(|(at, _)| &subject_text[at + kw.len()..])
            .find(|after| {
                let rest = after.trim_start_matches(|c: char| c.is_ascii_digit());
                rest.is_empty() || starts_upper(rest)
            })
    }) else {
        return Ok(None);
    };

    let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(Some(1));
    }

    match digits.parse::<usize>() {
        Ok(0) => Err(QueryError::invalid_method(method, "result limit must be positive")),
        Ok(n) => Ok(Some(n)),
        Err(err) => Err(QueryError::invalid_method(method, err.to_string())),
    }
}

//
// resolution
//

fn find_property<'e>(
    entity: &'e PersistentEntity,
    token: &str,
) -> Option<&'e PropertyDescriptor> {
    entity
        .properties()
        .find(|prop| prop.field_name().to_case(Case::Pascal) == token)
}

fn unknown_property(method: &str, entity: &PersistentEntity, token: &str) -> QueryError {
    QueryError::UnknownProperty {
        method: method.to_string(),
        entity: entity.path().to_string(),
        property: token.to_string(),
    }
}

fn resolve_part(
    method: &str,
    entity: &PersistentEntity,
    token: &str,
) -> Result<Part, QueryError> {
    if token.is_empty() {
        return Err(QueryError::invalid_method(method, "empty criterion"));
    }

    let (prop, op) = find_property(entity, token)
        .map(|prop| (prop, PartOp::Eq))
        .or_else(|| {
            OPERATORS.iter().find_map(|(suffix, op)| {
                token
                    .strip_suffix(suffix)
                    .filter(|prefix| !prefix.is_empty())
                    .and_then(|prefix| find_property(entity, prefix))
                    .map(|prop| (prop, *op))
            })
        })
        .ok_or_else(|| unknown_property(method, entity, token))?;

    check_operator(prop, op)?;

    Ok(Part {
        field: prop.field_name(),
        mapped_name: prop.mapped_name().to_string(),
        op,
    })
}

fn check_operator(prop: &PropertyDescriptor, op: PartOp) -> Result<(), QueryError> {
    let shape = prop.declared_type();

    let supported = match op {
        _ if op.is_ordering() => shape.is_orderable(),
        PartOp::StartsWith | PartOp::EndsWith => shape.is_text(),
        PartOp::Contains if prop.is_iterable() => {
            prop.iterable_inner_type()?;
            true
        }
        PartOp::Contains => shape.is_text(),
        PartOp::IsTrue | PartOp::IsFalse => shape.is_bool(),
        PartOp::IsEmpty | PartOp::IsNotEmpty => prop.is_iterable() || shape.is_map(),
        _ => true,
    };

    if supported {
        Ok(())
    } else {
        Err(QueryError::UnsupportedOperator {
            op,
            property: prop.field_name().to_string(),
            shape: shape.to_string(),
        })
    }
}

fn parse_order(
    method: &str,
    entity: &PersistentEntity,
    text: &str,
) -> Result<Vec<Order>, QueryError> {
    let mut orders = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (token, direction, consumed) = match next_direction(rest) {
            Some((at, kw, direction)) => (&rest[..at], direction, at + kw.len()),
            None => (rest, Direction::Asc, rest.len()),
        };

        let prop =
            find_property(entity, token).ok_or_else(|| unknown_property(method, entity, token))?;
        if !prop.declared_type().is_orderable() {
            return Err(QueryError::UnsupportedOperator {
                op: PartOp::Lt,
                property: prop.field_name().to_string(),
                shape: prop.declared_type().to_string(),
            });
        }

        orders.push(Order {
            field: prop.field_name(),
            mapped_name: prop.mapped_name().to_string(),
            direction,
        });
        rest = &rest[consumed..];
    }

    Ok(orders)
}

// First `Asc`/`Desc` that ends a word, skipping offset 0 so a property
// name is always consumed.
fn next_direction(s: &str) -> Option<(usize, &'static str, Direction)> {
    let ends_word = |end: usize| {
        s.get(end..)
            .is_some_and(|tail| tail.is_empty() || starts_upper(tail))
    };

    (1..s.len()).filter(|at| s.is_char_boundary(*at)).find_map(|at| {
        [("Desc", Direction::Desc), ("Asc", Direction::Asc)]
            .into_iter()
            .find(|(kw, _)| s[at..].starts_with(kw) && ends_word(at + kw.len()))
            .map(|(kw, direction)| (at, kw, direction))
    })
}

///
/// TESTS
///
