use derive_more::{Display, FromStr};
use serde::Serialize;
use std::fmt;

///
/// ScalarKind
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ScalarKind {
    Blob,
    Bool,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Key,
    Text,
    Timestamp,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl ScalarKind {
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    // is_numeric
    // Includes ints and floats.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_int() || self.is_float()
    }

    // both Ord and PartialOrd for query comparisons
    #[must_use]
    pub const fn is_orderable(self) -> bool {
        !matches!(self, Self::Blob)
    }
}

///
/// TypeShape
///
/// Declared static type of a field, reduced to what the mapping layer needs
/// to classify it. Iterables carry `None` as element when the element type
/// is not known at declaration time (an untyped iterable).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeShape {
    Any,
    List(Option<Box<Self>>),
    Map { key: Box<Self>, value: Box<Self> },
    Named(&'static str),
    Optional(Box<Self>),
    Pair(Box<Self>, Box<Self>),
    Scalar(ScalarKind),
    Set(Option<Box<Self>>),
}

impl TypeShape {
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::Scalar(ScalarKind::Text)
    }

    #[must_use]
    pub const fn named(path: &'static str) -> Self {
        Self::Named(path)
    }

    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Some(Box::new(element)))
    }

    #[must_use]
    pub const fn untyped_list() -> Self {
        Self::List(None)
    }

    #[must_use]
    pub fn set(element: Self) -> Self {
        Self::Set(Some(Box::new(element)))
    }

    #[must_use]
    pub const fn untyped_set() -> Self {
        Self::Set(None)
    }

    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    #[must_use]
    pub fn pair(key: Self, value: Self) -> Self {
        Self::Pair(Box::new(key), Box::new(value))
    }

    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    //
    // classification
    //

    /// Collection-like shapes (lists and sets). Maps are not iterable here.
    /// An optional collection is still a collection.
    #[must_use]
    pub fn is_iterable(&self) -> bool {
        matches!(self.peel_optional(), Self::List(_) | Self::Set(_))
    }

    /// Ordered sequences only.
    #[must_use]
    pub fn is_list_like(&self) -> bool {
        matches!(self.peel_optional(), Self::List(_))
    }

    #[must_use]
    pub fn is_untyped_iterable(&self) -> bool {
        matches!(self.peel_optional(), Self::List(None) | Self::Set(None))
    }

    #[must_use]
    pub const fn is_pair(&self) -> bool {
        matches!(self, Self::Pair(..))
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self.peel_optional(), Self::Map { .. })
    }

    /// Element shape of a typed iterable; `None` for untyped iterables and
    /// for anything that is not iterable.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self.peel_optional() {
            Self::List(Some(element)) | Self::Set(Some(element)) => Some(element.as_ref()),
            _ => None,
        }
    }

    /// Optional wrappers are transparent for capability checks.
    #[must_use]
    pub fn peel_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.peel_optional(),
            other => other,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.peel_optional(), Self::Scalar(ScalarKind::Text))
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.peel_optional(), Self::Scalar(ScalarKind::Bool))
    }

    #[must_use]
    pub fn is_orderable(&self) -> bool {
        match self.peel_optional() {
            Self::Scalar(kind) => kind.is_orderable(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::List(Some(element)) => write!(f, "List<{element}>"),
            Self::List(None) => f.write_str("List<?>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            Self::Named(path) => f.write_str(path),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Pair(key, value) => write!(f, "({key}, {value})"),
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Set(Some(element)) => write!(f, "Set<{element}>"),
            Self::Set(None) => f.write_str("Set<?>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_iterable_and_list_like() {
        let shape = TypeShape::list(TypeShape::scalar(ScalarKind::Float64));

        assert!(shape.is_iterable());
        assert!(shape.is_list_like());
        assert_eq!(shape.element(), Some(&TypeShape::Scalar(ScalarKind::Float64)));
    }

    #[test]
    fn sets_are_iterable_but_not_list_like() {
        let shape = TypeShape::set(TypeShape::text());

        assert!(shape.is_iterable());
        assert!(!shape.is_list_like(), "sets carry no order");
    }

    #[test]
    fn untyped_iterables_have_no_element() {
        assert!(TypeShape::untyped_list().is_untyped_iterable());
        assert_eq!(TypeShape::untyped_list().element(), None);
        assert_eq!(TypeShape::untyped_set().element(), None);
    }

    #[test]
    fn maps_are_not_iterable() {
        let shape = TypeShape::map(TypeShape::text(), TypeShape::scalar(ScalarKind::Int64));

        assert!(!shape.is_iterable());
        assert!(shape.is_map());
    }

    #[test]
    fn optional_is_transparent_for_scalar_checks() {
        let shape = TypeShape::optional(TypeShape::scalar(ScalarKind::Int32));

        assert!(shape.is_orderable());
        assert!(!TypeShape::optional(TypeShape::text()).is_bool());
        assert!(!TypeShape::scalar(ScalarKind::Blob).is_orderable());
    }

    #[test]
    fn optional_is_transparent_for_iterable_checks() {
        let doubles = TypeShape::optional(TypeShape::list(TypeShape::scalar(ScalarKind::Float64)));
        let raw = TypeShape::optional(TypeShape::untyped_list());
        let pairs = TypeShape::optional(TypeShape::list(TypeShape::pair(
            TypeShape::text(),
            TypeShape::scalar(ScalarKind::Int64),
        )));

        assert!(doubles.is_iterable());
        assert!(doubles.is_list_like());
        assert_eq!(doubles.element(), Some(&TypeShape::Scalar(ScalarKind::Float64)));

        assert!(raw.is_iterable());
        assert!(raw.is_untyped_iterable());
        assert_eq!(raw.element(), None);

        assert!(pairs.element().is_some_and(TypeShape::is_pair));
        assert!(!TypeShape::optional(TypeShape::set(TypeShape::text())).is_list_like());
        assert!(TypeShape::optional(TypeShape::map(TypeShape::text(), TypeShape::text())).is_map());
    }

    #[test]
    fn display_renders_nested_shapes() {
        let shape = TypeShape::list(TypeShape::pair(TypeShape::text(), TypeShape::Any));

        assert_eq!(shape.to_string(), "List<(Text, Any)>");
        assert_eq!(TypeShape::untyped_list().to_string(), "List<?>");
    }

    #[test]
    fn scalar_kind_parses_from_name() {
        assert_eq!("Float64".parse::<ScalarKind>().ok(), Some(ScalarKind::Float64));
        assert!("Double".parse::<ScalarKind>().is_err());
    }
}
