/// Leaf value types a property can bottom out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
    Uri,
    DateTime,
    /// Untyped JSON value.
    Any,
}

impl Primitive {
    /// Keyword accepted in `DictionaryHint.valueType`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "uri" => Self::Uri,
            "date-time" => Self::DateTime,
            "object" | "any" => Self::Any,
            _ => return None,
        })
    }

    /// Primitives that can never hold null in the generated code.
    pub fn is_value_type(self) -> bool {
        matches!(self, Self::Integer | Self::Number | Self::Boolean | Self::DateTime)
    }
}

/// Type of a property, recursively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Scalar(Primitive),
    /// A schema-defined (generated) class, by generated name.
    Class(String),
    Array(Box<TypeShape>),
    /// String-keyed map.
    Map(Box<TypeShape>),
}

impl TypeShape {
    pub fn array_of(inner: TypeShape) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn map_of(inner: TypeShape) -> Self {
        Self::Map(Box::new(inner))
    }

    /// Number of array wrappers above the first non-array shape.
    pub fn array_depth(&self) -> usize {
        match self {
            Self::Array(inner) => 1 + inner.array_depth(),
            _ => 0,
        }
    }

    /// Bottom of the container chain, through arrays and maps.
    pub fn ultimate_element(&self) -> &TypeShape {
        match self {
            Self::Array(inner) | Self::Map(inner) => inner.ultimate_element(),
            leaf => leaf,
        }
    }

    pub fn contains_class(&self) -> bool {
        matches!(self.ultimate_element(), Self::Class(_))
    }

    pub fn is_reference_type(&self) -> bool {
        match self {
            Self::Scalar(p) => !p.is_value_type(),
            _ => true,
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Scalar(_) => PropertyKind::Scalar,
            Self::Class(_) => PropertyKind::SchemaDefined,
            Self::Array(_) => PropertyKind::Array,
            Self::Map(_) => PropertyKind::Map,
        }
    }

    /// Comparison treatment implied by the shape alone.
    pub fn comparison(&self) -> Comparison {
        match self {
            Self::Scalar(_) => Comparison::Value,
            Self::Class(name) => Comparison::Structural(name.clone()),
            Self::Array(inner) => Comparison::Sequence(Box::new(inner.comparison())),
            Self::Map(inner) => Comparison::Unordered(Box::new(inner.comparison())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Scalar,
    SchemaDefined,
    Array,
    Map,
}

/// How two values of a property are compared (and, consistently, hashed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    Value,
    /// Same length, pairwise equal in order.
    Sequence(Box<Comparison>),
    /// Same key set, equal value per key, regardless of key order.
    Unordered(Box<Comparison>),
    /// Delegated to the referenced class's own equality.
    Structural(String),
    /// Delegated to a named comparer from a `ComparerHint`.
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_and_element_through_nested_containers() {
        let shape = TypeShape::array_of(TypeShape::array_of(TypeShape::Class("Child".into())));
        assert_eq!(shape.array_depth(), 2);
        assert_eq!(shape.ultimate_element(), &TypeShape::Class("Child".into()));
        assert!(shape.contains_class());
        assert_eq!(shape.kind(), PropertyKind::Array);

        let map = TypeShape::map_of(TypeShape::array_of(TypeShape::Scalar(Primitive::String)));
        assert_eq!(map.array_depth(), 0);
        assert!(!map.contains_class());
    }

    #[test]
    fn comparison_follows_shape() {
        let shape = TypeShape::map_of(TypeShape::array_of(TypeShape::Class("C".into())));
        assert_eq!(
            shape.comparison(),
            Comparison::Unordered(Box::new(Comparison::Sequence(Box::new(Comparison::Structural("C".into())))))
        );
    }
}
