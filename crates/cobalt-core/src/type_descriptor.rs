//! Semantic type descriptors.

use crate::ClassId;

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Machine integer; also the type of conditions and comparisons.
    Int,
    /// The "no value" sentinel, only legal as a method return type.
    Void,
}

impl PrimitiveKind {
    /// Source spelling of the primitive.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Void => "void",
        }
    }

    /// Map a source type name to a primitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(PrimitiveKind::Int),
            "void" => Some(PrimitiveKind::Void),
            _ => None,
        }
    }
}

/// A resolved type: either a primitive or a class.
///
/// Class types carry the id of the resolved class rather than its name;
/// the symbol table turns the id back into a name for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Class(ClassId),
}

impl TypeDescriptor {
    pub const INT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Int);
    pub const VOID: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Void);

    #[inline]
    pub fn is_void(&self) -> bool {
        *self == Self::VOID
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        *self == Self::INT
    }

    /// The class id, if this is a class type.
    #[inline]
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            TypeDescriptor::Class(id) => Some(*id),
            TypeDescriptor::Primitive(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names() {
        assert_eq!(PrimitiveKind::from_name("int"), Some(PrimitiveKind::Int));
        assert_eq!(PrimitiveKind::from_name("void"), Some(PrimitiveKind::Void));
        assert_eq!(PrimitiveKind::from_name("Widget"), None);
        assert_eq!(PrimitiveKind::Int.name(), "int");
    }

    #[test]
    fn descriptor_queries() {
        assert!(TypeDescriptor::INT.is_int());
        assert!(TypeDescriptor::VOID.is_void());
        assert_eq!(TypeDescriptor::INT.as_class(), None);

        let class = TypeDescriptor::Class(ClassId::new(2));
        assert_eq!(class.as_class(), Some(ClassId::new(2)));
        assert!(!class.is_void());
    }
}
