//! C spellings of source names and types.

use cobalt_core::TypeDescriptor;
use cobalt_registry::SymbolTable;

/// Name of the receiver parameter in every generated function.
pub const RECEIVER: &str = "self";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Imaginary",
];

/// A source identifier as a C identifier.
///
/// C keywords and the receiver name get a trailing underscore.
pub fn c_ident(name: &str) -> String {
    if name == RECEIVER || C_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// `<Class>_<method>`
pub fn function_name(class: &str, method: &str) -> String {
    format!("{}_{}", c_ident(class), method)
}

/// Struct member holding the part of an object that belongs to `parent`.
pub fn base_member(parent: &str) -> String {
    format!("{}_part", c_ident(parent))
}

/// C spelling of a resolved type. Objects are handled through pointers.
pub fn c_type(table: &SymbolTable, ty: TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(kind) => kind.name().to_string(),
        TypeDescriptor::Class(id) => format!("{} *", c_ident(&table.class(id).name)),
    }
}

/// `T name`, or `T *name` for a pointer type.
pub fn c_declaration(c_ty: &str, name: &str) -> String {
    if c_ty.ends_with('*') {
        format!("{c_ty}{name}")
    } else {
        format!("{c_ty} {name}")
    }
}
