//! Go spelling of type expressions, used as the head of slice, array and map
//! literals.

use fg_core::ast::TypeExpr;
use fg_core::error::{Error, Result};

pub fn type_name(ty: &TypeExpr) -> Result<String> {
    match ty {
        TypeExpr::Named(name) => Ok(name.clone()),
        TypeExpr::Qualified { alias, name } => Ok(format!("{alias}.{name}")),
        TypeExpr::Array { elem, len } => Ok(format!(
            "[{}]{}",
            len.as_deref().unwrap_or_default(),
            type_name(elem)?
        )),
        TypeExpr::Map { key, value } => {
            Ok(format!("map[{}]{}", type_name(key)?, type_name(value)?))
        }
        TypeExpr::Pointer(target) => Ok(format!("*{}", type_name(target)?)),
        TypeExpr::Unsupported(kind) => Err(Error::unsupported(format!(
            "cannot name {kind}"
        ))),
    }
}

pub fn tabs(indentation: usize) -> String {
    "\t".repeat(indentation)
}
