//! Java-like rendering of type expressions, used in diagnostics and logs.

use std::fmt;

use crate::TypeRef;

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(id) => write!(f, "{id}"),
            TypeRef::Parameterized { raw, owner, args } => {
                match owner {
                    Some(owner) => write!(f, "{owner}.{}", raw.simple_name())?,
                    None => write!(f, "{raw}")?,
                }
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, args, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Variable(var) => f.write_str(&var.name),
            TypeRef::Wildcard { upper, lower } => {
                f.write_str("?")?;
                if !lower.is_empty() {
                    f.write_str(" super ")?;
                    write_joined(f, lower, " & ")
                } else if !upper.is_empty() {
                    f.write_str(" extends ")?;
                    write_joined(f, upper, " & ")
                } else {
                    Ok(())
                }
            }
            TypeRef::Array(component) => write!(f, "{component}[]"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[TypeRef], sep: &str) -> fmt::Result {
    for (idx, ty) in types.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
