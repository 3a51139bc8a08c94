//! Static type introspection over PHP sources.
//!
//! The scanner turns source text into [`TypeDescriptor`]s, the [`SourceIndex`]
//! stores them, and [`TypeIntrospector`] answers the hierarchy questions the
//! definition parser asks (interfaces, inherited methods).

mod descriptor;
mod index;
mod lexer;
mod scanner;

pub use descriptor::{
    short_name, DefaultValue, MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
};
pub use index::SourceIndex;
pub use scanner::scan_source;

use std::collections::HashSet;

use crate::error::{DocToolsError, Result};

/// Lookup of type descriptors by fully-qualified name.
pub trait TypeIntrospector {
    /// Returns the descriptor for `name`, if known.
    fn get_type(&self, name: &str) -> Option<&TypeDescriptor>;

    /// Like [`Self::get_type`], but unknown names are a type resolution error.
    fn resolve(&self, name: &str) -> Result<&TypeDescriptor> {
        self.get_type(name).ok_or_else(|| {
            DocToolsError::type_resolution(format!(
                "Class \"{}\" does not exist",
                name.trim_start_matches('\\')
            ))
        })
    }

    /// All interfaces of a type: declared ones first (each followed by the
    /// interfaces it extends), then those inherited from parent classes.
    fn interface_names(&self, ty: &TypeDescriptor) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut visited_classes = HashSet::new();

        let mut current = Some(ty);
        while let Some(class) = current {
            if !visited_classes.insert(class.name.clone()) {
                break;
            }
            for interface in &class.interfaces {
                collect_interface(self, interface, &mut names, &mut seen);
            }
            current = class.parent.as_deref().and_then(|p| self.get_type(p));
        }

        names
    }

    /// Finds `method` on `ty` or anything it inherits from and returns the
    /// declaring type together with the method.
    fn find_method<'a>(
        &'a self,
        ty: &'a TypeDescriptor,
        method: &str,
    ) -> Option<(&'a TypeDescriptor, &'a MethodDescriptor)> {
        let mut visited = HashSet::new();
        find_method_in(self, ty, method, &mut visited)
    }
}

fn collect_interface<T: TypeIntrospector + ?Sized>(
    types: &T,
    name: &str,
    names: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    if !seen.insert(name.to_string()) {
        return;
    }
    names.push(name.to_string());

    if let Some(interface) = types.get_type(name) {
        for parent in &interface.interfaces {
            collect_interface(types, parent, names, seen);
        }
    }
}

fn find_method_in<'a, T: TypeIntrospector + ?Sized>(
    types: &'a T,
    ty: &'a TypeDescriptor,
    method: &str,
    visited: &mut HashSet<String>,
) -> Option<(&'a TypeDescriptor, &'a MethodDescriptor)> {
    if !visited.insert(ty.name.clone()) {
        return None;
    }
    if let Some(found) = ty.method(method) {
        return Some((ty, found));
    }

    let parent_interfaces: &[String] = match ty.kind {
        TypeKind::Interface => &ty.interfaces,
        _ => &[],
    };
    let inherited = ty
        .traits
        .iter()
        .chain(ty.parent.iter())
        .chain(parent_interfaces);

    for name in inherited {
        if let Some(found) = types
            .get_type(name)
            .and_then(|parent| find_method_in(types, parent, method, visited))
        {
            return Some(found);
        }
    }

    None
}
