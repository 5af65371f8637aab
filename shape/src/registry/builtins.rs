//! JDK container declarations every registry can start from

use super::declaration::{ContainerDeclaration, Declaration};
use crate::constants::TYPE_ARRAY_LIST;
use crate::constants::TYPE_COLLECTION;
use crate::constants::TYPE_CONCURRENT_HASH_MAP;
use crate::constants::TYPE_DEQUE;
use crate::constants::TYPE_HASH_MAP;
use crate::constants::TYPE_HASH_SET;
use crate::constants::TYPE_ITERABLE;
use crate::constants::TYPE_LINKED_HASH_MAP;
use crate::constants::TYPE_LINKED_HASH_SET;
use crate::constants::TYPE_LINKED_LIST;
use crate::constants::TYPE_LIST;
use crate::constants::TYPE_MAP;
use crate::constants::TYPE_QUEUE;
use crate::constants::TYPE_SET;
use crate::constants::TYPE_SORTED_MAP;
use crate::constants::TYPE_SORTED_SET;
use crate::constants::TYPE_STREAM;
use crate::constants::TYPE_TREE_MAP;
use crate::constants::TYPE_TREE_SET;
use crate::environment::ElementKind;
use crate::type_mirror::{TypeMirror, TypeName, TypeParameter};

const COLLECTION_INTERFACES: &[&str] = &[
    TYPE_ITERABLE,
    TYPE_COLLECTION,
    TYPE_LIST,
    TYPE_SET,
    TYPE_SORTED_SET,
    TYPE_QUEUE,
    TYPE_DEQUE,
];

const COLLECTION_CLASSES: &[&str] = &[
    TYPE_ARRAY_LIST,
    TYPE_LINKED_LIST,
    TYPE_HASH_SET,
    TYPE_LINKED_HASH_SET,
    TYPE_TREE_SET,
];

const MAP_INTERFACES: &[&str] = &[TYPE_MAP, TYPE_SORTED_MAP];

const MAP_CLASSES: &[&str] = &[
    TYPE_HASH_MAP,
    TYPE_LINKED_HASH_MAP,
    TYPE_TREE_MAP,
    TYPE_CONCURRENT_HASH_MAP,
];

fn parameter(name: &str) -> TypeParameter {
    TypeParameter {
        name:  name.to_string(),
        bound: None,
    }
}

fn collection(kind: ElementKind) -> Declaration {
    Declaration::of_kind(kind)
        .with_type_parameter(parameter("E"))
        .with_container(ContainerDeclaration::Collection(TypeMirror::declared("E")))
}

fn map(kind: ElementKind) -> Declaration {
    Declaration::of_kind(kind)
        .with_type_parameter(parameter("K"))
        .with_type_parameter(parameter("V"))
        .with_container(ContainerDeclaration::Map {
            key:   TypeMirror::declared("K"),
            value: TypeMirror::declared("V"),
        })
}

/// Declarations for the JDK collection, stream and map types
pub(super) fn builtin_declarations() -> Vec<(TypeName, Declaration)> {
    let collections = COLLECTION_INTERFACES
        .iter()
        .map(|name| (*name, collection(ElementKind::Interface)))
        .chain(
            COLLECTION_CLASSES
                .iter()
                .map(|name| (*name, collection(ElementKind::Class))),
        );

    let maps = MAP_INTERFACES
        .iter()
        .map(|name| (*name, map(ElementKind::Interface)))
        .chain(MAP_CLASSES.iter().map(|name| (*name, map(ElementKind::Class))));

    let stream = Declaration::of_kind(ElementKind::Interface)
        .with_type_parameter(parameter("T"))
        .with_container(ContainerDeclaration::Stream(TypeMirror::declared("T")));

    collections
        .chain(maps)
        .chain(std::iter::once((TYPE_STREAM, stream)))
        .map(|(name, declaration)| (TypeName::from(name), declaration))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_is_a_container() {
        let builtins = builtin_declarations();
        assert_eq!(builtins.len(), 19);
        assert!(builtins
            .iter()
            .all(|(_, declaration)| declaration.container.is_some()));
    }

    #[test]
    fn test_maps_are_not_collections() {
        let builtins = builtin_declarations();
        let (_, hash_map) = builtins
            .iter()
            .find(|(name, _)| name.as_str() == TYPE_HASH_MAP)
            .unwrap();
        assert!(!hash_map.is_collection_or_stream());
        assert_eq!(hash_map.type_parameters.len(), 2);
    }
}
