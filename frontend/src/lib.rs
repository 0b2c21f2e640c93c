//! Circuit declaration schema.
//!
//! A circuit's inputs are declared as a tree of named fields; this crate
//! flattens that tree into the ordered, visibility-partitioned wire-name
//! lists the witness solver instantiates from. Leaf names are fully
//! qualified (parent field names joined by `_`, array and sequence
//! elements suffixed with their index), and visibility resolves top-down:
//! a parent's resolved visibility overrides any child tag, so a secret
//! parent can never leak a descendant as public.

use std::fmt;

use rustc_hash::FxHashSet;

// ============================================================================
// Visibility
// ============================================================================

/// Who gets to see a declared input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Inherit from the parent; a leaf still unset resolves to `Secret`.
    #[default]
    Unset,
    Secret,
    Public,
}

// ============================================================================
// Declaration tree
// ============================================================================

/// Per-field annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Overrides the field name in qualified leaf names.
    pub rename: Option<String>,
    pub visibility: Visibility,
    /// Exclude the field and everything under it.
    pub skip: bool,
}

impl Tag {
    pub fn public() -> Self {
        Tag {
            visibility: Visibility::Public,
            ..Tag::default()
        }
    }

    pub fn secret() -> Self {
        Tag {
            visibility: Visibility::Secret,
            ..Tag::default()
        }
    }

    pub fn skip() -> Self {
        Tag {
            skip: true,
            ..Tag::default()
        }
    }

    pub fn named(name: &str) -> Self {
        Tag {
            rename: Some(name.to_string()),
            ..Tag::default()
        }
    }
}

/// A named, tagged child of a struct node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub tag: Tag,
    pub node: Node,
}

impl StructField {
    pub fn new(name: &str, node: Node) -> Self {
        Self {
            name: name.to_string(),
            tag: Tag::default(),
            node,
        }
    }

    pub fn tagged(name: &str, tag: Tag, node: Node) -> Self {
        Self {
            name: name.to_string(),
            tag,
            node,
        }
    }
}

/// One node of a declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single input variable.
    Leaf,
    /// Named fields, each optionally tagged.
    Struct(Vec<StructField>),
    /// Fixed-length element list; elements are named by index.
    Array(Vec<Node>),
    /// Dynamic element list; same naming as `Array`.
    Sequence(Vec<Node>),
}

impl Node {
    /// Convenience: an array of `n` leaves.
    pub fn leaves(n: usize) -> Node {
        Node::Array(vec![Node::Leaf; n])
    }
}

// ============================================================================
// Traversal
// ============================================================================

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

/// Walk the tree, calling `handler` with each leaf's resolved visibility
/// and fully-qualified name. A handler error aborts the traversal.
///
/// Visibility of a struct field: the parent's, when the parent has one;
/// otherwise the field's own tag; otherwise `Secret`. Array and sequence
/// elements inherit directly. Start the walk with `Visibility::Unset` so
/// root-level tags are honored.
pub fn visit<E, H>(
    node: &Node,
    prefix: &str,
    parent: Visibility,
    handler: &mut H,
) -> Result<(), E>
where
    H: FnMut(Visibility, &str) -> Result<(), E>,
{
    match node {
        Node::Leaf => {
            let visibility = if parent == Visibility::Unset {
                Visibility::Secret
            } else {
                parent
            };
            handler(visibility, prefix)
        }
        Node::Struct(fields) => {
            for field in fields {
                if field.tag.skip {
                    continue;
                }
                let name = field.tag.rename.as_deref().unwrap_or(&field.name);
                let visibility = if parent != Visibility::Unset {
                    parent
                } else if field.tag.visibility != Visibility::Unset {
                    field.tag.visibility
                } else {
                    Visibility::Secret
                };
                visit(&field.node, &qualify(prefix, name), visibility, handler)?;
            }
            Ok(())
        }
        Node::Array(elements) | Node::Sequence(elements) => {
            for (i, element) in elements.iter().enumerate() {
                visit(element, &qualify(prefix, &i.to_string()), parent, handler)?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Wire collection
// ============================================================================

/// Ordered wire-name lists, partitioned by visibility: the exact shape the
/// witness solver's input phase consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wires {
    pub secret: Vec<String>,
    pub public: Vec<String>,
}

/// Errors from [`collect`].
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// The same qualified name was produced twice.
    DuplicateName(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateName(name) => {
                write!(f, "duplicate input name `{name}`")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Flatten a declaration tree into its [`Wires`], rejecting duplicate
/// names anywhere in the traversal.
pub fn collect(root: &Node) -> Result<Wires, SchemaError> {
    let mut seen = FxHashSet::default();
    let mut wires = Wires::default();
    visit(root, "", Visibility::Unset, &mut |visibility, name: &str| {
        if !seen.insert(name.to_string()) {
            return Err(SchemaError::DuplicateName(name.to_string()));
        }
        match visibility {
            Visibility::Public => wires.public.push(name.to_string()),
            _ => wires.secret.push(name.to_string()),
        }
        Ok(())
    })?;
    Ok(wires)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collected(root: &Node) -> Vec<(String, Visibility)> {
        let mut out = Vec::new();
        let result: Result<(), SchemaError> =
            visit(root, "", Visibility::Unset, &mut |vis, name: &str| {
                out.push((name.to_string(), vis));
                Ok(())
            });
        result.unwrap();
        out
    }

    #[test]
    fn test_untagged_fields_default_secret() {
        let root = Node::Struct(vec![
            StructField::new("A", Node::Leaf),
            StructField::new("B", Node::Leaf),
        ]);
        assert_eq!(
            collected(&root),
            vec![
                ("A".to_string(), Visibility::Secret),
                ("B".to_string(), Visibility::Secret),
            ]
        );
    }

    #[test]
    fn test_rename_and_public_tag() {
        let root = Node::Struct(vec![
            StructField::tagged(
                "A",
                Tag {
                    rename: Some("a".to_string()),
                    visibility: Visibility::Public,
                    skip: false,
                },
                Node::Leaf,
            ),
            StructField::new("B", Node::Leaf),
        ]);
        assert_eq!(
            collected(&root),
            vec![
                ("a".to_string(), Visibility::Public),
                ("B".to_string(), Visibility::Secret),
            ]
        );
    }

    #[test]
    fn test_skipped_field_is_excluded() {
        let root = Node::Struct(vec![
            StructField::tagged("A", Tag::skip(), Node::Leaf),
            StructField::new("B", Node::Leaf),
        ]);
        assert_eq!(collected(&root), vec![("B".to_string(), Visibility::Secret)]);
    }

    #[test]
    fn test_nested_struct_names_are_qualified() {
        let root = Node::Struct(vec![
            StructField::tagged("A", Tag::public(), Node::Leaf),
            StructField::new("B", Node::Leaf),
            StructField::new("C", Node::Struct(vec![StructField::new("D", Node::Leaf)])),
        ]);
        assert_eq!(
            collected(&root),
            vec![
                ("A".to_string(), Visibility::Public),
                ("B".to_string(), Visibility::Secret),
                ("C_D".to_string(), Visibility::Secret),
            ]
        );
    }

    #[test]
    fn test_secret_parent_overrides_public_child() {
        // C is untagged, so it resolves secret; D's public tag must not
        // widen past that, nor may the grandchild's
        let grandchild = Node::Struct(vec![StructField::tagged(
            "D",
            Tag::named("grandchild"),
            Node::Leaf,
        )]);
        let child = Node::Struct(vec![
            StructField::tagged("D", Tag::public(), Node::Leaf),
            StructField::new("G", grandchild),
        ]);
        let root = Node::Struct(vec![
            StructField::tagged("A", Tag::public(), Node::Leaf),
            StructField::new("B", Node::Leaf),
            StructField::new("C", child),
        ]);
        assert_eq!(
            collected(&root),
            vec![
                ("A".to_string(), Visibility::Public),
                ("B".to_string(), Visibility::Secret),
                ("C_D".to_string(), Visibility::Secret),
                ("C_G_grandchild".to_string(), Visibility::Secret),
            ]
        );
    }

    #[test]
    fn test_array_elements_indexed_and_inherit() {
        let root = Node::Struct(vec![StructField::tagged(
            "A",
            Tag::public(),
            Node::leaves(2),
        )]);
        assert_eq!(
            collected(&root),
            vec![
                ("A_0".to_string(), Visibility::Public),
                ("A_1".to_string(), Visibility::Public),
            ]
        );
    }

    #[test]
    fn test_sequence_elements_indexed_and_inherit() {
        let root = Node::Struct(vec![StructField::tagged(
            "A",
            Tag::public(),
            Node::Sequence(vec![Node::Leaf, Node::Leaf]),
        )]);
        assert_eq!(
            collected(&root),
            vec![
                ("A_0".to_string(), Visibility::Public),
                ("A_1".to_string(), Visibility::Public),
            ]
        );
    }

    #[test]
    fn test_collect_partitions_by_visibility() {
        let root = Node::Struct(vec![
            StructField::tagged("out", Tag::public(), Node::Leaf),
            StructField::new("x", Node::Leaf),
            StructField::new("y", Node::Leaf),
        ]);
        let wires = collect(&root).unwrap();
        assert_eq!(wires.public, vec!["out"]);
        assert_eq!(wires.secret, vec!["x", "y"]);
    }

    #[test]
    fn test_collect_rejects_duplicate_names() {
        // "A_0" arises both from the array element and from a sibling
        // field literally named so
        let root = Node::Struct(vec![
            StructField::new("A", Node::leaves(1)),
            StructField::new("A_0", Node::Leaf),
        ]);
        assert_eq!(
            collect(&root),
            Err(SchemaError::DuplicateName("A_0".to_string()))
        );
    }

    #[test]
    fn test_handler_error_aborts_traversal() {
        let root = Node::Struct(vec![
            StructField::new("A", Node::Leaf),
            StructField::new("B", Node::Leaf),
        ]);
        let mut seen = 0;
        let result = visit(&root, "", Visibility::Unset, &mut |_, _| {
            seen += 1;
            Err("stop")
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 1);
    }
}
