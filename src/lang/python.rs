//! Python structural stripper with tree-sitter integration.

use tree_sitter::{Node, Parser};

use super::common::{apply_deletions, Deletion, StripOptions, StructuralStripper};
use crate::core::errors::{CodealignError, Result};

/// Strips doc-strings and type annotations from Python source.
pub struct PythonStripper {
    /// Tree-sitter parser
    parser: Parser,
}

impl PythonStripper {
    /// Create a new Python stripper
    pub fn new() -> Result<Self> {
        let language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language).map_err(|e| {
            CodealignError::parse("python", format!("Failed to set Python language: {:?}", e))
        })?;

        Ok(Self { parser })
    }

    /// Collect every byte range that should disappear from the source
    fn collect_deletions(node: Node, options: StripOptions, deletions: &mut Vec<Deletion>) {
        match node.kind() {
            "module" if options.docstrings => {
                Self::push_docstring(node, deletions);
            }
            "function_definition" | "class_definition" => {
                if options.docstrings {
                    if let Some(body) = node.child_by_field_name("body") {
                        Self::push_docstring(body, deletions);
                    }
                }
                if options.type_annotations {
                    Self::push_return_annotation(node, deletions);
                }
            }
            "typed_parameter" if options.type_annotations => {
                // The pattern (identifier or splat) is the first child, `: type` follows.
                if let (Some(pattern), Some(annotation)) =
                    (node.child(0), node.child_by_field_name("type"))
                {
                    deletions.push(Deletion {
                        start: pattern.end_byte(),
                        end: annotation.end_byte(),
                    });
                }
            }
            "typed_default_parameter" if options.type_annotations => {
                if let (Some(name), Some(annotation)) = (
                    node.child_by_field_name("name"),
                    node.child_by_field_name("type"),
                ) {
                    deletions.push(Deletion {
                        start: name.end_byte(),
                        end: annotation.end_byte(),
                    });
                }
            }
            "assignment" if options.type_annotations => {
                Self::push_assignment_annotation(node, deletions);
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_deletions(child, options, deletions);
        }
    }

    /// Remove the leading string statement of a module or block.
    fn push_docstring(body: Node, deletions: &mut Vec<Deletion>) {
        let mut cursor = body.walk();
        let first_statement = body
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");

        let Some(statement) = first_statement else {
            return;
        };
        if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
            return;
        }
        let is_string = statement
            .named_child(0)
            .is_some_and(|expr| matches!(expr.kind(), "string" | "concatenated_string"));

        if is_string {
            deletions.push(Deletion {
                start: statement.start_byte(),
                end: statement.end_byte(),
            });
        }
    }

    /// Remove `-> type` between a function's parameter list and its colon.
    fn push_return_annotation(function: Node, deletions: &mut Vec<Deletion>) {
        if let (Some(parameters), Some(returns)) = (
            function.child_by_field_name("parameters"),
            function.child_by_field_name("return_type"),
        ) {
            deletions.push(Deletion {
                start: parameters.end_byte(),
                end: returns.end_byte(),
            });
        }
    }

    /// `x: T = v` becomes `x = v`; a bare `x: T` declaration is dropped entirely.
    fn push_assignment_annotation(assignment: Node, deletions: &mut Vec<Deletion>) {
        let (Some(left), Some(annotation)) = (
            assignment.child_by_field_name("left"),
            assignment.child_by_field_name("type"),
        ) else {
            return;
        };

        if assignment.child_by_field_name("right").is_some() {
            deletions.push(Deletion {
                start: left.end_byte(),
                end: annotation.end_byte(),
            });
            return;
        }

        let statement = assignment
            .parent()
            .filter(|parent| parent.kind() == "expression_statement")
            .unwrap_or(assignment);
        deletions.push(Deletion {
            start: statement.start_byte(),
            end: statement.end_byte(),
        });
    }
}

impl StructuralStripper for PythonStripper {
    fn language(&self) -> &'static str {
        "python"
    }

    fn strip(&mut self, source: &str, options: StripOptions) -> Result<String> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| CodealignError::parse("python", "Failed to parse Python source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(CodealignError::parse(
                "python",
                "Source contains syntax errors",
            ));
        }

        let mut deletions = Vec::new();
        Self::collect_deletions(root, options, &mut deletions);

        apply_deletions(source, deletions).ok_or_else(|| {
            CodealignError::parse("python", "Syntax node boundary split a character")
        })
    }
}
