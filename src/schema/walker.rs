//! Checks a document tree against a [`Schema`].

use tracing::{debug, instrument};

use crate::{
    document::{Document, Element},
    domain::{Diagnostic, NamespacePolicy, Stage},
    schema::definition::{ComplexType, Content, ElementDecl, Schema},
};

/// Walks a document tree and reports every place where it departs from the
/// schema.
///
/// The walk is exhaustive: it never stops at the first problem. Diagnostics
/// are produced in document order.
#[derive(Debug, Clone, Copy)]
pub struct StructuralValidator<'s> {
    schema: &'s Schema,
    namespace_policy: NamespacePolicy,
}

impl<'s> StructuralValidator<'s> {
    /// Creates a validator for the given schema.
    #[must_use]
    pub const fn new(schema: &'s Schema, namespace_policy: NamespacePolicy) -> Self {
        Self {
            schema,
            namespace_policy,
        }
    }

    /// Checks the document and returns the structural diagnostics.
    ///
    /// An empty result, or one holding only warnings, means the document
    /// conforms to the schema.
    #[instrument(skip_all, fields(root = document.root().name()))]
    pub fn validate(&self, document: &Document) -> Vec<Diagnostic> {
        let mut walk = Walk {
            schema: self.schema,
            namespace_policy: self.namespace_policy,
            diagnostics: Vec::new(),
        };

        let root = document.root();
        let path = format!("/{}", root.name());
        if root.name() == self.schema.root.name {
            walk.element(root, &self.schema.root, &path, None);
        } else {
            walk.error(
                &path,
                format!(
                    "root element is '{}', expected '{}'",
                    root.name(),
                    self.schema.root.name
                ),
            );
        }

        debug!(
            diagnostics = walk.diagnostics.len(),
            "structural check finished"
        );
        walk.diagnostics
    }
}

struct Walk<'s> {
    schema: &'s Schema,
    namespace_policy: NamespacePolicy,
    diagnostics: Vec<Diagnostic>,
}

impl Walk<'_> {
    fn error(&mut self, path: &str, message: String) {
        self.diagnostics
            .push(Diagnostic::error(Stage::Structure, message).at(path));
    }

    fn element(
        &mut self,
        element: &Element,
        decl: &ElementDecl,
        path: &str,
        parent_namespace: Option<&str>,
    ) {
        self.namespace(element, path, parent_namespace);

        match decl.content {
            Content::Simple(ty) => {
                for (name, _) in element.attributes() {
                    self.error(
                        path,
                        format!("unexpected attribute '{name}' on '{}'", element.name()),
                    );
                }
                if element.children().is_empty() {
                    if let Err(message) = ty.check(element.text()) {
                        self.error(path, message);
                    }
                } else {
                    self.error(
                        path,
                        format!("element '{}' must contain text only", element.name()),
                    );
                }
            }
            Content::Complex(ty) => {
                self.attributes(element, ty, path);
                if !element.text().trim().is_empty() {
                    self.error(
                        path,
                        format!("element '{}' must not contain text", element.name()),
                    );
                }
                self.children(element, ty, path);
            }
        }
    }

    fn namespace(&mut self, element: &Element, path: &str, parent_namespace: Option<&str>) {
        let expected = self.schema.namespace;
        let found = element.namespace();
        if found == Some(expected) {
            return;
        }
        // only the element where the namespace changes is reported
        if path.matches('/').count() > 1 && found == parent_namespace {
            return;
        }

        let message = found.map_or_else(
            || format!("element '{}' has no namespace, expected '{expected}'", element.name()),
            |found| {
                format!(
                    "element '{}' is in namespace '{found}', expected '{expected}'",
                    element.name()
                )
            },
        );
        match self.namespace_policy {
            NamespacePolicy::Require => self.error(path, message),
            NamespacePolicy::Warn => self
                .diagnostics
                .push(Diagnostic::warning(Stage::Structure, message).at(path)),
            NamespacePolicy::Ignore => {}
        }
    }

    fn attributes(&mut self, element: &Element, ty: &ComplexType, path: &str) {
        for (name, value) in element.attributes() {
            match ty.attributes.iter().find(|attribute| attribute.name == name) {
                Some(attribute) => {
                    if let Err(message) = attribute.ty.check(value) {
                        self.error(path, format!("attribute '{name}': {message}"));
                    }
                }
                None => self.error(
                    path,
                    format!("unexpected attribute '{name}' on '{}'", element.name()),
                ),
            }
        }

        for attribute in ty.attributes.iter().filter(|attribute| attribute.required) {
            if element.attribute(attribute.name).is_none() {
                self.error(
                    path,
                    format!(
                        "missing required attribute '{}' on '{}'",
                        attribute.name,
                        element.name()
                    ),
                );
            }
        }
    }

    /// Matches children against the declared sequence.
    ///
    /// The cursor only moves forward. A child naming a declaration behind the
    /// cursor is out of order; one naming no declaration is unexpected.
    fn children(&mut self, element: &Element, ty: &ComplexType, path: &str) {
        let declared = ty.children;
        let mut counts = vec![0_usize; declared.len()];
        let mut cursor = 0;

        for (position, child) in element.children().iter().enumerate() {
            let child_path = child_path(element, position, path);

            let Some(offset) = declared[cursor..]
                .iter()
                .position(|decl| decl.name == child.name())
            else {
                let message = if declared[..cursor]
                    .iter()
                    .any(|decl| decl.name == child.name())
                {
                    format!(
                        "element '{}' is out of order in '{}'",
                        child.name(),
                        element.name()
                    )
                } else {
                    format!(
                        "unexpected element '{}' in '{}'",
                        child.name(),
                        element.name()
                    )
                };
                self.error(&child_path, message);
                continue;
            };

            let index = cursor + offset;
            for (decl, &count) in declared.iter().zip(&counts).take(index).skip(cursor) {
                self.missing(element, decl, count, path);
            }
            cursor = index;

            let decl = &declared[index];
            counts[index] += 1;
            if let Some(max) = decl.occurs.max() {
                if counts[index] == max + 1 {
                    self.error(
                        &child_path,
                        format!(
                            "element '{}' may occur at most {max} time(s) in '{}'",
                            child.name(),
                            element.name()
                        ),
                    );
                }
            }

            self.element(child, decl, &child_path, element.namespace());
        }

        for (decl, &count) in declared.iter().zip(&counts).skip(cursor) {
            self.missing(element, decl, count, path);
        }
    }

    fn missing(&mut self, parent: &Element, decl: &ElementDecl, count: usize, path: &str) {
        if count < decl.occurs.min() {
            self.error(
                path,
                format!(
                    "missing required element '{}' in '{}'",
                    decl.name,
                    parent.name()
                ),
            );
        }
    }
}

/// Builds the path of the child at `position`, indexing repeated siblings
/// from 1.
fn child_path(parent: &Element, position: usize, path: &str) -> String {
    let children = parent.children();
    let name = children[position].name();
    let total = children.iter().filter(|c| c.name() == name).count();
    if total == 1 {
        return format!("{path}/{name}");
    }
    let index = children[..position]
        .iter()
        .filter(|c| c.name() == name)
        .count()
        + 1;
    format!("{path}/{name}[{index}]")
}
