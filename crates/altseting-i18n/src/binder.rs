//! Attribute-driven substitution of dictionary values into the page

use crate::dictionary::{scalar_text, Dictionary};
use crate::dom::Document;
use crate::observer::{LoadEvent, LoadObserver};
use serde_json::Value;
use tracing::debug;

/// The five ways an element can be bound to a dictionary path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `data-i18n`: replace text content
    Text,
    /// `data-i18n-html`: replace inner markup with trusted dictionary HTML
    Html,
    /// `data-i18n-list`: one `li` per array entry
    List,
    /// `data-i18n-placeholder`: set the `placeholder` attribute
    Placeholder,
    /// `data-i18n-options`: one `option` per array entry
    Options,
}

impl BindingKind {
    /// Every binding kind, in processing order
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Html,
        Self::List,
        Self::Placeholder,
        Self::Options,
    ];

    /// The data attribute naming the dictionary path
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Text => "data-i18n",
            Self::Html => "data-i18n-html",
            Self::List => "data-i18n-list",
            Self::Placeholder => "data-i18n-placeholder",
            Self::Options => "data-i18n-options",
        }
    }

    /// Whether the kind expects an array rather than a scalar
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List | Self::Options)
    }
}

/// Counts from one binding pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BindReport {
    /// Elements that were written
    pub applied: usize,
    /// Elements whose path resolved to nothing
    pub missing: usize,
    /// Elements whose path resolved to a value of the wrong shape
    pub mismatched: usize,
}

/// Write dictionary values into every bound element of `doc`.
///
/// Elements whose path is missing, or resolves to the wrong shape, are left
/// exactly as they were.
pub fn bind<D: Document>(
    doc: &mut D,
    dictionary: &Dictionary,
    observer: &dyn LoadObserver,
) -> BindReport {
    let mut report = BindReport::default();

    for kind in BindingKind::ALL {
        for node in doc.elements_with_attribute(kind.attribute()) {
            let Some(path) = doc.attribute(&node, kind.attribute()) else {
                continue;
            };

            let Some(value) = dictionary.resolve(&path) else {
                report.missing += 1;
                observer.on_event(&LoadEvent::BindingMissing { kind, path });
                continue;
            };

            if apply(doc, &node, kind, value) {
                report.applied += 1;
            } else {
                report.mismatched += 1;
                observer.on_event(&LoadEvent::BindingTypeMismatch { kind, path });
            }
        }
    }

    debug!(
        applied = report.applied,
        missing = report.missing,
        mismatched = report.mismatched,
        "Bound dictionary to page"
    );
    report
}

fn apply<D: Document>(doc: &mut D, node: &D::Node, kind: BindingKind, value: &Value) -> bool {
    match kind {
        BindingKind::List => fill_collection(doc, node, value, "li", false),
        BindingKind::Options => fill_collection(doc, node, value, "option", true),
        BindingKind::Text | BindingKind::Html | BindingKind::Placeholder => {
            let Some(text) = scalar_text(value) else {
                return false;
            };
            match kind {
                BindingKind::Html => doc.set_inner_html(node, &text),
                BindingKind::Placeholder => doc.set_attribute(node, "placeholder", &text),
                _ => doc.set_text_content(node, &text),
            }
            true
        }
    }
}

fn fill_collection<D: Document>(
    doc: &mut D,
    node: &D::Node,
    value: &Value,
    tag: &str,
    with_value: bool,
) -> bool {
    let Value::Array(items) = value else {
        return false;
    };

    doc.clear_children(node);
    for item in items {
        let text = scalar_text(item).unwrap_or_default();
        let child = doc.create_element(tag);
        doc.set_text_content(&child, &text);
        if with_value {
            doc.set_attribute(&child, "value", &text);
        }
        doc.append_child(node, &child);
    }
    true
}
