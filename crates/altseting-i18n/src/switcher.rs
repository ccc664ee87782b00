//! Language selector buttons

use crate::dom::Document;
use altseting_common::Language;

/// Attribute carrying a selector button's language code
pub const LANGUAGE_ATTRIBUTE: &str = "data-lang";

/// Class marking the selector of the rendered language
pub const ACTIVE_CLASS: &str = "active";

/// A selector element and the code it requests when clicked
#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherBinding<N> {
    pub node: N,
    pub code: String,
}

/// Click bindings collected once at startup.
///
/// The binder never replaces selector elements, so the bindings stay valid
/// for the lifetime of the page.
#[derive(Debug, Clone)]
pub struct LanguageSwitcher<N> {
    bindings: Vec<SwitcherBinding<N>>,
}

impl<N: Clone + PartialEq> LanguageSwitcher<N> {
    /// Collect every selector element of the document
    pub fn bind<D: Document<Node = N>>(doc: &D) -> Self {
        let bindings = doc
            .elements_with_attribute(LANGUAGE_ATTRIBUTE)
            .into_iter()
            .filter_map(|node| {
                let code = doc.attribute(&node, LANGUAGE_ATTRIBUTE)?;
                Some(SwitcherBinding { node, code })
            })
            .collect();
        Self { bindings }
    }

    /// The code a click on `node` requests, `None` for unbound elements
    pub fn language_for(&self, node: &N) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| &binding.node == node)
            .map(|binding| binding.code.as_str())
    }

    /// All bindings in document order
    pub fn bindings(&self) -> &[SwitcherBinding<N>] {
        &self.bindings
    }
}

/// Mark every selector declaring `language` as active and clear the rest.
///
/// Returns how many selectors ended up active.
pub fn set_active<D: Document>(doc: &mut D, language: Language) -> usize {
    let mut marked = 0;
    for node in doc.elements_with_attribute(LANGUAGE_ATTRIBUTE) {
        let matches = doc.attribute(&node, LANGUAGE_ATTRIBUTE).as_deref() == Some(language.code());
        doc.toggle_class(&node, ACTIVE_CLASS, matches);
        if matches {
            marked += 1;
        }
    }
    marked
}
