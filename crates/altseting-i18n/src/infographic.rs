//! Icon cards rendered from `infographic.steps`

use crate::dictionary::{scalar_text, Dictionary};
use crate::dom::Document;
use crate::observer::{InfographicSkip, LoadEvent, LoadObserver};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Attribute marking the container the cards are rendered into
pub const INFOGRAPHIC_ATTRIBUTE: &str = "data-infographic";

/// Dictionary path of the step list
pub const STEPS_PATH: &str = "infographic.steps";

/// The fixed icon set. Unknown keys render as [`Icon::Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    Group,
    Capital,
    Legal,
    Chair,
    Vote,
    Operations,
    Profit,
}

impl Icon {
    /// Look up an icon by its dictionary key, falling back to [`Icon::Group`]
    pub fn from_key(key: &str) -> Self {
        match key {
            "group" => Self::Group,
            "capital" => Self::Capital,
            "legal" => Self::Legal,
            "chair" => Self::Chair,
            "vote" => Self::Vote,
            "operations" => Self::Operations,
            "profit" => Self::Profit,
            _ => Self::default(),
        }
    }

    /// Dictionary key of the icon
    pub fn key(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Capital => "capital",
            Self::Legal => "legal",
            Self::Chair => "chair",
            Self::Vote => "vote",
            Self::Operations => "operations",
            Self::Profit => "profit",
        }
    }

    /// Inline SVG markup
    pub fn svg(&self) -> &'static str {
        match self {
            Self::Group => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<circle cx="6" cy="7" r="2" /><circle cx="18" cy="7" r="2" />"#,
                r#"<circle cx="12" cy="5" r="2" /><path d="M2 20c0-3 3-5 6-5" />"#,
                r#"<path d="M22 20c0-3-3-5-6-5" /><path d="M6 20c0-3 3-5 6-5s6 2 6 5" />"#,
                "</svg>"
            ),
            Self::Capital => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<circle cx="12" cy="12" r="7" /><path d="M8 10h8" /><path d="M8 14h8" />"#,
                "</svg>"
            ),
            Self::Legal => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<path d="M4 20h16" /><path d="M6 20V6h12v14" /><path d="M9 6V4h6v2" />"#,
                "</svg>"
            ),
            Self::Chair => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<path d="M12 4v12" /><path d="M5 8h14" /><path d="M7 20h10" />"#,
                r#"<path d="M9 16h6" />"#,
                "</svg>"
            ),
            Self::Vote => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<path d="M4 12h16" /><path d="M7 8l5 4-5 4" /><path d="M17 8v8" />"#,
                "</svg>"
            ),
            Self::Operations => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<path d="M4 7h16" /><path d="M4 12h10" /><path d="M4 17h16" />"#,
                r#"<circle cx="18" cy="12" r="2" />"#,
                "</svg>"
            ),
            Self::Profit => concat!(
                r#"<svg viewBox="0 0 24 24" fill="none" stroke-width="1.6">"#,
                r#"<path d="M4 16l6-6 4 4 6-6" /><path d="M18 8h4v4" />"#,
                "</svg>"
            ),
        }
    }
}

/// One infographic card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfographicStep {
    pub icon: String,
    pub title: String,
    pub text: String,
}

impl InfographicStep {
    /// Decode a step leniently: absent or non-scalar fields become empty
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(scalar_text).unwrap_or_default();
        Self {
            icon: field("icon"),
            title: field("title"),
            text: field("text"),
        }
    }

    /// The icon this step renders with
    pub fn icon(&self) -> Icon {
        Icon::from_key(&self.icon)
    }
}

/// Read the step list, `None` when absent or not an array
pub fn steps(dictionary: &Dictionary) -> Option<Vec<InfographicStep>> {
    dictionary
        .resolve_array(STEPS_PATH)
        .map(|items| items.iter().map(InfographicStep::from_value).collect())
}

/// Rebuild the infographic container from the dictionary.
///
/// Returns the number of cards rendered, or `None` when the container or the
/// step list is missing, in which case the page is not touched.
pub fn render_infographic<D: Document>(
    doc: &mut D,
    dictionary: &Dictionary,
    observer: &dyn LoadObserver,
) -> Option<usize> {
    let Some(container) = doc.first_with_attribute(INFOGRAPHIC_ATTRIBUTE) else {
        observer.on_event(&LoadEvent::InfographicSkipped {
            reason: InfographicSkip::NoContainer,
        });
        return None;
    };

    let Some(steps) = steps(dictionary) else {
        observer.on_event(&LoadEvent::InfographicSkipped {
            reason: InfographicSkip::NoSteps,
        });
        return None;
    };

    doc.clear_children(&container);
    for step in &steps {
        let card = build_card(doc, step);
        doc.append_child(&container, &card);
    }

    debug!(cards = steps.len(), "Rendered infographic");
    Some(steps.len())
}

fn build_card<D: Document>(doc: &mut D, step: &InfographicStep) -> D::Node {
    let card = doc.create_element("div");
    doc.set_class_name(&card, "infographic-step");

    let icon = doc.create_element("div");
    doc.set_class_name(&icon, "icon");
    doc.set_inner_html(&icon, step.icon().svg());

    let title = doc.create_element("h3");
    doc.set_text_content(&title, &step.title);

    let text = doc.create_element("p");
    doc.set_text_content(&text, &step.text);

    doc.append_child(&card, &icon);
    doc.append_child(&card, &title);
    doc.append_child(&card, &text);
    card
}
