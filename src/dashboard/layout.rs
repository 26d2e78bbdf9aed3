//! View Template
//!
//! Static, declarative page structure of a dashboard. Clients render the
//! tree; the server only reads it to find input controls and their
//! defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::input::InputValues;

/// Kind of free-form input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Number,
    Text,
}

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: Json,
}

impl DropdownOption {
    /// Option whose label and value are the same text
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: Json::String(text),
        }
    }
}

/// A node of the view template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Label {
        text: String,
    },
    Break,
    Input {
        id: String,
        input_type: InputType,
        value: Json,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: Json,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Placeholder replaced by a chart descriptor
    Graph {
        id: String,
    },
    Container {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        children: Vec<Component>,
    },
}

impl Component {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Component::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Component::Paragraph { text: text.into() }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Component::Label { text: text.into() }
    }

    pub fn graph(id: impl Into<String>) -> Self {
        Component::Graph { id: id.into() }
    }

    /// Anonymous container
    pub fn container(children: Vec<Component>) -> Self {
        Component::Container {
            id: None,
            class: None,
            children,
        }
    }

    /// Set the id of a container; other components are returned unchanged
    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        if let Component::Container { id, .. } = &mut self {
            *id = Some(new_id.into());
        }
        self
    }

    /// Set the class of a container; other components are returned unchanged
    pub fn with_class(mut self, new_class: impl Into<String>) -> Self {
        if let Component::Container { class, .. } = &mut self {
            *class = Some(new_class.into());
        }
        self
    }

    /// Visit this node and all descendants, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Component)) {
        visit(self);
        if let Component::Container { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }

    /// Ids of all input controls with their initial values
    pub fn input_defaults(&self) -> InputValues {
        let mut values = InputValues::new();
        self.walk(&mut |node| match node {
            Component::Input { id, value, .. } | Component::Dropdown { id, value, .. } => {
                values.insert(id.clone(), value.clone());
            }
            _ => {}
        });
        values
    }

    /// Ids of all graph placeholders
    pub fn graph_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| {
            if let Component::Graph { id } = node {
                ids.push(id.as_str());
            }
        });
        ids
    }

    /// Find a node carrying this id
    pub fn find(&self, target: &str) -> Option<&Component> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_some() {
                return;
            }
            let id = match node {
                Component::Input { id, .. }
                | Component::Dropdown { id, .. }
                | Component::Graph { id } => Some(id.as_str()),
                Component::Container { id, .. } => id.as_deref(),
                _ => None,
            };
            if id == Some(target) {
                found = Some(node);
            }
        });
        found
    }
}
