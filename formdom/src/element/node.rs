use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{InputType, Tag};
use crate::validity::{Constraints, Pattern, Validity};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,

    // Content
    pub text: String,
    pub children: Vec<Element>,

    // Control state
    pub value: String,
    pub options: Vec<String>,
    pub constraints: Constraints,

    // Form state
    /// Disables native constraint checks on submit (`novalidate`).
    pub no_validate: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Container,
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            value: String::new(),
            options: Vec::new(),
            constraints: Constraints::default(),
            no_validate: false,
        }
    }
}

impl Element {
    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: Tag::Text,
            text: content.into(),
            ..Default::default()
        }
    }

    pub fn form(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: Tag::Form,
            ..Default::default()
        }
    }

    /// Create a text input control.
    pub fn input(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: Tag::Input,
            ..Default::default()
        }
    }

    /// Create a select control. An empty value means nothing is selected.
    pub fn select(id: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            tag: Tag::Select,
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            id: generate_id("label"),
            tag: Tag::Label,
            text: text.into(),
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set the `for` attribute of a label.
    pub fn for_control(self, control_id: impl Into<String>) -> Self {
        self.attr("for", control_id)
    }

    // Control state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Replace the current value. A select only holds one of its options;
    /// any other value leaves it with nothing selected (empty).
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = if self.tag == Tag::Select && !self.options.contains(&value) {
            String::new()
        } else {
            value
        };
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.constraints.input_type = input_type;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.constraints.required = required;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    /// Require the value to match a regex pattern.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not a valid regex. Use [`Pattern::new`] and
    /// [`Element::pattern_compiled`] to handle the error instead.
    pub fn pattern(self, pattern: &str) -> Self {
        let pattern = Pattern::new(pattern).expect("Invalid regex pattern");
        self.pattern_compiled(pattern)
    }

    pub fn pattern_compiled(mut self, pattern: Pattern) -> Self {
        self.constraints.pattern = Some(pattern);
        self
    }

    /// Built-in constraint validation of the current value. Non-controls are
    /// always valid.
    pub fn validity(&self) -> Validity {
        if self.tag.is_control() {
            self.constraints.evaluate(&self.value)
        } else {
            Validity::default()
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
