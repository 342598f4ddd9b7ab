/// Kind of node in the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Container,
    Form,
    Input,
    Select,
    Label,
    Text,
}

impl Tag {
    /// Whether elements of this kind carry a value and take part in
    /// constraint validation.
    pub fn is_control(self) -> bool {
        matches!(self, Self::Input | Self::Select)
    }
}

/// The `type` of an input control, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
}
