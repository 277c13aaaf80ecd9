use crate::domain::FieldDescriptor;

/// Marker prefixed to the description of fields without any default.
pub const REQUIRED_MARKER: &str = "*required ";
const TYPE_PREFIX: &str = "@type: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// One input box.
    Single,
    /// Input box plus add/remove controls over a list of items.
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Required,
    TypeHint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionSegment {
    pub text: String,
    pub emphasis: Emphasis,
}

impl DescriptionSegment {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

/// Styled help text shown under a field's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub segments: Vec<DescriptionSegment>,
}

impl Description {
    pub fn assemble(required: bool, docs: &str, hint: &str) -> Self {
        if !required && docs.is_empty() {
            return Self {
                segments: vec![DescriptionSegment::new(hint, Emphasis::TypeHint)],
            };
        }
        let mut segments = Vec::with_capacity(4);
        if required {
            segments.push(DescriptionSegment::new(REQUIRED_MARKER, Emphasis::Required));
        }
        segments.push(DescriptionSegment::new(
            format!("{docs}\n\n{TYPE_PREFIX}"),
            Emphasis::Plain,
        ));
        segments.push(DescriptionSegment::new(hint, Emphasis::TypeHint));
        Self { segments }
    }

    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect()
    }
}

/// Editable on-screen representation of one field.
#[derive(Debug, Clone)]
pub struct FormEntry {
    pub label: String,
    pub placeholder: String,
    pub description: Description,
    pub editor: EditorKind,
    pub descriptor: FieldDescriptor,
}

impl FormEntry {
    pub fn from_descriptor(descriptor: FieldDescriptor) -> Self {
        let placeholder = descriptor
            .default
            .as_ref()
            .map(|default| default.placeholder())
            .unwrap_or_default();
        let description = Description::assemble(
            descriptor.required,
            &descriptor.documentation,
            &descriptor.type_hint,
        );
        let editor = if descriptor.kind.is_list() {
            EditorKind::Multi
        } else {
            EditorKind::Single
        };
        Self {
            label: descriptor.name.clone(),
            placeholder,
            description,
            editor,
            descriptor,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldDefinition, FieldDescriptor};
    use pretty_assertions::assert_eq;

    fn entry(definition: FieldDefinition) -> FormEntry {
        FormEntry::from_descriptor(FieldDescriptor::from_definition(&definition).unwrap())
    }

    #[test]
    fn optional_without_docs_shows_only_hint() {
        let entry = entry(FieldDefinition::new("pool_size", "int").with_default(40_i64));
        assert_eq!(entry.description.plain_text(), "int");
        assert_eq!(entry.placeholder, "40");
        assert_eq!(entry.editor, EditorKind::Single);
    }

    #[test]
    fn required_field_carries_marker() {
        let entry = entry(FieldDefinition::new("host", "str").with_doc("Server address"));
        assert_eq!(
            entry.description.plain_text(),
            "*required Server address\n\n@type: str"
        );
        assert_eq!(entry.description.segments[0].emphasis, Emphasis::Required);
        assert_eq!(entry.placeholder, "");
    }

    #[test]
    fn required_without_docs_still_lists_type() {
        let entry = entry(FieldDefinition::new("accounts", "list[int]"));
        assert_eq!(entry.description.plain_text(), "*required \n\n@type: list[int]");
        assert_eq!(entry.editor, EditorKind::Multi);
    }

    #[test]
    fn optional_with_docs_omits_marker() {
        let entry = entry(
            FieldDefinition::new("proxy", "str")
                .with_default("")
                .with_doc("Proxy address"),
        );
        assert_eq!(entry.description.plain_text(), "Proxy address\n\n@type: str");
        assert_eq!(entry.placeholder, "<unset>");
    }
}
