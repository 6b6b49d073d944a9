//! Field mappers describing how an admin lists, shows and edits an entity.

use std::marker::PhantomData;

use serde::Serialize;
use utoipa::ToSchema;

/// Breakpoint from which a list column is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Responsive {
    Desktop,
}

/// Form widget used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Checkbox,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    /// Column links to the show page of the row
    pub identifier: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<Responsive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    pub required: bool,
}

/// Options passed along with a field
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    label: Option<String>,
    responsive: Option<Responsive>,
    kind: Option<FieldKind>,
    required: bool,
}

impl FieldOptions {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn responsive(mut self, responsive: Responsive) -> Self {
        self.responsive = Some(responsive);
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug)]
pub struct List;
#[derive(Debug)]
pub struct Show;
#[derive(Debug)]
pub struct Form;

/// Ordered field collection for one admin view
#[derive(Debug)]
pub struct Mapper<View> {
    fields: Vec<FieldDescriptor>,
    _view: PhantomData<View>,
}

pub type ListMapper = Mapper<List>;
pub type ShowMapper = Mapper<Show>;
pub type FormMapper = Mapper<Form>;

impl<View> Default for Mapper<View> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            _view: PhantomData,
        }
    }
}

impl<View> Mapper<View> {
    fn push(&mut self, name: &str, options: FieldOptions, identifier: bool) -> &mut Self {
        // Field names double as default labels
        let label = options.label.unwrap_or_else(|| name.to_string());
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            label,
            identifier,
            responsive: options.responsive,
            kind: options.kind,
            required: options.required,
        });
        self
    }

    pub fn add(&mut self, name: &str, options: FieldOptions) -> &mut Self {
        self.push(name, options, false)
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}

impl Mapper<List> {
    /// Add the column that identifies (and links to) a row
    pub fn add_identifier(&mut self, name: &str, options: FieldOptions) -> &mut Self {
        self.push(name, options, true)
    }
}
