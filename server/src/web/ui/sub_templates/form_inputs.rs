//! Sub-templates for rendering a labeled form input together with the validation errors of its
//! [FormValue]. They are created in the page templates with chained setters, e.g.
//! `FormFieldTemplate::new(form_data.phone, "phone", "Phone").with_type(InputType::Tel).required()`.
use crate::web::ui::form_values::{CheckboxValue, FormRepresentation, FormValue};
use askama::Template;
use std::borrow::Cow;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputType {
    Text,
    Tel,
    Url,
    DateTimeLocal,
    Textarea,
}

impl InputType {
    fn html_type(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::DateTimeLocal => "datetime-local",
            InputType::Textarea => "textarea",
        }
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormRepresentation> {
    data: &'a FormValue<T>,
    name: &'a str,
    label: &'a str,
    input_type: InputType,
    placeholder: Option<&'a str>,
    info: Option<&'a str>,
    is_required: bool,
}

impl<'a, T: FormRepresentation> FormFieldTemplate<'a, T> {
    pub fn new(data: &'a FormValue<T>, name: &'a str, label: &'a str) -> Self {
        Self {
            data,
            name,
            label,
            input_type: InputType::Text,
            placeholder: None,
            info: None,
            is_required: false,
        }
    }

    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Help text below the input
    pub fn with_info(mut self, info: &'a str) -> Self {
        self.info = Some(info);
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// Option of a [SelectTemplate]
pub struct SelectEntry<'a> {
    pub value: Cow<'a, str>,
    pub text: Cow<'a, str>,
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/select.html")]
pub struct SelectTemplate<'a, T: FormRepresentation> {
    data: &'a FormValue<T>,
    name: &'a str,
    label: &'a str,
    entries: &'a [SelectEntry<'a>],
    is_required: bool,
}

impl<'a, T: FormRepresentation> SelectTemplate<'a, T> {
    pub fn new(
        data: &'a FormValue<T>,
        name: &'a str,
        label: &'a str,
        entries: &'a [SelectEntry<'a>],
    ) -> Self {
        Self {
            data,
            name,
            label,
            entries,
            is_required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/checkbox.html")]
pub struct CheckboxTemplate<'a> {
    data: &'a CheckboxValue,
    name: &'a str,
    label: &'a str,
    info: Option<&'a str>,
}

impl<'a> CheckboxTemplate<'a> {
    pub fn new(data: &'a CheckboxValue, name: &'a str, label: &'a str) -> Self {
        Self {
            data,
            name,
            label,
            info: None,
        }
    }

    pub fn with_info(mut self, info: &'a str) -> Self {
        self.info = Some(info);
        self
    }
}
