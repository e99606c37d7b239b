//! Typed values of submitted HTML forms
//!
//! A [FormValue] keeps the raw string entered by the user, so a rejected form can be rendered again
//! with the user's input and the validation errors next to the respective input field. The target
//! type of the validation is given by the type parameter.

use serde::{Deserialize, Deserializer};
use std::fmt::Debug;
use std::marker::PhantomData;

/// A type that is entered as a string into an HTML form input
pub trait FormRepresentation: Debug {
    /// The string to prefill the form input with, e.g. when editing an existing entry
    fn to_form_string(self) -> String;
}

/// A [FormRepresentation] type that can be parsed from the form input string alone
pub trait FromFormInput: FormRepresentation + Sized {
    fn from_form_input(input: &str) -> Result<Self, String>;
}

/// Additional data (like the list of existing ids or a time zone) required for validating form
/// input strings as the [FormRepresentation] type `R`
pub trait FormInputValidator<R: FormRepresentation> {
    fn validate_input(self, input: &str) -> Result<R, String>;
}

impl FormRepresentation for String {
    fn to_form_string(self) -> String {
        self
    }
}

impl FromFormInput for String {
    fn from_form_input(input: &str) -> Result<Self, String> {
        Ok(input.to_owned())
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct FormValue<T: FormRepresentation> {
    raw: Option<String>,
    #[serde(skip)]
    errors: Vec<String>,
    #[serde(skip)]
    _type: PhantomData<T>,
}

impl<T: FormRepresentation> FormValue<T> {
    /// A value for an unfilled form input. Validating it fails.
    pub fn empty() -> Self {
        Self {
            raw: None,
            errors: vec![],
            _type: PhantomData,
        }
    }

    fn check(&mut self, parse: impl FnOnce(&str) -> Result<T, String>) -> Option<T> {
        let Some(raw) = &self.raw else {
            self.errors.push("Value missing in form data".to_owned());
            return None;
        };
        parse(raw).map_err(|e| self.errors.push(e)).ok()
    }

    /// Validate the raw value with the help of `validator`. On failure, the error message is
    /// recorded for rendering the form again.
    pub fn validate_with<V: FormInputValidator<T>>(&mut self, validator: V) -> Option<T> {
        self.check(|raw| validator.validate_input(raw))
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The raw value, as entered by the user, for the input's `value` attribute
    pub fn string_value(&self) -> &str {
        self.raw.as_deref().unwrap_or_default()
    }
}

impl<T: FromFormInput> FormValue<T> {
    /// Parse the raw value. On failure, the error message is recorded for rendering the form again.
    pub fn validate(&mut self) -> Option<T> {
        self.check(T::from_form_input)
    }
}

impl<T: FormRepresentation + Default> Default for FormValue<T> {
    fn default() -> Self {
        T::default().into()
    }
}

impl<T: FormRepresentation> From<T> for FormValue<T> {
    fn from(value: T) -> Self {
        Self {
            raw: Some(value.to_form_string()),
            errors: vec![],
            _type: PhantomData,
        }
    }
}

/// State of an HTML checkbox. Browsers only submit checked checkboxes, so the field must be marked
/// with `#[serde(default)]` in the form data struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CheckboxValue {
    checked: bool,
}

impl CheckboxValue {
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl<'de> Deserialize<'de> for CheckboxValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any submitted value counts as checked
        let submitted = Option::<serde::de::IgnoredAny>::deserialize(deserializer)?;
        Ok(Self {
            checked: submitted.is_some(),
        })
    }
}

impl From<bool> for CheckboxValue {
    fn from(checked: bool) -> Self {
        Self { checked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::ui::validation::Name;

    #[derive(Deserialize)]
    struct ExampleFormData {
        name: FormValue<Name>,
        description: FormValue<String>,
        #[serde(default)]
        seeking: CheckboxValue,
    }

    #[test]
    fn test_deserialize_and_validate() {
        let mut data: ExampleFormData =
            serde_urlencoded::from_str("name=&description=Live+music&seeking=y").unwrap();
        assert!(data.name.validate().is_none());
        assert!(data.name.has_errors());
        assert_eq!(data.name.string_value(), "");
        assert_eq!(data.description.validate().as_deref(), Some("Live music"));
        assert!(!data.description.has_errors());
        assert!(data.seeking.is_checked());
    }

    #[test]
    fn test_missing_fields() {
        let mut data: ExampleFormData = serde_urlencoded::from_str("name=Hop").unwrap();
        assert_eq!(data.name.validate().unwrap().into_inner(), "Hop");
        assert!(data.description.validate().is_none());
        assert_eq!(data.description.errors(), ["Value missing in form data"]);
        assert!(!data.seeking.is_checked());
    }

    #[test]
    fn test_prefilled_value() {
        let value: FormValue<String> = "The Musical Hop".to_owned().into();
        assert_eq!(value.string_value(), "The Musical Hop");
        assert!(!value.has_errors());
        assert!(FormValue::<String>::empty().string_value().is_empty());
    }
}
