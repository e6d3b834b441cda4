//! Form encoding for multipart commands.
//!
//! Payloads list their fields explicitly through [`FormFields`]; each field has
//! an external name and a scalar value rendered the way the Bot API expects it
//! in a `multipart/form-data` text part.

use std::fmt;

/// Scalar value of a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for FormValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for FormValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FormValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FormValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FormValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// A form field: external name and value.
pub type FormField = (&'static str, FormValue);

/// Payload that can be sent as the text fields of a multipart form.
pub trait FormFields {
    /// Fields in the order they are written to the form.
    fn form_fields(&self) -> Vec<FormField>;
}

impl FormFields for () {
    fn form_fields(&self) -> Vec<FormField> {
        Vec::new()
    }
}

impl FormFields for [FormField] {
    fn form_fields(&self) -> Vec<FormField> {
        self.to_vec()
    }
}

impl FormFields for Vec<FormField> {
    fn form_fields(&self) -> Vec<FormField> {
        self.clone()
    }
}

impl<T: FormFields + ?Sized> FormFields for &T {
    fn form_fields(&self) -> Vec<FormField> {
        (**self).form_fields()
    }
}
