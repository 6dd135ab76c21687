//! Field presence checks shared by the request handlers.
//!
//! Checks return `Option<ValidationIssue>` so that several of them can be
//! chained with `or_else`, the first failing field winning.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("{message}")]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("The '{field}' field is required."),
        }
    }
}

/// Values that can be blank even when they were supplied.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

/// `NaN` and infinities are never a usable amount.
impl Presence for f64 {
    fn is_present(&self) -> bool {
        self.is_finite()
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

pub fn required<T: Presence>(field: &'static str, value: Option<T>) -> Option<ValidationIssue> {
    require(field, value).err()
}

/// Like [`required`], but hands the present value back.
pub fn require<T: Presence>(field: &'static str, value: Option<T>) -> Result<T, ValidationIssue> {
    match value {
        Some(v) if v.is_present() => Ok(v),
        _ => Err(ValidationIssue::required(field)),
    }
}

pub fn trim_string(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
