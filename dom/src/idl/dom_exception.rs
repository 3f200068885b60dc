use std::fmt;

/// https://webidl.spec.whatwg.org/#idl-DOMException
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct DomException {
    pub name: ErrorName,
    pub message: &'static str,
}

impl DomException {
    pub fn new(name: ErrorName, message: &'static str) -> Self {
        Self { name, message }
    }

    /// The legacy numeric code, or 0 for names introduced after the codes were frozen.
    pub fn code(&self) -> u16 {
        self.name.legacy_code()
    }
}

impl From<ErrorName> for DomException {
    fn from(name: ErrorName) -> Self {
        DomException::new(name, name.default_message())
    }
}

impl From<css::CssError> for DomException {
    fn from(value: css::CssError) -> Self {
        match value {
            css::CssError::Syntax(_) => ErrorName::SyntaxError.into(),
            css::CssError::IndexSize { .. } => ErrorName::IndexSizeError.into(),
            css::CssError::NotAllowed(message) => {
                DomException::new(ErrorName::NotAllowedError, message)
            }
        }
    }
}

/// The subset of https://webidl.spec.whatwg.org/#dfn-error-names-table raised by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorName {
    IndexSizeError,
    HierarchyRequestError,
    InvalidCharacterError,
    NotFoundError,
    NotSupportedError,
    InvalidStateError,
    SyntaxError,
    NotAllowedError,
}

impl ErrorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorName::IndexSizeError => "IndexSizeError",
            ErrorName::HierarchyRequestError => "HierarchyRequestError",
            ErrorName::InvalidCharacterError => "InvalidCharacterError",
            ErrorName::NotFoundError => "NotFoundError",
            ErrorName::NotSupportedError => "NotSupportedError",
            ErrorName::InvalidStateError => "InvalidStateError",
            ErrorName::SyntaxError => "SyntaxError",
            ErrorName::NotAllowedError => "NotAllowedError",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorName::IndexSizeError => "The index is not in the allowed range.",
            ErrorName::HierarchyRequestError => "The operation would yield an incorrect node tree.",
            ErrorName::InvalidCharacterError => "The string contains invalid characters.",
            ErrorName::NotFoundError => "The object can not be found here.",
            ErrorName::NotSupportedError => "The operation is not supported.",
            ErrorName::InvalidStateError => "The object is in an invalid state.",
            ErrorName::SyntaxError => "The string did not match the expected pattern.",
            ErrorName::NotAllowedError => "The request is not allowed.",
        }
    }

    pub fn legacy_code(&self) -> u16 {
        match self {
            ErrorName::IndexSizeError => 1,
            ErrorName::HierarchyRequestError => 3,
            ErrorName::InvalidCharacterError => 5,
            ErrorName::NotFoundError => 8,
            ErrorName::NotSupportedError => 9,
            ErrorName::InvalidStateError => 11,
            ErrorName::SyntaxError => 12,
            ErrorName::NotAllowedError => 0,
        }
    }
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{DomException, ErrorName};

    #[test]
    fn exceptions_carry_legacy_codes() {
        let exception: DomException = ErrorName::HierarchyRequestError.into();
        assert_eq!(exception.code(), 3);
        assert_eq!(
            exception.to_string(),
            "HierarchyRequestError: The operation would yield an incorrect node tree."
        );
        assert_eq!(DomException::from(ErrorName::NotAllowedError).code(), 0);
    }

    #[test]
    fn css_errors_map_to_exceptions() {
        let exception = DomException::from(css::CssError::IndexSize {
            index: 4,
            length: 1,
        });
        assert_eq!(exception.name, ErrorName::IndexSizeError);
    }
}
