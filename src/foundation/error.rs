/// Convenience result type used across metrolayout.
pub type MetroResult<T> = Result<T, MetroError>;

/// Top-level error taxonomy used by configuration and layout APIs.
///
/// Every variant is raised while reading or validating configuration. Placement
/// itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum MetroError {
    /// A fraction string could not be parsed as `numerator/denominator`.
    #[error("malformed fraction '{input}': must be formatted as %d/%d, such as 1/3")]
    MalformedFraction {
        /// The offending input, verbatim.
        input: String,
    },

    /// An item declared a non-positive or unset size fraction.
    #[error("item '{item}' is missing a positive {axis} fraction (format %d/%d, such as 1/3)")]
    MissingSizeFraction {
        /// Item id, or its index when it has no id.
        item: String,
        /// Which axis was missing.
        axis: Axis,
    },

    /// Invalid user-provided layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing layout documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Size axis named in [`MetroError::MissingSizeFraction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

impl MetroError {
    /// Build a [`MetroError::MalformedFraction`] value.
    pub fn malformed_fraction(input: impl Into<String>) -> Self {
        Self::MalformedFraction {
            input: input.into(),
        }
    }

    /// Build a [`MetroError::MissingSizeFraction`] value.
    pub fn missing_size_fraction(item: impl Into<String>, axis: Axis) -> Self {
        Self::MissingSizeFraction {
            item: item.into(),
            axis,
        }
    }

    /// Build a [`MetroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MetroError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MetroError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
