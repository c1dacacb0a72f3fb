/// One field of a partial update.
///
/// Distinguishes a field the client did not send from one it sent empty,
/// which a plain `Option` cannot do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Not part of the request; the stored value is kept and not validated
    #[default]
    Unchanged,
    /// Sent without a value
    Cleared,
    Set(T),
}

impl FieldUpdate<String> {
    /// Interpret a raw form value: missing, blank, or a trimmed string
    pub fn from_input(input: Option<String>) -> Self {
        match input {
            None => Self::Unchanged,
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Self::Cleared
                } else {
                    Self::Set(trimmed.to_string())
                }
            }
        }
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn as_ref(&self) -> FieldUpdate<&T> {
        match self {
            Self::Unchanged => FieldUpdate::Unchanged,
            Self::Cleared => FieldUpdate::Cleared,
            Self::Set(value) => FieldUpdate::Set(value),
        }
    }
}
