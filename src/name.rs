use crate::error::{Error, Result};

/// Maximum length of an EnergyPlus object name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Characters that would break an IDF record if they appeared in a name.
const ILLEGAL_NAME_CHARS: [char; 5] = [',', ';', '!', '\n', '\t'];

/// Types that expose a comparable name.
pub trait HasName {
    fn get_name(&self) -> &str;
}

impl<T: HasName + ?Sized> HasName for &T {
    fn get_name(&self) -> &str {
        (*self).get_name()
    }
}
impl<T: HasName + ?Sized> HasName for std::sync::Arc<T> {
    fn get_name(&self) -> &str {
        (**self).get_name()
    }
}

/// Sorting helpers for slices of `T: HasName`.
pub trait SortByName {
    /// Stable, ascending sort by name.
    fn sort_by_name(&mut self);
}

impl<T: HasName> SortByName for [T] {
    fn sort_by_name(&mut self) {
        self.sort_by(|a, b| a.get_name().cmp(b.get_name()));
    }
}

/// Validates a material or construction name for use in IDF text.
///
/// Leading and trailing whitespace is trimmed. The name must not be empty,
/// must fit in [`MAX_NAME_LENGTH`] characters and must not contain IDF
/// field or comment delimiters.
pub fn valid_ep_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{what} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::validation(format!(
            "{what} \"{trimmed}\" is longer than {MAX_NAME_LENGTH} characters"
        )));
    }
    if let Some(c) = trimmed.chars().find(|c| ILLEGAL_NAME_CHARS.contains(c)) {
        return Err(Error::validation(format!(
            "{what} \"{}\" contains illegal character {c:?}",
            trimmed.escape_default()
        )));
    }
    Ok(trimmed.to_string())
}
