use core::fmt;

/// Returned by [`MultiValueMap::try_get`] when the requested key has no entry.
///
/// Only the keyed lookup reports absence this way. [`MultiValueMap::remove`],
/// [`MultiValueMap::remove_value`] and [`MultiValueMap::contains_key`] answer with a `bool`.
///
/// [`MultiValueMap::try_get`]: crate::MultiValueMap::try_get
/// [`MultiValueMap::remove`]: crate::MultiValueMap::remove
/// [`MultiValueMap::remove_value`]: crate::MultiValueMap::remove_value
/// [`MultiValueMap::contains_key`]: crate::MultiValueMap::contains_key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found in MultiValueMap")
    }
}

impl std::error::Error for KeyNotFound {}
