//! Non-empty collections for branch lists and tuple elements.

use std::fmt;
use std::ops::Deref;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonEmptyError;

impl fmt::Display for NonEmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("collection must be non-empty")
    }
}

impl std::error::Error for NonEmptyError {}

/// A vector holding at least one element. There is no way to remove
/// elements once it is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyVec<T>(Vec<T>);

impl<T> NonEmptyVec<T> {
    pub fn new(values: Vec<T>) -> Result<Self, NonEmptyError> {
        if values.is_empty() {
            Err(NonEmptyError)
        } else {
            Ok(Self(values))
        }
    }

    pub fn singleton(value: T) -> Self {
        Self(vec![value])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> &T {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = NonEmptyError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for NonEmptyVec<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmptyVec<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<T>::deserialize(deserializer)?;
        NonEmptyVec::new(values).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(NonEmptyVec::<u8>::new(vec![]), Err(NonEmptyError));
        assert!(NonEmptyVec::try_from(vec![1]).is_ok());
    }

    #[test]
    fn test_order_preserved() {
        let v = NonEmptyVec::new(vec![1, 2, 3]).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert_eq!(*v.first(), 1);
        assert_eq!(v.len(), 3);
        assert_eq!(*NonEmptyVec::singleton(7).first(), 7);
    }

    #[test]
    fn test_serde_rejects_empty_array() {
        let v: NonEmptyVec<u8> = serde_json::from_str("[4, 5]").unwrap();
        assert_eq!(v.as_slice(), &[4, 5]);

        let err = serde_json::from_str::<NonEmptyVec<u8>>("[]").unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }
}
