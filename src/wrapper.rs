use crate::{Error, Result};
use std::{
    collections::BTreeMap,
    fmt::Debug,
    ops::{Deref, DerefMut},
};

/// Generic wrapper to facilitate the addition of new methods to the wrapped type.
#[derive(PartialEq, Eq, Clone, Default)]
pub struct Wrapper<T>(pub T);

/// Name-keyed collection of loaded tables or runs, in name order.
pub type Named<V> = Wrapper<BTreeMap<String, V>>;

impl<T> Debug for Wrapper<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (&self.0 as &dyn Debug).fmt(f)
    }
}

impl<T> From<T> for Wrapper<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Wrapper<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Wrapper<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> IntoIterator for Wrapper<T>
where
    T: IntoIterator,
{
    type Item = T::Item;
    type IntoIter = T::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V> Wrapper<BTreeMap<String, V>> {
    /// Returns the entry for `name` or [`Error::MissingMeasurement`].
    pub fn require(&self, name: &str) -> Result<&V> {
        self.0
            .get(name)
            .ok_or_else(|| Error::MissingMeasurement(name.to_owned()))
    }

    /// Removes and returns the entry for `name` or [`Error::MissingMeasurement`].
    pub fn take(&mut self, name: &str) -> Result<V> {
        self.0
            .remove(name)
            .ok_or_else(|| Error::MissingMeasurement(name.to_owned()))
    }
}
