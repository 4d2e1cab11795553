/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use indexmap::IndexMap;

/// Attributes of a start tag.
///
/// Attributes are kept in document order. If a tag repeats an attribute
/// name, the last value wins but the attribute keeps the position of its
/// first appearance. No error is reported for duplicates.
#[derive(Clone, Debug, Default, Eq)]
pub struct Attributes {
    map: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes {
            map: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        self.map.insert(name, value);
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

// Order matters when comparing, unlike for the underlying map
impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name.into(), value.into());
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut attrs = Attributes::new();
        attrs.insert("a".into(), "1".into());
        attrs.insert("b".into(), "2".into());
        attrs.insert("a".into(), "3".into());
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("a"), Some("3"));
        let order: Vec<_> = attrs.iter().collect();
        assert_eq!(order, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn collect() {
        let attrs: Attributes = [("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(attrs.get("y"), Some("2"));
        assert_eq!(attrs.get("z"), None);
        assert!(!attrs.is_empty());
    }

    #[test]
    fn equality_is_ordered() {
        let ab: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        let ba: Attributes = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}
