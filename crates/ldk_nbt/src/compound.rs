use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

use indexmap::map::{self, IndexMap};

use crate::error::{Result, TagError};
use crate::{List, Tag, TagType};

/// A map from names to tags that remembers insertion order.
///
/// Equality ignores order: two compounds are equal when they hold the same
/// set of entries.
#[derive(Clone, PartialEq, Default)]
pub struct Compound {
    map: IndexMap<String, Tag>,
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.map.fmt(f)
    }
}

fn missing(key: &str) -> TagError {
    TagError::Missing {
        key: key.to_owned(),
    }
}

fn mismatch(key: &str, expected: TagType, found: &Tag) -> TagError {
    TagError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.tag_type(),
    }
}

impl Compound {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(cap),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get(k)
    }

    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get_mut(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.contains_key(k)
    }

    /// Returns the type of the tag stored under `k`, if any.
    pub fn type_of<Q>(&self, k: &Q) -> Option<TagType>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.get(k).map(Tag::tag_type)
    }

    /// Inserts a tag, returning the one it replaced. A replaced key keeps its
    /// position; a new key goes to the end.
    pub fn insert<K, V>(&mut self, k: K, v: V) -> Option<Tag>
    where
        K: Into<String>,
        V: Into<Tag>,
    {
        self.map.insert(k.into(), v.into())
    }

    /// Removes a tag while keeping the order of the remaining entries.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<Tag>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.shift_remove(k)
    }

    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(String, Tag)>
    where
        String: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.shift_remove_entry(k)
    }

    pub fn entry<K>(&mut self, k: K) -> Entry<'_>
    where
        K: Into<String>,
    {
        match self.map.entry(k.into()) {
            map::Entry::Vacant(ve) => Entry::Vacant(VacantEntry { ve }),
            map::Entry::Occupied(oe) => Entry::Occupied(OccupiedEntry { oe }),
        }
    }

    /// Copies every entry of `other` into `self`. Where both sides hold a
    /// compound under the same key they are merged recursively; otherwise the
    /// tag from `other` wins.
    pub fn merge(&mut self, other: &Compound) {
        for (k, v) in other.iter() {
            match (self.map.get_mut(k), v) {
                (Some(Tag::Compound(ours)), Tag::Compound(theirs)) => ours.merge(theirs),
                _ => {
                    self.map.insert(k.clone(), v.clone());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> map::Iter<'_, String, Tag> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> map::IterMut<'_, String, Tag> {
        self.map.iter_mut()
    }

    pub fn keys(&self) -> map::Keys<'_, String, Tag> {
        self.map.keys()
    }

    pub fn values(&self) -> map::Values<'_, String, Tag> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> map::ValuesMut<'_, String, Tag> {
        self.map.values_mut()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&String, &mut Tag) -> bool,
    {
        self.map.retain(f);
    }

    fn get_or_insert_default(&mut self, key: &str, ty: TagType) -> &mut Tag {
        self.map
            .entry(key.to_owned())
            .or_insert_with(|| Tag::default_for(ty))
    }
}

/// Typed accessors for the fixed width scalar tags.
///
/// For each type there is a getter that fails on absence, one that returns
/// `None` on absence, one that inserts a zero valued tag on absence, and a
/// setter. A tag of the wrong type is always an error.
macro_rules! scalar_accessors {
    ($($variant:ident($ty:ty) => $get:ident, $get_opt:ident, $get_or_default:ident, $set:ident;)*) => {
        impl Compound {
            $(
                pub fn $get(&self, key: &str) -> Result<$ty> {
                    self.$get_opt(key)?.ok_or_else(|| missing(key))
                }

                pub fn $get_opt(&self, key: &str) -> Result<Option<$ty>> {
                    match self.map.get(key) {
                        None => Ok(None),
                        Some(Tag::$variant(v)) => Ok(Some(*v)),
                        Some(other) => Err(mismatch(key, TagType::$variant, other)),
                    }
                }

                pub fn $get_or_default(&mut self, key: &str) -> Result<$ty> {
                    match self.get_or_insert_default(key, TagType::$variant) {
                        Tag::$variant(v) => Ok(*v),
                        other => Err(mismatch(key, TagType::$variant, other)),
                    }
                }

                pub fn $set(&mut self, key: impl Into<String>, value: $ty) -> Option<Tag> {
                    self.insert(key, Tag::$variant(value))
                }
            )*
        }
    };
}

scalar_accessors! {
    Byte(i8) => get_byte, get_byte_opt, get_byte_or_default, set_byte;
    Short(i16) => get_short, get_short_opt, get_short_or_default, set_short;
    Int(i32) => get_int, get_int_opt, get_int_or_default, set_int;
    Long(i64) => get_long, get_long_opt, get_long_or_default, set_long;
    Float(f32) => get_float, get_float_opt, get_float_or_default, set_float;
    Double(f64) => get_double, get_double_opt, get_double_or_default, set_double;
}

/// Typed accessors for strings, arrays and containers.
///
/// Reads go through `$read`, which decides whether the caller gets a borrow
/// or an owned copy. The `_or_default` variant and `_mut` hand out a mutable
/// reference to the stored value.
macro_rules! container_accessors {
    ($($variant:ident($owned:ty) -> $ret:ty, |$v:ident| $read:expr
        => $get:ident, $get_opt:ident, $get_mut:ident, $get_or_default:ident, $set:ident;)*) => {
        impl Compound {
            $(
                pub fn $get(&self, key: &str) -> Result<$ret> {
                    self.$get_opt(key)?.ok_or_else(|| missing(key))
                }

                pub fn $get_opt(&self, key: &str) -> Result<Option<$ret>> {
                    match self.map.get(key) {
                        None => Ok(None),
                        Some(Tag::$variant($v)) => Ok(Some($read)),
                        Some(other) => Err(mismatch(key, TagType::$variant, other)),
                    }
                }

                pub fn $get_mut(&mut self, key: &str) -> Result<&mut $owned> {
                    match self.map.get_mut(key) {
                        None => Err(missing(key)),
                        Some(Tag::$variant(v)) => Ok(v),
                        Some(other) => Err(mismatch(key, TagType::$variant, other)),
                    }
                }

                pub fn $get_or_default(&mut self, key: &str) -> Result<&mut $owned> {
                    match self.get_or_insert_default(key, TagType::$variant) {
                        Tag::$variant(v) => Ok(v),
                        other => Err(mismatch(key, TagType::$variant, other)),
                    }
                }

                pub fn $set(&mut self, key: impl Into<String>, value: impl Into<$owned>) -> Option<Tag> {
                    self.insert(key, Tag::$variant(value.into()))
                }
            )*
        }
    };
}

container_accessors! {
    String(String) -> &str, |v| v.as_str()
        => get_string, get_string_opt, get_string_mut, get_string_or_default, set_string;
    ByteArray(Vec<i8>) -> Vec<i8>, |v| v.clone()
        => get_byte_array, get_byte_array_opt, get_byte_array_mut, get_byte_array_or_default, set_byte_array;
    IntArray(Vec<i32>) -> Vec<i32>, |v| v.clone()
        => get_int_array, get_int_array_opt, get_int_array_mut, get_int_array_or_default, set_int_array;
    LongArray(Vec<i64>) -> Vec<i64>, |v| v.clone()
        => get_long_array, get_long_array_opt, get_long_array_mut, get_long_array_or_default, set_long_array;
    List(List) -> &List, |v| v
        => get_list, get_list_opt, get_list_mut, get_list_or_default, set_list;
    Compound(Compound) -> &Compound, |v| v
        => get_compound, get_compound_opt, get_compound_mut, get_compound_or_default, set_compound;
}

impl Compound {
    /// Reads a byte tag as a boolean. Any non-zero value is `true`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_byte(key).map(|b| b != 0)
    }

    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get_byte_opt(key)?.map(|b| b != 0))
    }

    pub fn get_bool_or_default(&mut self, key: &str) -> Result<bool> {
        self.get_byte_or_default(key).map(|b| b != 0)
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> Option<Tag> {
        self.insert(key, value)
    }

    /// Like [`Compound::get_list`], but also requires every element to be of
    /// type `ty`. An empty list of type `End` is accepted for any `ty`.
    pub fn get_list_of(&self, key: &str, ty: TagType) -> Result<&List> {
        let list = self.get_list(key)?;
        match list.element_type() {
            found if found == ty || (found == TagType::End && list.is_empty()) => Ok(list),
            found => Err(TagError::ListTypeMismatch { expected: ty, found }),
        }
    }
}

impl Extend<(String, Tag)> for Compound {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (String, Tag)>,
    {
        self.map.extend(iter);
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Tag)>,
    {
        Self {
            map: IndexMap::from_iter(iter),
        }
    }
}

impl<Q> Index<&'_ Q> for Compound
where
    String: Borrow<Q>,
    Q: ?Sized + Eq + Hash,
{
    type Output = Tag;

    fn index(&self, index: &Q) -> &Self::Output {
        self.map.index(index)
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Compound {
    type Item = (&'a String, &'a mut Tag);
    type IntoIter = map::IterMut<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub enum Entry<'a> {
    Vacant(VacantEntry<'a>),
    Occupied(OccupiedEntry<'a>),
}

impl<'a> Entry<'a> {
    pub fn key(&self) -> &String {
        match self {
            Entry::Vacant(ve) => ve.key(),
            Entry::Occupied(oe) => oe.key(),
        }
    }

    pub fn or_insert(self, default: impl Into<Tag>) -> &'a mut Tag {
        match self {
            Entry::Vacant(ve) => ve.insert(default),
            Entry::Occupied(oe) => oe.into_mut(),
        }
    }

    pub fn or_insert_with<F, V>(self, default: F) -> &'a mut Tag
    where
        F: FnOnce() -> V,
        V: Into<Tag>,
    {
        match self {
            Entry::Vacant(ve) => ve.insert(default()),
            Entry::Occupied(oe) => oe.into_mut(),
        }
    }
}

pub struct VacantEntry<'a> {
    ve: map::VacantEntry<'a, String, Tag>,
}

impl<'a> VacantEntry<'a> {
    pub fn key(&self) -> &String {
        self.ve.key()
    }

    pub fn insert(self, v: impl Into<Tag>) -> &'a mut Tag {
        self.ve.insert(v.into())
    }
}

pub struct OccupiedEntry<'a> {
    oe: map::OccupiedEntry<'a, String, Tag>,
}

impl<'a> OccupiedEntry<'a> {
    pub fn key(&self) -> &String {
        self.oe.key()
    }

    pub fn get(&self) -> &Tag {
        self.oe.get()
    }

    pub fn get_mut(&mut self) -> &mut Tag {
        self.oe.get_mut()
    }

    pub fn into_mut(self) -> &'a mut Tag {
        self.oe.into_mut()
    }

    pub fn insert(&mut self, v: impl Into<Tag>) -> Tag {
        self.oe.insert(v.into())
    }

    pub fn remove(self) -> Tag {
        self.oe.shift_remove()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compound;

    #[test]
    fn missing_and_mismatch_are_distinct() {
        let c = compound! { "name" => "steve" };

        assert_eq!(
            c.get_int("age").unwrap_err(),
            TagError::Missing { key: "age".into() }
        );
        assert_eq!(
            c.get_int("name").unwrap_err(),
            TagError::TypeMismatch {
                key: "name".into(),
                expected: TagType::Int,
                found: TagType::String,
            }
        );
        assert_eq!(c.get_int_opt("age").unwrap(), None);
        assert!(c.get_int_opt("name").is_err());
        assert_eq!(c.get_string("name").unwrap(), "steve");
    }

    #[test]
    fn get_or_default_inserts_once() {
        let mut c = Compound::new();

        assert_eq!(c.get_int_or_default("count").unwrap(), 0);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("count"), Some(&Tag::Int(0)));

        c.set_int("count", 7);
        assert_eq!(c.get_int_or_default("count").unwrap(), 7);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn get_or_default_builds_nested_structures() {
        let mut root = Compound::new();
        root.get_compound_or_default("display")
            .unwrap()
            .get_list_or_default("Lore")
            .unwrap()
            .push("first line")
            .unwrap();
        root.get_compound_or_default("display")
            .unwrap()
            .get_list_or_default("Lore")
            .unwrap()
            .push("second line")
            .unwrap();

        assert_eq!(
            root,
            compound! {
                "display" => compound! {
                    "Lore" => List::from_tags(["first line", "second line"]).unwrap(),
                },
            }
        );
    }

    #[test]
    fn get_or_default_rejects_wrong_type() {
        let mut c = compound! { "x" => 1.5_f64 };
        assert!(c.get_int_or_default("x").is_err());
        assert!(c.get_compound_or_default("x").is_err());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn arrays_are_copied_out() {
        let mut c = compound! { "data" => vec![1_i32, 2, 3] };
        let mut copy = c.get_int_array("data").unwrap();
        copy.push(4);
        assert_eq!(c.get_int_array("data").unwrap(), vec![1, 2, 3]);

        c.get_int_array_mut("data").unwrap().push(4);
        assert_eq!(c.get_int_array("data").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn typed_setters_take_ownership() {
        let mut c = Compound::new();
        let bytes: &[i8] = &[1, 2];
        c.set_string("name", "Alex");
        c.set_byte_array("bytes", bytes);
        c.set_list("list", List::from_tags([1_i16]).unwrap());
        let old = c.set_string("name", String::from("Steve"));

        assert_eq!(old, Some(Tag::from("Alex")));
        assert_eq!(c.get_string("name").unwrap(), "Steve");
        assert_eq!(c.get_byte_array("bytes").unwrap(), vec![1, 2]);
        assert_eq!(c.get_list("list").unwrap().element_type(), TagType::Short);
    }

    #[test]
    fn bools() {
        let mut c = Compound::new();
        c.set_bool("on", true);
        assert!(c.get_bool("on").unwrap());
        assert!(!c.get_bool_or_default("off").unwrap());
        assert_eq!(c.get("off"), Some(&Tag::Byte(0)));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut c = compound! {
            "zeta" => 1,
            "alpha" => 2,
            "mid" => 3,
        };
        c.remove("alpha");
        c.insert("beta", 4);

        assert_eq!(c.keys().collect::<Vec<_>>(), ["zeta", "mid", "beta"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a = compound! { "a" => 1, "b" => 2 };
        let b = compound! { "b" => 2, "a" => 1 };
        assert_eq!(a, b);
    }

    #[test]
    fn merge_is_recursive() {
        let mut base = compound! {
            "keep" => 1,
            "nested" => compound! { "a" => 1, "b" => 2 },
        };
        base.merge(&compound! {
            "nested" => compound! { "b" => 3, "c" => 4 },
            "new" => "x",
        });

        assert_eq!(
            base,
            compound! {
                "keep" => 1,
                "nested" => compound! { "a" => 1, "b" => 3, "c" => 4 },
                "new" => "x",
            }
        );
    }

    #[test]
    fn list_of_checks_element_type() {
        let c = compound! {
            "ints" => List::from_tags([1, 2]).unwrap(),
            "empty" => List::new(),
        };
        assert!(c.get_list_of("ints", TagType::Int).is_ok());
        assert!(c.get_list_of("ints", TagType::String).is_err());
        assert!(c.get_list_of("empty", TagType::Compound).is_ok());
    }

    #[test]
    fn entry_api() {
        let mut c = Compound::new();
        *c.entry("n").or_insert(1) = Tag::Int(5);
        assert_eq!(c.get_int("n").unwrap(), 5);

        match c.entry("n") {
            Entry::Occupied(oe) => assert_eq!(oe.remove(), Tag::Int(5)),
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }
        assert!(c.is_empty());
    }
}
