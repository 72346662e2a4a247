use std::ops::Index;
use std::slice;

use crate::error::{Result, TagError};
use crate::{Compound, Tag, TagType};

/// An ordered sequence of tags that all share one type.
///
/// The element type of an empty list is [`TagType::End`] unless the list was
/// built with [`List::with_element_type`]. Adding to an `End` typed list fixes
/// the type to that of the new element. Every mutation checks the type before
/// touching the list, so a failed call leaves it unchanged.
#[derive(Clone, PartialEq, Debug)]
pub struct List {
    element_type: TagType,
    elements: Vec<Tag>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    pub const fn new() -> Self {
        Self {
            element_type: TagType::End,
            elements: Vec::new(),
        }
    }

    /// Creates an empty list whose element type is already fixed.
    pub const fn with_element_type(element_type: TagType) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
        }
    }

    /// Builds a list from the given tags, failing on the first one whose type
    /// differs from the first element's.
    pub fn from_tags<I>(tags: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        let mut list = Self::new();
        for tag in tags {
            list.push(tag)?;
        }
        Ok(list)
    }

    /// Assembles a list whose elements are already known to be of
    /// `element_type`, as the decoders produce them.
    pub(crate) fn from_raw(element_type: TagType, elements: Vec<Tag>) -> Self {
        debug_assert!(elements.iter().all(|e| e.tag_type() == element_type));
        Self {
            element_type,
            elements,
        }
    }

    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.elements.get(index)
    }

    /// Mutable access to a compound element. There is no untyped `get_mut`
    /// since it could change an element's type; use [`List::set`] to replace
    /// elements.
    pub fn get_compound_mut(&mut self, index: usize) -> Option<&mut Compound> {
        match self.elements.get_mut(index)? {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to a nested list element.
    pub fn get_list_mut(&mut self, index: usize) -> Option<&mut List> {
        match self.elements.get_mut(index)? {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn first(&self) -> Option<&Tag> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&Tag> {
        self.elements.last()
    }

    fn check(&self, ty: TagType) -> Result<()> {
        if ty == TagType::End || (self.element_type != TagType::End && self.element_type != ty) {
            return Err(TagError::ListTypeMismatch {
                expected: self.element_type,
                found: ty,
            });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.elements.len() {
            return Err(TagError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            });
        }
        Ok(())
    }

    /// Appends a tag to the end of the list.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check(tag.tag_type())?;
        self.element_type = tag.tag_type();
        self.elements.push(tag);
        Ok(())
    }

    /// Inserts a tag at `index`, shifting everything after it.
    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check_insert_index(index)?;
        self.check(tag.tag_type())?;
        self.element_type = tag.tag_type();
        self.elements.insert(index, tag);
        Ok(())
    }

    /// Replaces the tag at `index` and returns the previous one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        if index >= self.elements.len() {
            return Err(TagError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            });
        }
        self.check(tag.tag_type())?;
        Ok(std::mem::replace(&mut self.elements[index], tag))
    }

    /// Appends every tag from `tags`. Either all of them are added or none.
    pub fn extend_from<I>(&mut self, tags: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        let tags: Vec<Tag> = tags.into_iter().map(Into::into).collect();
        let mut ty = self.element_type;
        for tag in &tags {
            let found = tag.tag_type();
            if found == TagType::End || (ty != TagType::End && ty != found) {
                return Err(TagError::ListTypeMismatch { expected: ty, found });
            }
            ty = found;
        }
        self.element_type = ty;
        self.elements.extend(tags);
        Ok(())
    }

    /// Replaces the whole contents of the list. The element type is inferred
    /// again from the new elements.
    pub fn set_elements(&mut self, tags: Vec<Tag>) -> Result<()> {
        let mut replacement = List::new();
        replacement.extend_from(tags)?;
        *self = replacement;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Removes every element and resets the element type to `End`.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.element_type = TagType::End;
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.elements
    }
}

#[cfg(all(test, feature = "binary"))]
impl List {
    /// Builds a list without any type checks, to exercise the encoder's own
    /// validation.
    pub(crate) fn unchecked(element_type: TagType, elements: Vec<Tag>) -> Self {
        Self {
            element_type,
            elements,
        }
    }
}

impl Index<usize> for List {
    type Output = Tag;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn first_element_fixes_type() {
        let mut list = List::new();
        assert_eq!(list.element_type(), TagType::End);

        list.push(1).unwrap();
        assert_eq!(list.element_type(), TagType::Int);

        let err = list.push("two").unwrap_err();
        assert_eq!(
            err,
            TagError::ListTypeMismatch {
                expected: TagType::Int,
                found: TagType::String
            }
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn failed_mutations_leave_list_untouched() {
        let mut list = List::from_tags([1_i8, 2, 3]).unwrap();
        let before = list.clone();

        assert!(list.set(0, 1_i16).is_err());
        assert!(list.insert(1, 1.0_f32).is_err());
        assert!(list.extend_from([Tag::Byte(4), Tag::Long(5)]).is_err());
        assert!(list.set_elements(vec![Tag::Int(1), Tag::Byte(2)]).is_err());
        assert!(list.push(Tag::End).is_err());
        assert!(list.set(10, 1_i8).is_err());

        assert_eq!(list, before);
    }

    #[test]
    fn set_returns_previous() {
        let mut list = List::from_tags(["a", "b"]).unwrap();
        assert_eq!(list.set(1, "c").unwrap(), Tag::from("b"));
        assert_eq!(list[1], Tag::from("c"));
    }

    #[test]
    fn clear_resets_type() {
        let mut list = List::from_tags([1_i64]).unwrap();
        list.clear();
        assert_eq!(list.element_type(), TagType::End);
        list.push("now a string").unwrap();
        assert_eq!(list.element_type(), TagType::String);
    }

    #[test]
    fn typed_empty_list() {
        let mut list = List::with_element_type(TagType::Compound);
        assert!(list.push(1).is_err());
        assert_ne!(list, List::new());
    }

    #[test]
    fn nested_elements_are_mutable_in_place() {
        let mut list = List::from_tags([Compound::new()]).unwrap();
        list.get_compound_mut(0).unwrap().insert("x", 1);
        assert_eq!(list[0].as_compound().unwrap().get_int("x").unwrap(), 1);
        assert!(list.get_list_mut(0).is_none());
        assert!(list.get_compound_mut(1).is_none());
        assert_eq!(list.element_type(), TagType::Compound);

        let mut outer = List::from_tags([List::new()]).unwrap();
        outer.get_list_mut(0).unwrap().push("inner").unwrap();
        assert_eq!(outer[0].as_list().unwrap().element_type(), TagType::String);
    }

    #[test]
    fn insert_and_remove() {
        let mut list = List::from_tags([1, 3]).unwrap();
        list.insert(1, 2).unwrap();
        list.insert(3, 4).unwrap();
        assert!(list.insert(9, 5).is_err());
        assert_eq!(
            list.iter().filter_map(Tag::to_int).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(list.remove(0), Some(Tag::Int(1)));
        assert_eq!(list.remove(10), None);
        assert_eq!(list.element_type(), TagType::Int);
    }
}
