//! Attribute Editing
//!
//! Local edits to a friend's attribute list. Nothing is sent to the backend
//! until the whole list is saved with
//! [`FriendClient::update_attributes`](crate::client::FriendClient::update_attributes).

use thiserror::Error;

use crate::models::FriendAttribute;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("No attribute at index {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Attribute name must not be empty")]
    EmptyName,
}

/// Edited copy of an attribute list plus the list it started from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDraft {
    original: Vec<FriendAttribute>,
    current: Vec<FriendAttribute>,
}

impl From<Vec<FriendAttribute>> for AttributeDraft {
    fn from(attributes: Vec<FriendAttribute>) -> Self {
        Self {
            current: attributes.clone(),
            original: attributes,
        }
    }
}

impl AttributeDraft {
    pub fn attributes(&self) -> &[FriendAttribute] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), DraftError> {
        self.get_mut(index)?.attribute_name = name.into();
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<(), DraftError> {
        self.get_mut(index)?.value = value.into();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<FriendAttribute, DraftError> {
        self.check(index)?;
        Ok(self.current.remove(index))
    }

    pub fn push(&mut self, attribute: FriendAttribute) {
        self.current.push(attribute);
    }

    /// Set `name` to `value`, replacing the first attribute with that name or
    /// appending a new one. Returns the previous value if there was one.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let value = value.into();
        match self.position(name) {
            Some(index) => Ok(Some(std::mem::replace(
                &mut self.current[index].value,
                value,
            ))),
            None => {
                self.current.push(FriendAttribute::new(name, value));
                Ok(None)
            }
        }
    }

    /// Remove every attribute named `name`; returns how many were removed
    pub fn unset(&mut self, name: &str) -> usize {
        let name = name.trim();
        let before = self.current.len();
        self.current.retain(|a| a.attribute_name != name);
        before - self.current.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.current.iter().position(|a| a.attribute_name == name)
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.original
    }

    /// Drop all edits
    pub fn reset(&mut self) {
        self.current = self.original.clone();
    }

    pub fn into_attributes(self) -> Vec<FriendAttribute> {
        self.current
    }

    fn check(&self, index: usize) -> Result<(), DraftError> {
        if index < self.current.len() {
            Ok(())
        } else {
            Err(DraftError::OutOfRange {
                index,
                len: self.current.len(),
            })
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut FriendAttribute, DraftError> {
        self.check(index)?;
        Ok(&mut self.current[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AttributeDraft {
        AttributeDraft::from(vec![
            FriendAttribute::new("hobby", "hiking"),
            FriendAttribute::new("birthday", "March 3"),
        ])
    }

    #[test]
    fn test_edit_and_reset() {
        let mut d = draft();
        assert!(!d.is_dirty());

        d.set_value(0, "climbing").unwrap();
        d.set_name(1, "birth date").unwrap();
        assert!(d.is_dirty());
        assert_eq!(d.attributes()[0].value, "climbing");
        assert_eq!(d.attributes()[1].attribute_name, "birth date");

        d.reset();
        assert!(!d.is_dirty());
        assert_eq!(d.attributes()[0].value, "hiking");
    }

    #[test]
    fn test_remove() {
        let mut d = draft();
        let removed = d.remove(0).unwrap();
        assert_eq!(removed.attribute_name, "hobby");
        assert_eq!(d.len(), 1);
        assert_eq!(
            d.remove(5),
            Err(DraftError::OutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_out_of_range_edit() {
        let mut d = AttributeDraft::from(Vec::new());
        assert!(d.is_empty());
        assert!(d.set_value(0, "x").is_err());
        assert!(d.set_name(0, "x").is_err());
    }

    #[test]
    fn test_set_upserts() {
        let mut d = draft();
        assert_eq!(d.set("hobby", "running").unwrap(), Some("hiking".to_string()));
        assert_eq!(d.set(" job ", "engineer").unwrap(), None);
        assert_eq!(d.len(), 3);
        assert_eq!(d.position("job"), Some(2));
        assert_eq!(d.set("  ", "x"), Err(DraftError::EmptyName));
    }

    #[test]
    fn test_unset() {
        let mut d = draft();
        d.push(FriendAttribute::new("hobby", "cooking"));
        assert_eq!(d.unset("hobby"), 2);
        assert_eq!(d.unset("hobby"), 0);
        assert_eq!(
            d.into_attributes(),
            vec![FriendAttribute::new("birthday", "March 3")]
        );
    }
}
