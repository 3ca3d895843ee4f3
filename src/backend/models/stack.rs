use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::stack_value::StackValue;

/// An immutable-by-convention snapshot of the data stack.
///
/// The top of the stack is the last element. Operations never modify a
/// snapshot in place; they build a new one, so earlier snapshots stay valid
/// for undo and step-by-step display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack(Vec<StackValue>);

/// Build a [`Stack`] from literals, bottom first.
///
/// ```rust
/// use opcode_explorer::stack;
/// let s = stack![1, "a", true];
/// assert_eq!(s.len(), 3);
/// ```
#[macro_export]
macro_rules! stack {
    () => { $crate::backend::models::Stack::new() };
    ($($value:expr),+ $(,)?) => {
        $crate::backend::models::Stack::from(vec![
            $($crate::backend::models::StackValue::from($value)),+
        ])
    };
}

impl Stack {
    pub fn new() -> Self {
        Stack(Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top of stack
    #[inline]
    pub fn top(&self) -> Option<&StackValue> {
        self.0.last()
    }

    pub fn values(&self) -> &[StackValue] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackValue> {
        self.0.iter()
    }

    pub fn into_values(self) -> Vec<StackValue> {
        self.0
    }

    /// A copy of this stack with `value` on top
    pub fn pushed(&self, value: StackValue) -> Stack {
        let mut values = Vec::with_capacity(self.0.len() + 1);
        values.extend_from_slice(&self.0);
        values.push(value);
        Stack(values)
    }

    /// Consuming variant of [`Stack::pushed`]
    pub fn with(mut self, value: StackValue) -> Stack {
        self.0.push(value);
        self
    }

    /// Splits off the top `n` values.
    ///
    /// Returns the remaining stack and the removed values in bottom-to-top
    /// order, or `None` when fewer than `n` values are present.
    pub fn split_top(&self, n: usize) -> Option<(Stack, &[StackValue])> {
        let len = self.0.len();
        if n > len {
            return None;
        }
        let (rest, top) = self.0.split_at(len - n);
        Some((Stack(rest.to_vec()), top))
    }

    /// The sentinel message at the top of the stack, if any
    pub fn halt_message(&self) -> Option<&str> {
        self.top().and_then(StackValue::error_message)
    }
}

impl From<Vec<StackValue>> for Stack {
    fn from(values: Vec<StackValue>) -> Self {
        Stack(values)
    }
}

impl FromIterator<StackValue> for Stack {
    fn from_iter<I: IntoIterator<Item = StackValue>>(iter: I) -> Self {
        Stack(iter.into_iter().collect())
    }
}

impl IntoIterator for Stack {
    type Item = StackValue;
    type IntoIter = std::vec::IntoIter<StackValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a StackValue;
    type IntoIter = std::slice::Iter<'a, StackValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pushed_leaves_original() {
        let original = stack![1, 2];
        let grown = original.pushed(StackValue::from(3));
        assert_eq!(original, stack![1, 2]);
        assert_eq!(grown, stack![1, 2, 3]);
    }

    #[test]
    fn test_split_top() {
        let s = stack![1, "a", true];
        let (rest, top) = s.split_top(2).unwrap();
        assert_eq!(rest, stack![1]);
        assert_eq!(top, &[StackValue::from("a"), StackValue::from(true)]);

        assert!(s.split_top(4).is_none());
        let (rest, top) = s.split_top(0).unwrap();
        assert_eq!(rest, s);
        assert!(top.is_empty());
    }

    #[test]
    fn test_halt_message() {
        assert_eq!(stack![].halt_message(), None);
        assert_eq!(stack![1].halt_message(), None);
        assert_eq!(
            stack![1, "Error: Insufficient items"].halt_message(),
            Some("Error: Insufficient items")
        );
        // Only the top counts
        assert_eq!(stack!["Error: Insufficient items", 1].halt_message(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(stack![].to_string(), "[]");
        assert_eq!(stack![1, "a", false].to_string(), r#"[1, "a", false]"#);
    }

    #[test]
    fn test_json_is_plain_array() {
        let json = serde_json::to_string(&stack![1, true]).unwrap();
        assert_eq!(json, r#"[{"number":"1"},{"bool":true}]"#);
    }
}
