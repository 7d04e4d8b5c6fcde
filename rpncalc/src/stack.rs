use std::slice;

/// LIFO container backing every phase of the calculator.
/// Elements are kept oldest first, so iterating walks from bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack{items: Vec::new()}
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    // bottom to top, ie: in the order things were pushed
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    // hand over the contents leaving an empty stack behind
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self { Stack::new() }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, iterable: I) {
        for item in iterable { self.push(item); }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item=T>>(iterable: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iterable);
        stack
    }
}
