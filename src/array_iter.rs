//! Thin array-iteration wrappers.
//!
//! Small named iterator types over slices, used by the `Value` layer to
//! expose array iteration without leaking `core::slice` types in its API.

/// Iterator over the items of a slice.
pub struct ArrayIter<'a, T> {
    inner: core::slice::Iter<'a, T>,
}

impl<'a, T> ArrayIter<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            inner: items.iter(),
        }
    }
}

impl<'a, T> Iterator for ArrayIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over `(index, item)` pairs of a slice.
pub struct ArrayKeyValueIter<'a, T> {
    items: &'a [T],
    pos: usize,
}

impl<'a, T> ArrayKeyValueIter<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, pos: 0 }
    }
}

impl<'a, T> Iterator for ArrayKeyValueIter<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.pos)?;
        let pair = (self.pos, item);
        self.pos += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.pos;
        (remaining, Some(remaining))
    }
}
