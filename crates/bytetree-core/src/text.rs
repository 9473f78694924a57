use std::fmt;

use bytes::Bytes;

use crate::builder::Builder;

/// A deferred-concatenation builder over UTF-8 text.
///
/// Shares its node representation with [`Builder<Bytes>`]. Every leaf is the
/// UTF-8 encoding of a `str`, so converting to a byte builder is O(1) and
/// materializing back to a `String` needs no re-validation of well-formed
/// input.
#[derive(Clone, Default)]
pub struct TextBuilder {
    inner: Builder<Bytes>,
}

impl TextBuilder {
    /// The empty text builder.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self {
            inner: Builder::from_string(s),
        }
    }

    pub fn append_string(self, s: impl Into<String>) -> Self {
        Self {
            inner: self.inner.append_string(s),
        }
    }

    pub fn prepend_string(self, s: impl Into<String>) -> Self {
        Self {
            inner: self.inner.prepend_string(s),
        }
    }

    pub fn append_builder(self, suffix: TextBuilder) -> Self {
        Self {
            inner: self.inner.append_builder(suffix.inner),
        }
    }

    pub fn prepend_builder(self, prefix: TextBuilder) -> Self {
        Self {
            inner: self.inner.prepend_builder(prefix.inner),
        }
    }

    pub fn concat(builders: impl IntoIterator<Item = TextBuilder>) -> Self {
        Self {
            inner: Builder::concat(builders.into_iter().map(|b| b.inner)),
        }
    }

    /// Encoded length in bytes, not characters.
    pub fn byte_size(&self) -> usize {
        self.inner.byte_size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Borrow the underlying byte builder.
    pub fn as_bytes_builder(&self) -> &Builder<Bytes> {
        &self.inner
    }

    /// Reinterpret as a byte builder without copying or walking the tree.
    pub fn into_bytes_builder(self) -> Builder<Bytes> {
        self.inner
    }

    /// Materialize into one `String`.
    pub fn to_text(&self) -> String {
        match String::from_utf8(self.inner.to_vec()) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

impl fmt::Display for TextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.inner.chunks() {
            f.write_str(std::str::from_utf8(chunk).map_err(|_| fmt::Error)?)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuilder")
            .field("leaves", &self.inner.leaf_count())
            .field("bytes", &self.inner.checked_byte_size().ok())
            .finish()
    }
}

impl From<String> for TextBuilder {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl From<&str> for TextBuilder {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl FromIterator<TextBuilder> for TextBuilder {
    fn from_iter<I: IntoIterator<Item = TextBuilder>>(iter: I) -> Self {
        Self::concat(iter)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn builds_text_in_order() {
        let t = TextBuilder::from_string("b")
            .prepend_string("a")
            .append_string("c")
            .append_builder(TextBuilder::from("d"))
            .prepend_builder(TextBuilder::from(String::from(">")));
        assert_eq!(t.to_text(), ">abcd");
        assert_eq!(t.to_string(), ">abcd");
    }

    #[test]
    fn byte_size_counts_encoded_bytes() {
        let t = TextBuilder::from_string("\u{1f600}").append_string("\u{e9}");
        assert_eq!(t.byte_size(), 6);
        assert_eq!(t.to_text().chars().count(), 2);
    }

    #[test]
    fn converts_to_byte_builder_without_copy() {
        let t = TextBuilder::from_string("abc").append_string("def");
        let root = Arc::as_ptr(&t.inner.node);
        let b = Builder::from_text_builder(t);
        assert_eq!(Arc::as_ptr(&b.node), root);
        assert_eq!(b.to_bytes(), "abcdef");
    }

    #[test]
    fn into_and_from_agree() {
        let t = TextBuilder::concat(vec![
            TextBuilder::from("x"),
            TextBuilder::empty(),
            TextBuilder::from("y"),
        ]);
        let via_from: Builder = t.clone().into();
        assert_eq!(via_from.to_bytes(), t.into_bytes_builder().to_bytes());
    }

    #[test]
    fn empty_text() {
        let t: TextBuilder = Vec::<TextBuilder>::new().into_iter().collect();
        assert!(t.is_empty());
        assert_eq!(t.to_text(), "");
        assert_eq!(t.byte_size(), 0);
    }

    #[test]
    fn as_bytes_builder_borrows() {
        let t = TextBuilder::from_string("hi");
        assert_eq!(t.as_bytes_builder().byte_size(), 2);
        assert_eq!(format!("{t:?}"), "TextBuilder { leaves: 1, bytes: Some(2) }");
    }
}
