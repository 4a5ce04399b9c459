//! Verbatim retention of unrecognized XML sub-trees.
//!
//! Child elements the typed model does not bind are not discarded: the
//! whole sub-tree, including any namespace declarations local to it, is
//! kept as an opaque byte blob and written back unchanged on encode.

/// An opaque, verbatim XML sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawXml {
    bytes: Vec<u8>,
}

impl RawXml {
    /// Wrap captured bytes.
    #[inline]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The captured bytes, exactly as they appeared in the input.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The captured bytes as UTF-8 text, for diagnostics.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Length of the captured sub-tree in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether anything was captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for RawXml {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_bytes() {
        let raw = RawXml::from(r#"<a:graphicFrameLocks noGrp="1"/>"#);
        assert_eq!(raw.as_str(), Some(r#"<a:graphicFrameLocks noGrp="1"/>"#));
        assert_eq!(raw.len(), raw.as_bytes().len());
        assert!(!raw.is_empty());
    }
}
