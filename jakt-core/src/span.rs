use std::fmt;

/// Identifier of a source file registered with a compilation context.
///
/// Ids are handed out sequentially in registration order and stay stable
/// for the duration of a compilation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

impl FileId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the file in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A byte range inside a registered source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub file_id: FileId,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(file_id: FileId, start: usize, end: usize) -> Self {
        Self {
            file_id,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Both spans must point into the same file; the file of `self` wins.
    pub fn to(self, other: Span) -> Span {
        Span {
            file_id: self.file_id,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_ordering() {
        assert!(FileId::new(0) < FileId::new(1));
        assert_eq!(FileId::new(3).index(), 3);
        assert_eq!(FileId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(FileId::new(0), 4, 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(FileId::new(0), 4, 4).is_empty());
    }

    #[test]
    fn test_span_to_covers_both() {
        let file = FileId::new(1);
        let merged = Span::new(file, 10, 12).to(Span::new(file, 2, 5));
        assert_eq!(merged, Span::new(file, 2, 12));
    }
}
