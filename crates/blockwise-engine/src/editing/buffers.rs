use crate::editing::Document;
use crate::models::SourceFile;

/// An open document plus the file identity it was loaded from.
pub struct Buffer {
    pub file: SourceFile,
    pub doc: Document,
}

impl Buffer {
    pub fn name(&self) -> &str {
        self.file.display_name()
    }
}

/// Registry of open buffers, in opening order.
///
/// Names come from the file identity; opening the same path again replaces
/// the existing entry rather than duplicating it.
#[derive(Default)]
pub struct BufferSet {
    buffers: Vec<Buffer>,
}

impl BufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or re-opens) a document under the given file identity.
    pub fn open(&mut self, file: SourceFile, doc: Document) {
        if let Some(existing) = self
            .buffers
            .iter_mut()
            .find(|b| b.file.relative_path() == file.relative_path())
        {
            existing.doc = doc;
        } else {
            self.buffers.push(Buffer { file, doc });
        }
    }

    pub fn get(&self, name: &str) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Buffer> {
        self.buffers.iter_mut().find(|b| b.name() == name)
    }

    /// Closes the named buffer; returns whether anything was removed.
    pub fn close(&mut self, name: &str) -> bool {
        let before = self.buffers.len();
        self.buffers.retain(|b| b.name() != name);
        self.buffers.len() != before
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Buffer names in opening order.
    pub fn names(&self) -> Vec<&str> {
        self.buffers.iter().map(|b| b.name()).collect()
    }

    /// Names of buffers whose file carries the given extension.
    pub fn names_with_extension(&self, ext: &str) -> Vec<&str> {
        self.buffers
            .iter()
            .filter(|b| b.file.extension() == Some(ext))
            .map(|b| b.name())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::from_bytes(text.as_bytes()).unwrap()
    }

    #[test]
    fn open_and_list_in_order() {
        let mut set = BufferSet::new();
        set.open(SourceFile::from_relative_str("a/first.magik"), doc("a"));
        set.open(SourceFile::from_relative_str("second.magik"), doc("b"));
        assert_eq!(set.names(), vec!["first", "second"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn reopening_replaces_content() {
        let mut set = BufferSet::new();
        set.open(SourceFile::from_relative_str("x.magik"), doc("old"));
        set.open(SourceFile::from_relative_str("x.magik"), doc("new"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("x").unwrap().doc.text(), "new");
    }

    #[test]
    fn filter_by_extension() {
        let mut set = BufferSet::new();
        set.open(SourceFile::from_relative_str("mod.magik"), doc(""));
        set.open(SourceFile::from_relative_str("notes.txt"), doc(""));
        assert_eq!(set.names_with_extension("magik"), vec!["mod"]);
    }

    #[test]
    fn close_removes_by_name() {
        let mut set = BufferSet::new();
        set.open(SourceFile::from_relative_str("gone.magik"), doc(""));
        assert!(set.close("gone"));
        assert!(!set.close("gone"));
        assert!(set.is_empty());
    }
}
