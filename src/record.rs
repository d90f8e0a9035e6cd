use indexmap::IndexMap;

/// A single sequencing read. `seq` and `qual` always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub seq: String,
    pub qual: String,
}

/// Reads keyed by identifier, in file order.
pub type RecordSet = IndexMap<String, Record>;

impl Record {
    pub fn new(id: impl Into<String>, seq: impl Into<String>, qual: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seq: seq.into(),
            qual: qual.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}
