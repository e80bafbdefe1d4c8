use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for node IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for graph nodes.
/// Internally a `Spur` index: 4 bytes, Copy, O(1) Eq and Hash.
///
/// `Ord` follows interning order, not string order. It exists so ids can key
/// `petgraph::graphmap` structures; use [`NodeId::seq_number`] for display
/// ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// The id handed out by the editor's node sequence (`"1"`, `"2"`, ...).
    pub fn from_seq(seq: u64) -> Self {
        Self::intern(&seq.to_string())
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// First run of ASCII digits in the id, parsed as an integer.
    ///
    /// `"12"` → 12, `"T7"` → 7, `"a3b45"` → 3, `"root"` → None.
    pub fn seq_number(&self) -> Option<u64> {
        let s = self.as_str();
        let start = s.find(|c: char| c.is_ascii_digit())?;
        let digits = &s[start..];
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse().ok()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Storage backends hand ids back either as strings or as bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => NodeId::intern(&s),
            RawId::Int(n) => NodeId::intern(&n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("17");
        let b = NodeId::from_seq(17);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "17");
    }

    #[test]
    fn seq_number_takes_first_digit_run() {
        assert_eq!(NodeId::intern("12").seq_number(), Some(12));
        assert_eq!(NodeId::intern("T7").seq_number(), Some(7));
        assert_eq!(NodeId::intern("a3b45").seq_number(), Some(3));
        assert_eq!(NodeId::intern("depot").seq_number(), None);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let ids: Vec<NodeId> = serde_json::from_str(r#"["4", 5]"#).unwrap();
        assert_eq!(ids, vec![NodeId::intern("4"), NodeId::intern("5")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["4","5"]"#);
    }
}
