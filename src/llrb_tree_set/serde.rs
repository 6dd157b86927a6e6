use core::fmt;
use core::marker::PhantomData;

use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use ::serde::ser::{Serialize, SerializeSeq, Serializer};

use super::LLRBTreeSet;

impl<T: Serialize> Serialize for LLRBTreeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

struct LLRBTreeSetVisitor<T> {
    marker: PhantomData<fn() -> LLRBTreeSet<T>>,
}

impl<'de, T> Visitor<'de> for LLRBTreeSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = LLRBTreeSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = LLRBTreeSet::new();
        while let Some(element) = seq.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for LLRBTreeSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LLRBTreeSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::empty(&[], "[]")]
    #[case::sorted(&[3, 1, 2], "[1,2,3]")]
    #[case::duplicates(&[2, 2, 1], "[1,2]")]
    fn serializes_as_sorted_sequence(#[case] elements: &[i32], #[case] expected: &str) {
        let set: LLRBTreeSet<i32> = elements.iter().copied().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), expected);
    }

    #[rstest]
    fn deserialize_collapses_duplicates() {
        let set: LLRBTreeSet<i32> = serde_json::from_str("[5, 1, 5, 3]").unwrap();
        assert_eq!(set, LLRBTreeSet::from([1, 3, 5]));
        assert!(set.is_valid());
    }

    #[rstest]
    fn deserialize_rejects_a_map() {
        let result: Result<LLRBTreeSet<i32>, _> = serde_json::from_str(r#"{"a": 1}"#);
        assert!(result.is_err());
    }
}
