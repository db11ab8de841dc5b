//! The attribute-group data model: [`Attribute`], [`Group`], [`Message`] (§3).

use crate::error::{IppResult, UsageError};
use crate::tag::Tag;
use crate::value::{attrs_similar, Value};

/// A named, ordered, non-empty list of tagged values (§3).
///
/// Multiple values of a single attribute are modeled as a plain `Vec`, not as a separate
/// "additional value" type — the additional-value convention is purely a wire-level encoding
/// detail of the encoder/decoder (§4.3/§4.4) and has no counterpart in the in-memory model.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<(Tag, Value)>,
}

impl Attribute {
    /// A single-valued attribute.
    pub fn new(name: impl Into<String>, tag: Tag, value: Value) -> Attribute {
        Attribute {
            name: name.into(),
            values: vec![(tag, value)],
        }
    }

    /// An attribute with an explicit, possibly multi-valued, list of (tag, value) pairs.
    ///
    /// Fails with [`UsageError::EmptyValues`] if `values` is empty (§3 invariant).
    pub fn with_values(name: impl Into<String>, values: Vec<(Tag, Value)>) -> IppResult<Attribute> {
        if values.is_empty() {
            return Err(UsageError::EmptyValues.into());
        }
        Ok(Attribute {
            name: name.into(),
            values,
        })
    }

    /// A collection-valued attribute with a single `Value::Collection` value.
    pub fn collection(name: impl Into<String>, members: Vec<Attribute>) -> Attribute {
        Attribute {
            name: name.into(),
            values: vec![(Tag::BeginCollection, Value::Collection(members))],
        }
    }

    /// The similarity relation over attributes (§4.6): same name, same value count, tags equal
    /// and values similar pairwise (value order within an attribute is never permuted).
    pub fn similar(&self, other: &Attribute) -> bool {
        self.name == other.name
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|((t1, v1), (t2, v2))| t1 == t2 && v1.similar(v2))
    }
}

/// A tagged, ordered list of attributes within a message (§3).
///
/// `attrs: None` (absent) is distinguished from `attrs: Some(vec![])` (present but empty); both
/// encode identically but `Equal` tells them apart (§9).
#[derive(Clone, PartialEq, Debug)]
pub struct Group {
    pub tag: Tag,
    pub attrs: Option<Vec<Attribute>>,
}

impl Group {
    /// A group with attributes present (possibly empty).
    pub fn new(tag: Tag, attrs: Vec<Attribute>) -> Group {
        Group {
            tag,
            attrs: Some(attrs),
        }
    }

    /// A group with attributes absent (`None`), distinct from an empty, present list under `Equal`.
    pub fn absent(tag: Tag) -> Group {
        Group { tag, attrs: None }
    }

    /// The similarity relation over groups (§4.6): same tag, attribute sets similar (sorted by
    /// name, pairwise similar); absence vs. empty is not distinguished by `Similar`.
    pub fn similar(&self, other: &Group) -> bool {
        if self.tag != other.tag {
            return false;
        }
        let empty = Vec::new();
        let a = self.attrs.as_ref().unwrap_or(&empty);
        let b = other.attrs.as_ref().unwrap_or(&empty);
        attrs_similar(a, b)
    }
}

/// A complete IPP message: header fields plus an ordered sequence of attribute groups (§3).
#[derive(Clone, PartialEq, Debug)]
pub struct Message {
    pub version_major: u8,
    pub version_minor: u8,
    /// Operation code on a request, status code on a response; the codec does not distinguish.
    pub code: u16,
    pub request_id: u32,
    pub groups: Vec<Group>,
}

impl Message {
    /// Builds a request message with no groups.
    pub fn new_request(version: (u8, u8), op_code: u16, request_id: u32) -> Message {
        Message {
            version_major: version.0,
            version_minor: version.1,
            code: op_code,
            request_id,
            groups: Vec::new(),
        }
    }

    /// Builds a response message with no groups.
    pub fn new_response(version: (u8, u8), status_code: u16, request_id: u32) -> Message {
        Message::new_request(version, status_code, request_id)
    }

    /// The attributes of the first group with the given tag, if any (§6).
    pub fn group(&self, tag: Tag) -> Option<&Vec<Attribute>> {
        self.groups
            .iter()
            .find(|g| g.tag == tag)
            .and_then(|g| g.attrs.as_ref())
    }

    /// The attribute lists of every group with the given tag, in message order (§6).
    pub fn groups(&self, tag: Tag) -> impl Iterator<Item = &Vec<Attribute>> {
        self.groups
            .iter()
            .filter(move |g| g.tag == tag)
            .filter_map(|g| g.attrs.as_ref())
    }

    /// The similarity relation over messages (§4.6): header fields equal, groups similar with
    /// same-tag-disjoint groups free to permute while groups sharing a tag keep relative order.
    ///
    /// Groups are bucketed by tag (first-occurrence order preserved, mirroring
    /// [`attrs_similar`](crate::value::attrs_similar)'s attribute-name bucketing), buckets are
    /// looked up across the two messages by tag, and same-tag buckets are compared pairwise by
    /// position rather than by search -- only groups under distinct tags may permute.
    pub fn similar(&self, other: &Message) -> bool {
        if self.version_major != other.version_major
            || self.version_minor != other.version_minor
            || self.code != other.code
            || self.request_id != other.request_id
            || self.groups.len() != other.groups.len()
        {
            return false;
        }

        let a_buckets = bucket_by_tag(&self.groups);
        let b_buckets = bucket_by_tag(&other.groups);
        if a_buckets.len() != b_buckets.len() {
            return false;
        }
        for (tag, a_group) in &a_buckets {
            let Some(b_group) = b_buckets.iter().find(|(t, _)| t == tag).map(|(_, g)| g) else {
                return false;
            };
            if a_group.len() != b_group.len() {
                return false;
            }
            if !a_group.iter().zip(b_group.iter()).all(|(g, h)| g.similar(h)) {
                return false;
            }
        }
        true
    }
}

/// Groups `groups` into per-tag runs, in first-occurrence tag order, each run keeping the
/// groups' relative order within that tag.
fn bucket_by_tag(groups: &[Group]) -> Vec<(Tag, Vec<&Group>)> {
    let mut buckets: Vec<(Tag, Vec<&Group>)> = Vec::new();
    for g in groups {
        match buckets.iter_mut().find(|(t, _)| *t == g.tag) {
            Some((_, bucket)) => bucket.push(g),
            None => buckets.push((g.tag, vec![g])),
        }
    }
    buckets
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn group_absent_vs_empty_not_equal() {
        let a = Group::absent(Tag::PrinterGroup);
        let b = Group::new(Tag::PrinterGroup, Vec::new());
        assert_ne!(a, b);
        assert!(a.similar(&b));
    }

    #[test]
    fn attribute_with_values_rejects_empty() {
        assert!(Attribute::with_values("foo", Vec::new()).is_err());
    }

    #[test]
    fn message_similar_permutes_disjoint_groups() {
        let mut m1 = Message::new_request((1, 1), 0x0002, 1);
        m1.groups.push(Group::new(Tag::OperationGroup, Vec::new()));
        m1.groups.push(Group::new(Tag::JobGroup, Vec::new()));

        let mut m2 = Message::new_request((1, 1), 0x0002, 1);
        m2.groups.push(Group::new(Tag::JobGroup, Vec::new()));
        m2.groups.push(Group::new(Tag::OperationGroup, Vec::new()));

        assert_ne!(m1, m2);
        assert!(m1.similar(&m2));
    }

    #[test]
    fn attribute_similar_sorts_by_name() {
        let a1 = Attribute::new("b", Tag::Integer, Value::Integer(1));
        let a2 = Attribute::new("a", Tag::Integer, Value::Integer(2));
        let g1 = Group::new(Tag::OperationGroup, vec![a1.clone(), a2.clone()]);
        let g2 = Group::new(Tag::OperationGroup, vec![a2, a1]);
        assert!(g1.similar(&g2));
    }
}
