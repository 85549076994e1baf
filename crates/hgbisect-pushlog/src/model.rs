//! Push-log data model: push identity, push records, and range boundaries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Identifies one push within a repository.
///
/// Push ids are assigned by the remote push-log service and increase
/// strictly with chronological push order, so ordering by id is ordering
/// by push time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PushId(pub u64);

impl std::fmt::Display for PushId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One push: a timestamped submission of one or more changesets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushRecord {
    /// UTC Unix timestamp of the push.
    #[serde(rename = "date")]
    pub timestamp: i64,
    /// Changesets in push order; never empty after decoding.
    pub changesets: Vec<String>,
}

impl PushRecord {
    /// The last changeset of the push: the head revision builds are made from.
    pub fn head_changeset(&self) -> &str {
        // changesets is validated non-empty when the set is decoded
        self.changesets.last().map(String::as_str).unwrap_or_default()
    }
}

/// Push records accumulated across one or more queries, keyed by push id.
///
/// Backed by a `BTreeMap` so iteration is always ascending by push id, and
/// merging overwrites records that share an id instead of duplicating them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushLogSet {
    pushes: BTreeMap<PushId, PushRecord>,
}

impl PushLogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw json-pushes response object.
    ///
    /// The endpoint keys pushes by stringified integer id; a key that does
    /// not parse, or a push without changesets, is a malformed payload.
    pub fn from_json(body: serde_json::Value) -> Result<Self, String> {
        let raw: BTreeMap<String, PushRecord> =
            serde_json::from_value(body).map_err(|err| err.to_string())?;
        let mut pushes = BTreeMap::new();
        for (key, record) in raw {
            let id = key
                .parse::<u64>()
                .map_err(|_| format!("push id {key:?} is not an integer"))?;
            if record.changesets.is_empty() {
                return Err(format!("push {id} has no changesets"));
            }
            pushes.insert(PushId(id), record);
        }
        Ok(PushLogSet { pushes })
    }

    pub fn is_empty(&self) -> bool {
        self.pushes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pushes.len()
    }

    pub fn get(&self, id: PushId) -> Option<&PushRecord> {
        self.pushes.get(&id)
    }

    pub fn insert(&mut self, id: PushId, record: PushRecord) -> Option<PushRecord> {
        self.pushes.insert(id, record)
    }

    /// Merge `other` into this set; records sharing an id are overwritten.
    pub fn merge(&mut self, other: PushLogSet) {
        self.pushes.extend(other.pushes);
    }

    /// Entry with the lowest push id.
    pub fn first(&self) -> Option<(PushId, &PushRecord)> {
        self.pushes.iter().next().map(|(id, record)| (*id, record))
    }

    /// Entry with the highest push id.
    pub fn last(&self) -> Option<(PushId, &PushRecord)> {
        self.pushes
            .iter()
            .next_back()
            .map(|(id, record)| (*id, record))
    }

    /// Push ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = PushId> + '_ {
        self.pushes.keys().copied()
    }

    /// Entries, ascending by push id.
    pub fn iter(&self) -> impl Iterator<Item = (PushId, &PushRecord)> + '_ {
        self.pushes.iter().map(|(id, record)| (*id, record))
    }

    /// Consume the set into records ordered ascending by push id.
    pub fn into_ordered(self) -> Vec<PushRecord> {
        self.pushes.into_values().collect()
    }
}

/// One endpoint of a resolution range: a calendar date or a changeset.
///
/// The kind decides which query parameters fetch it; it is settled here at
/// the API boundary instead of being re-inspected downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBoundary {
    /// A calendar date, no time component.
    Date(NaiveDate),
    /// An opaque changeset identifier.
    Changeset(String),
}

impl From<NaiveDate> for RangeBoundary {
    fn from(date: NaiveDate) -> Self {
        RangeBoundary::Date(date)
    }
}

impl From<&str> for RangeBoundary {
    fn from(changeset: &str) -> Self {
        RangeBoundary::Changeset(changeset.to_string())
    }
}

impl From<String> for RangeBoundary {
    fn from(changeset: String) -> Self {
        RangeBoundary::Changeset(changeset)
    }
}
