use std::collections::BTreeMap;

use crate::dispatch::descriptor::Relationship;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Item of data flow handed over by the host: a flat attribute set plus the scheduling
/// penalty hint.
pub struct WorkUnit {
    attributes: BTreeMap<String, String>,
    penalized: bool,
}

impl WorkUnit {
    pub fn new(attributes: BTreeMap<String, String>) -> Self {
        Self {
            attributes,
            penalized: false,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Insert or overwrite attributes; existing ones not named in `attributes` are kept.
    pub fn put_all_attributes<I, K, V>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.extend(
            attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }

    /// Ask the host to delay the next processing attempt of this unit.
    pub fn penalize(&mut self) {
        self.penalized = true;
    }

    pub fn is_penalized(&self) -> bool {
        self.penalized
    }

    pub fn into_attributes(self) -> BTreeMap<String, String> {
        self.attributes
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WorkUnit {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut unit = Self::default();
        unit.put_all_attributes(iter);
        unit
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What happened to a dispatched unit. Failure causes are not distinguished.
pub enum DispatchResult {
    Success { sid: String, price: Option<String> },
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A processed unit together with the relationship it must be transferred to.
pub struct Routed {
    pub unit: WorkUnit,
    pub relationship: Relationship,
    pub result: DispatchResult,
}

/// The host side of a processing attempt.
///
/// `get` yields zero or one unit; every unit obtained is handed back exactly once, either
/// through `transfer` or, when the attempt is aborted, through `rollback`.
pub trait ProcessSession {
    fn get(&mut self) -> Option<WorkUnit>;

    fn transfer(&mut self, unit: WorkUnit, relationship: Relationship);

    /// Abort the attempt and return the unit untouched so the host re-drives it later.
    fn rollback(&mut self, unit: WorkUnit);
}
