//! Graph statement model
//!
//! Resource identifiers, typed literals and subject–predicate–object
//! statements. Statement sets are ordered so that equality, deduplication and
//! iteration order are all structural.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

// ============================================================
// Identifiers
// ============================================================

/// Resource identifier (shared string, cheap to clone)
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{self}/{role}`
    pub fn join(&self, role: &str) -> Self {
        Self::new(format!("{}/{}", self.0, role))
    }

    /// True when `self` equals `prefix` or lies below it (`prefix/...`)
    pub fn is_within(&self, prefix: &Iri) -> bool {
        let this = self.as_str();
        let prefix = prefix.as_str();
        this == prefix
            || (this.len() > prefix.len()
                && this.starts_with(prefix)
                && this.as_bytes()[prefix.len()] == b'/')
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Iri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Iri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Iri::new(s))
    }
}

// ============================================================
// Literals
// ============================================================

/// Float stored by bit pattern so literals stay `Eq + Ord + Hash`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FloatValue(u64);

impl FloatValue {
    pub fn new(value: f64) -> Self {
        Self(value.to_bits())
    }

    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl fmt::Debug for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Typed literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(FloatValue),
    Boolean(bool),
}

impl Literal {
    pub fn float(value: f64) -> Self {
        Self::Float(FloatValue::new(value))
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(v) => write!(f, "{:?}", v.get()),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

// ============================================================
// Statements
// ============================================================

/// Statement object: another resource or a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Object {
    Resource(Iri),
    Literal(Literal),
}

impl Object {
    pub fn as_resource(&self) -> Option<&Iri> {
        match self {
            Object::Resource(iri) => Some(iri),
            Object::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(lit) => Some(lit),
            Object::Resource(_) => None,
        }
    }
}

/// One (subject, predicate, object) statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Object,
}

impl Triple {
    pub fn new(subject: Iri, predicate: Iri, object: Object) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Object::Resource(iri) => {
                write!(f, "<{}> <{}> <{}> .", self.subject, self.predicate, iri)
            }
            Object::Literal(lit) => write!(f, "<{}> <{}> {} .", self.subject, self.predicate, lit),
        }
    }
}

/// Deduplicated, ordered statement set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripleSet(BTreeSet<Triple>);

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, triple: Triple) -> bool {
        self.0.insert(triple)
    }

    pub fn add_resource(&mut self, subject: &Iri, predicate: Iri, object: &Iri) {
        self.0.insert(Triple::new(
            subject.clone(),
            predicate,
            Object::Resource(object.clone()),
        ));
    }

    pub fn add_literal(&mut self, subject: &Iri, predicate: Iri, value: impl Into<Literal>) {
        self.0.insert(Triple::new(
            subject.clone(),
            predicate,
            Object::Literal(value.into()),
        ));
    }

    /// Union with another set
    pub fn merge(&mut self, other: TripleSet) {
        if self.0.is_empty() {
            self.0 = other.0;
        } else {
            self.0.extend(other.0);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.0.contains(triple)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.0.iter()
    }

    /// Distinct subjects, in order
    pub fn subjects(&self) -> BTreeSet<&Iri> {
        self.0.iter().map(|t| &t.subject).collect()
    }

    /// Objects of `(subject, predicate, ?)`
    pub fn objects<'a>(
        &'a self,
        subject: &'a Iri,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.0
            .iter()
            .filter(move |t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Statements whose predicate is `predicate`
    pub fn with_predicate<'a>(&'a self, predicate: &'a Iri) -> impl Iterator<Item = &'a Triple> + 'a {
        self.0.iter().filter(move |t| &t.predicate == predicate)
    }
}

impl IntoIterator for TripleSet {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Triple> for TripleSet {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Triple> for TripleSet {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
