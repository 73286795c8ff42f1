//! Per-question answer state.
//!
//! Absence from [`Answers`] means unanswered. A recorded entry is either a
//! chosen index or the `"skipped"` sentinel, which is also how it is
//! persisted: `{"0": 2, "1": "skipped"}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SKIPPED: &str = "skipped";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Choice(usize),
    Skipped,
}

impl Answer {
    pub fn choice(self) -> Option<usize> {
        match self {
            Answer::Choice(c) => Some(c),
            Answer::Skipped => None,
        }
    }

    pub fn is_skipped(self) -> bool {
        self == Answer::Skipped
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Answer::Choice(c) => serializer.serialize_u64(*c as u64),
            Answer::Skipped => serializer.serialize_str(SKIPPED),
        }
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswerVisitor;

        impl<'de> Visitor<'de> for AnswerVisitor {
            type Value = Answer;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a choice index or \"{SKIPPED}\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Answer, E> {
                usize::try_from(v)
                    .map(Answer::Choice)
                    .map_err(|_| E::custom("choice index too large"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Answer, E> {
                usize::try_from(v)
                    .map(Answer::Choice)
                    .map_err(|_| E::custom("choice index must not be negative"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Answer, E> {
                if v == SKIPPED {
                    Ok(Answer::Skipped)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(AnswerVisitor)
    }
}

/// Answer state for a whole session, keyed by question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<usize, Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Answer> {
        self.0.get(&index).copied()
    }

    pub fn is_recorded(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    /// Record a choice unless the question already has a state.
    ///
    /// Returns `true` when the choice was stored.
    pub fn record_choice(&mut self, index: usize, choice: usize) -> bool {
        if self.0.contains_key(&index) {
            return false;
        }
        self.0.insert(index, Answer::Choice(choice));
        true
    }

    /// Mark a question skipped, replacing whatever was there.
    ///
    /// Returns the previous state.
    pub fn mark_skipped(&mut self, index: usize) -> Option<Answer> {
        self.0.insert(index, Answer::Skipped)
    }

    /// Number of questions with any recorded state.
    pub fn recorded(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Answer)> + '_ {
        self.0.iter().map(|(i, a)| (*i, *a))
    }
}

impl FromIterator<(usize, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (usize, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
