//! Observation records and their categorical attributes.

use crate::id::EntityId;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary sex category of an entity.
///
/// Populated at ingestion time by the dataset loader from the record's
/// `sex` field; the engine never re-derives it from id prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Which measured quantity of a record becomes the observation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueField {
    /// Per-minute activity count (`act` in the source datasets).
    #[default]
    Activity,
    /// Body temperature in degrees Celsius (`temp`).
    Temperature,
}

impl ValueField {
    /// JSON field name carrying this quantity in the source datasets.
    pub fn json_field(&self) -> &'static str {
        match self {
            ValueField::Activity => "act",
            ValueField::Temperature => "temp",
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueField::Activity => write!(f, "activity"),
            ValueField::Temperature => write!(f, "temperature"),
        }
    }
}

/// One row of an ingested dataset.
///
/// For a fixed entity, `time` values are unique (one observation per entity
/// per minute); not every (entity, time) pair needs to exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Subject this observation belongs to.
    pub entity: EntityId,

    /// Absolute minute index since dataset start, >= 1.
    pub time: u32,

    /// The measured quantity (activity count or temperature).
    pub value: f64,

    /// Sex category, assigned by the loader.
    pub sex: Sex,

    /// Whether the (female) subject was in estrus at this minute,
    /// when the dataset records it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estrus: Option<bool>,
}

impl Observation {
    /// Create an observation without estrus information.
    pub fn new(entity: impl Into<EntityId>, time: u32, value: f64, sex: Sex) -> Self {
        Observation {
            entity: entity.into(),
            time,
            value,
            sex,
            estrus: None,
        }
    }
}
