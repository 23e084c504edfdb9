// Level description supplied by the map collaborator, plus property parsing.

use super::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A tile grid plus named, typed objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescription {
    pub id: String,
    pub tile_width: f64,
    pub tile_height: f64,
    /// Grid size in cells; derived from `tiles` when absent.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// One string per row; `#` marks a solid tile.
    pub tiles: Vec<String>,
    #[serde(default)]
    pub objects: Vec<LevelObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelObject {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl LevelObject {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn prop(&self, key: &'static str) -> Result<&str, LevelError> {
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| LevelError::MissingProperty {
                object: self.name.clone(),
                key,
            })
    }

    /// Finite numbers only; NaN and infinities cannot be persisted as JSON.
    pub fn prop_f64(&self, key: &'static str) -> Result<f64, LevelError> {
        let raw = self.prop(key)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.bad_value(key, raw))
    }

    pub fn prop_i64(&self, key: &'static str) -> Result<i64, LevelError> {
        let raw = self.prop(key)?;
        raw.trim().parse().map_err(|_| self.bad_value(key, raw))
    }

    pub fn prop_i64_or(&self, key: &'static str, default: i64) -> Result<i64, LevelError> {
        match self.properties.get(key) {
            Some(_) => self.prop_i64(key),
            None => Ok(default),
        }
    }

    pub fn prop_bool_or(&self, key: &'static str, default: bool) -> Result<bool, LevelError> {
        match self.properties.get(key) {
            Some(raw) => raw.trim().parse().map_err(|_| self.bad_value(key, raw)),
            None => Ok(default),
        }
    }

    fn bad_value(&self, key: &'static str, raw: &str) -> LevelError {
        LevelError::InvalidProperty {
            object: self.name.clone(),
            key,
            value: raw.to_string(),
        }
    }
}

impl LevelDescription {
    /// Width and height of the grid in world units.
    pub fn bounds(&self) -> (f64, f64) {
        let columns = match self.width {
            Some(w) => w as usize,
            None => self.tiles.iter().map(|row| row.chars().count()).max().unwrap_or(0),
        };
        let rows = self.height.map_or(self.tiles.len(), |h| h as usize);
        (
            columns as f64 * self.tile_width,
            rows as f64 * self.tile_height,
        )
    }

    /// Origins of solid cells, row by row.
    pub fn solid_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.tiles.iter().enumerate().flat_map(move |(row, line)| {
            line.chars().enumerate().filter_map(move |(col, cell)| {
                (cell == '#').then(|| {
                    Point::new(col as f64 * self.tile_width, row as f64 * self.tile_height)
                })
            })
        })
    }

    pub fn object_named(&self, name: &str) -> Option<&LevelObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn objects_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a LevelObject> + 'a {
        self.objects.iter().filter(move |o| o.kind == kind)
    }
}

/// Integrity problems that abort engine construction.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level has no player spawn")]
    NoPlayerSpawn,
    #[error("object {object:?} is missing property {key:?}")]
    MissingProperty { object: String, key: &'static str },
    #[error("object {object:?} has unparsable {key:?} = {value:?}")]
    InvalidProperty {
        object: String,
        key: &'static str,
        value: String,
    },
    #[error("object {object:?} references unknown {what} {target:?}")]
    DanglingReference {
        object: String,
        what: &'static str,
        target: String,
    },
    #[error("duplicate item name {0:?}")]
    DuplicateItem(String),
    #[error("more than one {0} in level")]
    DuplicateBoss(&'static str),
    #[error("object {object:?} has unknown type {kind:?}")]
    UnknownObjectType { object: String, kind: String },
    #[error("unknown dialog {dialog:?} for npc {object:?}")]
    UnknownDialog { object: String, dialog: String },
}
