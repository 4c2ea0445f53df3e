//! Persistence collaborator contract for cabinet geometry.
//!
//! The concrete transport (REST, database, test double) lives outside this
//! crate; the layout engine only needs "persist these fields, give me the
//! updated cabinet back".

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::layout::Cabinet;

/// Partial cabinet geometry update. Only the provided fields are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl GeometryPatch {
    /// Patch carrying the complete geometry of a cabinet.
    pub fn full(cabinet: &Cabinet) -> Self {
        Self {
            pos_x: Some(cabinet.pos_x),
            pos_y: Some(cabinet.pos_y),
            width: Some(cabinet.width),
            height: Some(cabinet.height),
            rotation: Some(cabinet.rotation),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pos_x.is_none()
            && self.pos_y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
    }

    /// Applies the provided fields on top of an existing cabinet. Useful
    /// for in-memory store implementations.
    pub fn applied_to(&self, cabinet: &Cabinet) -> Cabinet {
        Cabinet {
            pos_x: self.pos_x.unwrap_or(cabinet.pos_x),
            pos_y: self.pos_y.unwrap_or(cabinet.pos_y),
            width: self.width.unwrap_or(cabinet.width),
            height: self.height.unwrap_or(cabinet.height),
            rotation: self.rotation.unwrap_or(cabinet.rotation),
            ..*cabinet
        }
        .sanitized()
    }
}

/// External collaborator that persists cabinet geometry.
pub trait CabinetStore {
    /// Persists the provided fields for `cabinet_id` and returns the full
    /// updated cabinet.
    fn update_geometry(&self, cabinet_id: u64, patch: &GeometryPatch) -> Result<Cabinet>;
}
