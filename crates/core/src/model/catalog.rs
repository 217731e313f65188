//! Reference data that workouts can be tagged with: muscle groups, equipment
//! and intensity levels.

use thiserror::Error;

use crate::model::ids::{EquipmentId, IntensityLevelId, MuscleGroupId};
use crate::model::text;

/// Lowest accepted intensity level.
pub const MIN_INTENSITY: u8 = 1;
/// Highest accepted intensity level.
pub const MAX_INTENSITY: u8 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("intensity level must be between 1 and 10, got {0}")]
    InvalidLevel(u8),
}

//
// ─── MUSCLE GROUP ──────────────────────────────────────────────────────────────
//

/// Validated input for a muscle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMuscleGroup {
    name: String,
    description: Option<String>,
}

impl NewMuscleGroup {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` for a blank name.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, CatalogError> {
        Ok(Self {
            name: text::required(name).ok_or(CatalogError::EmptyName)?,
            description: text::optional(description),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn assign_id(self, id: MuscleGroupId) -> MuscleGroup {
        MuscleGroup {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    id: MuscleGroupId,
    name: String,
    description: Option<String>,
}

impl MuscleGroup {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` if the stored name is blank.
    pub fn from_persisted(
        id: MuscleGroupId,
        name: String,
        description: Option<String>,
    ) -> Result<Self, CatalogError> {
        Ok(NewMuscleGroup::new(name, description)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> MuscleGroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ─── EQUIPMENT ─────────────────────────────────────────────────────────────────
//

/// Validated input for a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    name: String,
    description: Option<String>,
}

impl NewEquipment {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` for a blank name.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, CatalogError> {
        Ok(Self {
            name: text::required(name).ok_or(CatalogError::EmptyName)?,
            description: text::optional(description),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn assign_id(self, id: EquipmentId) -> Equipment {
        Equipment {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    id: EquipmentId,
    name: String,
    description: Option<String>,
}

impl Equipment {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` if the stored name is blank.
    pub fn from_persisted(
        id: EquipmentId,
        name: String,
        description: Option<String>,
    ) -> Result<Self, CatalogError> {
        Ok(NewEquipment::new(name, description)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> EquipmentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ─── INTENSITY LEVEL ───────────────────────────────────────────────────────────
//

/// Validated input for an intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIntensityLevel {
    name: String,
    level: u8,
}

impl NewIntensityLevel {
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` for a blank name, or
    /// `CatalogError::InvalidLevel` when `level` is outside 1..=10.
    pub fn new(name: impl Into<String>, level: u8) -> Result<Self, CatalogError> {
        let name = text::required(name).ok_or(CatalogError::EmptyName)?;
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&level) {
            return Err(CatalogError::InvalidLevel(level));
        }
        Ok(Self { name, level })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn assign_id(self, id: IntensityLevelId) -> IntensityLevel {
        IntensityLevel {
            id,
            name: self.name,
            level: self.level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityLevel {
    id: IntensityLevelId,
    name: String,
    level: u8,
}

impl IntensityLevel {
    /// # Errors
    ///
    /// Returns `CatalogError` if the stored values no longer validate.
    pub fn from_persisted(
        id: IntensityLevelId,
        name: String,
        level: u8,
    ) -> Result<Self, CatalogError> {
        Ok(NewIntensityLevel::new(name, level)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> IntensityLevelId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muscle_group_trims_and_drops_blank_description() {
        let group = NewMuscleGroup::new(" Chest ", Some("  ".into()))
            .unwrap()
            .assign_id(MuscleGroupId::new(1));
        assert_eq!(group.name(), "Chest");
        assert_eq!(group.description(), None);
    }

    #[test]
    fn equipment_rejects_blank_name() {
        let err = NewEquipment::new("", Some("heavy".into())).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName);
    }

    #[test]
    fn intensity_bounds_are_inclusive() {
        assert!(NewIntensityLevel::new("Easy", MIN_INTENSITY).is_ok());
        assert!(NewIntensityLevel::new("Max", MAX_INTENSITY).is_ok());
        assert_eq!(
            NewIntensityLevel::new("Rest", 0).unwrap_err(),
            CatalogError::InvalidLevel(0)
        );
        assert_eq!(
            NewIntensityLevel::new("Beyond", 11).unwrap_err(),
            CatalogError::InvalidLevel(11)
        );
    }

    #[test]
    fn intensity_from_persisted_validates_level() {
        let err = IntensityLevel::from_persisted(IntensityLevelId::new(1), "Odd".into(), 42)
            .unwrap_err();
        assert_eq!(err, CatalogError::InvalidLevel(42));
    }
}
