use std::sync::Arc;

use fitness_core::model::{
    Equipment, EquipmentId, IntensityLevel, IntensityLevelId, MuscleGroup, MuscleGroupId,
    NewEquipment, NewIntensityLevel, NewMuscleGroup,
};
use serde::Deserialize;
use storage::repository::CatalogRepository;
use tracing::info;

use crate::error::{CatalogServiceError, or_not_found};

/// Patch for muscle groups and equipment, which share the same shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntensityLevelPatch {
    pub name: Option<String>,
    pub level: Option<u8>,
}

fn merge_description(patch: Option<String>, current: Option<&str>) -> Option<String> {
    match patch {
        Some(description) => Some(description),
        None => current.map(str::to_owned),
    }
}

/// Manages the shared lookup tables workouts can be tagged with.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    //
    // ─── MUSCLE GROUPS ─────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Catalog` for validation failures.
    pub async fn create_muscle_group(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<MuscleGroup, CatalogServiceError> {
        let group = self
            .catalog
            .insert_muscle_group(NewMuscleGroup::new(name, description)?)
            .await?;
        info!(muscle_group_id = %group.id(), "created muscle group");
        Ok(group)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::MuscleGroupNotFound` if it does not exist.
    pub async fn get_muscle_group(
        &self,
        id: MuscleGroupId,
    ) -> Result<MuscleGroup, CatalogServiceError> {
        self.catalog
            .get_muscle_group(id)
            .await?
            .ok_or(CatalogServiceError::MuscleGroupNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_muscle_groups(
        &self,
        limit: u32,
    ) -> Result<Vec<MuscleGroup>, CatalogServiceError> {
        Ok(self.catalog.list_muscle_groups(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::MuscleGroupNotFound` if it does not exist.
    /// Returns `CatalogServiceError::Catalog` if the patched values do not validate.
    pub async fn update_muscle_group(
        &self,
        id: MuscleGroupId,
        patch: CatalogEntryPatch,
    ) -> Result<MuscleGroup, CatalogServiceError> {
        let current = self.get_muscle_group(id).await?;
        let name = patch.name.unwrap_or_else(|| current.name().to_owned());
        let description = merge_description(patch.description, current.description());

        let updated = NewMuscleGroup::new(name, description)?.assign_id(id);
        self.catalog
            .update_muscle_group(&updated)
            .await
            .map_err(or_not_found(CatalogServiceError::MuscleGroupNotFound(id)))?;
        Ok(updated)
    }

    /// Delete a muscle group. Workouts tagged with it keep existing untagged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::MuscleGroupNotFound` if it does not exist.
    pub async fn delete_muscle_group(&self, id: MuscleGroupId) -> Result<(), CatalogServiceError> {
        self.catalog
            .delete_muscle_group(id)
            .await
            .map_err(or_not_found(CatalogServiceError::MuscleGroupNotFound(id)))
    }

    //
    // ─── EQUIPMENT ─────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Catalog` for validation failures.
    pub async fn create_equipment(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Equipment, CatalogServiceError> {
        let equipment = self
            .catalog
            .insert_equipment(NewEquipment::new(name, description)?)
            .await?;
        info!(equipment_id = %equipment.id(), "created equipment");
        Ok(equipment)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::EquipmentNotFound` if it does not exist.
    pub async fn get_equipment(&self, id: EquipmentId) -> Result<Equipment, CatalogServiceError> {
        self.catalog
            .get_equipment(id)
            .await?
            .ok_or(CatalogServiceError::EquipmentNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_equipment(&self, limit: u32) -> Result<Vec<Equipment>, CatalogServiceError> {
        Ok(self.catalog.list_equipment(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::EquipmentNotFound` if it does not exist.
    /// Returns `CatalogServiceError::Catalog` if the patched values do not validate.
    pub async fn update_equipment(
        &self,
        id: EquipmentId,
        patch: CatalogEntryPatch,
    ) -> Result<Equipment, CatalogServiceError> {
        let current = self.get_equipment(id).await?;
        let name = patch.name.unwrap_or_else(|| current.name().to_owned());
        let description = merge_description(patch.description, current.description());

        let updated = NewEquipment::new(name, description)?.assign_id(id);
        self.catalog
            .update_equipment(&updated)
            .await
            .map_err(or_not_found(CatalogServiceError::EquipmentNotFound(id)))?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::EquipmentNotFound` if it does not exist.
    pub async fn delete_equipment(&self, id: EquipmentId) -> Result<(), CatalogServiceError> {
        self.catalog
            .delete_equipment(id)
            .await
            .map_err(or_not_found(CatalogServiceError::EquipmentNotFound(id)))
    }

    //
    // ─── INTENSITY LEVELS ──────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Catalog` if the level is outside 1..=10.
    pub async fn create_intensity_level(
        &self,
        name: String,
        level: u8,
    ) -> Result<IntensityLevel, CatalogServiceError> {
        let level = self
            .catalog
            .insert_intensity_level(NewIntensityLevel::new(name, level)?)
            .await?;
        info!(intensity_level_id = %level.id(), level = level.level(), "created intensity level");
        Ok(level)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::IntensityLevelNotFound` if it does not exist.
    pub async fn get_intensity_level(
        &self,
        id: IntensityLevelId,
    ) -> Result<IntensityLevel, CatalogServiceError> {
        self.catalog
            .get_intensity_level(id)
            .await?
            .ok_or(CatalogServiceError::IntensityLevelNotFound(id))
    }

    /// Intensity levels ordered by level.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if repository access fails.
    pub async fn list_intensity_levels(
        &self,
        limit: u32,
    ) -> Result<Vec<IntensityLevel>, CatalogServiceError> {
        Ok(self.catalog.list_intensity_levels(limit).await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::IntensityLevelNotFound` if it does not exist.
    /// Returns `CatalogServiceError::Catalog` if the patched values do not validate.
    pub async fn update_intensity_level(
        &self,
        id: IntensityLevelId,
        patch: IntensityLevelPatch,
    ) -> Result<IntensityLevel, CatalogServiceError> {
        let current = self.get_intensity_level(id).await?;
        let name = patch.name.unwrap_or_else(|| current.name().to_owned());
        let level = patch.level.unwrap_or(current.level());

        let updated = NewIntensityLevel::new(name, level)?.assign_id(id);
        self.catalog
            .update_intensity_level(&updated)
            .await
            .map_err(or_not_found(CatalogServiceError::IntensityLevelNotFound(id)))?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::IntensityLevelNotFound` if it does not exist.
    pub async fn delete_intensity_level(
        &self,
        id: IntensityLevelId,
    ) -> Result<(), CatalogServiceError> {
        self.catalog
            .delete_intensity_level(id)
            .await
            .map_err(or_not_found(CatalogServiceError::IntensityLevelNotFound(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::CatalogError;
    use storage::memory::InMemoryRepository;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn intensity_levels_are_bounded() {
        let service = service();
        let err = service
            .create_intensity_level("Max".into(), 11)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogServiceError::Catalog(CatalogError::InvalidLevel(11))));

        let level = service
            .create_intensity_level("Max".into(), 10)
            .await
            .unwrap();
        let err = service
            .update_intensity_level(
                level.id(),
                IntensityLevelPatch {
                    name: None,
                    level: Some(0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogServiceError::Catalog(CatalogError::InvalidLevel(0))));
    }

    #[tokio::test]
    async fn equipment_patch_renames() {
        let service = service();
        let kettlebell = service
            .create_equipment("Kettlebell".into(), Some("16kg".into()))
            .await
            .unwrap();

        let updated = service
            .update_equipment(
                kettlebell.id(),
                CatalogEntryPatch {
                    name: Some("Kettlebell (heavy)".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name(), "Kettlebell (heavy)");
        assert_eq!(updated.description(), Some("16kg"));
    }

    #[tokio::test]
    async fn missing_entries_report_their_kind() {
        let service = service();
        assert!(matches!(
            service.get_muscle_group(MuscleGroupId::new(1)).await,
            Err(CatalogServiceError::MuscleGroupNotFound(_))
        ));
        assert!(matches!(
            service.delete_equipment(EquipmentId::new(1)).await,
            Err(CatalogServiceError::EquipmentNotFound(_))
        ));
        assert!(matches!(
            service.delete_intensity_level(IntensityLevelId::new(1)).await,
            Err(CatalogServiceError::IntensityLevelNotFound(_))
        ));
    }
}
