use fitness_core::model::{
    Equipment, EquipmentId, IntensityLevel, IntensityLevelId, MuscleGroup, MuscleGroupId,
    NewEquipment, NewIntensityLevel, NewMuscleGroup,
};

use super::SqliteRepository;
use super::mapping::{
    collect_rows, db_err, expect_row, id_to_i64, inserted_id, map_equipment_row,
    map_intensity_level_row, map_muscle_group_row,
};
use crate::repository::{CatalogRepository, StorageError};

#[async_trait::async_trait]
impl CatalogRepository for SqliteRepository {
    async fn insert_muscle_group(
        &self,
        group: NewMuscleGroup,
    ) -> Result<MuscleGroup, StorageError> {
        let res = sqlx::query("INSERT INTO muscle_groups (name, description) VALUES (?1, ?2)")
            .bind(group.name())
            .bind(group.description())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(group.assign_id(MuscleGroupId::new(inserted_id(&res)?)))
    }

    async fn get_muscle_group(
        &self,
        id: MuscleGroupId,
    ) -> Result<Option<MuscleGroup>, StorageError> {
        let row = sqlx::query("SELECT id, name, description FROM muscle_groups WHERE id = ?1")
            .bind(id_to_i64("muscle_group_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_muscle_group_row).transpose()
    }

    async fn list_muscle_groups(&self, limit: u32) -> Result<Vec<MuscleGroup>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, name, description FROM muscle_groups ORDER BY id ASC LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_muscle_group_row)
    }

    async fn update_muscle_group(&self, group: &MuscleGroup) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE muscle_groups SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(id_to_i64("muscle_group_id", group.id().value())?)
            .bind(group.name())
            .bind(group.description())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_muscle_group(&self, id: MuscleGroupId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM muscle_groups WHERE id = ?1")
            .bind(id_to_i64("muscle_group_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }

    async fn insert_equipment(&self, equipment: NewEquipment) -> Result<Equipment, StorageError> {
        let res = sqlx::query("INSERT INTO equipment (name, description) VALUES (?1, ?2)")
            .bind(equipment.name())
            .bind(equipment.description())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(equipment.assign_id(EquipmentId::new(inserted_id(&res)?)))
    }

    async fn get_equipment(&self, id: EquipmentId) -> Result<Option<Equipment>, StorageError> {
        let row = sqlx::query("SELECT id, name, description FROM equipment WHERE id = ?1")
            .bind(id_to_i64("equipment_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_equipment_row).transpose()
    }

    async fn list_equipment(&self, limit: u32) -> Result<Vec<Equipment>, StorageError> {
        let rows =
            sqlx::query("SELECT id, name, description FROM equipment ORDER BY id ASC LIMIT ?1")
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;

        collect_rows(rows, map_equipment_row)
    }

    async fn update_equipment(&self, equipment: &Equipment) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE equipment SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(id_to_i64("equipment_id", equipment.id().value())?)
            .bind(equipment.name())
            .bind(equipment.description())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_equipment(&self, id: EquipmentId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM equipment WHERE id = ?1")
            .bind(id_to_i64("equipment_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }

    async fn insert_intensity_level(
        &self,
        level: NewIntensityLevel,
    ) -> Result<IntensityLevel, StorageError> {
        let res = sqlx::query("INSERT INTO intensity_levels (name, level) VALUES (?1, ?2)")
            .bind(level.name())
            .bind(i64::from(level.level()))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(level.assign_id(IntensityLevelId::new(inserted_id(&res)?)))
    }

    async fn get_intensity_level(
        &self,
        id: IntensityLevelId,
    ) -> Result<Option<IntensityLevel>, StorageError> {
        let row = sqlx::query("SELECT id, name, level FROM intensity_levels WHERE id = ?1")
            .bind(id_to_i64("intensity_level_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_intensity_level_row).transpose()
    }

    async fn list_intensity_levels(
        &self,
        limit: u32,
    ) -> Result<Vec<IntensityLevel>, StorageError> {
        // Ordered by level so clients can render a scale directly.
        let rows = sqlx::query(
            "SELECT id, name, level FROM intensity_levels ORDER BY level ASC, id ASC LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_intensity_level_row)
    }

    async fn update_intensity_level(&self, level: &IntensityLevel) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE intensity_levels SET name = ?2, level = ?3 WHERE id = ?1")
            .bind(id_to_i64("intensity_level_id", level.id().value())?)
            .bind(level.name())
            .bind(i64::from(level.level()))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_intensity_level(&self, id: IntensityLevelId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM intensity_levels WHERE id = ?1")
            .bind(id_to_i64("intensity_level_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }
}
