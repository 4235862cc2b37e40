//! Configuration object repository.
//!
//! Stores named configuration objects as JSON documents, mirroring a key/value
//! configuration store. Callers work with typed values; (de)serialization happens here.

use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};
use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::{internal::InternalError, AppError};

/// Repository providing access to named configuration objects.
pub struct ConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConfigRepository<'a> {
    /// Creates a new ConfigRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads and decodes the configuration object stored under `name`.
    ///
    /// # Returns
    /// - `Ok(Some(T))` - Object found and decoded
    /// - `Ok(None)` - Nothing stored under that name
    /// - `Err(AppError::InternalErr(ConfigDecode))` - Stored document has an unexpected shape
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, AppError> {
        let Some(entity) = entity::prelude::Config::find_by_id(name.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let value = serde_json::from_value(entity.data).map_err(|source| {
            InternalError::ConfigDecode {
                name: name.to_string(),
                source,
            }
        })?;

        Ok(Some(value))
    }

    /// Checks whether an object is stored under `name`.
    pub async fn exists(&self, name: &str) -> Result<bool, AppError> {
        let entity = entity::prelude::Config::find_by_id(name.to_string())
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Stores `value` under `name`, replacing any previous object.
    ///
    /// # Returns
    /// - `Ok(())` - Object stored
    /// - `Err(AppError::InternalErr(ConfigEncode))` - Value could not be serialized
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn set<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let data = serde_json::to_value(value).map_err(|source| InternalError::ConfigEncode {
            name: name.to_string(),
            source,
        })?;

        entity::prelude::Config::insert(entity::config::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            data: ActiveValue::Set(data),
        })
        .on_conflict(
            OnConflict::column(entity::config::Column::Name)
                .update_column(entity::config::Column::Data)
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }
}
