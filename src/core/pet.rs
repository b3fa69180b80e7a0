//! Pet business logic - Catalog CRUD for adoptable pets.
//!
//! Availability is a stored flag rather than a computed property: the
//! adoption workflow flips it off when a request is created and back on
//! when a request is rejected, so listings never show a pet somebody has a
//! pending claim on.

use crate::{
    entities::{Pet, pet},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

fn validate_fields(name: &str, breed: &str, age: i32, image: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "pet name cannot be empty".to_string(),
        });
    }
    if breed.trim().is_empty() {
        return Err(Error::Validation {
            message: "pet breed cannot be empty".to_string(),
        });
    }
    if age < 0 {
        return Err(Error::Validation {
            message: format!("pet age cannot be negative, got {age}"),
        });
    }
    if image.trim().is_empty() {
        return Err(Error::Validation {
            message: "pet image reference cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Lists pets, optionally only those currently available for adoption,
/// ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_pets(db: &DatabaseConnection, only_available: bool) -> Result<Vec<pet::Model>> {
    let mut query = Pet::find().order_by_asc(pet::Column::Name);
    if only_available {
        query = query.filter(pet::Column::AvailableForAdoption.eq(true));
    }
    query.all(db).await.map_err(Into::into)
}

/// Retrieves a specific pet by its unique ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if the pet does not exist.
pub async fn get_pet(db: &DatabaseConnection, pet_id: i64) -> Result<pet::Model> {
    Pet::find_by_id(pet_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "pet",
            id: pet_id.to_string(),
        })
}

/// Creates a new pet listing, available for adoption from the start.
///
/// # Errors
/// Returns an error if:
/// - The name, breed, or image reference is empty or whitespace-only
/// - The age is negative
/// - The database insert operation fails
pub async fn create_pet(
    db: &DatabaseConnection,
    name: String,
    breed: String,
    age: i32,
    description: String,
    image: String,
    owner_user_id: Option<i64>,
) -> Result<pet::Model> {
    validate_fields(&name, &breed, age, &image)?;

    let now = chrono::Utc::now();
    let new_pet = pet::ActiveModel {
        name: Set(name.trim().to_string()),
        breed: Set(breed.trim().to_string()),
        age: Set(age),
        description: Set(description),
        image: Set(image),
        owner_user_id: Set(owner_user_id),
        available_for_adoption: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = new_pet.insert(db).await?;
    info!(pet_id = created.id, name = %created.name, "pet created");
    Ok(created)
}

/// Updates an existing pet's descriptive fields.
///
/// The availability flag is owned by the adoption workflow and not touched
/// here.
///
/// # Errors
/// Returns an error if validation fails, the pet does not exist, or the
/// database update operation fails.
pub async fn update_pet(
    db: &DatabaseConnection,
    pet_id: i64,
    name: String,
    breed: String,
    age: i32,
    description: String,
    image: String,
) -> Result<pet::Model> {
    validate_fields(&name, &breed, age, &image)?;

    let mut existing: pet::ActiveModel = get_pet(db, pet_id).await?.into();

    existing.name = Set(name.trim().to_string());
    existing.breed = Set(breed.trim().to_string());
    existing.age = Set(age);
    existing.description = Set(description);
    existing.image = Set(image);
    existing.updated_at = Set(chrono::Utc::now());

    existing.update(db).await.map_err(Into::into)
}

/// Deletes a pet from the catalog. Any adoption requests pointing at it are
/// removed by the cascade.
///
/// # Errors
/// Returns [`Error::NotFound`] if the pet does not exist.
pub async fn delete_pet(db: &DatabaseConnection, pet_id: i64) -> Result<()> {
    let existing = get_pet(db, pet_id).await?;
    existing.delete(db).await?;
    info!(pet_id, "pet deleted");
    Ok(())
}

/// Flips a pet's availability flag. Used by the adoption workflow inside
/// its transaction, hence the connection generic.
///
/// # Errors
/// Returns [`Error::NotFound`] if the pet does not exist.
pub async fn set_availability<C>(db: &C, pet_id: i64, available: bool) -> Result<pet::Model>
where
    C: ConnectionTrait,
{
    let mut existing: pet::ActiveModel = Pet::find_by_id(pet_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "pet",
            id: pet_id.to_string(),
        })?
        .into();

    existing.available_for_adoption = Set(available);
    existing.updated_at = Set(chrono::Utc::now());
    existing.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_pet_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_pet(
            &db,
            String::new(),
            "Beagle".to_string(),
            2,
            String::new(),
            "img".to_string(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_pet(
            &db,
            "Rex".to_string(),
            "Beagle".to_string(),
            -1,
            String::new(),
            "img".to_string(),
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_pet_defaults_to_available() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_pet(&db, "Rex").await?;
        assert!(created.available_for_adoption);
        assert_eq!(created.breed, "Beagle");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_pets_available_filter() -> Result<()> {
        let db = setup_test_db().await?;

        let rex = create_test_pet(&db, "Rex").await?;
        create_test_pet(&db, "Bella").await?;
        set_availability(&db, rex.id, false).await?;

        assert_eq!(list_pets(&db, false).await?.len(), 2);
        let available = list_pets(&db, true).await?;
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Bella");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_pet_keeps_availability() -> Result<()> {
        let db = setup_test_db().await?;
        let rex = create_test_pet(&db, "Rex").await?;
        set_availability(&db, rex.id, false).await?;

        let updated = update_pet(
            &db,
            rex.id,
            "Rexy".to_string(),
            "Beagle".to_string(),
            3,
            "Older now".to_string(),
            "/img/rex.png".to_string(),
        )
        .await?;
        assert_eq!(updated.name, "Rexy");
        assert!(!updated.available_for_adoption);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_pet() -> Result<()> {
        let db = setup_test_db().await?;
        let rex = create_test_pet(&db, "Rex").await?;

        delete_pet(&db, rex.id).await?;
        assert!(matches!(
            get_pet(&db, rex.id).await.unwrap_err(),
            Error::NotFound { entity: "pet", .. }
        ));

        let result = delete_pet(&db, rex.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
