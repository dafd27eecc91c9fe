use anyhow::Result;
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet, QueryFilter, Set};

use crate::{db, rating, ship};

/// Connect and migrate, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn new_ship(name: &str) -> ship::ActiveModel {
    let prod_date = Utc.with_ymd_and_hms(3010, 5, 5, 0, 0, 0).unwrap();
    let rating = rating::compute_rating(0.5, false, 3010).unwrap();
    ship::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        planet: Set("Vulcan".into()),
        ship_type: Set(ship::ShipType::Transport),
        prod_date: Set(prod_date),
        is_used: Set(false),
        speed: Set(0.5),
        crew_size: Set(300),
        rating: Set(rating::rating_value(rating)),
    }
}

#[tokio::test]
async fn test_ship_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let created = new_ship("model_crud_ship").insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.rating, 4.0);
    assert_eq!(created.ship_type, ship::ShipType::Transport);

    let found = ship::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let mut am: ship::ActiveModel = created.clone().into();
    am.crew_size = Set(301);
    let updated = am.update(&db).await?;
    assert_eq!(updated.crew_size, 301);
    assert_eq!(updated.name, created.name);

    updated.delete(&db).await?;
    assert!(ship::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ship_type_round_trips_as_text() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let mut am = new_ship("model_type_ship");
    am.ship_type = Set(ship::ShipType::Merchant);
    let created = am.insert(&db).await?;

    let merchants = ship::Entity::find()
        .filter(ship::Column::ShipType.eq(ship::ShipType::Merchant))
        .filter(ship::Column::Id.eq(created.id))
        .all(&db)
        .await?;
    assert_eq!(merchants.len(), 1);

    ship::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
