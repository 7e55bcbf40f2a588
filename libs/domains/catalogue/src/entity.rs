use crate::models::{CatalogueItem, Genre, NewCatalogueItem};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM entity for the `video_games` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "video_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub publisher: String,
    pub developer: String,
    pub release_date: DateTimeWithTimeZone,
    pub genre: Genre,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CatalogueItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            publisher: model.publisher,
            developer: model.developer,
            release_date: model.release_date.into(),
            genre: model.genre,
            price: model.price,
            description: model.description,
            rating: model.rating,
            cover_image_url: model.cover_image_url,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
        }
    }
}

// id is left to the identity column
impl From<NewCatalogueItem> for ActiveModel {
    fn from(item: NewCatalogueItem) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(item.title),
            publisher: Set(item.publisher),
            developer: Set(item.developer),
            release_date: Set(item.release_date.into()),
            genre: Set(item.genre),
            price: Set(item.price),
            description: Set(item.description),
            rating: Set(item.rating),
            cover_image_url: Set(item.cover_image_url),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at.into()),
            updated_at: Set(None),
        }
    }
}

// Every column is written; created_at is carried over unchanged
impl From<CatalogueItem> for ActiveModel {
    fn from(item: CatalogueItem) -> Self {
        ActiveModel {
            id: Set(item.id),
            title: Set(item.title),
            publisher: Set(item.publisher),
            developer: Set(item.developer),
            release_date: Set(item.release_date.into()),
            genre: Set(item.genre),
            price: Set(item.price),
            description: Set(item.description),
            rating: Set(item.rating),
            cover_image_url: Set(item.cover_image_url),
            is_active: Set(item.is_active),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.map(Into::into)),
        }
    }
}
