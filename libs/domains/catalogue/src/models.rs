use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, IntoStaticStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Game genre, persisted and transported as a fixed integer code.
///
/// Codes are stable identifiers and must never be renumbered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Genre {
    #[sea_orm(num_value = 1)]
    Action,
    #[sea_orm(num_value = 2)]
    Adventure,
    #[sea_orm(num_value = 3)]
    #[strum(serialize = "RPG")]
    Rpg,
    #[sea_orm(num_value = 4)]
    Strategy,
    #[sea_orm(num_value = 5)]
    Sports,
    #[sea_orm(num_value = 6)]
    Racing,
    #[sea_orm(num_value = 7)]
    Simulation,
    #[sea_orm(num_value = 8)]
    Puzzle,
    #[sea_orm(num_value = 9)]
    Fighting,
    #[sea_orm(num_value = 10)]
    Shooter,
    #[sea_orm(num_value = 11)]
    Horror,
    #[sea_orm(num_value = 12)]
    Platformer,
    #[sea_orm(num_value = 99)]
    Other,
}

impl Genre {
    pub fn code(&self) -> i32 {
        match self {
            Genre::Action => 1,
            Genre::Adventure => 2,
            Genre::Rpg => 3,
            Genre::Strategy => 4,
            Genre::Sports => 5,
            Genre::Racing => 6,
            Genre::Simulation => 7,
            Genre::Puzzle => 8,
            Genre::Fighting => 9,
            Genre::Shooter => 10,
            Genre::Horror => 11,
            Genre::Platformer => 12,
            Genre::Other => 99,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        let genre = match code {
            1 => Genre::Action,
            2 => Genre::Adventure,
            3 => Genre::Rpg,
            4 => Genre::Strategy,
            5 => Genre::Sports,
            6 => Genre::Racing,
            7 => Genre::Simulation,
            8 => Genre::Puzzle,
            9 => Genre::Fighting,
            10 => Genre::Shooter,
            11 => Genre::Horror,
            12 => Genre::Platformer,
            99 => Genre::Other,
            _ => return None,
        };
        Some(genre)
    }

    /// Display label, e.g. `"RPG"` for code 3.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Genre::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown genre code {}", code)))
    }
}

/// A catalogue record as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueItem {
    /// Store-assigned, never reused
    pub id: i64,
    pub title: String,
    pub publisher: String,
    pub developer: String,
    pub release_date: DateTime<Utc>,
    pub genre: Genre,
    pub price: Decimal,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
    pub is_active: bool,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set on every successful update
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogueItem {
    /// Overwrites every mutable field and stamps `updated_at`.
    ///
    /// `id` and `created_at` are left as they are.
    pub fn apply_update(&mut self, input: UpdateCatalogueItem, now: DateTime<Utc>) {
        self.title = input.title;
        self.publisher = input.publisher;
        self.developer = input.developer;
        self.release_date = input.release_date;
        self.genre = input.genre;
        self.price = input.price;
        self.description = input.description;
        self.rating = input.rating;
        self.cover_image_url = input.cover_image_url;
        self.is_active = input.is_active;
        self.updated_at = Some(now);
    }
}

/// An item staged for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCatalogueItem {
    pub title: String,
    pub publisher: String,
    pub developer: String,
    pub release_date: DateTime<Utc>,
    pub genre: Genre,
    pub price: Decimal,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewCatalogueItem {
    /// New active item created at `now`.
    pub fn from_create(input: CreateCatalogueItem, now: DateTime<Utc>) -> Self {
        Self {
            title: input.title,
            publisher: input.publisher,
            developer: input.developer,
            release_date: input.release_date,
            genre: input.genre,
            price: input.price,
            description: input.description,
            rating: input.rating,
            cover_image_url: input.cover_image_url,
            is_active: true,
            created_at: now,
        }
    }

    pub fn with_id(self, id: i64) -> CatalogueItem {
        CatalogueItem {
            id,
            title: self.title,
            publisher: self.publisher,
            developer: self.developer,
            release_date: self.release_date,
            genre: self.genre,
            price: self.price,
            description: self.description,
            rating: self.rating,
            cover_image_url: self.cover_image_url,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Catalogue item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItemDto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "New Game")]
    pub title: String,
    pub publisher: String,
    pub developer: String,
    pub release_date: DateTime<Utc>,
    /// Genre code
    #[schema(value_type = i32, example = 3)]
    pub genre: Genre,
    #[schema(example = "RPG")]
    pub genre_name: String,
    #[schema(value_type = f64, example = 59.99)]
    pub price: Decimal,
    pub description: String,
    pub rating: i32,
    pub cover_image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CatalogueItem> for CatalogueItemDto {
    fn from(item: CatalogueItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            publisher: item.publisher,
            developer: item.developer,
            release_date: item.release_date,
            genre: item.genre,
            genre_name: item.genre.name().to_string(),
            price: item.price,
            description: item.description,
            rating: item.rating,
            cover_image_url: item.cover_image_url,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Body of `POST /api/catalogue`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogueItem {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title is required and must not exceed 200 characters."
    ))]
    #[schema(example = "New Game")]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Publisher is required and must not exceed 100 characters."
    ))]
    pub publisher: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Developer is required and must not exceed 100 characters."
    ))]
    pub developer: String,
    pub release_date: DateTime<Utc>,
    #[schema(value_type = i32, example = 3)]
    pub genre: Genre,
    #[schema(value_type = f64, example = 59.99)]
    pub price: Decimal,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters."))]
    pub description: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = 500, message = "Cover image URL must not exceed 500 characters."))]
    pub cover_image_url: String,
}

/// Body of `PUT /api/catalogue/{id}`: a full replacement.
///
/// Omitted fields fall back to their defaults and overwrite stored values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogueItem {
    /// Must equal the id in the path
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title is required and must not exceed 200 characters."
    ))]
    pub title: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Publisher is required and must not exceed 100 characters."
    ))]
    pub publisher: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Developer is required and must not exceed 100 characters."
    ))]
    pub developer: String,
    pub release_date: DateTime<Utc>,
    #[schema(value_type = i32, example = 3)]
    pub genre: Genre,
    #[serde(default)]
    #[schema(value_type = f64, example = 49.99)]
    pub price: Decimal,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters."))]
    pub description: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = 500, message = "Cover image URL must not exceed 500 characters."))]
    pub cover_image_url: String,
    #[serde(default)]
    pub is_active: bool,
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
    /// `ceil(total_count / page_size)`
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page_number: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
        }
    }
}

/// Query string of `GET /api/catalogue`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListCatalogueQuery {
    /// 1-based page number; values below 1 are treated as 1
    pub page_number: Option<i64>,
    /// Items per page; capped at 50, values below 1 become 10
    pub page_size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;
    use serde_json::json;

    #[test]
    fn test_genre_codes_round_trip() {
        for genre in Genre::iter() {
            assert_eq!(Genre::from_code(genre.code()), Some(genre));
        }
        assert_eq!(Genre::from_code(0), None);
        assert_eq!(Genre::from_code(13), None);
    }

    #[test]
    fn test_genre_names() {
        assert_eq!(Genre::from_code(3).map(|g| g.name()), Some("RPG"));
        assert_eq!(Genre::Action.name(), "Action");
        assert_eq!(Genre::Other.code(), 99);
        assert_eq!(Genre::Other.to_string(), "Other");
    }

    #[test]
    fn test_genre_serializes_as_code() {
        assert_eq!(serde_json::to_value(Genre::Shooter).unwrap(), json!(10));
        let genre: Genre = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(genre, Genre::Platformer);
        assert!(serde_json::from_value::<Genre>(json!(42)).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PagedResult::<()>::new(vec![], 1, 10, 25);
        assert_eq!(page.total_pages, 3);

        let page = PagedResult::<()>::new(vec![], 1, 10, 20);
        assert_eq!(page.total_pages, 2);

        let empty = PagedResult::<()>::new(vec![], 1, 10, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_dto_expands_genre() {
        let now = Utc::now();
        let item = NewCatalogueItem {
            title: "Halo".to_string(),
            publisher: "Xbox".to_string(),
            developer: "Bungie".to_string(),
            release_date: now,
            genre: Genre::Shooter,
            price: Decimal::new(1999, 2),
            description: String::new(),
            rating: 9,
            cover_image_url: String::new(),
            is_active: true,
            created_at: now,
        }
        .with_id(7);

        let dto = CatalogueItemDto::from(item);
        assert_eq!(dto.id, 7);
        assert_eq!(dto.genre, Genre::Shooter);
        assert_eq!(dto.genre_name, "Shooter");

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["genre"], json!(10));
        assert_eq!(value["genreName"], json!("Shooter"));
        assert_eq!(value["price"], json!(19.99));
        assert!(value["updatedAt"].is_null());
    }

    #[test]
    fn test_update_body_defaults_missing_fields() {
        let input: UpdateCatalogueItem = serde_json::from_value(json!({
            "id": 1,
            "title": "Renamed",
            "publisher": "P",
            "developer": "D",
            "releaseDate": "2024-01-01T00:00:00Z",
            "genre": 1
        }))
        .unwrap();

        assert!(!input.is_active);
        assert_eq!(input.rating, 0);
        assert_eq!(input.price, Decimal::ZERO);
        assert!(input.description.is_empty());
    }

    #[test]
    fn test_create_validation_messages() {
        let input = CreateCatalogueItem {
            title: "x".repeat(201),
            publisher: "P".to_string(),
            developer: String::new(),
            release_date: Utc::now(),
            genre: Genre::Action,
            price: Decimal::ZERO,
            description: String::new(),
            rating: 0,
            cover_image_url: String::new(),
        };

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("developer"));
        assert!(!fields.contains_key("publisher"));
    }
}
