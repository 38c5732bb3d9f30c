//! Catalog item definitions.
//!
//! This module defines the records stored in the catalog. The primary model is
//! [`Item`], a persisted inventory entry; [`NewItem`] is the caller-supplied
//! subset used to create one, and [`ItemType`] is the closed set of categories.
//!
//! # Serialized form
//!
//! Items are stored as camelCase JSON records:
//!
//! ```json
//! {
//!   "id": "0b7c6a1e-3f0d-4c8e-9a57-6d2b1f0e4a93",
//!   "name": "Classic White T-Shirt",
//!   "type": "Shirt",
//!   "description": "A comfortable cotton t-shirt",
//!   "coverImage": "https://example.com/cover.jpg",
//!   "additionalImages": ["https://example.com/back.jpg"],
//!   "createdAt": "2024-01-15T00:00:00Z"
//! }
//! ```
//!
//! `createdAt` is revived into a [`DateTime<Utc>`] on read; see [`created_at`].

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_response::AppResponse;

/// Category of an inventory item.
///
/// Serialized using its display string, so `SportsGear` is stored as
/// `"Sports Gear"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Shirt,
    Pant,
    Shoes,
    #[serde(rename = "Sports Gear")]
    SportsGear,
    Accessories,
    Other,
}

impl ItemType {
    /// All categories, in the order a type selector offers them.
    pub const ALL: [ItemType; 6] = [
        ItemType::Shirt,
        ItemType::Pant,
        ItemType::Shoes,
        ItemType::SportsGear,
        ItemType::Accessories,
        ItemType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Shirt => "Shirt",
            ItemType::Pant => "Pant",
            ItemType::Shoes => "Shoes",
            ItemType::SportsGear => "Sports Gear",
            ItemType::Accessories => "Accessories",
            ItemType::Other => "Other",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = AppResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppResponse::ValidationError(format!("Unknown item type: {s}")))
    }
}

/// A persisted inventory entry.
///
/// Items are immutable once created: the catalog assigns `id` and
/// `created_at` and never rewrites them.
///
/// # Examples
///
/// ```rust
/// use inventory_catalog_core::item_model::{ItemType, NewItem};
///
/// let item = NewItem {
///     name: "Cap".to_string(),
///     item_type: ItemType::Accessories,
///     description: "Blue cap".to_string(),
///     cover_image: "img1".to_string(),
///     additional_images: vec![],
/// }
/// .into_item();
///
/// assert_eq!(item.gallery(), vec!["img1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned at creation.
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub description: String,

    /// Primary image reference (URL or data URI). Never empty for persisted items.
    pub cover_image: String,

    /// Extra image references, possibly empty.
    #[serde(default)]
    pub additional_images: Vec<String>,

    #[serde(with = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Images to show for this item, falling back to the cover image when no
    /// additional images were attached.
    pub fn gallery(&self) -> Vec<&str> {
        if self.additional_images.is_empty() {
            vec![self.cover_image.as_str()]
        } else {
            self.additional_images.iter().map(String::as_str).collect()
        }
    }

    /// Case-insensitive substring match against name, type and description.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.item_type.as_str().to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Fields supplied by the caller when adding an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub additional_images: Vec<String>,
}

impl NewItem {
    /// Form-level checks performed before an item is submitted.
    ///
    /// The catalog itself never validates; callers run this first.
    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.name.trim().is_empty() {
            return Err(AppResponse::ValidationError("Item name is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppResponse::ValidationError("Item description is required".to_string()));
        }
        if self.cover_image.is_empty() {
            return Err(AppResponse::ValidationError("A cover image is required".to_string()));
        }
        Ok(())
    }

    /// Stamps a fresh UUID v4 and the current time onto these fields.
    pub fn into_item(self) -> Item {
        Item {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            item_type: self.item_type,
            description: self.description,
            cover_image: self.cover_image,
            additional_images: self.additional_images,
            created_at: Utc::now(),
        }
    }
}

/// Serde adapter for `createdAt`.
///
/// Writes RFC 3339 in UTC. Reads RFC 3339 with any offset or precision, and
/// bare `YYYY-MM-DD` dates as midnight UTC.
pub mod created_at {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        revive(&raw).ok_or_else(|| D::Error::custom(format!("invalid createdAt timestamp: {raw}")))
    }

    pub fn revive(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn item_type_uses_display_strings() {
        let json = serde_json::to_string(&ItemType::SportsGear).unwrap();
        assert_eq!(json, "\"Sports Gear\"");
        let parsed: ItemType = serde_json::from_str("\"Accessories\"").unwrap();
        assert_eq!(parsed, ItemType::Accessories);
        assert_eq!("Sports Gear".parse::<ItemType>().unwrap(), ItemType::SportsGear);
        assert!("Hat".parse::<ItemType>().is_err());
        assert!(serde_json::from_str::<ItemType>("\"sports gear\"").is_err());
    }

    #[test]
    fn revives_js_and_date_only_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(created_at::revive("2024-01-15T00:00:00.000Z"), Some(expected));
        assert_eq!(created_at::revive("2024-01-15"), Some(expected));
        assert_eq!(created_at::revive("2024-01-15T02:00:00+02:00"), Some(expected));
        assert_eq!(created_at::revive("yesterday"), None);
    }

    #[test]
    fn deserializes_record_with_camel_case_fields() {
        let json = r#"{
            "id": "1",
            "name": "Classic White T-Shirt",
            "type": "Shirt",
            "description": "Cotton",
            "coverImage": "cover",
            "additionalImages": ["a", "b"],
            "createdAt": "2024-01-15T00:00:00.000Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Shirt);
        assert_eq!(item.cover_image, "cover");
        assert_eq!(item.gallery(), vec!["a", "b"]);
        assert_eq!(item.created_at, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let valid = NewItem {
            name: "Cap".to_string(),
            item_type: ItemType::Accessories,
            description: "Blue cap".to_string(),
            cover_image: "img1".to_string(),
            additional_images: vec![],
        };
        assert!(valid.validate().is_ok());

        let no_cover = NewItem { cover_image: String::new(), ..valid.clone() };
        assert!(matches!(no_cover.validate(), Err(AppResponse::ValidationError(_))));

        let blank_name = NewItem { name: "   ".to_string(), ..valid.clone() };
        assert!(matches!(blank_name.validate(), Err(AppResponse::ValidationError(_))));

        let no_description = NewItem { description: String::new(), ..valid };
        assert!(matches!(no_description.validate(), Err(AppResponse::ValidationError(_))));
    }
}
