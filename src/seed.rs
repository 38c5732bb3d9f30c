//! Demonstration items loaded into an empty catalog.

use chrono::{DateTime, TimeZone, Utc};

use crate::item_model::{Item, ItemType};

const PEXELS_PARAMS: &str = "?auto=compress&cs=tinysrgb&w=800";

fn pexels(photo: u32) -> String {
    format!("https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg{PEXELS_PARAMS}")
}

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The fixed seed collection, newest first.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item {
            id: "1".to_string(),
            name: "Classic White T-Shirt".to_string(),
            item_type: ItemType::Shirt,
            description: "A comfortable, high-quality cotton t-shirt perfect for everyday wear. \
                          Made from 100% organic cotton with a relaxed fit."
                .to_string(),
            cover_image: pexels(8532616),
            additional_images: vec![pexels(8532616), pexels(7679720)],
            created_at: day(2024, 1, 15),
        },
        Item {
            id: "2".to_string(),
            name: "Running Sneakers".to_string(),
            item_type: ItemType::Shoes,
            description: "Professional running shoes with advanced cushioning technology. \
                          Perfect for both casual walks and intense workouts."
                .to_string(),
            cover_image: pexels(2529148),
            additional_images: vec![pexels(2529148), pexels(1598505)],
            created_at: day(2024, 1, 10),
        },
        Item {
            id: "3".to_string(),
            name: "Denim Jeans".to_string(),
            item_type: ItemType::Pant,
            description: "Classic blue denim jeans with a modern fit. \
                          Made from premium denim fabric with excellent durability and comfort."
                .to_string(),
            cover_image: pexels(1598507),
            additional_images: vec![pexels(1598507), pexels(7679471)],
            created_at: day(2024, 1, 8),
        },
    ]
}
