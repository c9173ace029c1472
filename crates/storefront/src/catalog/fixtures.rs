//! Demo catalog data.
//!
//! Sixty products generated from a dozen base items. Each pass over the base
//! set after the first appends a letter to the name (B, C, ...) and raises
//! price by 10.00 and stock by 5 per pass.

use rust_decimal::Decimal;
use shopfront_core::{Category, Product, ProductId, Rating};

/// Number of products in the demo catalog.
pub const DEMO_CATALOG_SIZE: usize = 60;

struct BaseProduct {
    name: &'static str,
    description: &'static str,
    /// Price in cents.
    price_cents: i64,
    image: &'static str,
    category: &'static str,
    rating: f32,
    stock: u32,
}

const BASE_PRODUCTS: &[BaseProduct] = &[
    BaseProduct {
        name: "Wireless Headphones",
        description: "Noise-cancelling over-ear headphones with a 30-hour battery",
        price_cents: 29999,
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&q=80",
        category: "electronics",
        rating: 4.5,
        stock: 15,
    },
    BaseProduct {
        name: "Smart Watch",
        description: "Fitness and sleep tracking with phone notifications",
        price_cents: 39999,
        image: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&q=80",
        category: "electronics",
        rating: 4.8,
        stock: 22,
    },
    BaseProduct {
        name: "Running Shoes",
        description: "Lightweight trainers with responsive cushioning",
        price_cents: 12999,
        image: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=500&q=80",
        category: "footwear",
        rating: 4.6,
        stock: 30,
    },
    BaseProduct {
        name: "Backpack",
        description: "Waterproof daypack with a padded laptop sleeve",
        price_cents: 7999,
        image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500&q=80",
        category: "accessories",
        rating: 4.3,
        stock: 18,
    },
    BaseProduct {
        name: "Coffee Maker",
        description: "Programmable drip brewer with a thermal carafe",
        price_cents: 8999,
        image: "https://images.unsplash.com/photo-1517668808822-9ebb02f2a0e6?w=500&q=80",
        category: "home",
        rating: 4.4,
        stock: 12,
    },
    BaseProduct {
        name: "Yoga Mat",
        description: "Non-slip mat with a carrying strap",
        price_cents: 3999,
        image: "https://images.unsplash.com/photo-1601925260368-ae2f83cf8b7f?w=500&q=80",
        category: "fitness",
        rating: 4.7,
        stock: 25,
    },
    BaseProduct {
        name: "Wireless Mouse",
        description: "Ergonomic mouse with precise optical tracking",
        price_cents: 4999,
        image: "https://images.unsplash.com/photo-1527814050087-3793815479db?w=500&q=80",
        category: "electronics",
        rating: 4.2,
        stock: 40,
    },
    BaseProduct {
        name: "Sunglasses",
        description: "Polarized lenses with full UV protection",
        price_cents: 14999,
        image: "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=500&q=80",
        category: "accessories",
        rating: 4.5,
        stock: 20,
    },
    BaseProduct {
        name: "Desk Lamp",
        description: "Dimmable LED lamp with adjustable colour temperature",
        price_cents: 5999,
        image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=500&q=80",
        category: "home",
        rating: 4.6,
        stock: 15,
    },
    BaseProduct {
        name: "Water Bottle",
        description: "Insulated steel bottle that keeps drinks cold all day",
        price_cents: 2999,
        image: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=500&q=80",
        category: "fitness",
        rating: 4.8,
        stock: 50,
    },
    BaseProduct {
        name: "Bluetooth Speaker",
        description: "Portable speaker with 360-degree sound",
        price_cents: 7999,
        image: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=500&q=80",
        category: "electronics",
        rating: 4.4,
        stock: 28,
    },
    BaseProduct {
        name: "Sneakers",
        description: "Classic canvas sneakers in several colours",
        price_cents: 6999,
        image: "https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77?w=500&q=80",
        category: "footwear",
        rating: 4.3,
        stock: 35,
    },
];

/// The demo catalog, ids "1" through "60" in catalog order.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    BASE_PRODUCTS
        .iter()
        .cycle()
        .take(DEMO_CATALOG_SIZE)
        .zip(1_u32..)
        .map(|(base, number)| {
            let pass = (number - 1) / u32::try_from(BASE_PRODUCTS.len()).unwrap_or(u32::MAX);
            let name = match pass {
                0 => base.name.to_string(),
                _ => format!("{} {}", base.name, pass_letter(pass)),
            };

            Product {
                id: ProductId::new(number.to_string()),
                name,
                description: base.description.to_string(),
                price: Decimal::new(base.price_cents, 2) + Decimal::from(pass * 10),
                image: Some(base.image.to_string()),
                category: Category::from(base.category),
                rating: Rating::saturating(base.rating),
                stock: base.stock + pass * 5,
            }
        })
        .collect()
}

/// Letter suffix for a pass: 1 -> 'B', 2 -> 'C', ...
fn pass_letter(pass: u32) -> char {
    char::from_u32(u32::from(b'A') + pass).unwrap_or('?')
}
