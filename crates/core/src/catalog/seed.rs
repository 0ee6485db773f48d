//! Built-in demo catalog.

use rust_decimal::Decimal;

use super::Product;
use crate::types::{Price, ProductId};

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    image: &'static str,
    category: &'static str,
    featured: bool,
    rating_tenths: i64,
    stock: u32,
}

const SEED: &[Seed] = &[
    Seed {
        id: "1",
        name: "Premium Wireless Headphones",
        description: "Experience crystal-clear sound with our premium wireless headphones featuring active noise cancellation and 30 hours of battery life.",
        cents: 24999,
        image: "https://images.unsplash.com/photo-1618366712010-f4ae9c647dcb",
        category: "electronics",
        featured: true,
        rating_tenths: 48,
        stock: 15,
    },
    Seed {
        id: "2",
        name: "Smart Fitness Watch",
        description: "Track your fitness goals with this advanced smartwatch featuring heart rate monitor, GPS, and water resistance up to 50 meters.",
        cents: 19999,
        image: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a",
        category: "electronics",
        featured: true,
        rating_tenths: 45,
        stock: 20,
    },
    Seed {
        id: "3",
        name: "Ultra HD 4K Monitor",
        description: "Immerse yourself in stunning visuals with this 32-inch 4K monitor, perfect for gaming and professional content creation.",
        cents: 34999,
        image: "https://images.unsplash.com/photo-1527443224154-c4a3942d3acf",
        category: "electronics",
        featured: false,
        rating_tenths: 46,
        stock: 8,
    },
    Seed {
        id: "4",
        name: "Designer Leather Backpack",
        description: "A stylish and durable leather backpack with multiple compartments, perfect for work or travel.",
        cents: 12999,
        image: "https://images.unsplash.com/photo-1622560480654-d96214fdc887",
        category: "fashion",
        featured: true,
        rating_tenths: 43,
        stock: 25,
    },
    Seed {
        id: "5",
        name: "Aromatherapy Essential Oil Diffuser",
        description: "Create a calming atmosphere with this ultrasonic diffuser featuring 7 LED light colors and multiple mist settings.",
        cents: 3999,
        image: "https://images.unsplash.com/photo-1608571423902-eed4a5ad8108",
        category: "home",
        featured: false,
        rating_tenths: 42,
        stock: 30,
    },
    Seed {
        id: "6",
        name: "Organic Cotton Yoga Mat",
        description: "Eco-friendly yoga mat made from 100% organic cotton, providing excellent grip and comfort for your yoga practice.",
        cents: 5999,
        image: "https://images.unsplash.com/photo-1592432678016-e910b452f9a2",
        category: "fitness",
        featured: false,
        rating_tenths: 47,
        stock: 12,
    },
    Seed {
        id: "7",
        name: "Gourmet Coffee Gift Set",
        description: "A collection of premium single-origin coffees from around the world, beautifully packaged in a gift box.",
        cents: 4999,
        image: "https://images.unsplash.com/photo-1559056199-641a0ac8b55e",
        category: "food",
        featured: true,
        rating_tenths: 49,
        stock: 18,
    },
    Seed {
        id: "8",
        name: "Stainless Steel Water Bottle",
        description: "Double-walled insulated water bottle that keeps drinks cold for 24 hours or hot for 12 hours. Eco-friendly and BPA-free.",
        cents: 3499,
        image: "https://images.unsplash.com/photo-1602143407151-7111542de6e8",
        category: "lifestyle",
        featured: false,
        rating_tenths: 44,
        stock: 40,
    },
    Seed {
        id: "9",
        name: "Wireless Charging Pad",
        description: "Fast-charging wireless pad compatible with all Qi-enabled devices. Sleek, minimalist design with LED indicators.",
        cents: 2999,
        image: "https://images.unsplash.com/photo-1586816879360-902f5a4a92e1",
        category: "electronics",
        featured: false,
        rating_tenths: 40,
        stock: 22,
    },
    Seed {
        id: "10",
        name: "Artisanal Ceramic Plant Pot",
        description: "Handcrafted ceramic plant pot with a unique glazed finish. Perfect for indoor plants and home decor.",
        cents: 4299,
        image: "https://images.unsplash.com/photo-1485955900006-10f4d324d411",
        category: "home",
        featured: false,
        rating_tenths: 41,
        stock: 15,
    },
    Seed {
        id: "11",
        name: "Smart LED Desk Lamp",
        description: "Adjustable desk lamp with touch controls, multiple brightness levels, and color temperature settings.",
        cents: 7999,
        image: "https://images.unsplash.com/photo-1583394293214-28ded15ee548",
        category: "home",
        featured: false,
        rating_tenths: 45,
        stock: 10,
    },
    Seed {
        id: "12",
        name: "Luxury Scented Candle Set",
        description: "Set of 3 hand-poured soy wax candles with premium essential oil fragrances. Up to 45 hours of burn time each.",
        cents: 6499,
        image: "https://images.unsplash.com/photo-1603006905393-0a6655cef389",
        category: "home",
        featured: true,
        rating_tenths: 48,
        stock: 7,
    },
];

/// The demo products, in catalog order.
pub(super) fn products() -> Vec<Product> {
    SEED.iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: Price::from_cents(seed.cents),
            image: seed.image.to_owned(),
            category: seed.category.to_owned(),
            featured: seed.featured,
            rating: Decimal::new(seed.rating_tenths, 1),
            stock: seed.stock,
        })
        .collect()
}
