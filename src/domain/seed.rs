use crate::domain::models::{
    Category, Farmer, FarmerId, FreshnessLevel, GeoLocation, Product, ProductId, StockStatus,
};

/// Sample farmers used to populate an empty store on first launch.
pub fn seed_farmers() -> Vec<Farmer> {
    vec![
        Farmer {
            id: FarmerId("f1".to_string()),
            name: "Muhammad Ahmed".to_string(),
            bio: "Dedicated to growing the finest Basmati rice in the fertile lands of \
                  Gujranwala for over 20 years."
                .to_string(),
            location: "Gujranwala, Punjab".to_string(),
            coordinates: None,
            joined_date: "Jan 2024".to_string(),
            rating: 4.9,
            phone: "03001234567".to_string(),
            verified: true,
            profile_image:
                "https://images.unsplash.com/photo-1542831371-29b0f74f9713?w=200&h=200&fit=crop"
                    .to_string(),
            whatsapp_enabled: true,
        },
        Farmer {
            id: FarmerId("f2".to_string()),
            name: "Ayesha Khan".to_string(),
            bio: "Third-generation mango grower from Mirpur Khas, picking every Sindhri by \
                  hand at peak ripeness."
                .to_string(),
            location: "Mirpur Khas, Sindh".to_string(),
            coordinates: Some(GeoLocation::new(25.5251, 69.0159)),
            joined_date: "Mar 2024".to_string(),
            rating: 4.8,
            phone: "03219876543".to_string(),
            verified: true,
            profile_image:
                "https://images.unsplash.com/photo-1595854341625-f33ee10dbf94?w=200&h=200&fit=crop"
                    .to_string(),
            whatsapp_enabled: true,
        },
        Farmer {
            id: FarmerId("f3".to_string()),
            name: "Imran Baloch".to_string(),
            bio: "Runs a small family plot in Okara where the tomatoes ripen on the vine, \
                  not in a truck."
                .to_string(),
            location: "Okara, Punjab".to_string(),
            coordinates: Some(GeoLocation::new(30.8081, 73.4458)),
            joined_date: "Feb 2024".to_string(),
            rating: 4.7,
            phone: "03331122334".to_string(),
            verified: true,
            profile_image:
                "https://images.unsplash.com/photo-1507103011901-e954d6ec0988?w=200&h=200&fit=crop"
                    .to_string(),
            whatsapp_enabled: false,
        },
    ]
}

/// Sample listings matching [`seed_farmers`]. Consumer prices are stored
/// pre-computed, like every persisted listing.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId("1".to_string()),
            farmer_id: FarmerId("f1".to_string()),
            farmer_name: "Muhammad Ahmed".to_string(),
            name: "Premium Super Basmati".to_string(),
            description: "Aromatic, long-grain rice, aged for 2 years for perfect fluffiness."
                .to_string(),
            base_price: 320,
            consumer_price: 368,
            category: Category::Rice,
            unit: "kg".to_string(),
            media: vec![
                "https://images.unsplash.com/photo-1586201375761-83865001e31c?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            location: "Gujranwala, Punjab".to_string(),
            coordinates: None,
            rating: 4.9,
            stock_status: StockStatus::InStock,
            freshness: FreshnessLevel::High,
        },
        Product {
            id: ProductId("2".to_string()),
            farmer_id: FarmerId("f2".to_string()),
            farmer_name: "Ayesha Khan".to_string(),
            name: "Sindhri Mangoes".to_string(),
            description: "Honey-sweet Sindhri mangoes, tree-ripened and packed the same day."
                .to_string(),
            base_price: 180,
            consumer_price: 207,
            category: Category::Fruits,
            unit: "dozen".to_string(),
            media: vec![
                "https://images.unsplash.com/photo-1553279768-865429fa0078?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            location: "Mirpur Khas, Sindh".to_string(),
            coordinates: Some(GeoLocation::new(25.5251, 69.0159)),
            rating: 4.8,
            stock_status: StockStatus::InStock,
            freshness: FreshnessLevel::High,
        },
        Product {
            id: ProductId("3".to_string()),
            farmer_id: FarmerId("f3".to_string()),
            farmer_name: "Imran Baloch".to_string(),
            name: "Desi Tomatoes".to_string(),
            description: "Vine-ripened desi tomatoes with real flavour, picked this week."
                .to_string(),
            base_price: 80,
            consumer_price: 92,
            category: Category::Vegetables,
            unit: "kg".to_string(),
            media: vec![
                "https://images.unsplash.com/photo-1592924357228-91a4daadcfea?w=400&h=300&fit=crop"
                    .to_string(),
            ],
            location: "Okara, Punjab".to_string(),
            coordinates: Some(GeoLocation::new(30.8081, 73.4458)),
            rating: 4.7,
            stock_status: StockStatus::InStock,
            freshness: FreshnessLevel::Medium,
        },
    ]
}
