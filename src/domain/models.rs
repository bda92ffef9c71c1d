use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Platform markup applied on top of every farmer's base price.
pub const MARKUP_PERCENT: u64 = 15;

/// Highest base price the harvest form accepts, in whole rupees.
pub const MAX_BASE_PRICE: u64 = 1_000_000;

/// Buyer-facing price: base price plus the platform markup, rounded up
/// to the next whole rupee. The multiply runs in 128-bit arithmetic and
/// the result saturates at `u64::MAX`.
pub fn consumer_price(base_price: u64) -> u64 {
    let marked_up = (u128::from(base_price) * u128::from(100 + MARKUP_PERCENT)).div_ceil(100);
    u64::try_from(marked_up).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn generate() -> Self {
        Self(format!("p{}", Utc::now().timestamp_millis()))
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmerId(pub String);

impl FarmerId {
    pub fn generate() -> Self {
        Self(format!("f{}", Utc::now().timestamp_millis()))
    }
}

impl std::fmt::Display for FarmerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in kilometers (haversine).
    pub fn distance_km(&self, other: &GeoLocation) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_KM * c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Rice,
    Grains,
    Dairy,
    Spices,
    Organic,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Rice,
        Category::Grains,
        Category::Dairy,
        Category::Spices,
        Category::Organic,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Rice => "Rice",
            Category::Grains => "Grains",
            Category::Dairy => "Dairy",
            Category::Spices => "Spices",
            Category::Organic => "Organic",
        };
        write!(f, "{}", name)
    }
}

/// Marketplace category selector: everything, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[0]),
            CategoryFilter::Only(c) if c == Category::ALL[Category::ALL.len() - 1] => {
                CategoryFilter::All
            }
            CategoryFilter::Only(c) => CategoryFilter::Only(c.next()),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[Category::ALL.len() - 1]),
            CategoryFilter::Only(c) if c == Category::ALL[0] => CategoryFilter::All,
            CategoryFilter::Only(c) => CategoryFilter::Only(c.prev()),
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    SoldOut,
    Limited,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StockStatus::InStock => "In Stock",
            StockStatus::SoldOut => "Sold Out",
            StockStatus::Limited => "Limited",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessLevel {
    High,
    Medium,
}

impl std::fmt::Display for FreshnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FreshnessLevel::High => "High",
            FreshnessLevel::Medium => "Medium",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub bio: String,
    pub location: String,
    pub coordinates: Option<GeoLocation>,
    pub joined_date: String,
    pub rating: f32,
    pub phone: String,
    pub verified: bool,
    pub profile_image: String,
    pub whatsapp_enabled: bool,
}

impl Farmer {
    /// Builds a freshly registered farmer: new id, current month as the
    /// joined date, a generated avatar, and the defaults every new account
    /// starts with (rating 5.0, verified, WhatsApp on).
    pub fn register(
        name: String,
        location: String,
        phone: String,
        bio: String,
        coordinates: Option<GeoLocation>,
    ) -> Self {
        let profile_image = format!(
            "https://ui-avatars.com/api/?name={}&background=16a34a&color=fff&size=200",
            name.replace(' ', "+")
        );
        Self {
            id: FarmerId::generate(),
            name,
            bio,
            location,
            coordinates,
            joined_date: Utc::now().format("%b %Y").to_string(),
            rating: 5.0,
            phone,
            verified: true,
            profile_image,
            whatsapp_enabled: true,
        }
    }

    pub fn whatsapp_link(&self) -> String {
        format!("https://wa.me/{}", self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub farmer_id: FarmerId,
    pub farmer_name: String,
    pub name: String,
    pub description: String,
    pub base_price: u64,
    pub consumer_price: u64,
    pub category: Category,
    pub unit: String,
    pub media: Vec<String>,
    pub location: String,
    pub coordinates: Option<GeoLocation>,
    pub rating: f32,
    pub stock_status: StockStatus,
    pub freshness: FreshnessLevel,
}

impl Product {
    /// Builds a new harvest listing for the given farmer. The farmer's id,
    /// name, location and coordinates are copied by value so that later
    /// profile changes never rewrite an existing listing, and the consumer
    /// price is derived here so the markup invariant holds from creation.
    pub fn harvest(
        farmer: &Farmer,
        name: String,
        category: Category,
        unit: String,
        base_price: u64,
        description: String,
        media: Vec<String>,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            farmer_id: farmer.id.clone(),
            farmer_name: farmer.name.clone(),
            name,
            description,
            base_price,
            consumer_price: consumer_price(base_price),
            category,
            unit,
            media,
            location: farmer.location.clone(),
            coordinates: farmer.coordinates,
            rating: 5.0,
            stock_status: StockStatus::InStock,
            freshness: FreshnessLevel::High,
        }
    }
}

/// One cart line: a snapshot of the product taken at add-time plus a
/// quantity. The snapshot is intentional, so the price the buyer saw is the
/// price they keep even if the catalog entry changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        self.product
            .consumer_price
            .saturating_mul(u64::from(self.quantity))
    }
}
