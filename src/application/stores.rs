//! Client-local stores backing the marketplace.
//!
//! The catalog and session stores write through to a [`StorageBackend`]
//! on every mutation, so application state and persisted state never
//! drift. The cart is deliberately in-memory only and resets with the
//! process, matching how a browser-tab cart behaves.

use std::rc::Rc;

use tracing::{debug, info};

use crate::domain::{
    CartItem, Farmer, FarmerId, Product, ProductId, products_of, seed_farmers, seed_products,
};
use crate::infrastructure::{
    FARMERS_KEY, PRODUCTS_KEY, SESSION_KEY, StorageBackend, StorageError, read_json, write_json,
};

/// Products and farmers, loaded at startup and persisted on every change.
///
/// On first launch each key that holds nothing (or an empty array) is
/// seeded with the sample data and written back, so a fresh install shows
/// a populated marketplace. The two keys seed independently.
pub struct CatalogStore {
    storage: Rc<dyn StorageBackend>,
    products: Vec<Product>,
    farmers: Vec<Farmer>,
}

impl CatalogStore {
    pub fn open(storage: Rc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let mut products: Vec<Product> =
            read_json(storage.as_ref(), PRODUCTS_KEY)?.unwrap_or_default();
        if products.is_empty() {
            info!("product store empty, seeding sample catalog");
            products = seed_products();
            write_json(storage.as_ref(), PRODUCTS_KEY, &products)?;
        }

        let mut farmers: Vec<Farmer> =
            read_json(storage.as_ref(), FARMERS_KEY)?.unwrap_or_default();
        if farmers.is_empty() {
            info!("farmer store empty, seeding sample farmers");
            farmers = seed_farmers();
            write_json(storage.as_ref(), FARMERS_KEY, &farmers)?;
        }

        debug!(
            products = products.len(),
            farmers = farmers.len(),
            "catalog loaded"
        );
        Ok(Self {
            storage,
            products,
            farmers,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn farmers(&self) -> &[Farmer] {
        &self.farmers
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    pub fn farmer(&self, id: &FarmerId) -> Option<&Farmer> {
        self.farmers.iter().find(|f| f.id == *id)
    }

    /// All listings posted by one farmer, in catalog order.
    pub fn products_by(&self, farmer_id: &FarmerId) -> Vec<Product> {
        products_of(&self.products, farmer_id)
    }

    /// Adds a listing at the front of the catalog, newest harvest first.
    pub fn add_product(&mut self, product: Product) -> Result<(), StorageError> {
        self.products.insert(0, product);
        write_json(self.storage.as_ref(), PRODUCTS_KEY, &self.products)
    }

    pub fn add_farmer(&mut self, farmer: Farmer) -> Result<(), StorageError> {
        self.farmers.push(farmer);
        write_json(self.storage.as_ref(), FARMERS_KEY, &self.farmers)
    }
}

/// The shopping cart. Each line snapshots the product at add-time.
#[derive(Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product, merging with an existing line for
    /// the same product id.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Drops the whole line for the product id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|i| i.product.id != *id);
    }

    /// Sum of line totals in rupees, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Empties the cart, completing a checkout.
    pub fn checkout(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The logged-in farmer, persisted so a restart stays logged in.
pub struct SessionStore {
    storage: Rc<dyn StorageBackend>,
    current: Option<Farmer>,
}

impl SessionStore {
    pub fn open(storage: Rc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let current: Option<Farmer> =
            read_json::<Option<Farmer>>(storage.as_ref(), SESSION_KEY)?.flatten();
        Ok(Self { storage, current })
    }

    /// Starts a session for the farmer, replacing any existing session.
    pub fn login(&mut self, farmer: Farmer) -> Result<(), StorageError> {
        self.current = Some(farmer);
        write_json(self.storage.as_ref(), SESSION_KEY, &self.current)
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.current = None;
        write_json(self.storage.as_ref(), SESSION_KEY, &self.current)
    }

    pub fn current(&self) -> Option<&Farmer> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, FreshnessLevel, GeoLocation, StockStatus};
    use crate::infrastructure::MemoryStorage;

    fn storage() -> Rc<MemoryStorage> {
        Rc::new(MemoryStorage::new())
    }

    fn product(id: &str, name: &str, base_price: u64) -> Product {
        Product {
            id: ProductId(id.to_string()),
            farmer_id: FarmerId("f1".to_string()),
            farmer_name: "Test Farmer".to_string(),
            name: name.to_string(),
            description: "Test produce.".to_string(),
            base_price,
            consumer_price: crate::domain::consumer_price(base_price),
            category: Category::Vegetables,
            unit: "kg".to_string(),
            media: vec!["https://example.com/a.jpg".to_string()],
            location: "Lahore, Punjab".to_string(),
            coordinates: None,
            rating: 4.5,
            stock_status: StockStatus::InStock,
            freshness: FreshnessLevel::High,
        }
    }

    fn farmer(id: &str, name: &str) -> Farmer {
        Farmer {
            id: FarmerId(id.to_string()),
            name: name.to_string(),
            bio: "Test bio.".to_string(),
            location: "Lahore, Punjab".to_string(),
            coordinates: Some(GeoLocation::new(31.5, 74.3)),
            joined_date: "Jan 2025".to_string(),
            rating: 5.0,
            phone: "03000000000".to_string(),
            verified: true,
            profile_image: "https://example.com/f.jpg".to_string(),
            whatsapp_enabled: true,
        }
    }

    #[test]
    fn test_catalog_seeds_empty_store_and_persists() {
        let storage = storage();
        let catalog = CatalogStore::open(storage.clone()).unwrap();

        assert_eq!(catalog.products().len(), seed_products().len());
        assert_eq!(catalog.farmers().len(), seed_farmers().len());
        assert_eq!(catalog.products()[0].name, "Premium Super Basmati");
        assert_eq!(catalog.farmers()[0].name, "Muhammad Ahmed");

        // The seed was written through, so a second open loads it verbatim.
        assert!(storage.read(PRODUCTS_KEY).unwrap().is_some());
        assert!(storage.read(FARMERS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_catalog_loads_existing_data_without_reseeding() {
        let storage = storage();
        write_json(storage.as_ref(), PRODUCTS_KEY, &vec![product("x1", "Okra", 90)]).unwrap();
        write_json(storage.as_ref(), FARMERS_KEY, &vec![farmer("fx", "Test")]).unwrap();

        let catalog = CatalogStore::open(storage).unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.products()[0].name, "Okra");
        assert_eq!(catalog.farmers().len(), 1);
    }

    #[test]
    fn test_catalog_keys_seed_independently() {
        let storage = storage();
        write_json(storage.as_ref(), FARMERS_KEY, &vec![farmer("fx", "Test")]).unwrap();

        let catalog = CatalogStore::open(storage).unwrap();
        // Products were absent so they seeded; farmers kept their stored value.
        assert_eq!(catalog.products().len(), seed_products().len());
        assert_eq!(catalog.farmers().len(), 1);
    }

    #[test]
    fn test_catalog_empty_array_also_seeds() {
        let storage = storage();
        write_json(storage.as_ref(), PRODUCTS_KEY, &Vec::<Product>::new()).unwrap();

        let catalog = CatalogStore::open(storage).unwrap();
        assert_eq!(catalog.products().len(), seed_products().len());
    }

    #[test]
    fn test_add_product_prepends_and_survives_reopen() {
        let storage = storage();
        let mut catalog = CatalogStore::open(storage.clone()).unwrap();
        let before = catalog.products().len();

        catalog.add_product(product("new1", "Fresh Okra", 90)).unwrap();
        assert_eq!(catalog.products().len(), before + 1);
        assert_eq!(catalog.products()[0].name, "Fresh Okra");

        let reopened = CatalogStore::open(storage).unwrap();
        assert_eq!(reopened.products()[0].name, "Fresh Okra");
    }

    #[test]
    fn test_add_farmer_appends_and_survives_reopen() {
        let storage = storage();
        let mut catalog = CatalogStore::open(storage.clone()).unwrap();
        let before = catalog.farmers().len();

        catalog.add_farmer(farmer("fnew", "New Farmer")).unwrap();
        assert_eq!(catalog.farmers().len(), before + 1);
        assert_eq!(catalog.farmers().last().unwrap().name, "New Farmer");

        let reopened = CatalogStore::open(storage).unwrap();
        assert_eq!(reopened.farmers().last().unwrap().name, "New Farmer");
    }

    #[test]
    fn test_products_by_returns_only_that_farmers_listings() {
        let storage = storage();
        write_json(
            storage.as_ref(),
            PRODUCTS_KEY,
            &vec![product("1", "Basmati", 320), product("2", "Mangoes", 180)],
        )
        .unwrap();

        let catalog = CatalogStore::open(storage).unwrap();
        assert_eq!(catalog.products_by(&FarmerId("f1".to_string())).len(), 2);
        assert!(catalog.products_by(&FarmerId("nobody".to_string())).is_empty());
    }

    #[test]
    fn test_catalog_open_reports_malformed_data() {
        let storage = storage();
        storage.write(PRODUCTS_KEY, "{broken").unwrap();

        match CatalogStore::open(storage) {
            Err(StorageError::Malformed { key, .. }) => assert_eq!(key, PRODUCTS_KEY),
            other => panic!("expected malformed error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_cart_add_same_product_twice_merges_quantity() {
        let mut cart = CartStore::new();
        cart.add(product("1", "Basmati", 320));
        cart.add(product("1", "Basmati", 320));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_cart_remove_drops_whole_line() {
        let mut cart = CartStore::new();
        cart.add(product("1", "Basmati", 320));
        cart.add(product("1", "Basmati", 320));
        cart.add(product("2", "Mangoes", 180));

        cart.remove(&ProductId("1".to_string()));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product.name, "Mangoes");
    }

    #[test]
    fn test_cart_remove_unknown_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add(product("1", "Basmati", 320));

        cart.remove(&ProductId("missing".to_string()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        let mut cart = CartStore::new();
        cart.add(product("1", "Basmati", 320)); // 368
        cart.add(product("2", "Mangoes", 180)); // 207
        cart.add(product("2", "Mangoes", 180)); // quantity 2

        assert_eq!(cart.total(), 368 + 207 * 2);
    }

    #[test]
    fn test_cart_total_saturates_on_extreme_prices() {
        let mut cart = CartStore::new();
        cart.add(product("x1", "Bulk Wheat", u64::MAX));
        cart.add(product("x2", "Bulk Rice", u64::MAX));

        assert_eq!(cart.total(), u64::MAX);
    }

    #[test]
    fn test_cart_checkout_clears_everything() {
        let mut cart = CartStore::new();
        cart.add(product("1", "Basmati", 320));
        cart.add(product("2", "Mangoes", 180));

        cart.checkout();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_cart_keeps_price_snapshot() {
        let mut cart = CartStore::new();
        let mut original = product("1", "Basmati", 320);
        cart.add(original.clone());

        // A later catalog edit must not touch the line already in the cart.
        original.consumer_price = 999;
        assert_eq!(cart.items()[0].product.consumer_price, 368);
    }

    #[test]
    fn test_session_open_empty_is_logged_out() {
        let session = SessionStore::open(storage()).unwrap();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_session_login_persists_across_reopen() {
        let storage = storage();
        let mut session = SessionStore::open(storage.clone()).unwrap();
        session.login(farmer("f9", "Returning Farmer")).unwrap();

        let reopened = SessionStore::open(storage).unwrap();
        assert_eq!(reopened.current().unwrap().name, "Returning Farmer");
    }

    #[test]
    fn test_session_login_replaces_existing() {
        let mut session = SessionStore::open(storage()).unwrap();
        session.login(farmer("f1", "First")).unwrap();
        session.login(farmer("f2", "Second")).unwrap();

        assert_eq!(session.current().unwrap().name, "Second");
    }

    #[test]
    fn test_session_logout_persists_null() {
        let storage = storage();
        let mut session = SessionStore::open(storage.clone()).unwrap();
        session.login(farmer("f1", "First")).unwrap();
        session.logout().unwrap();

        assert!(session.current().is_none());
        assert_eq!(storage.read(SESSION_KEY).unwrap().unwrap(), "null");

        let reopened = SessionStore::open(storage).unwrap();
        assert!(reopened.current().is_none());
    }
}
