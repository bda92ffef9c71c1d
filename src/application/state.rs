//! Application state management for the marketplace client.
//!
//! This module contains the main application state: which view is on
//! screen, the derived marketplace listing, form buffers, and the
//! orchestration between stores, the Gemini client and the exporter.

use std::path::Path;
use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::application::forms::{HarvestForm, RegistrationForm};
use crate::application::stores::{CartStore, CatalogStore, SessionStore};
use crate::domain::{
    Category, CategoryFilter, Farmer, FarmerId, GeoLocation, Product, ValidationError, browse,
};
use crate::infrastructure::{
    AppConfig, EXPORT_FILENAME, FALLBACK_BIO, FALLBACK_DESCRIPTION, FALLBACK_PRICE, FileStorage,
    GeminiClient, HarvestExporter, MarketingTip, StorageBackend, StorageError, fallback_tips,
};

/// Represents the screen currently shown.
///
/// Navigation between views never loses store state; a view only decides
/// what is rendered and how keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Landing screen with the brand pitch
    Home,
    /// Browsable product listing with search and category filter
    Marketplace,
    /// Media and full details for one product
    ProductDetails,
    /// A farmer's public profile and their listings
    FarmerProfile,
    /// Registration, or the seller dashboard once logged in
    FarmerPortal,
    /// The shopping cart and checkout
    Cart,
}

/// Main application state.
///
/// Holds the three stores, the optional Gemini client, and everything the
/// terminal UI needs to render the current view.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use kissankart::application::{App, View};
/// use kissankart::infrastructure::{AppConfig, DEFAULT_GEMINI_MODEL, MemoryStorage};
///
/// let config = AppConfig {
///     data_dir: "unused".into(),
///     log_file: "unused".into(),
///     gemini_api_key: None,
///     gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
///     viewer_location: None,
/// };
/// let app = App::with_storage(Rc::new(MemoryStorage::new()), &config).unwrap();
/// assert_eq!(app.view, View::Home);
/// assert!(!app.marketplace.is_empty());
/// ```
pub struct App {
    /// Product and farmer catalog, persisted on every change
    pub catalog: CatalogStore,
    /// In-memory shopping cart
    pub cart: CartStore,
    /// Logged-in farmer, persisted across restarts
    pub session: SessionStore,
    /// Gemini client, present only when an API key is configured
    pub ai: Option<GeminiClient>,
    /// Viewer coordinates used for proximity ordering
    pub viewer_location: Option<GeoLocation>,
    /// Screen currently shown
    pub view: View,
    /// Temporary status message shown in the status bar
    pub status_message: Option<String>,
    /// Blocking alert shown in a popup until dismissed
    pub alert: Option<String>,
    /// Current marketplace search term
    pub search_term: String,
    /// Current marketplace category filter
    pub category_filter: CategoryFilter,
    /// Derived marketplace listing for the current search and filter
    pub marketplace: Vec<Product>,
    /// Selected row in the marketplace listing
    pub marketplace_selected: usize,
    /// Whether keystrokes go into the search box
    pub searching: bool,
    /// Product snapshot shown on the details view
    pub selected_product: Option<Product>,
    /// Index of the media URL shown on the details view
    pub active_media: usize,
    /// Farmer shown on the profile view
    pub selected_farmer: Option<Farmer>,
    /// Selected row in the profile's listing table
    pub profile_selected: usize,
    /// Selected row in the cart table
    pub cart_selected: usize,
    /// Whether the post-a-harvest form is open on the portal
    pub show_listing_form: bool,
    /// Buffer for the registration form
    pub registration: RegistrationForm,
    /// Buffer for the post-a-harvest form
    pub harvest: HarvestForm,
    /// Last fetched marketing tips for the dashboard
    pub marketing_tips: Vec<MarketingTip>,
}

impl App {
    /// Opens the on-disk stores under the configured data directory and
    /// builds the initial state.
    pub fn init(config: &AppConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        Self::with_storage(Rc::new(storage), config)
    }

    /// Builds the application on top of an already-open storage backend.
    pub fn with_storage(
        storage: Rc<dyn StorageBackend>,
        config: &AppConfig,
    ) -> Result<Self, StorageError> {
        let catalog = CatalogStore::open(storage.clone())?;
        let session = SessionStore::open(storage)?;
        let ai = match &config.gemini_api_key {
            Some(key) => Some(GeminiClient::new(key.clone(), config.gemini_model.clone())),
            None => {
                info!("GEMINI_API_KEY not set, AI helpers disabled");
                None
            }
        };

        let mut app = Self {
            catalog,
            cart: CartStore::new(),
            session,
            ai,
            viewer_location: config.viewer_location,
            view: View::Home,
            status_message: None,
            alert: None,
            search_term: String::new(),
            category_filter: CategoryFilter::default(),
            marketplace: Vec::new(),
            marketplace_selected: 0,
            searching: false,
            selected_product: None,
            active_media: 0,
            selected_farmer: None,
            profile_selected: 0,
            cart_selected: 0,
            show_listing_form: false,
            registration: RegistrationForm::default(),
            harvest: HarvestForm::default(),
            marketing_tips: Vec::new(),
        };
        app.refresh_marketplace();
        Ok(app)
    }

    /// Recomputes the marketplace listing from the catalog and the current
    /// search term, category filter and viewer location, clamping the
    /// selection to the new listing.
    pub fn refresh_marketplace(&mut self) {
        self.marketplace = browse(
            self.catalog.products(),
            &self.search_term,
            self.category_filter,
            self.viewer_location.as_ref(),
        );
        let last = self.marketplace.len().saturating_sub(1);
        self.marketplace_selected = self.marketplace_selected.min(last);
    }

    /// Switches to another view, clearing any stale status message. The
    /// marketplace listing is refreshed on entry so new harvests show up.
    pub fn navigate(&mut self, view: View) {
        self.status_message = None;
        self.view = view;
        if view == View::Marketplace {
            self.refresh_marketplace();
        }
    }

    /// Moves the selection down in whichever list the current view shows.
    pub fn select_next(&mut self) {
        match self.view {
            View::Marketplace => {
                if self.marketplace_selected + 1 < self.marketplace.len() {
                    self.marketplace_selected += 1;
                }
            }
            View::FarmerProfile => {
                if self.profile_selected + 1 < self.profile_products().len() {
                    self.profile_selected += 1;
                }
            }
            View::Cart => {
                if self.cart_selected + 1 < self.cart.len() {
                    self.cart_selected += 1;
                }
            }
            _ => {}
        }
    }

    /// Moves the selection up in whichever list the current view shows.
    pub fn select_prev(&mut self) {
        match self.view {
            View::Marketplace => {
                self.marketplace_selected = self.marketplace_selected.saturating_sub(1);
            }
            View::FarmerProfile => {
                self.profile_selected = self.profile_selected.saturating_sub(1);
            }
            View::Cart => {
                self.cart_selected = self.cart_selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn selected_marketplace_product(&self) -> Option<&Product> {
        self.marketplace.get(self.marketplace_selected)
    }

    /// Opens the details view on a product snapshot.
    pub fn open_product(&mut self, product: Product) {
        self.selected_product = Some(product);
        self.active_media = 0;
        self.navigate(View::ProductDetails);
    }

    /// Opens the profile view for a farmer from the catalog. Unknown ids
    /// are ignored, which can happen for listings whose farmer was stored
    /// before the directory existed.
    pub fn open_farmer(&mut self, id: &FarmerId) {
        match self.catalog.farmer(id) {
            Some(farmer) => {
                self.selected_farmer = Some(farmer.clone());
                self.profile_selected = 0;
                self.navigate(View::FarmerProfile);
            }
            None => debug!(farmer_id = %id, "no profile for farmer"),
        }
    }

    /// Shows the next media URL on the details view, wrapping around.
    pub fn next_media(&mut self) {
        if let Some(product) = &self.selected_product {
            let len = product.media.len();
            if len > 0 {
                self.active_media = (self.active_media + 1) % len;
            }
        }
    }

    /// Shows the previous media URL on the details view, wrapping around.
    pub fn prev_media(&mut self) {
        if let Some(product) = &self.selected_product {
            let len = product.media.len();
            if len > 0 {
                self.active_media = (self.active_media + len - 1) % len;
            }
        }
    }

    /// Adds one unit of the product to the cart and confirms it in the
    /// status bar.
    pub fn add_to_cart(&mut self, product: Product) {
        let name = product.name.clone();
        self.cart.add(product);
        self.status_message = Some(format!("Added {} to Kart!", name));
    }

    /// Removes the selected cart line and keeps the selection in range.
    pub fn remove_selected_cart_item(&mut self) {
        if let Some(item) = self.cart.items().get(self.cart_selected) {
            let id = item.product.id.clone();
            self.cart.remove(&id);
            if self.cart_selected >= self.cart.len() {
                self.cart_selected = self.cart.len().saturating_sub(1);
            }
        }
    }

    /// Completes checkout: empties the cart unconditionally and confirms
    /// with an alert on the home screen. There is no payment step; orders
    /// are settled directly between buyer and farmer.
    pub fn checkout(&mut self) {
        self.cart.checkout();
        self.cart_selected = 0;
        self.navigate(View::Home);
        self.alert =
            Some("Order submitted to local farmers! They will contact you via phone.".to_string());
        info!("checkout complete");
    }

    /// Validates and submits the registration form. On success the new
    /// farmer is added to the directory, logged in, and lands on their
    /// dashboard. The bio comes from Gemini when available, otherwise the
    /// stock fallback copy.
    pub fn submit_registration(&mut self) {
        if let Err(e) = self.registration.validate() {
            self.alert = Some(e.to_string());
            return;
        }

        let name = self.registration.name.trim().to_string();
        let location = self.registration.location.trim().to_string();
        let phone = self.registration.phone.trim().to_string();
        let crops = self.registration.crops.trim().to_string();
        let bio = self.generate_bio(&name, &location, &crops);
        let farmer = Farmer::register(name, location, phone, bio, Some(mock_coordinates()));

        let mut save_warning = None;
        if let Err(e) = self.catalog.add_farmer(farmer.clone()) {
            warn!(error = %e, "registered farmer not persisted");
            save_warning = Some(format!("Save failed: {}", e));
        }
        if let Err(e) = self.session.login(farmer) {
            warn!(error = %e, "session not persisted");
        }

        self.registration.clear();
        self.navigate(View::FarmerPortal);
        self.status_message = save_warning;
    }

    fn generate_bio(&self, name: &str, location: &str, crops: &str) -> String {
        match &self.ai {
            Some(client) => match client.farmer_bio(name, location, crops) {
                Ok(bio) => bio,
                Err(e) => {
                    warn!(error = %e, "bio generation failed, using fallback");
                    FALLBACK_BIO.to_string()
                }
            },
            None => FALLBACK_BIO.to_string(),
        }
    }

    /// Validates and posts the harvest form as a new listing for the
    /// logged-in farmer. The listing goes live at the front of the
    /// marketplace immediately.
    pub fn submit_harvest(&mut self) {
        let Some(farmer) = self.session.current().cloned() else {
            return;
        };
        if let Err(e) = self.harvest.validate() {
            self.alert = Some(e.to_string());
            return;
        }

        let product = Product::harvest(
            &farmer,
            self.harvest.name.trim().to_string(),
            self.harvest.category,
            self.harvest.unit.trim().to_string(),
            self.harvest.base_price().unwrap_or(0),
            self.harvest.description.trim().to_string(),
            self.harvest.media.clone(),
        );
        if let Err(e) = self.catalog.add_product(product) {
            warn!(error = %e, "harvest not persisted");
            self.status_message = Some(format!("Save failed: {}", e));
        }

        self.harvest.clear();
        self.show_listing_form = false;
        self.refresh_marketplace();
        self.alert = Some("Harvest Posted Live!".to_string());
    }

    /// Fills the harvest price field with a Gemini-suggested base price.
    /// Falls back to a flat suggestion when the model call fails.
    pub fn suggest_price(&mut self) {
        if self.harvest.name.trim().is_empty() {
            self.alert = Some(ValidationError::NameRequired.to_string());
            return;
        }
        let Some(client) = &self.ai else {
            self.status_message = Some("AI helpers need GEMINI_API_KEY".to_string());
            return;
        };
        match client.price_suggestion(self.harvest.name.trim()) {
            Ok(price) => {
                self.harvest.price_input = price.to_string();
                self.status_message = Some(format!("Suggested base price: Rs {}", price));
            }
            Err(e) => {
                warn!(error = %e, "price suggestion failed, using fallback");
                self.harvest.price_input = FALLBACK_PRICE.to_string();
                self.status_message = Some(format!("Price suggestion failed: {}", e));
            }
        }
    }

    /// Fills the harvest description field with Gemini-generated listing
    /// copy. Falls back to the stock description when the call fails.
    pub fn suggest_description(&mut self) {
        if self.harvest.name.trim().is_empty() {
            self.alert = Some(ValidationError::NameRequired.to_string());
            return;
        }
        let Some(client) = &self.ai else {
            self.status_message = Some("AI helpers need GEMINI_API_KEY".to_string());
            return;
        };
        match client.product_description(self.harvest.name.trim(), self.harvest.category, "") {
            Ok(text) => {
                self.harvest.description = text;
                self.status_message = Some("Description generated".to_string());
            }
            Err(e) => {
                warn!(error = %e, "description generation failed, using fallback");
                self.harvest.description = FALLBACK_DESCRIPTION.to_string();
                self.status_message = Some(format!("Description failed: {}", e));
            }
        }
    }

    /// Refreshes the dashboard marketing tips for the farmer's latest
    /// listing category. The stock tips stand in whenever the model is
    /// unavailable.
    pub fn load_marketing_tips(&mut self) {
        let category = self
            .session
            .current()
            .and_then(|f| self.catalog.products().iter().find(|p| p.farmer_id == f.id))
            .map(|p| p.category)
            .unwrap_or(Category::Vegetables);

        let Some(client) = &self.ai else {
            self.marketing_tips = fallback_tips();
            self.status_message = Some("AI helpers need GEMINI_API_KEY".to_string());
            return;
        };
        match client.marketing_tips(category) {
            Ok(tips) => {
                self.marketing_tips = tips;
                self.status_message = Some("Marketing tips updated".to_string());
            }
            Err(e) => {
                warn!(error = %e, "marketing tips failed, using fallback");
                self.marketing_tips = fallback_tips();
                self.status_message = Some(format!("Tips request failed: {}", e));
            }
        }
    }

    /// Exports the logged-in farmer's listings to a CSV file in the
    /// working directory.
    pub fn export_harvests(&mut self) {
        let Some(farmer) = self.session.current() else {
            return;
        };
        let mine = self.catalog.products_by(&farmer.id);
        match HarvestExporter::export(&mine, Path::new(EXPORT_FILENAME)) {
            Ok(()) => self.status_message = Some(format!("Exported to {}", EXPORT_FILENAME)),
            Err(e) => self.status_message = Some(format!("Export failed: {}", e)),
        }
    }

    /// Ends the farmer session and returns to the home screen.
    pub fn logout(&mut self) {
        let result = self.session.logout();
        self.navigate(View::Home);
        if let Err(e) = result {
            warn!(error = %e, "logout not persisted");
            self.status_message = Some(format!("Logout not saved: {}", e));
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn current_farmer(&self) -> Option<&Farmer> {
        self.session.current()
    }

    /// Listings of the farmer shown on the profile view.
    pub fn profile_products(&self) -> Vec<Product> {
        self.selected_farmer
            .as_ref()
            .map(|f| self.catalog.products_by(&f.id))
            .unwrap_or_default()
    }

    pub fn profile_selected_product(&self) -> Option<Product> {
        self.profile_products().into_iter().nth(self.profile_selected)
    }

    /// Listings of the logged-in farmer, for the dashboard.
    pub fn my_products(&self) -> Vec<Product> {
        self.session
            .current()
            .map(|f| self.catalog.products_by(&f.id))
            .unwrap_or_default()
    }

    /// Whether keystrokes currently feed a text buffer. Global shortcuts
    /// like quit stay out of the way while this is true.
    pub fn is_text_input_active(&self) -> bool {
        if self.alert.is_some() {
            return true;
        }
        match self.view {
            View::Marketplace => self.searching,
            View::FarmerPortal => self.session.current().is_none() || self.show_listing_form,
            _ => false,
        }
    }
}

/// Coordinates in the Lahore region with jitter, used for newly
/// registered farmers until real geolocation exists.
fn mock_coordinates() -> GeoLocation {
    let mut rng = rand::thread_rng();
    GeoLocation::new(
        31.5204 + rng.gen_range(-1.0..1.0),
        74.3587 + rng.gen_range(-1.0..1.0),
    )
}
