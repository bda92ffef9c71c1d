//! Catalog query services.
//!
//! Pure functions over product slices: marketplace browsing with search,
//! category filtering and proximity ordering, and per-farmer listing lookups.
//! Nothing here mutates state, so callers can re-run queries freely as the
//! search term changes keystroke by keystroke.

use crate::domain::models::{CategoryFilter, FarmerId, GeoLocation, Product};

/// Returns the marketplace view of a catalog: products whose name or
/// description contains the search term (case-insensitively) and whose
/// category passes the filter, ordered by distance from the viewer when a
/// viewer location is known.
///
/// An empty search term matches everything. Products without coordinates
/// sort after every product that has them, and the sort is stable, so
/// equally-distant (or equally-unknown) products keep their catalog order.
///
/// # Examples
///
/// ```
/// use kissankart::domain::{browse, seed_products, CategoryFilter};
///
/// let products = seed_products();
/// let hits = browse(&products, "mango", CategoryFilter::All, None);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Sindhri Mangoes");
/// ```
pub fn browse(
    products: &[Product],
    search: &str,
    category: CategoryFilter,
    viewer: Option<&GeoLocation>,
) -> Vec<Product> {
    let term = search.to_lowercase();
    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| {
            let hit = p.name.to_lowercase().contains(&term)
                || p.description.to_lowercase().contains(&term);
            hit && category.matches(p.category)
        })
        .cloned()
        .collect();

    if let Some(viewer) = viewer {
        results.sort_by(|a, b| {
            let da = distance_to(viewer, a);
            let db = distance_to(viewer, b);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    results
}

fn distance_to(viewer: &GeoLocation, product: &Product) -> f64 {
    product
        .coordinates
        .map(|c| viewer.distance_km(&c))
        .unwrap_or(f64::INFINITY)
}

/// Returns all listings posted by the given farmer, in catalog order.
pub fn products_of(products: &[Product], farmer_id: &FarmerId) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.farmer_id == *farmer_id)
        .cloned()
        .collect()
}
