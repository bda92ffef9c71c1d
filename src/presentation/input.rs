use crate::application::{App, HarvestField, View};
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // An open alert swallows everything except its dismissal.
        if app.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                app.dismiss_alert();
            }
            return;
        }

        match app.view {
            View::Home => Self::handle_home(app, key),
            View::Marketplace => Self::handle_marketplace(app, key),
            View::ProductDetails => Self::handle_product_details(app, key),
            View::FarmerProfile => Self::handle_farmer_profile(app, key),
            View::FarmerPortal => Self::handle_farmer_portal(app, key, modifiers),
            View::Cart => Self::handle_cart(app, key),
        }
    }

    /// Global view switching shared by the browsing views.
    fn handle_nav(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('h') => app.navigate(View::Home),
            KeyCode::Char('m') => app.navigate(View::Marketplace),
            KeyCode::Char('f') => app.navigate(View::FarmerPortal),
            KeyCode::Char('c') => app.navigate(View::Cart),
            _ => {}
        }
    }

    fn handle_home(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.navigate(View::Marketplace),
            _ => Self::handle_nav(app, key),
        }
    }

    fn handle_marketplace(app: &mut App, key: KeyCode) {
        if app.searching {
            match key {
                KeyCode::Enter | KeyCode::Esc => {
                    app.searching = false;
                }
                KeyCode::Backspace => {
                    app.search_term.pop();
                    app.refresh_marketplace();
                }
                KeyCode::Char(c) => {
                    app.search_term.push(c);
                    app.refresh_marketplace();
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('/') => {
                app.searching = true;
            }
            KeyCode::Tab => {
                app.category_filter = app.category_filter.next();
                app.refresh_marketplace();
            }
            KeyCode::BackTab => {
                app.category_filter = app.category_filter.prev();
                app.refresh_marketplace();
            }
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Enter => {
                if let Some(product) = app.selected_marketplace_product().cloned() {
                    app.open_product(product);
                }
            }
            KeyCode::Char('a') => {
                if let Some(product) = app.selected_marketplace_product().cloned() {
                    app.add_to_cart(product);
                }
            }
            KeyCode::Char('v') => {
                if let Some(product) = app.selected_marketplace_product() {
                    let id = product.farmer_id.clone();
                    app.open_farmer(&id);
                }
            }
            KeyCode::Esc => app.navigate(View::Home),
            _ => Self::handle_nav(app, key),
        }
    }

    fn handle_product_details(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Left => app.prev_media(),
            KeyCode::Right => app.next_media(),
            KeyCode::Char('a') => {
                if let Some(product) = app.selected_product.clone() {
                    app.add_to_cart(product);
                }
            }
            KeyCode::Char('v') => {
                if let Some(product) = &app.selected_product {
                    let id = product.farmer_id.clone();
                    app.open_farmer(&id);
                }
            }
            KeyCode::Esc => app.navigate(View::Marketplace),
            _ => Self::handle_nav(app, key),
        }
    }

    fn handle_farmer_profile(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Enter => {
                if let Some(product) = app.profile_selected_product() {
                    app.open_product(product);
                }
            }
            KeyCode::Char('a') => {
                if let Some(product) = app.profile_selected_product() {
                    app.add_to_cart(product);
                }
            }
            KeyCode::Char('y') => {
                if let Some(farmer) = &app.selected_farmer {
                    let name = farmer.name.clone();
                    let phone = farmer.phone.clone();
                    app.status_message =
                        Some(match Clipboard::new().and_then(|mut cb| cb.set_text(phone)) {
                            Ok(()) => format!("Copied {}'s phone to clipboard", name),
                            Err(e) => format!("Clipboard failed: {}", e),
                        });
                }
            }
            KeyCode::Char('w') => {
                if let Some(farmer) = &app.selected_farmer {
                    if farmer.whatsapp_enabled {
                        let link = farmer.whatsapp_link();
                        app.status_message =
                            Some(match Clipboard::new().and_then(|mut cb| cb.set_text(link)) {
                                Ok(()) => "Copied WhatsApp link to clipboard".to_string(),
                                Err(e) => format!("Clipboard failed: {}", e),
                            });
                    } else {
                        app.status_message =
                            Some("WhatsApp not enabled for this farmer".to_string());
                    }
                }
            }
            KeyCode::Esc => app.navigate(View::Marketplace),
            _ => Self::handle_nav(app, key),
        }
    }

    fn handle_farmer_portal(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if app.current_farmer().is_none() {
            Self::handle_registration_form(app, key);
        } else if app.show_listing_form {
            Self::handle_listing_form(app, key, modifiers);
        } else {
            Self::handle_dashboard(app, key, modifiers);
        }
    }

    fn handle_registration_form(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_registration(),
            KeyCode::Esc => app.navigate(View::Home),
            KeyCode::Tab | KeyCode::Down => app.registration.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.registration.focus_prev(),
            KeyCode::Backspace => app.registration.backspace(),
            KeyCode::Char(c) => app.registration.insert_char(c),
            _ => {}
        }
    }

    fn handle_listing_form(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('p') => {
                    app.suggest_price();
                    return;
                }
                KeyCode::Char('d') => {
                    app.suggest_description();
                    return;
                }
                KeyCode::Char('r') => {
                    app.harvest.remove_last_media();
                    return;
                }
                _ => {}
            }
        }

        match key {
            KeyCode::Esc => {
                // Closing the form discards the draft.
                app.harvest.clear();
                app.show_listing_form = false;
            }
            KeyCode::Tab | KeyCode::Down => app.harvest.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.harvest.focus_prev(),
            KeyCode::Left => {
                if app.harvest.focus == HarvestField::Category {
                    app.harvest.prev_category();
                }
            }
            KeyCode::Right => {
                if app.harvest.focus == HarvestField::Category {
                    app.harvest.next_category();
                }
            }
            KeyCode::Enter => {
                if app.harvest.focus == HarvestField::Media {
                    app.harvest.add_media();
                } else {
                    app.submit_harvest();
                }
            }
            KeyCode::Backspace => app.harvest.backspace(),
            KeyCode::Char(c) => app.harvest.insert_char(c),
            _ => {}
        }
    }

    fn handle_dashboard(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.export_harvests();
                return;
            }
        }

        match key {
            KeyCode::Char('n') => {
                app.show_listing_form = true;
            }
            KeyCode::Char('t') => app.load_marketing_tips(),
            KeyCode::Char('l') => app.logout(),
            KeyCode::Esc => app.navigate(View::Home),
            _ => Self::handle_nav(app, key),
        }
    }

    fn handle_cart(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Char('d') => app.remove_selected_cart_item(),
            KeyCode::Enter => {
                if !app.cart.is_empty() {
                    app.checkout();
                }
            }
            KeyCode::Esc => app.navigate(View::Home),
            _ => Self::handle_nav(app, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{AppConfig, DEFAULT_GEMINI_MODEL, MemoryStorage};
    use std::rc::Rc;

    fn test_app() -> App {
        let config = AppConfig {
            data_dir: "unused".into(),
            log_file: "unused".into(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            viewer_location: None,
        };
        App::with_storage(Rc::new(MemoryStorage::new()), &config).unwrap()
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn register_via_keys(app: &mut App) {
        press(app, KeyCode::Char('f'));
        type_str(app, "Ali Raza");
        press(app, KeyCode::Tab);
        type_str(app, "Multan, Punjab");
        press(app, KeyCode::Tab);
        type_str(app, "03007654321");
        press(app, KeyCode::Tab);
        type_str(app, "Mangoes");
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_nav_keys_switch_views() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.view, View::Marketplace);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.view, View::Cart);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.view, View::Home);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.view, View::FarmerPortal);
    }

    #[test]
    fn test_alert_swallows_keys_until_dismissed() {
        let mut app = test_app();
        app.alert = Some("popup".to_string());

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.view, View::Home);
        assert!(app.alert.is_some());

        press(&mut app, KeyCode::Enter);
        assert!(app.alert.is_none());

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.view, View::Marketplace);
    }

    #[test]
    fn test_search_narrows_live_while_typing() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('/'));
        assert!(app.searching);

        type_str(&mut app, "mango");
        assert_eq!(app.search_term, "mango");
        assert_eq!(app.marketplace.len(), 1);
        assert_eq!(app.marketplace[0].name, "Sindhri Mangoes");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_term, "mang");

        press(&mut app, KeyCode::Enter);
        assert!(!app.searching);
        assert_eq!(app.search_term, "mang");
    }

    #[test]
    fn test_tab_cycles_category_filter() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.category_filter.to_string(), "Vegetables");
        assert_eq!(app.marketplace.len(), 1);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.category_filter.to_string(), "All");
        assert_eq!(app.marketplace.len(), 3);
    }

    #[test]
    fn test_enter_opens_details_and_a_adds_to_cart() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.cart.len(), 1);
        assert_eq!(app.cart.items()[0].product.name, "Sindhri Mangoes");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::ProductDetails);
        assert_eq!(
            app.selected_product.as_ref().unwrap().name,
            "Sindhri Mangoes"
        );
    }

    #[test]
    fn test_details_arrows_cycle_media() {
        let mut app = test_app();
        let mut product = app.marketplace[0].clone();
        product.media = vec![
            "https://example.com/a.jpg".to_string(),
            "https://example.com/b.jpg".to_string(),
        ];
        app.open_product(product);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.active_media, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.active_media, 0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.active_media, 1);
    }

    #[test]
    fn test_v_opens_farmer_profile_from_marketplace() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.view, View::FarmerProfile);
        assert_eq!(app.selected_farmer.as_ref().unwrap().name, "Muhammad Ahmed");
    }

    #[test]
    fn test_registration_keys_fill_and_submit() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.view, View::FarmerPortal);

        // Guest portal: every printable key goes into the form.
        type_str(&mut app, "Ali Raza");
        assert_eq!(app.registration.name, "Ali Raza");

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Multan, Punjab");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "03007654321");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Mangoes");

        press(&mut app, KeyCode::Enter);
        assert!(app.current_farmer().is_some());
        assert_eq!(app.view, View::FarmerPortal);
    }

    #[test]
    fn test_registration_submit_with_missing_fields_alerts() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.alert.as_deref(), Some("Full Name is required"));
        assert!(app.current_farmer().is_none());
    }

    #[test]
    fn test_dashboard_opens_and_discards_listing_form() {
        let mut app = test_app();
        register_via_keys(&mut app);

        press(&mut app, KeyCode::Char('n'));
        assert!(app.show_listing_form);

        type_str(&mut app, "Okra");
        assert_eq!(app.harvest.name, "Okra");

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_listing_form);
        assert_eq!(app.harvest.name, "");
    }

    #[test]
    fn test_listing_form_enter_adds_media_when_focused() {
        let mut app = test_app();
        register_via_keys(&mut app);
        press(&mut app, KeyCode::Char('n'));

        app.harvest.focus = HarvestField::Media;
        type_str(&mut app, "https://example.com/okra.jpg");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.harvest.media.len(), 1);
        assert_eq!(app.harvest.media_input, "");
        // Still on the form, not submitted.
        assert!(app.show_listing_form);
    }

    #[test]
    fn test_listing_form_category_arrows() {
        let mut app = test_app();
        register_via_keys(&mut app);
        press(&mut app, KeyCode::Char('n'));

        app.harvest.focus = HarvestField::Category;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.harvest.category.to_string(), "Fruits");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.harvest.category.to_string(), "Vegetables");
    }

    #[test]
    fn test_logout_key_returns_home() {
        let mut app = test_app();
        register_via_keys(&mut app);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.view, View::Home);
        assert!(app.current_farmer().is_none());
    }

    #[test]
    fn test_cart_enter_checks_out_only_with_items() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Cart);
        assert!(app.alert.is_none());

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Home);
        assert!(app.cart.is_empty());
        assert_eq!(
            app.alert.as_deref(),
            Some("Order submitted to local farmers! They will contact you via phone.")
        );
    }

    #[test]
    fn test_cart_d_removes_selected_line() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.cart.len(), 2);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.cart.len(), 1);
    }
}
