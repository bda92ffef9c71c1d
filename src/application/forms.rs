//! Editable form state for the farmer portal.
//!
//! Forms hold raw text buffers plus a focus marker; validation happens on
//! submit and reports the first problem in the order the fields appear on
//! screen. The media check always runs last so a fully filled listing
//! without a single image still gets the mandatory-image alert.

use crate::domain::{Category, MAX_BASE_PRICE, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationField {
    #[default]
    Name,
    Location,
    Phone,
    Crops,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 4] = [
        RegistrationField::Name,
        RegistrationField::Location,
        RegistrationField::Phone,
        RegistrationField::Crops,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegistrationField::Name => "Full Name",
            RegistrationField::Location => "Harvest Location",
            RegistrationField::Phone => "Active WhatsApp Phone",
            RegistrationField::Crops => "Main Harvest",
        }
    }
}

/// Buffer for the join-as-farmer form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub crops: String,
    pub focus: RegistrationField,
}

impl RegistrationForm {
    pub fn focus_next(&mut self) {
        let i = RegistrationField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = RegistrationField::ALL[(i + 1) % RegistrationField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let len = RegistrationField::ALL.len();
        let i = RegistrationField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = RegistrationField::ALL[(i + len - 1) % len];
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.focus {
            RegistrationField::Name => &mut self.name,
            RegistrationField::Location => &mut self.location,
            RegistrationField::Phone => &mut self.phone,
            RegistrationField::Crops => &mut self.crops,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.active_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_value_mut().pop();
    }

    /// First missing field in screen order, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in RegistrationField::ALL {
            let value = match field {
                RegistrationField::Name => &self.name,
                RegistrationField::Location => &self.location,
                RegistrationField::Phone => &self.phone,
                RegistrationField::Crops => &self.crops,
            };
            if value.trim().is_empty() {
                return Err(ValidationError::FieldRequired(field.label()));
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarvestField {
    #[default]
    Name,
    Price,
    Category,
    Unit,
    Media,
    Description,
}

impl HarvestField {
    pub const ALL: [HarvestField; 6] = [
        HarvestField::Name,
        HarvestField::Price,
        HarvestField::Category,
        HarvestField::Unit,
        HarvestField::Media,
        HarvestField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HarvestField::Name => "Harvest Name",
            HarvestField::Price => "Base Price",
            HarvestField::Category => "Category",
            HarvestField::Unit => "Unit",
            HarvestField::Media => "Media URLs",
            HarvestField::Description => "Listing Story",
        }
    }
}

/// Buffer for the post-a-harvest form.
#[derive(Debug, Clone)]
pub struct HarvestForm {
    pub name: String,
    pub price_input: String,
    pub category: Category,
    pub unit: String,
    pub description: String,
    pub media: Vec<String>,
    pub media_input: String,
    pub focus: HarvestField,
}

impl Default for HarvestForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price_input: String::new(),
            category: Category::Vegetables,
            unit: "kg".to_string(),
            description: String::new(),
            media: Vec::new(),
            media_input: String::new(),
            focus: HarvestField::default(),
        }
    }
}

impl HarvestForm {
    pub fn focus_next(&mut self) {
        let i = HarvestField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = HarvestField::ALL[(i + 1) % HarvestField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let len = HarvestField::ALL.len();
        let i = HarvestField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = HarvestField::ALL[(i + len - 1) % len];
    }

    /// The text buffer under focus, or `None` when the category selector
    /// is focused.
    pub fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            HarvestField::Name => Some(&mut self.name),
            HarvestField::Price => Some(&mut self.price_input),
            HarvestField::Category => None,
            HarvestField::Unit => Some(&mut self.unit),
            HarvestField::Media => Some(&mut self.media_input),
            HarvestField::Description => Some(&mut self.description),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(value) = self.active_value_mut() {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.pop();
        }
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn prev_category(&mut self) {
        self.category = self.category.prev();
    }

    /// Moves the media input buffer into the media list.
    pub fn add_media(&mut self) {
        let url = self.media_input.trim().to_string();
        if !url.is_empty() {
            self.media.push(url);
        }
        self.media_input.clear();
    }

    pub fn remove_last_media(&mut self) {
        self.media.pop();
    }

    pub fn base_price(&self) -> Option<u64> {
        self.price_input.trim().parse().ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::FieldRequired(HarvestField::Name.label()));
        }
        if self.price_input.trim().is_empty() {
            return Err(ValidationError::FieldRequired(HarvestField::Price.label()));
        }
        match self.base_price() {
            Some(p) if p > MAX_BASE_PRICE => return Err(ValidationError::PriceTooHigh),
            Some(p) if p > 0 => {}
            _ => return Err(ValidationError::InvalidPrice),
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::FieldRequired(HarvestField::Unit.label()));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::FieldRequired(
                HarvestField::Description.label(),
            ));
        }
        if self.media.is_empty() {
            return Err(ValidationError::MediaRequired);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_harvest_form() -> HarvestForm {
        HarvestForm {
            name: "Fresh Okra".to_string(),
            price_input: "90".to_string(),
            category: Category::Vegetables,
            unit: "kg".to_string(),
            description: "Picked this morning.".to_string(),
            media: vec!["https://example.com/okra.jpg".to_string()],
            media_input: String::new(),
            focus: HarvestField::Name,
        }
    }

    #[test]
    fn test_registration_validate_reports_first_missing_field() {
        let mut form = RegistrationForm::default();
        assert_eq!(
            form.validate(),
            Err(ValidationError::FieldRequired("Full Name"))
        );

        form.name = "Ali Raza".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::FieldRequired("Harvest Location"))
        );

        form.location = "Multan, Punjab".to_string();
        form.phone = "03007654321".to_string();
        form.crops = "Mangoes".to_string();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_registration_whitespace_only_counts_as_missing() {
        let mut form = RegistrationForm::default();
        form.name = "   ".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::FieldRequired("Full Name"))
        );
    }

    #[test]
    fn test_registration_focus_cycles_and_wraps() {
        let mut form = RegistrationForm::default();
        assert_eq!(form.focus, RegistrationField::Name);
        for _ in 0..RegistrationField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focus, RegistrationField::Name);
        form.focus_prev();
        assert_eq!(form.focus, RegistrationField::Crops);
    }

    #[test]
    fn test_registration_typing_routes_to_focused_field() {
        let mut form = RegistrationForm::default();
        form.insert_char('A');
        form.insert_char('l');
        form.insert_char('i');
        form.focus_next();
        form.insert_char('X');
        form.backspace();

        assert_eq!(form.name, "Ali");
        assert_eq!(form.location, "");
    }

    #[test]
    fn test_harvest_validate_passes_when_filled() {
        assert_eq!(filled_harvest_form().validate(), Ok(()));
    }

    #[test]
    fn test_harvest_missing_media_is_last_check() {
        let mut form = filled_harvest_form();
        form.media.clear();
        assert_eq!(form.validate(), Err(ValidationError::MediaRequired));
    }

    #[test]
    fn test_harvest_name_checked_before_media() {
        let mut form = filled_harvest_form();
        form.name.clear();
        form.media.clear();
        assert_eq!(
            form.validate(),
            Err(ValidationError::FieldRequired("Harvest Name"))
        );
    }

    #[test]
    fn test_harvest_price_must_be_positive_integer() {
        let mut form = filled_harvest_form();
        form.price_input = "0".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPrice));

        form.price_input = "ninety".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPrice));

        form.price_input = String::new();
        assert_eq!(
            form.validate(),
            Err(ValidationError::FieldRequired("Base Price"))
        );
    }

    #[test]
    fn test_harvest_price_above_cap_is_rejected() {
        let mut form = filled_harvest_form();
        form.price_input = "200000000000000000".to_string();
        assert_eq!(form.validate(), Err(ValidationError::PriceTooHigh));

        form.price_input = (MAX_BASE_PRICE + 1).to_string();
        assert_eq!(form.validate(), Err(ValidationError::PriceTooHigh));

        form.price_input = MAX_BASE_PRICE.to_string();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_harvest_add_media_trims_and_clears_input() {
        let mut form = HarvestForm::default();
        form.media_input = "  https://example.com/a.jpg  ".to_string();
        form.add_media();

        assert_eq!(form.media, vec!["https://example.com/a.jpg".to_string()]);
        assert_eq!(form.media_input, "");

        form.media_input = "   ".to_string();
        form.add_media();
        assert_eq!(form.media.len(), 1);
    }

    #[test]
    fn test_harvest_remove_last_media() {
        let mut form = filled_harvest_form();
        form.media.push("https://example.com/b.jpg".to_string());
        form.remove_last_media();
        assert_eq!(form.media.len(), 1);
        form.remove_last_media();
        form.remove_last_media();
        assert!(form.media.is_empty());
    }

    #[test]
    fn test_harvest_typing_skips_category_selector() {
        let mut form = HarvestForm::default();
        form.focus = HarvestField::Category;
        form.insert_char('x');
        form.backspace();

        form.next_category();
        assert_eq!(form.category, Category::Fruits);
        form.prev_category();
        assert_eq!(form.category, Category::Vegetables);
    }

    #[test]
    fn test_harvest_clear_restores_defaults() {
        let mut form = filled_harvest_form();
        form.clear();
        assert_eq!(form.name, "");
        assert_eq!(form.unit, "kg");
        assert_eq!(form.category, Category::Vegetables);
        assert!(form.media.is_empty());
    }
}
