//! Recommended vehicle models and categories offered when adding to the fleet.
//!
//! Categories are free text in storage; this list only drives the pick menus.

/// A suggested (model, category) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub model: &'static str,
    pub category: &'static str,
}

const fn entry(model: &'static str, category: &'static str) -> CatalogEntry {
    CatalogEntry { model, category }
}

pub static RECOMMENDED_MODELS: [CatalogEntry; 15] = [
    entry("Toyota Avanza", "MPV"),
    entry("Daihatsu Xenia", "MPV"),
    entry("Honda Brio", "Hatchback"),
    entry("Suzuki Ertiga", "MPV"),
    entry("Mitsubishi Pajero", "SUV"),
    entry("Toyota Fortuner", "SUV"),
    entry("Honda Jazz", "Hatchback"),
    entry("Toyota Yaris", "Hatchback"),
    entry("Honda HRV", "SUV"),
    entry("Toyota Innova", "MPV"),
    entry("Honda Civic", "Sedan"),
    entry("Toyota Camry", "Sedan"),
    entry("Mazda CX-5", "SUV"),
    entry("Nissan X-Trail", "SUV"),
    entry("Mitsubishi Xpander", "MPV"),
];

pub static RECOMMENDED_CATEGORIES: [&str; 4] = ["Hatchback", "MPV", "Sedan", "SUV"];

/// Catalog entries for one category, in catalog order.
pub fn models_in_category(category: &str) -> impl Iterator<Item = &'static CatalogEntry> + '_ {
    RECOMMENDED_MODELS
        .iter()
        .filter(move |e| e.category.eq_ignore_ascii_case(category.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_uses_a_recommended_category() {
        for e in RECOMMENDED_MODELS.iter() {
            assert!(RECOMMENDED_CATEGORIES.contains(&e.category), "{}", e.model);
        }
    }

    #[test]
    fn test_models_in_category() {
        let sedans: Vec<_> = models_in_category("sedan").map(|e| e.model).collect();
        assert_eq!(sedans, vec!["Honda Civic", "Toyota Camry"]);
        assert_eq!(models_in_category("Truck").count(), 0);
    }
}
