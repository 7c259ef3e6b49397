use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Colour used for any store not present in [`STORE_COLORS`].
pub const FALLBACK_COLOR: &str = "#808080";

pub static STORE_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Terminal", "#FF0000"),
        ("Patio 1", "#FFFF00"),
        ("Patio 2", "#00FF00"),
        ("Castanheira Q", "#0000FF"),
        ("Castanheira L", "#00FFFF"),
        ("Metropole Q", "#FF00FF"),
        ("Metropole L", "#FFA500"),
        ("Cidade Nova", "#800080"),
        ("Abaete Q", "#804000"),
        ("Abaete L", "#ADD8E6"),
        ("Castanhal", "#FF69B4"),
        ("Parauapebas", "#008000"),
    ])
});

pub fn store_color(store: &str) -> &'static str {
    STORE_COLORS.get(store).copied().unwrap_or(FALLBACK_COLOR)
}
