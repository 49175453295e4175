//! Fahrenheit conversion and the clothing rule table.

/// Exact linear conversion, no rounding.
pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Map a temperature and free-text condition to clothing advice.
///
/// Exactly one temperature band contributes first, then an umbrella for rain
/// and boots for snow. Condition matching is case-insensitive substring.
pub fn recommend(temp_c: f64, condition: &str) -> Vec<String> {
    let mut items = Vec::new();

    if temp_c < 5.0 {
        items.push("a warm coat");
        items.push("hat, scarf, and gloves");
    } else if temp_c < 15.0 {
        items.push("a light jacket");
    } else {
        items.push("a t-shirt");
    }

    let condition = condition.to_lowercase();
    if condition.contains("rain") {
        items.push("an umbrella");
    }
    if condition.contains("snow") {
        items.push("waterproof boots");
    }

    items.into_iter().map(str::to_owned).collect()
}

pub fn advice(recommendations: &[String]) -> String {
    format!("Based on the weather, consider wearing {}.", recommendations.join(", "))
}
