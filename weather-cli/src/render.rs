use chrono::{DateTime, Utc};
use weather_core::WeatherCard;

/// One line per card, e.g.
/// `🌧️ London, GB  12°C (feels 10°C)  Light rain  💧 80%  🌬 15 km/h  · 5 min ago  [id 1700000000000]`
pub fn card_line(card: &WeatherCard, now: DateTime<Utc>) -> String {
    let mut parts = vec![
        format!("{} {}, {}", card.icon(), card.city, card.country),
        match card.feels_like_label() {
            Some(feels) => format!("{} (feels {feels})", card.temperature_label()),
            None => card.temperature_label(),
        },
        card.condition.clone(),
    ];

    if let Some(humidity) = card.humidity {
        parts.push(format!("💧 {humidity}%"));
    }
    if let Some(wind) = card.wind_label() {
        parts.push(format!("🌬 {wind}"));
    }

    format!("{}  · {}  [id {}]", parts.join("  "), card.elapsed_label(now), card.id)
}

pub fn card_list(cards: &[WeatherCard], now: DateTime<Utc>) -> String {
    if cards.is_empty() {
        return "No cards yet. Add one with `weather-cards add <city> --temp <value>`.".to_string();
    }

    cards.iter().map(|card| card_line(card, now)).collect::<Vec<_>>().join("\n")
}
