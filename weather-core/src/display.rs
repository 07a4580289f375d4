//! Values derived from a stored card at read time. Nothing here is persisted.

use std::fmt;

const MS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionIcon {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Storm,
    PartlyCloudy,
}

impl ConditionIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionIcon::Sunny => "☀️",
            ConditionIcon::Cloudy => "☁️",
            ConditionIcon::Rain => "🌧️",
            ConditionIcon::Snow => "❄️",
            ConditionIcon::Storm => "⛈️",
            ConditionIcon::PartlyCloudy => "⛅",
        }
    }
}

impl fmt::Display for ConditionIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Keyword rules in priority order. The first rule with a keyword contained
/// in the condition wins.
const ICON_RULES: &[(&str, ConditionIcon)] = &[
    ("sun", ConditionIcon::Sunny),
    ("clear", ConditionIcon::Sunny),
    ("cloud", ConditionIcon::Cloudy),
    ("rain", ConditionIcon::Rain),
    ("snow", ConditionIcon::Snow),
    ("storm", ConditionIcon::Storm),
];

/// Synonyms, tried only when no primary keyword matched.
const ICON_FALLBACKS: &[(&str, ConditionIcon)] = &[
    ("blizzard", ConditionIcon::Snow),
    ("sleet", ConditionIcon::Snow),
    ("thunder", ConditionIcon::Storm),
    ("overcast", ConditionIcon::Cloudy),
    ("drizzle", ConditionIcon::Rain),
    ("shower", ConditionIcon::Rain),
];

/// Map a free-text condition to an icon, case-insensitively.
pub fn derive_icon(condition: &str) -> ConditionIcon {
    let condition = condition.to_lowercase();

    ICON_RULES
        .iter()
        .chain(ICON_FALLBACKS)
        .find(|(keyword, _)| condition.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(ConditionIcon::PartlyCloudy)
}

/// Bucketed "time ago" label for a card created at `created_at` (ms since
/// epoch), as seen at `now` (ms since epoch).
///
/// A clock that reads earlier than the creation time yields "Just now".
pub fn derive_elapsed_label(created_at: i64, now: i64) -> String {
    if now <= created_at {
        return JUST_NOW.to_string();
    }

    let minutes = now.saturating_sub(created_at) / MS_PER_MINUTE;

    if minutes < 1 {
        JUST_NOW.to_string()
    } else if minutes < MINUTES_PER_HOUR {
        format!("{minutes} min ago")
    } else if minutes < MINUTES_PER_DAY {
        format!("{}h ago", minutes / MINUTES_PER_HOUR)
    } else {
        format!("{}d ago", minutes / MINUTES_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000_000;

    fn minutes(n: i64) -> i64 {
        n * MS_PER_MINUTE
    }

    #[test]
    fn elapsed_buckets() {
        assert_eq!(derive_elapsed_label(T, T), "Just now");
        assert_eq!(derive_elapsed_label(T, T + 59_999), "Just now");
        assert_eq!(derive_elapsed_label(T, T + minutes(5)), "5 min ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(59)), "59 min ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(60)), "1h ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(125)), "2h ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(1439)), "23h ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(1440)), "1d ago");
        assert_eq!(derive_elapsed_label(T, T + minutes(2900)), "2d ago");
    }

    #[test]
    fn elapsed_clock_behind_creation_is_just_now() {
        assert_eq!(derive_elapsed_label(T, T - minutes(30)), "Just now");
        assert_eq!(derive_elapsed_label(T, 0), "Just now");
    }

    #[test]
    fn icon_rules() {
        assert_eq!(derive_icon("Heavy Rain"), ConditionIcon::Rain);
        assert_eq!(derive_icon("Partly Cloudy"), ConditionIcon::Cloudy);
        assert_eq!(derive_icon("Thunderstorm"), ConditionIcon::Storm);
        assert_eq!(derive_icon("Blizzard"), ConditionIcon::Snow);
        assert_eq!(derive_icon("Foggy"), ConditionIcon::PartlyCloudy);
        assert_eq!(derive_icon("CLEAR"), ConditionIcon::Sunny);
        assert_eq!(derive_icon("Sunny intervals"), ConditionIcon::Sunny);
    }

    #[test]
    fn icon_priority_follows_rule_order() {
        // "cloud" outranks "rain"
        assert_eq!(derive_icon("Cloudy with rain"), ConditionIcon::Cloudy);
        assert_eq!(derive_icon("Rain and thunderstorm"), ConditionIcon::Rain);
        assert_eq!(derive_icon(""), ConditionIcon::PartlyCloudy);
    }

    #[test]
    fn primary_keywords_outrank_synonyms() {
        assert_eq!(derive_icon("Snow showers"), ConditionIcon::Snow);
        assert_eq!(derive_icon("Overcast, light snow"), ConditionIcon::Snow);
        assert_eq!(derive_icon("Thundershowers"), ConditionIcon::Storm);
        assert_eq!(derive_icon("Drizzle"), ConditionIcon::Rain);
        assert_eq!(derive_icon("Overcast"), ConditionIcon::Cloudy);
    }

    #[test]
    fn elapsed_from_distant_past_does_not_overflow() {
        let label = derive_elapsed_label(i64::MIN, T);
        assert!(label.ends_with("d ago"), "{label}");
    }

    #[test]
    fn glyphs() {
        assert_eq!(ConditionIcon::Sunny.glyph(), "☀️");
        assert_eq!(ConditionIcon::PartlyCloudy.to_string(), "⛅");
    }
}
