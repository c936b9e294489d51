//! Country flag emoji for typeahead results.

/// Fallback when a country has no flag mapping.
pub const DEFAULT_FLAG: &str = "🌍";

/// Flag emoji for a country name. Accepts the common alternative names
/// used in the destination data ("USA"/"US", "UK", "UAE").
pub fn country_flag(country: &str) -> &'static str {
    match country {
        "United States" | "USA" | "US" => "🇺🇸",
        "Canada" => "🇨🇦",
        "United Kingdom" | "UK" => "🇬🇧",
        "Ireland" => "🇮🇪",
        "Scotland" => "🏴",
        "Spain" => "🇪🇸",
        "France" => "🇫🇷",
        "Germany" => "🇩🇪",
        "Italy" => "🇮🇹",
        "Portugal" => "🇵🇹",
        "Netherlands" => "🇳🇱",
        "Switzerland" => "🇨🇭",
        "Austria" => "🇦🇹",
        "Denmark" => "🇩🇰",
        "Sweden" => "🇸🇪",
        "Norway" => "🇳🇴",
        "Japan" => "🇯🇵",
        "South Korea" => "🇰🇷",
        "China" => "🇨🇳",
        "Australia" => "🇦🇺",
        "New Zealand" => "🇳🇿",
        "South Africa" => "🇿🇦",
        "UAE" | "United Arab Emirates" => "🇦🇪",
        "Thailand" => "🇹🇭",
        "Malaysia" => "🇲🇾",
        "Singapore" => "🇸🇬",
        "Mexico" => "🇲🇽",
        "Brazil" => "🇧🇷",
        "Argentina" => "🇦🇷",
        "Chile" => "🇨🇱",
        "Turkey" => "🇹🇷",
        "Morocco" => "🇲🇦",
        "Egypt" => "🇪🇬",
        "India" => "🇮🇳",
        "Saudi Arabia" => "🇸🇦",
        "Ghana" => "🇬🇭",
        "Côte d'Ivoire" => "🇨🇮",
        _ => DEFAULT_FLAG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries() {
        assert_eq!(country_flag("Scotland"), "🏴");
        assert_eq!(country_flag("Japan"), "🇯🇵");
    }

    #[test]
    fn alternative_names_share_a_flag() {
        assert_eq!(country_flag("USA"), country_flag("United States"));
        assert_eq!(country_flag("UAE"), country_flag("United Arab Emirates"));
    }

    #[test]
    fn unknown_country_gets_globe() {
        assert_eq!(country_flag("Atlantis"), DEFAULT_FLAG);
    }
}
