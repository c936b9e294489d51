//! SEO slug generation for destinations and guides.
//!
//! Slugs are deterministic: the same (city, region, country, language)
//! always produces the same slug, so URLs stay stable across regeneration.

/// Slugify arbitrary text: lowercase, non-alphanumeric runs collapse to a
/// single hyphen, no leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            out.push('-');
            last_was_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Slug for a destination's golf-course page, e.g.
/// `golf-course-st-andrews-fife-scotland` or `de-golf-course-...` for
/// non-English pages.
pub fn destination_slug(city: &str, region: &str, country: &str, language: &str) -> String {
    prefixed_slug("golf-course", city, region, country, language)
}

/// Slug for a long-form destination guide, e.g.
/// `golf-guide-st-andrews-fife-scotland`.
pub fn guide_slug(city: &str, region: &str, country: &str, language: &str) -> String {
    prefixed_slug("golf-guide", city, region, country, language)
}

/// Slug for a city lifestyle guide, e.g. `city-guide-st-andrews-fife-scotland`.
pub fn city_guide_slug(city: &str, region: &str, country: &str, language: &str) -> String {
    prefixed_slug("city-guide", city, region, country, language)
}

fn prefixed_slug(prefix: &str, city: &str, region: &str, country: &str, language: &str) -> String {
    let base = format!("{prefix}-{city}-{region}-{country}");
    if language == crate::language::SOURCE_LANGUAGE {
        slugify(&base)
    } else {
        slugify(&format!("{language}-{base}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("St Andrews"), "st-andrews");
        assert_eq!(slugify("Côte d'Ivoire"), "c-te-d-ivoire");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }

    #[test]
    fn english_guide_slug_has_no_language_prefix() {
        assert_eq!(
            guide_slug("St Andrews", "Fife", "Scotland", "en"),
            "golf-guide-st-andrews-fife-scotland"
        );
    }

    #[test]
    fn translated_guide_slug_is_prefixed() {
        assert_eq!(
            guide_slug("St Andrews", "Fife", "Scotland", "ja"),
            "ja-golf-guide-st-andrews-fife-scotland"
        );
    }

    #[test]
    fn destination_and_city_guide_prefixes() {
        assert_eq!(
            destination_slug("Pebble Beach", "California", "United States", "en"),
            "golf-course-pebble-beach-california-united-states"
        );
        assert_eq!(
            city_guide_slug("Pebble Beach", "California", "United States", "es"),
            "es-city-guide-pebble-beach-california-united-states"
        );
    }

    #[test]
    fn slugs_are_stable_across_calls() {
        let a = guide_slug("Marrakech", "Marrakech-Safi", "Morocco", "fr");
        let b = guide_slug("Marrakech", "Marrakech-Safi", "Morocco", "fr");
        assert_eq!(a, b);
    }
}
