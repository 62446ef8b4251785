/// Condition groups reported by the weather provider, keyed by condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherType {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    VolcanicAsh,
    Squall,
    Tornado,
    Clear,
    Clouds,
    Unknown,
}

impl WeatherType {
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherType::Thunderstorm => "⛈️",
            WeatherType::Drizzle => "🌥️",
            WeatherType::Rain => "🌧️",
            WeatherType::Snow => "❄️",
            WeatherType::Atmosphere => "🌫️",
            WeatherType::VolcanicAsh => "🌋",
            WeatherType::Squall => "💨",
            WeatherType::Tornado => "🌪️",
            WeatherType::Clear => "☀️",
            WeatherType::Clouds => "☁️",
            WeatherType::Unknown => "🌚",
        }
    }
}

/// Ranges are inclusive and checked in table order.
pub fn determine_weather_type(code: i64) -> WeatherType {
    match code {
        200..=232 => WeatherType::Thunderstorm,
        300..=321 => WeatherType::Drizzle,
        500..=531 => WeatherType::Rain,
        600..=622 => WeatherType::Snow,
        701..=741 => WeatherType::Atmosphere,
        762 => WeatherType::VolcanicAsh,
        771 => WeatherType::Squall,
        781 => WeatherType::Tornado,
        800 => WeatherType::Clear,
        801..=804 => WeatherType::Clouds,
        _ => WeatherType::Unknown,
    }
}

pub fn weather_emoji(code: i64) -> &'static str {
    determine_weather_type(code).emoji()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_range(codes: std::ops::RangeInclusive<i64>, expected: WeatherType) {
        for code in codes {
            assert_eq!(determine_weather_type(code), expected, "code {code}");
        }
    }

    #[test]
    fn test_grouped_ranges() {
        assert_range(200..=232, WeatherType::Thunderstorm);
        assert_range(300..=321, WeatherType::Drizzle);
        assert_range(500..=531, WeatherType::Rain);
        assert_range(600..=622, WeatherType::Snow);
        assert_range(701..=741, WeatherType::Atmosphere);
        assert_range(801..=804, WeatherType::Clouds);
    }

    #[test]
    fn test_single_codes() {
        assert_eq!(determine_weather_type(762), WeatherType::VolcanicAsh);
        assert_eq!(determine_weather_type(771), WeatherType::Squall);
        assert_eq!(determine_weather_type(781), WeatherType::Tornado);
        assert_eq!(determine_weather_type(800), WeatherType::Clear);
    }

    #[test]
    fn test_codes_outside_every_range() {
        for code in [0, -1, 199, 233, 322, 499, 532, 623, 700, 742, 761, 805, 900] {
            assert_eq!(determine_weather_type(code), WeatherType::Unknown, "code {code}");
        }
    }

    #[test]
    fn test_emoji_glyphs() {
        assert_eq!(weather_emoji(211), "⛈️");
        assert_eq!(weather_emoji(300), "🌥️");
        assert_eq!(weather_emoji(501), "🌧️");
        assert_eq!(weather_emoji(601), "❄️");
        assert_eq!(weather_emoji(741), "🌫️");
        assert_eq!(weather_emoji(762), "🌋");
        assert_eq!(weather_emoji(771), "💨");
        assert_eq!(weather_emoji(781), "🌪️");
        assert_eq!(weather_emoji(800), "☀️");
        assert_eq!(weather_emoji(804), "☁️");
        assert_eq!(weather_emoji(900), "🌚");
    }
}
