use num_format::{Locale, ToFormattedString};

/// Group the digits of a number in thousands, f.e. '1,234,567' for '1234567'.
pub fn format_metric(metric: u64) -> String {
    metric.to_formatted_string(&Locale::en)
}

/// Turn a rank into its ordinal, f.e. '1st', '12th', or '23rd'.
pub fn ordinal(pos: usize) -> String {
    let suffix = match (pos % 10, pos % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", pos, suffix)
}
