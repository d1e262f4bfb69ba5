//! Display helpers for impact figures.

pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

pub fn format_pct(value: f64, decimals: usize) -> String {
    format!("{}%", format_number(value, decimals))
}

/// Compacts large magnitudes with a k/M/B suffix.
pub fn format_large_number(value: f64, decimals: usize) -> String {
    if value >= 1e9 {
        format!("{}B", format_number(value / 1e9, decimals))
    } else if value >= 1e6 {
        format!("{}M", format_number(value / 1e6, decimals))
    } else if value >= 1e3 {
        format!("{}k", format_number(value / 1e3, decimals))
    } else {
        format_number(value, decimals)
    }
}

/// Thousands separators on the integer part, e.g. `12,345.60`.
pub fn format_with_commas(value: f64, decimals: usize) -> String {
    let fixed = format_number(value.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_co2e(value: f64, decimals: usize) -> String {
    format!("{} kg CO2e", format_with_commas(value, decimals))
}

pub fn format_energy(value: f64, decimals: usize) -> String {
    format!("{} MJ", format_with_commas(value, decimals))
}

pub fn format_volume(value: f64, decimals: usize) -> String {
    format!("{} m3", format_with_commas(value, decimals))
}

pub fn format_weight(value: f64, unit: &str, decimals: usize) -> String {
    format!("{} {unit}", format_number(value, decimals))
}

pub fn format_distance(value: f64, decimals: usize) -> String {
    format!("{} km", format_number(value, decimals))
}

#[cfg(test)]
mod tests {
    use super::{
        format_co2e, format_distance, format_large_number, format_pct, format_weight,
        format_with_commas,
    };

    #[test]
    fn compacts_large_numbers() {
        assert_eq!(format_large_number(950.0, 1), "950.0");
        assert_eq!(format_large_number(12_500.0, 1), "12.5k");
        assert_eq!(format_large_number(3_400_000.0, 2), "3.40M");
        assert_eq!(format_large_number(2e9, 0), "2B");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_with_commas(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_with_commas(999.0, 0), "999");
        assert_eq!(format_with_commas(1000.0, 0), "1,000");
        assert_eq!(format_with_commas(-4321.5, 1), "-4,321.5");
        assert_eq!(format_with_commas(-0.001, 2), "0.00");
    }

    #[test]
    fn appends_units() {
        assert_eq!(format_co2e(1131.33, 2), "1,131.33 kg CO2e");
        assert_eq!(format_pct(62.456, 1), "62.5%");
        assert_eq!(format_weight(2.5, "tonnes", 2), "2.50 tonnes");
        assert_eq!(format_distance(1200.0, 1), "1200.0 km");
    }
}
