//! Arabic display helpers
//!
//! Number and time formatting for the rendered page: Arabic-Indic digits and
//! 12-hour clock times with the ص/م day-period markers.

const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Replace every ASCII digit with its Arabic-Indic equivalent.
pub fn to_arabic_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '0'..='9' => ARABIC_DIGITS[(c as u8 - b'0') as usize],
            other => other,
        })
        .collect()
}

/// Format a 24-hour clock time as a 12-hour Arabic display string,
/// e.g. (4, 55) -> "٠٤:٥٥ ص" and (17, 45) -> "٠٥:٤٥ م".
pub fn format_time_12h(hour: u32, minute: u32) -> String {
    let marker = if hour < 12 { "ص" } else { "م" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!(
        "{} {}",
        to_arabic_digits(&format!("{:02}:{:02}", h12, minute)),
        marker
    )
}
