pub struct FileSizeUtils;

impl FileSizeUtils {
    /// `0 Bytes`, `512 Bytes`, `1.5 KB`, `100 MB`; largest unit is GB.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut value = size as f64;
        let mut unit_index = 0;

        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        let formatted = format!("{:.2}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        format!("{} {}", trimmed, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0 Bytes")]
    #[case(512, "512 Bytes")]
    #[case(1024, "1 KB")]
    #[case(1536, "1.5 KB")]
    #[case(1_234_567, "1.18 MB")]
    #[case(100 * 1024 * 1024, "100 MB")]
    #[case(5 * 1024 * 1024 * 1024 * 1024, "5120 GB")]
    fn formats_sizes(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(FileSizeUtils::format_size(size), expected);
    }
}
