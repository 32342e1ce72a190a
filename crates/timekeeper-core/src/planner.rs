use std::path::{Path, PathBuf};

use crate::date::ResolvedDate;

/// `<base>/<YYYY>/<Month>` for a resolved date, e.g. `out/2023/June`.
pub fn destination_dir(base: &Path, date: &ResolvedDate) -> PathBuf {
    let local = &date.time.local;
    base.join(local.format("%Y").to_string())
        .join(local.format("%B").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{parse_date, Provenance};

    fn resolved(raw: &str) -> ResolvedDate {
        ResolvedDate {
            time: parse_date(raw).unwrap(),
            provenance: Provenance::MetadataField,
        }
    }

    #[test]
    fn test_year_and_month_name() {
        let dir = destination_dir(Path::new("/out"), &resolved("2023:06:15 10:30:00"));
        assert_eq!(dir, PathBuf::from("/out/2023/June"));

        let dir = destination_dir(Path::new("out"), &resolved("1999-09-01T00:00:00"));
        assert_eq!(dir, Path::new("out").join("1999").join("September"));
    }

    #[test]
    fn test_uses_wall_clock_not_utc() {
        let dir = destination_dir(Path::new("/out"), &resolved("2021-12-31T23:30:00-05:00"));
        assert_eq!(dir, PathBuf::from("/out/2021/December"));
    }

    #[test]
    fn test_equal_dates_equal_dirs() {
        let a = resolved("2024-03-02 08:00:00");
        let b = resolved("2024-03-02 08:00:00");
        assert_eq!(
            destination_dir(Path::new("/out"), &a),
            destination_dir(Path::new("/out"), &b)
        );
    }
}
