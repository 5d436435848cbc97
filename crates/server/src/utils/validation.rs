use crate::error::ApiError;
use chrono::NaiveDate;

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

/// Apply the shared limit/offset rules: limit defaults to 100 and must lie
/// in (0, 1000], offset defaults to 0 and must not be negative.
pub fn validate_page(limit: Option<i64>, offset: Option<i64>) -> Result<Page, ApiError> {
    let limit = limit.unwrap_or(100);
    let offset = offset.unwrap_or(0);

    if limit > 1000 {
        return Err(ApiError::Validation("Limit cannot exceed 1000".into()));
    }
    if limit <= 0 {
        return Err(ApiError::Validation("Limit must be positive".into()));
    }
    if offset < 0 {
        return Err(ApiError::Validation("Offset cannot be negative".into()));
    }

    Ok(Page {
        limit: limit as u64,
        offset: offset as u64,
    })
}

pub fn validate_grade_bound(value: Option<f64>, name: &str) -> Result<(), ApiError> {
    if let Some(grade) = value
        && !(0.0..=100.0).contains(&grade)
    {
        return Err(ApiError::Validation(format!(
            "{name} must be between 0 and 100"
        )));
    }
    Ok(())
}

/// API-level year-of-study filter bound; the schema itself allows up to 10
pub fn validate_student_year(value: Option<i64>) -> Result<Option<i32>, ApiError> {
    match value {
        Some(year) if !(1..=5).contains(&year) => {
            Err(ApiError::Validation("year must be between 1 and 5".into()))
        }
        Some(year) => Ok(Some(year as i32)),
        None => Ok(None),
    }
}

/// Strict `YYYY-MM-DD` parsing; the error names the offending parameter
pub fn parse_date(raw: &str, name: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!("Invalid {name} format. Use YYYY-MM-DD"))
    })
}

/// Path ids must be non-negative integer strings; fail before any query runs.
/// Digit strings beyond the id column's range cannot match any row, so they
/// resolve to an unknown id rather than a format error.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Invalid ID format - must be numeric".into(),
        ));
    }
    raw.parse::<i32>()
        .map_err(|_| ApiError::NotFound(format!("ID {raw} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ApiError) -> String {
        match err {
            ApiError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn page_defaults() {
        let page = validate_page(None, None).unwrap();
        assert_eq!(page, Page { limit: 100, offset: 0 });
    }

    #[test]
    fn limit_above_1000_is_rejected() {
        let err = validate_page(Some(5000), None).unwrap_err();
        assert_eq!(message(err), "Limit cannot exceed 1000");
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        let err = validate_page(Some(0), None).unwrap_err();
        assert_eq!(message(err), "Limit must be positive");
    }

    #[test]
    fn negative_offset_is_rejected() {
        let err = validate_page(Some(10), Some(-1)).unwrap_err();
        assert_eq!(message(err), "Offset cannot be negative");
    }

    #[test]
    fn grade_bounds() {
        assert!(validate_grade_bound(Some(0.0), "min_grade").is_ok());
        assert!(validate_grade_bound(Some(100.0), "max_grade").is_ok());
        assert!(validate_grade_bound(None, "min_grade").is_ok());
        let err = validate_grade_bound(Some(101.0), "max_grade").unwrap_err();
        assert_eq!(message(err), "max_grade must be between 0 and 100");
    }

    #[test]
    fn student_year_bounds() {
        assert_eq!(validate_student_year(Some(3)).unwrap(), Some(3));
        let err = validate_student_year(Some(6)).unwrap_err();
        assert_eq!(message(err), "year must be between 1 and 5");
    }

    #[test]
    fn dates_parse_strictly() {
        assert!(parse_date("2026-02-01", "from_date").is_ok());
        let err = parse_date("01/02/2026", "from_date").unwrap_err();
        assert_eq!(message(err), "Invalid from_date format. Use YYYY-MM-DD");
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn ids_beyond_the_column_range_are_unknown_not_invalid() {
        match parse_id("99999999999").unwrap_err() {
            ApiError::NotFound(message) => {
                assert_eq!(message, "ID 99999999999 not found");
            }
            other => panic!("expected not-found error, got {other:?}"),
        }
    }
}
