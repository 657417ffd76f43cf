//! Typed path parameter helpers.

use uuid::Uuid;

use luxedrive_core::error::AppError;

/// Parses a UUID from a path segment. Malformed ids are reported as
/// missing records.
pub fn parse_uuid(s: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("{resource} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxedrive_core::error::ErrorKind;

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "Booking").unwrap(), id);

        let err = parse_uuid("42", "Booking").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "Booking not found");
    }
}
