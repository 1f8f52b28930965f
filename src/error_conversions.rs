//! Conversions from layer-specific errors into [`AppError`].
//!
//! Repository and form errors stay free of transport concerns; these impls
//! decide which taxonomy kind they surface as.

use validator::ValidationErrors;

use crate::errors::AppError;
use crate::repository::errors::RepositoryError;

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::internal_server_error("Unexpected repository failure").caused_by(err)
    }
}

impl From<ValidationErrors> for AppError {
    /// Reports the first failing field (alphabetically) together with the
    /// validator rule it broke.
    fn from(errors: ValidationErrors) -> Self {
        let message = format!("Validation failed: {errors}");

        let mut field_errors = errors.field_errors().into_iter().collect::<Vec<_>>();
        field_errors.sort_by(|a, b| a.0.cmp(&b.0));

        let first = field_errors.into_iter().find_map(|(field, errs)| {
            errs.first()
                .map(|err| (field.to_string(), err.code.to_string()))
        });

        match first {
            Some((field, rule)) => {
                AppError::invalid_request_parameter_with_rule(message, field, rule)
            }
            None => AppError::invalid_request(message),
        }
    }
}
