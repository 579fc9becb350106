pub mod json_error;
pub mod validated_json;

#[cfg(feature = "test-utils")]
pub mod assertions;

pub use json_error::{FormError, JsonError};
pub use validated_json::{ValidatedForm, ValidatedJson};
