use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure that is reported to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// The state snapshot or a backup could not be read or written.
    Storage,
    /// User input was rejected, e.g. an amount that is not a number.
    Validation,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// Tags an internal error with an `ErrorType` before it leaves a command handler.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for Result<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.context(format!("{error_type} error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_names_the_category() {
        let r: Result<()> = Err(anyhow!("not a number"));
        let e = r.pub_result(ErrorType::Validation).unwrap_err();
        assert_eq!(e.to_string(), "validation error");
        assert_eq!(e.root_cause().to_string(), "not a number");
    }

    #[test]
    fn test_pub_result_passes_ok_through() {
        let r: Result<u8> = Ok(3);
        assert_eq!(r.pub_result(ErrorType::Storage).unwrap(), 3);
    }
}
