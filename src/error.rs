pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("output write error: {0}")]
    OutputWrite(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    pub fn output_write(msg: impl Into<String>) -> Self {
        Self::OutputWrite(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CardError::invalid_input("x")
                .to_string()
                .contains("invalid input:")
        );
        assert!(
            CardError::image_decode("x")
                .to_string()
                .contains("image decode error:")
        );
        assert!(
            CardError::output_write("x")
                .to_string()
                .contains("output write error:")
        );
        assert!(CardError::render("x").to_string().contains("render error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
