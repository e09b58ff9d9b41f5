use std::fmt::Debug;

/// Builder for [`OpenAIConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpenAIConfigBuilder {
    endpoint: String,
    model: Option<String>,
    api_key: Option<String>,
}

impl OpenAIConfigBuilder {
    /// Creates a builder targeting the given completions endpoint URL.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: None,
            api_key: None,
        }
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the API key to authenticate with.
    ///
    /// Optional, since proxy deployments often hold the key themselves.
    #[inline]
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> OpenAIConfig {
        OpenAIConfig {
            endpoint: self.endpoint,
            model: self.model.unwrap_or_else(|| "gpt-4o".to_string()),
            api_key: self.api_key,
        }
    }
}

impl Debug for OpenAIConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfigBuilder")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Configuration for the OpenAI-compatible provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpenAIConfig {
    pub(crate) endpoint: String,
    pub(crate) model: String,
    pub(crate) api_key: Option<String>,
}

impl Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config =
            OpenAIConfigBuilder::with_endpoint("https://example.com/v1/chat")
                .build();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config =
            OpenAIConfigBuilder::with_endpoint("https://example.com/v1/chat")
                .with_api_key("sk-secret")
                .build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
    }
}
