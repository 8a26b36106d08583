use std::fmt;

/// Conversion providers a client may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    OpenAI,
    Anthropic,
    Gemini,
    Azure,
    Ollama,
}

impl Provider {
    /// Listing order of `GET /providers`.
    pub const ALL: [Provider; 6] = [
        Provider::OpenRouter,
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Gemini,
        Provider::Azure,
        Provider::Ollama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Azure => "azure",
            Provider::Ollama => "ollama",
        }
    }

    /// Environment variable whose presence enables the provider.
    /// Ollama runs locally and needs none.
    pub fn credential_var(&self) -> Option<&'static str> {
        match self {
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::OpenAI => Some("OPENAI_API_KEY"),
            Provider::Anthropic => Some("ANTHROPIC_API_KEY"),
            Provider::Gemini => Some("GEMINI_API_KEY"),
            Provider::Azure => Some("AZURE_OPENAI_API_KEY"),
            Provider::Ollama => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which provider credentials were present when the process started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    available: Vec<Provider>,
}

impl ProviderCredentials {
    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the snapshot from any variable lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let available = Provider::ALL
            .into_iter()
            .filter(|provider| match provider.credential_var() {
                Some(var) => lookup(var).is_some_and(|value| !value.trim().is_empty()),
                None => true,
            })
            .collect();

        ProviderCredentials { available }
    }

    /// Mark OpenRouter as configured, e.g. when its key came from a config
    /// file rather than the environment.
    pub fn with_openrouter(mut self) -> Self {
        if !self.available.contains(&Provider::OpenRouter) {
            self.available.insert(0, Provider::OpenRouter);
        }
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.available.iter().map(Provider::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_ollama_always_listed() {
        let credentials = ProviderCredentials::from_lookup(lookup_from(&[]));
        assert_eq!(credentials.names(), vec!["ollama"]);
    }

    #[test]
    fn test_listing_follows_fixed_order() {
        let credentials = ProviderCredentials::from_lookup(lookup_from(&[
            ("AZURE_OPENAI_API_KEY", "az"),
            ("OPENAI_API_KEY", "sk"),
            ("OPENROUTER_API_KEY", "or"),
        ]));
        assert_eq!(
            credentials.names(),
            vec!["openrouter", "openai", "azure", "ollama"]
        );
    }

    #[test]
    fn test_empty_credentials_are_ignored() {
        let credentials =
            ProviderCredentials::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")]));
        assert_eq!(credentials.names(), vec!["ollama"]);
    }

    #[test]
    fn test_with_openrouter_is_first_and_unique() {
        let credentials = ProviderCredentials::from_lookup(lookup_from(&[(
            "ANTHROPIC_API_KEY",
            "key",
        )]))
        .with_openrouter()
        .with_openrouter();
        assert_eq!(credentials.names(), vec!["openrouter", "anthropic", "ollama"]);
    }
}
