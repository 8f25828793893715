// SPDX-License-Identifier: Apache-2.0

//! Static registry of supported AI providers.
//!
//! # Examples
//!
//! ```
//! use commit_connect_core::ai::registry::{all_providers, get_provider};
//!
//! let provider = get_provider("gemini").unwrap();
//! assert_eq!(provider.api_key_env, "GEMINI_API_KEY");
//! assert_eq!(all_providers().len(), 3);
//! ```

/// Configuration for an AI provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider identifier (lowercase, used in config files)
    pub name: &'static str,

    /// Human-readable provider name for UI display
    pub display_name: &'static str,

    /// Chat completion endpoint
    pub api_url: &'static str,

    /// Environment variable name for API key
    pub api_key_env: &'static str,

    /// Older variable names still honoured, checked after `api_key_env`
    pub legacy_key_envs: &'static [&'static str],

    /// Model used when the configured one belongs to another provider
    pub default_model: &'static str,
}

/// Static registry of all supported AI providers
pub static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "gemini",
        display_name: "Google Gemini",
        api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
        api_key_env: "GEMINI_API_KEY",
        legacy_key_envs: &["gemini_api"],
        default_model: "gemini-2.0-flash",
    },
    ProviderConfig {
        name: "openrouter",
        display_name: "OpenRouter",
        api_url: "https://openrouter.ai/api/v1/chat/completions",
        api_key_env: "OPENROUTER_API_KEY",
        legacy_key_envs: &[],
        default_model: "mistralai/devstral-2512:free",
    },
    ProviderConfig {
        name: "groq",
        display_name: "Groq",
        api_url: "https://api.groq.com/openai/v1/chat/completions",
        api_key_env: "GROQ_API_KEY",
        legacy_key_envs: &[],
        default_model: "openai/gpt-oss-20b",
    },
];

/// Retrieves a provider configuration by name (case-sensitive, lowercase).
#[must_use]
pub fn get_provider(name: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// Returns all available providers.
#[must_use]
pub fn all_providers() -> &'static [ProviderConfig] {
    PROVIDERS
}

impl ProviderConfig {
    /// Read the API key from the environment, primary name first.
    #[must_use]
    pub fn api_key_from_env(&self) -> Option<String> {
        std::iter::once(self.api_key_env)
            .chain(self.legacy_key_envs.iter().copied())
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_get_provider_gemini() {
        let provider = get_provider("gemini").expect("gemini registered");
        assert_eq!(provider.display_name, "Google Gemini");
        assert_eq!(provider.default_model, "gemini-2.0-flash");
    }

    #[test]
    fn test_get_provider_not_found() {
        assert!(get_provider("nonexistent").is_none());
        assert!(get_provider("Gemini").is_none());
    }

    #[test]
    fn test_all_providers_have_unique_names() {
        let mut names: Vec<_> = all_providers().iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all_providers().len());
    }

    #[test]
    fn test_provider_api_urls_valid() {
        for provider in all_providers() {
            assert!(provider.api_url.starts_with("https://"));
            assert!(provider.api_url.ends_with("/chat/completions"));
        }
    }

    #[test]
    #[serial]
    fn test_legacy_key_env_is_honoured() {
        let provider = get_provider("gemini").expect("gemini registered");
        let saved: Vec<_> = ["GEMINI_API_KEY", "gemini_api"]
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::set_var("gemini_api", "legacy-key");
        }

        let key = provider.api_key_from_env();

        unsafe {
            for (k, v) in saved {
                match v {
                    Some(v) => std::env::set_var(k, v),
                    None => std::env::remove_var(k),
                }
            }
        }
        assert_eq!(key.as_deref(), Some("legacy-key"));
    }
}
