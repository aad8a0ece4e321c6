/// Configuration for the upstream AI endpoints, loaded from environment
/// variables.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Groq API key (OpenAI-compatible chat completions).
    pub groq_api_key: String,
    /// Base URL for the chat completion API.
    pub groq_base_url: String,
    /// Hugging Face inference API key. Optional: when absent, stories are
    /// generated without illustrations.
    pub huggingface_api_key: Option<String>,
    /// Full URL of the text-to-image inference endpoint.
    pub huggingface_api_url: String,
}

/// Default chat completion base URL.
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default image inference endpoint (SDXL base; fast enough to avoid
/// free-tier timeouts).
const DEFAULT_HUGGINGFACE_API_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

impl GenerationConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                     |
    /// |-----------------------|----------|-----------------------------|
    /// | `GROQ_API_KEY`        | **yes**  | --                          |
    /// | `GROQ_BASE_URL`       | no       | Groq's OpenAI-compatible v1 |
    /// | `HUGGINGFACE_API_KEY` | no       | -- (images disabled)        |
    /// | `HUGGINGFACE_API_URL` | no       | SDXL base inference URL     |
    ///
    /// # Panics
    ///
    /// Panics if `GROQ_API_KEY` is not set.
    pub fn from_env() -> Self {
        let groq_api_key =
            std::env::var("GROQ_API_KEY").expect("GROQ_API_KEY must be set in the environment");

        let groq_base_url =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.into());

        let huggingface_api_key = std::env::var("HUGGINGFACE_API_KEY").ok();

        let huggingface_api_url = std::env::var("HUGGINGFACE_API_URL")
            .unwrap_or_else(|_| DEFAULT_HUGGINGFACE_API_URL.into());

        Self {
            groq_api_key,
            groq_base_url,
            huggingface_api_key,
            huggingface_api_url,
        }
    }
}
