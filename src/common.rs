// Default URLs
pub static DEFAULT_API_URL: &str = "https://api.payconnect.dev";
pub static DEFAULT_SANDBOX_API_URL: &str = "https://api.sandbox.payconnect.dev";

// Header names
pub static IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub static REQUEST_ID_HEADER: &str = "Request-Id";
