pub mod cache;
pub mod client;
pub mod profile;
pub mod types;
pub mod username;

pub use cache::{clear_cache, get_cache_path, CacheConfig, ResponseCache};
pub use client::{create_client, create_http_client, install_crypto_provider};
pub use profile::{fetch_events, fetch_profile, fetch_readme, fetch_repositories};
pub use types::{Event, RepositorySummary, UserProfile};
pub use username::extract_username;
