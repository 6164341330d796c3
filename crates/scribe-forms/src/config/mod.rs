mod catalog_config;
#[allow(clippy::module_inception)]
mod config;
mod review_config;
mod server_config;
mod store_config;

pub(crate) use {
    catalog_config::CatalogConfig, config::Config, review_config::ReviewConfig,
    server_config::ServerConfig, store_config::StoreConfig,
};

pub(crate) const DEFAULT_BUCKET: &str = "transcripts";
pub(crate) const DEFAULT_SESSIONS_PREFIX: &str = "previous_sessions/";
pub(crate) const DEFAULT_MAPPING_KEY: &str = "{language}_async_inference/mapping.csv";
pub(crate) const DEFAULT_LANGUAGES: [&str; 3] = ["hausa", "igbo", "yoruba"];
pub(crate) const DEFAULT_ITEMS_PER_PAGE: usize = 5;
pub(crate) const DEFAULT_URL_TTL_SECONDS: u64 = 3600;
pub(crate) const DEFAULT_PORT: u16 = 7878;

pub(crate) fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

pub(crate) fn default_sessions_prefix() -> String {
    DEFAULT_SESSIONS_PREFIX.to_string()
}

pub(crate) fn default_mapping_key() -> String {
    DEFAULT_MAPPING_KEY.to_string()
}

pub(crate) fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

pub(crate) fn default_url_ttl_seconds() -> u64 {
    DEFAULT_URL_TTL_SECONDS
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}
