pub struct Config;

impl Config {
    /// Prefix for proxy calls. Empty means same-origin relative URLs, which
    /// covers both the Trunk dev proxy and the backend serving the client.
    pub fn api_base_url() -> String {
        "".to_string()
    }

    /// Distance from the document bottom, in pixels, at which the next page
    /// is requested.
    pub fn scroll_threshold_px() -> f64 {
        200.0
    }
}
