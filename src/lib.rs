/// box-files - A Lambda function that lists the items of a Box folder.
///
/// The function authenticates to Box with a service-account (JWT) app, calls
/// the folder items endpoint once per invocation and returns the result as an
/// API Gateway style JSON response.
///
/// # Architecture
///
/// - `core::config` reads the `BOX_*` environment variables
/// - `box_api::credentials` picks one of four credential sources
/// - `box_api::cache` keeps one authenticated client per process
/// - `api::handler` maps events to a single folder items call
///
/// # Example
///
/// ```no_run
/// use box_files::api::list_folder;
/// use box_files::box_api::{BoxClient, ClientCache};
/// use box_files::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() {
///     box_files::setup_logging();
///
///     let cache = ClientCache::new();
///     let config = AppConfig::from_env();
///     let event = serde_json::json!({ "folderId": "12345", "limit": 10 });
///
///     let response = list_folder(&event, &config, &cache, BoxClient::from_config).await;
///     println!("{}", response["body"]);
/// }
/// ```
pub mod api;
pub mod box_api;
pub mod core;
pub mod errors;

pub use errors::BoxError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// box_files::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
