//! Lambda handler for listing a Box folder.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::helpers;
use super::parsing::ListRequest;
use crate::box_api::{BoxClient, ClientCache, FolderItemsApi};
use crate::core::config::AppConfig;
use crate::errors::BoxError;

/// Client shared by every invocation served by this process.
static CLIENT_CACHE: ClientCache<BoxClient> = ClientCache::new();

pub use self::function_handler as handler;

/// Lambda entry point. Always returns a response envelope, never `Err`.
///
/// # Errors
///
/// Never fails; the `Result` is what `lambda_runtime` expects.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env();
    Ok(list_folder(&event.payload, &config, &CLIENT_CACHE, BoxClient::from_config).await)
}

/// Handle one listing request against an injected client cache.
///
/// `build` runs only when `cache` is empty.
pub async fn list_folder<A, F>(
    event: &Value,
    config: &AppConfig,
    cache: &ClientCache<A>,
    build: F,
) -> Value
where
    A: FolderItemsApi,
    F: FnOnce(&AppConfig) -> Result<A, BoxError>,
{
    let request = ListRequest::from_event(event, config);
    info!(
        folder_id = %request.folder_id,
        limit = request.params.limit,
        offset = request.params.offset,
        "Listing Box folder items"
    );

    let result = async {
        let client = cache.get_or_try_init(|| build(config))?;
        client
            .get_folder_items(&request.folder_id, &request.params)
            .await
    }
    .await;

    match result {
        Ok(items) => helpers::ok_listing(&request.folder_id, items),
        Err(e) => {
            error!(folder_id = %request.folder_id, "Failed to list Box folder items: {}", e);
            helpers::err_listing(&e)
        }
    }
}
