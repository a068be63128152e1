use crate::config::AppConfig;
use crate::error::SyncResult;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::remote::AuthoringService;
use tracing::info;

/// Promotes a trained version to the live endpoint.
///
/// Publishing was asked for explicitly, so a missing endpoint is an error
/// rather than a skip.
pub async fn publish(
    service: &AuthoringService,
    app: &AppConfig,
    version_id: &str,
    sink: &dyn ProgressSink,
) -> SyncResult<serde_json::Value> {
    let endpoint = app.require_endpoint()?;

    sink.on_event(ProgressEvent::started(format!("Publishing {version_id}...")));
    let result = service.publish_version(app, version_id, endpoint).await?;

    let url = result.get("endpointUrl").and_then(serde_json::Value::as_str);
    info!(version_id, endpoint_url = ?url, "Version published");
    sink.on_event(ProgressEvent::finished(match url {
        Some(url) => format!("Published {version_id} to {url}"),
        None => format!("Published {version_id}."),
    }));

    Ok(result)
}
