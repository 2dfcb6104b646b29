//! Task gateway abstraction and its HTTP adapter.
//!
//! The [`TaskGateway`] trait decouples the task run from the remote service.
//! Tests use a scripted gateway that replays predetermined replies without
//! touching the network.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::catalog::{Catalog, Grouping, TaskNode};
use crate::core::types::ActionReply;
use crate::io::config::ApiConfig;
use crate::io::error::GatewayError;
use crate::io::http::{ApiClient, RawResponse};

/// Remote operations the task run depends on.
pub trait TaskGateway {
    /// Fetch the full nested task catalog for the current session.
    fn fetch_catalog(&self) -> Result<Catalog, GatewayError>;
    /// Ask the service to start a task.
    fn start(&self, task_id: &str) -> Result<ActionReply, GatewayError>;
    /// Ask the service to pay out a task's reward.
    fn claim(&self, task_id: &str) -> Result<ActionReply, GatewayError>;
}

/// Gateway backed by the service's REST endpoints.
pub struct HttpGateway {
    client: ApiClient,
    api: ApiConfig,
}

impl HttpGateway {
    pub fn new(client: ApiClient, api: ApiConfig) -> Self {
        Self { client, api }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn api(&self) -> &ApiConfig {
        &self.api
    }

    fn tasks_url(&self, suffix: &str) -> String {
        format!("{}/{}", self.api.tasks_base_url.trim_end_matches('/'), suffix)
    }
}

impl TaskGateway for HttpGateway {
    #[instrument(skip(self))]
    fn fetch_catalog(&self) -> Result<Catalog, GatewayError> {
        let response = self.client.get(&self.tasks_url("tasks"))?.require_success()?;
        let catalog = decode_catalog(&response.body)?;
        debug!(groupings = catalog.groupings.len(), "catalog fetched");
        Ok(catalog)
    }

    #[instrument(skip(self))]
    fn start(&self, task_id: &str) -> Result<ActionReply, GatewayError> {
        let response = self
            .client
            .post(&self.tasks_url(&format!("tasks/{task_id}/start")), None)?;
        decode_action_reply(response)
    }

    #[instrument(skip(self))]
    fn claim(&self, task_id: &str) -> Result<ActionReply, GatewayError> {
        let response = self
            .client
            .post(&self.tasks_url(&format!("tasks/{task_id}/claim")), None)?;
        decode_action_reply(response)
    }
}

/// Decode a catalog response body.
///
/// Some revisions of the service list bare tasks next to groupings; those are
/// wrapped in an untitled grouping. Each top-level entry is typed by its keys:
/// `id` or `status` marks a task, `title`, `tasks` or `subSections` marks a
/// grouping. Anything else, or an entry that fails to decode as the shape its
/// keys announce, is a decode error.
pub fn decode_catalog(body: &str) -> Result<Catalog, GatewayError> {
    let entries: Vec<Value> =
        serde_json::from_str(body).map_err(|err| GatewayError::decode("task catalog", err))?;
    let groupings = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_catalog_entry(index, entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(groupings))
}

fn decode_catalog_entry(index: usize, entry: Value) -> Result<Grouping, GatewayError> {
    let has_key = |key: &str| entry.get(key).is_some();
    if has_key("id") || has_key("status") {
        let task: TaskNode = serde_json::from_value(entry)
            .map_err(|err| GatewayError::decode("catalog task", err))?;
        return Ok(Grouping {
            title: String::new(),
            tasks: vec![task],
            sub_sections: Vec::new(),
        });
    }
    if has_key("title") || has_key("tasks") || has_key("subSections") {
        return serde_json::from_value(entry)
            .map_err(|err| GatewayError::decode("catalog grouping", err));
    }
    Err(GatewayError::decode(
        "task catalog",
        serde_json::Error::custom(format!(
            "entry {index} is neither a task nor a grouping"
        )),
    ))
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a start/claim response.
///
/// A 2xx body without a title, or a 4xx body the service explained with a
/// message, is a soft rejection. Anything else is a transport failure.
pub fn decode_action_reply(response: RawResponse) -> Result<ActionReply, GatewayError> {
    if response.is_success() {
        let body: ReplyBody = response.json("task action")?;
        return Ok(ActionReply::from_title(body.title, body.message));
    }
    if response.is_client_error() && !response.is_unauthorized() {
        if let Ok(body) = serde_json::from_str::<ReplyBody>(&response.body) {
            debug!(status = response.status, message = ?body.message, "task action refused");
            return Ok(ActionReply::Rejected {
                reason: body.message,
            });
        }
    }
    Err(response.into_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskStatus;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            url: "https://tasks.test/tasks/t1/claim".to_string(),
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn accepted_reply_carries_title() {
        let reply = decode_action_reply(response(
            200,
            r#"{"id":"t1","title":"Follow us","status":"FINISHED"}"#,
        ))
        .expect("reply");
        assert_eq!(
            reply,
            ActionReply::Accepted {
                title: "Follow us".to_string()
            }
        );
    }

    #[test]
    fn success_without_title_is_soft_rejection() {
        let reply = decode_action_reply(response(200, r#"{"title":""}"#)).expect("reply");
        assert_eq!(reply, ActionReply::Rejected { reason: None });
    }

    #[test]
    fn client_error_with_message_is_soft_rejection() {
        let reply =
            decode_action_reply(response(412, r#"{"message":"Task is not done"}"#)).expect("reply");
        assert_eq!(
            reply,
            ActionReply::Rejected {
                reason: Some("Task is not done".to_string())
            }
        );
    }

    #[test]
    fn unauthorized_is_fatal_even_with_message() {
        let err = decode_action_reply(response(401, r#"{"message":"Invalid jwt"}"#)).unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized { .. }));
    }

    #[test]
    fn server_error_is_fatal() {
        let err = decode_action_reply(response(500, r#"{"message":"oops"}"#)).unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 500, .. }));
    }

    #[test]
    fn undecodable_success_is_fatal() {
        let err = decode_action_reply(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }));
    }

    #[test]
    fn malformed_bare_task_is_fatal() {
        for body in [
            r#"[{"id":"solo","title":"Solo","status":null}]"#,
            r#"[{"id":42,"title":"Solo","status":"NOT_STARTED"}]"#,
            r#"[{"id":"solo","title":"Solo"}]"#,
        ] {
            let err = decode_catalog(body).unwrap_err();
            assert!(
                matches!(err, GatewayError::Decode { what: "catalog task", .. }),
                "body {body}: {err}"
            );
        }
    }

    #[test]
    fn unknown_top_level_object_is_fatal() {
        let err = decode_catalog(r#"[{"unexpected":true}]"#).unwrap_err();
        assert!(err.to_string().contains("entry 0 is neither a task nor a grouping"));
    }

    #[test]
    fn malformed_task_fails_the_same_at_top_level_and_nested() {
        let nested = r#"[{"title":"G","tasks":[{"id":"solo","status":null}]}]"#;
        let bare = r#"[{"id":"solo","status":null}]"#;
        assert!(decode_catalog(nested).is_err());
        assert!(decode_catalog(bare).is_err());
    }

    #[test]
    fn title_only_grouping_is_empty_not_rejected() {
        let catalog = decode_catalog(r#"[{"title":"Coming soon"}]"#).expect("catalog");
        assert_eq!(catalog.groupings.len(), 1);
        assert!(catalog.groupings[0].tasks.is_empty());
    }

    #[test]
    fn bare_top_level_task_is_wrapped_in_grouping() {
        let catalog = decode_catalog(
            r#"[
                {"id":"solo","title":"Solo","status":"STARTED"},
                {"title":"Weekly","tasks":[{"id":"w1","title":"W1","status":"FINISHED"}]}
            ]"#,
        )
        .expect("catalog");
        assert_eq!(catalog.groupings.len(), 2);
        assert_eq!(catalog.groupings[0].title, "");
        assert_eq!(catalog.groupings[0].tasks[0].status, TaskStatus::Started);
        assert_eq!(catalog.groupings[1].tasks[0].id, "w1");
    }
}
