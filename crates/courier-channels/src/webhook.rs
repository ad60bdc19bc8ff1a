use courier_core::{CourierError, CourierResult, SlackMessage};
use tracing::warn;

/// POST `message` as JSON to a Slack incoming webhook.
///
/// A non-success status fails with the response body in the message, since
/// Slack reports webhook problems (`invalid_payload`, `no_text`, ...) there.
/// No retry.
pub async fn post_webhook(
    client: &reqwest::Client,
    url: &str,
    message: &SlackMessage,
) -> CourierResult<()> {
    let response = client
        .post(url)
        .json(message)
        .send()
        .await
        .map_err(|e| CourierError::Transport(format!("Could not send request to Slack Webhook: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        warn!(%status, body = %body, "Slack webhook rejected message");
        return Err(CourierError::Transport(format!(
            "Could not send request to Slack Webhook: {body}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_webhook_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/T/B/X"))
            .and(body_json(serde_json::json!({"text": "deployed"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/services/T/B/X", server.uri());
        post_webhook(&reqwest::Client::new(), &url, &SlackMessage::text("deployed"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_webhook_error_includes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_payload"))
            .expect(1)
            .mount(&server)
            .await;

        let err = post_webhook(&reqwest::Client::new(), &server.uri(), &SlackMessage::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Transport(_)));
        assert!(err
            .to_string()
            .contains("Could not send request to Slack Webhook: invalid_payload"));
    }

    #[tokio::test]
    async fn test_webhook_unreachable() {
        // Port 9 (discard) is not listening in test environments.
        let result = post_webhook(
            &reqwest::Client::new(),
            "http://127.0.0.1:9/hook",
            &SlackMessage::text("x"),
        )
        .await;
        assert!(matches!(result, Err(CourierError::Transport(_))));
    }
}
