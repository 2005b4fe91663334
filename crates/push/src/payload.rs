//! Wire payload construction for the push provider.

use serde_json::json;
use teampulse_core::push::PushMessage;

/// Build the multicast request body for one message and a token list.
///
/// Shape expected by the provider:
/// `{registration_ids, notification: {title, body}, data: {link, type?,
/// alertId?}, webpush: {fcmOptions: {link}}}`. Every `data` value is a
/// string; the provider rejects non-string data fields.
pub fn build(tokens: &[String], message: &PushMessage) -> serde_json::Value {
    let mut data = serde_json::Map::new();
    data.insert("link".to_string(), json!(message.link));
    if let Some(kind) = message.kind {
        data.insert("type".to_string(), json!(kind.as_str()));
    }
    if let Some(alert_id) = message.alert_id {
        data.insert("alertId".to_string(), json!(alert_id.to_string()));
    }

    json!({
        "registration_ids": tokens,
        "notification": {
            "title": message.title,
            "body": message.body,
        },
        "data": data,
        "webpush": {
            "fcmOptions": {
                "link": message.link,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use teampulse_core::push::PushKind;

    fn tokens() -> Vec<String> {
        vec!["tok-a".to_string(), "tok-b".to_string()]
    }

    #[test]
    fn payload_carries_notification_and_link() {
        let message = PushMessage::new("Title", "Body", "/dashboard");
        let payload = build(&tokens(), &message);

        assert_eq!(payload["registration_ids"].as_array().unwrap().len(), 2);
        assert_eq!(payload["notification"]["title"], "Title");
        assert_eq!(payload["notification"]["body"], "Body");
        assert_eq!(payload["data"]["link"], "/dashboard");
        assert_eq!(payload["webpush"]["fcmOptions"]["link"], "/dashboard");
    }

    #[test]
    fn kind_and_alert_id_are_optional() {
        let message = PushMessage::new("T", "B", "/x");
        let payload = build(&tokens(), &message);
        assert!(payload["data"].get("type").is_none());
        assert!(payload["data"].get("alertId").is_none());
    }

    #[test]
    fn alert_message_sets_type_and_string_alert_id() {
        let message = PushMessage::new("New alert", "Check in", "/dashboard/alerts/9")
            .with_kind(PushKind::Alert)
            .with_alert(9);
        let payload = build(&tokens(), &message);

        assert_eq!(payload["data"]["type"], "alert");
        // Data values must be strings, including the id.
        assert_eq!(payload["data"]["alertId"], "9");
    }
}
