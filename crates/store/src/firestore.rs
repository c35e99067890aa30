use folio_protocol::ContactMessage;
use serde_json::{Value, json};

use crate::{StoreConfig, StoreError};

/// Build the `:commit` request body for one contact message.
///
/// Two writes in one atomic commit: an `update` that creates the document
/// with the user-entered fields, and a `transform` that sets `timestamp`
/// to the server's `REQUEST_TIME`. This is what the hosted SDK's
/// `addDoc(..., { timestamp: serverTimestamp() })` issues on the wire, and
/// it is the only way the REST surface can produce a server-assigned
/// instant.
pub fn commit_body(config: &StoreConfig, message: &ContactMessage, doc_id: &str) -> Value {
    let name = config.document_name(doc_id);
    json!({
        "writes": [
            {
                "update": {
                    "name": name,
                    "fields": {
                        "name": { "stringValue": message.name },
                        "email": { "stringValue": message.email },
                        "message": { "stringValue": message.message },
                    }
                },
                "currentDocument": { "exists": false }
            },
            {
                "transform": {
                    "document": name,
                    "fieldTransforms": [
                        { "fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME" }
                    ]
                }
            }
        ]
    })
}

/// Auto-generated document ids use the hosted SDK's alphabet and length.
#[cfg(not(target_arch = "wasm32"))]
pub fn auto_id() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..20)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// One-shot, fire-and-forget writer for the `messages` collection.
///
/// No reads, no retries: a failed write surfaces as an error and the
/// caller decides whether the user resubmits.
#[cfg(not(target_arch = "wasm32"))]
pub struct Firestore {
    config: StoreConfig,
    client: reqwest::blocking::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl Firestore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Write one message as a new document with a server-assigned
    /// timestamp.
    pub fn send_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let doc_id = auto_id();
        let body = commit_body(&self.config, message, &doc_id);
        tracing::debug!(collection = %self.config.collection, %doc_id, "writing contact message");

        let response = self
            .client
            .post(self.config.commit_url())
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "store rejected write");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!(%doc_id, "contact message stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            project_id: "sewa-resume".into(),
            api_key: "k".into(),
            database: "(default)".into(),
            collection: "messages".into(),
        }
    }

    #[test]
    fn commit_body_carries_fields_and_server_timestamp() {
        let msg = ContactMessage {
            name: "A".into(),
            email: "a@b.com".into(),
            message: "hi".into(),
        };
        let body = commit_body(&config(), &msg, "doc123");
        let writes = body["writes"].as_array().unwrap();
        assert_eq!(writes.len(), 2);

        let fields = &writes[0]["update"]["fields"];
        assert_eq!(fields["name"]["stringValue"], "A");
        assert_eq!(fields["email"]["stringValue"], "a@b.com");
        assert_eq!(fields["message"]["stringValue"], "hi");
        // Create-only: a stray id collision must not overwrite.
        assert_eq!(writes[0]["currentDocument"]["exists"], false);

        let transform = &writes[1]["transform"];
        assert_eq!(transform["document"], writes[0]["update"]["name"]);
        assert_eq!(
            transform["fieldTransforms"][0]["setToServerValue"],
            "REQUEST_TIME"
        );
        assert_eq!(transform["fieldTransforms"][0]["fieldPath"], "timestamp");
    }

    #[test]
    fn auto_ids_are_well_formed_and_distinct() {
        let a = auto_id();
        let b = auto_id();
        assert_eq!(a.len(), 20);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
