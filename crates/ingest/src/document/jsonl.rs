use super::{object_to_document, DocumentError, ExtractedBatch};

/// One document per non-blank line; bad lines are rejected individually.
pub fn extract_jsonl(bytes: &[u8]) -> ExtractedBatch {
    let mut batch = ExtractedBatch::default();

    for (i, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let position = i + 1;
        let line = match std::str::from_utf8(raw_line) {
            Ok(line) => line.trim(),
            Err(_) => {
                batch.reject(DocumentError::Encoding { position });
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let parsed = serde_json::from_str::<serde_json::Value>(line)
            .map_err(|e| DocumentError::Malformed {
                position,
                reason: e.to_string(),
            })
            .and_then(|value| object_to_document(value, position));

        match parsed {
            Ok(doc) => batch.documents.push(doc),
            Err(e) => batch.reject(e),
        }
    }
    batch
}
