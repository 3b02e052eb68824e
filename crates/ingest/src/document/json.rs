use super::{object_to_document, ExtractedBatch, ExtractionError};

/// A top-level array of policy objects.
pub fn extract_json(bytes: &[u8]) -> Result<ExtractedBatch, ExtractionError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ExtractionError::Encoding {
        offset: e.valid_up_to(),
    })?;
    let values: Vec<serde_json::Value> = serde_json::from_str(text)?;

    let mut batch = ExtractedBatch::default();
    for (i, value) in values.into_iter().enumerate() {
        match object_to_document(value, i + 1) {
            Ok(doc) => batch.documents.push(doc),
            Err(e) => batch.reject(e),
        }
    }
    Ok(batch)
}
