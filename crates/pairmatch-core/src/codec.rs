//! Share-code codec.
//!
//! A share code is `base64url(gzip(json))` without padding. Encoding goes
//! through a `serde_json::Value` first so anything that is not plain JSON is
//! dropped before it reaches the wire. Compression and decompression run on
//! the blocking pool; callers await both directions.

use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use serde_json::Value;

use crate::error::CodecError;
use crate::model::{ResultData, SessionData};
use crate::traits::TemplateRegistry;
use crate::validate::{missing_result_field, missing_session_field};

/// Upper bound on the decompressed payload. A legitimate session is a few
/// kilobytes; anything past this is rejected as corrupt.
pub const MAX_DECODED_BYTES: u64 = 1024 * 1024;

/// Encode any serializable value into a share code.
pub async fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let normalized =
        serde_json::to_value(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    encode_value(&normalized).await
}

async fn encode_value(value: &Value) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))?;
    let json_len = json.len();

    let compressed = tokio::task::spawn_blocking(move || gzip(&json))
        .await
        .map_err(|e| CodecError::Encode(format!("compression task failed: {e}")))?
        .map_err(|e| CodecError::Encode(format!("gzip failed: {e}")))?;

    let code = URL_SAFE_NO_PAD.encode(&compressed);
    tracing::debug!(
        json_bytes = json_len,
        gzip_bytes = compressed.len(),
        code_len = code.len(),
        "encoded share code"
    );
    Ok(code)
}

/// Decode a share code into a raw JSON value.
///
/// Accepts both the URL-safe and the standard Base64 alphabet, with or
/// without trailing padding. Anything else, including bytes left over after
/// the gzip stream, is a [`CodecError::Decode`].
pub async fn decode(code: &str) -> Result<Value, CodecError> {
    let code = code.trim();
    let unpadded = code.trim_end_matches('=');
    if code.len() - unpadded.len() > 2 || unpadded.contains('=') {
        return Err(CodecError::Decode("base64: misplaced padding".into()));
    }

    let normalized: String = unpadded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let compressed = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| CodecError::Decode(format!("base64: {e}")))?;

    let bytes = tokio::task::spawn_blocking(move || gunzip(&compressed))
        .await
        .map_err(|e| CodecError::Decode(format!("decompression task failed: {e}")))??;

    let json = String::from_utf8(bytes).map_err(|e| CodecError::Decode(format!("utf-8: {e}")))?;
    serde_json::from_str(&json).map_err(|e| CodecError::Decode(format!("json: {e}")))
}

fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Inflate exactly one gzip member that must span the whole input.
fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = GzDecoder::new(bytes).take(MAX_DECODED_BYTES + 1);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| CodecError::Decode(format!("gzip: {e}")))?;
    if out.len() as u64 > MAX_DECODED_BYTES {
        return Err(CodecError::Decode(format!(
            "payload exceeds {MAX_DECODED_BYTES} bytes"
        )));
    }

    let rest = decoder.into_inner().into_inner();
    if !rest.is_empty() {
        return Err(CodecError::Decode(format!(
            "gzip: {} trailing bytes after stream",
            rest.len()
        )));
    }
    Ok(out)
}

/// Fill in a template-referencing payload from the registry.
///
/// Payloads that embed their own question list are left alone even when they
/// name a template, so a code stays readable where that template is unknown.
pub fn resolve_template(
    value: &mut Value,
    registry: &dyn TemplateRegistry,
) -> Result<(), CodecError> {
    let Some(map) = value.as_object_mut() else {
        return Ok(());
    };

    let template_id = match map.get("templateId") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(id)) => id.clone(),
        Some(_) => return Err(CodecError::Validation("templateId must be a string".into())),
    };

    let has_questions = map
        .get("questions")
        .and_then(Value::as_array)
        .is_some_and(|q| !q.is_empty());
    if has_questions {
        return Ok(());
    }

    let template = registry
        .resolve(&template_id)
        .ok_or_else(|| CodecError::UnknownTemplate(template_id.clone()))?;

    let questions = serde_json::to_value(&template.questions)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    map.insert("questions".into(), questions);

    if !map.get("quizTitle").is_some_and(Value::is_string) {
        map.insert("quizTitle".into(), Value::String(template.title.clone()));
    }
    if !map.get("narrativeBands").is_some_and(Value::is_object) {
        let bands = serde_json::to_value(&template.bands)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        map.insert("narrativeBands".into(), bands);
    }

    tracing::debug!("resolved template '{template_id}'");
    Ok(())
}

/// Encode a session with its full question list embedded.
pub async fn encode_session(session: &SessionData) -> Result<String, CodecError> {
    encode(session).await
}

/// Encode a session, replacing an unmodified template's questions, title and
/// bands with a reference to the template.
pub async fn encode_session_compact(
    session: &SessionData,
    registry: &dyn TemplateRegistry,
) -> Result<String, CodecError> {
    let template = session
        .template_id
        .as_deref()
        .and_then(|id| registry.resolve(id))
        .filter(|t| t.questions == session.questions);

    let Some(template) = template else {
        return encode(session).await;
    };

    let mut value =
        serde_json::to_value(session).map_err(|e| CodecError::Encode(e.to_string()))?;
    if let Some(map) = value.as_object_mut() {
        map.remove("questions");
        if session.quiz_title == template.title {
            map.remove("quizTitle");
        }
        if session.narrative_bands == template.bands {
            map.remove("narrativeBands");
        }
    }
    encode_value(&value).await
}

/// Encode a finished result.
pub async fn encode_result(result: &ResultData) -> Result<String, CodecError> {
    encode(result).await
}

/// Decode, resolve and validate a session code.
pub async fn decode_session(
    code: &str,
    registry: &dyn TemplateRegistry,
) -> Result<SessionData, CodecError> {
    let mut value = decode(code).await?;
    resolve_template(&mut value, registry)?;

    if let Some(field) = missing_session_field(&value) {
        return Err(CodecError::Validation(format!("missing or invalid {field}")));
    }
    serde_json::from_value(value).map_err(|e| CodecError::Validation(e.to_string()))
}

/// Decode, resolve and validate a result code.
pub async fn decode_result(
    code: &str,
    registry: &dyn TemplateRegistry,
) -> Result<ResultData, CodecError> {
    let mut value = decode(code).await?;
    resolve_template(&mut value, registry)?;

    if let Some(field) = missing_result_field(&value) {
        return Err(CodecError::Validation(format!("missing or invalid {field}")));
    }
    serde_json::from_value(value).map_err(|e| CodecError::Validation(e.to_string()))
}
