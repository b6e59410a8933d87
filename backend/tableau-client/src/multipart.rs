//! `multipart/mixed` framing for datasource publishing.
//!
//! The body has exactly two parts: the XML publish metadata and the raw
//! `.tds` document. Line breaks are literal CRLF. Content is copied verbatim,
//! so the boundary must not occur inside either part.

const CRLF: &[u8] = b"\r\n";

/// Value for the `Content-Type` header of a publish request.
pub fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/mixed; boundary={boundary}")
}

/// Encode the two-part publish body. `filename` is given without extension;
/// `.tds` is appended.
pub fn encode_datasource_publish(
    metadata_xml: &[u8],
    raw_content: &[u8],
    filename: &str,
    boundary: &str,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(metadata_xml.len() + raw_content.len() + 256);

    push_line(&mut payload, format!("--{boundary}").as_bytes());
    push_line(&mut payload, b"Content-Disposition: name=\"request_payload\"");
    push_line(&mut payload, b"Content-Type: text/xml");
    payload.extend_from_slice(CRLF);
    push_line(&mut payload, metadata_xml);

    push_line(&mut payload, format!("--{boundary}").as_bytes());
    push_line(
        &mut payload,
        format!("Content-Disposition: name=\"tableau_datasource\"; filename=\"{filename}.tds\"")
            .as_bytes(),
    );
    push_line(&mut payload, b"Content-Type: application/octet-stream");
    payload.extend_from_slice(CRLF);
    push_line(&mut payload, raw_content);

    push_line(&mut payload, format!("--{boundary}--").as_bytes());
    payload
}

fn push_line(payload: &mut Vec<u8>, line: &[u8]) {
    payload.extend_from_slice(line);
    payload.extend_from_slice(CRLF);
}
