//! FIX wire-format encoder, decoder, and incremental frame splitter.
//!
//! Encoding generates the standard header (BeginString, BodyLength,
//! MsgType, comp IDs, sequence number, sending time) and trailer
//! (mod-256 checksum) around the caller's ordered body pairs. Decoding
//! validates BodyLength and CheckSum and yields a [`FixMessage`] with
//! every field retained in wire order.

use crate::error::{FixError, FixResult};
use crate::message::{FixMessage, MsgKind};
use crate::{tag, BEGIN_STRING, SOH};

/// Length of the trailer segment `10=NNN<SOH>`.
const CHECKSUM_SEGMENT_LEN: usize = 7;

/// Generated header fields for an outbound message.
#[derive(Debug, Clone)]
pub struct MessageHeader {
    pub sender_comp_id: String,
    pub target_comp_id: String,
    pub msg_seq_num: u64,
    pub sending_time: String,
}

/// Current UTC timestamp in FIX SendingTime format (tag 52).
pub fn sending_time_now() -> String {
    chrono::Utc::now().format("%Y%m%d-%H:%M:%S%.3f").to_string()
}

fn push_field(buf: &mut Vec<u8>, tag: u32, value: &str) {
    buf.extend_from_slice(tag.to_string().as_bytes());
    buf.push(b'=');
    buf.extend_from_slice(value.as_bytes());
    buf.push(SOH);
}

/// Serialize a message type and ordered body pairs into a wire frame.
pub fn encode(kind: &MsgKind, header: &MessageHeader, body: &[(u32, String)]) -> Vec<u8> {
    let mut inner = Vec::with_capacity(64 + body.len() * 16);
    push_field(&mut inner, tag::MSG_TYPE, kind.as_wire());
    push_field(&mut inner, tag::SENDER_COMP_ID, &header.sender_comp_id);
    push_field(&mut inner, tag::TARGET_COMP_ID, &header.target_comp_id);
    push_field(&mut inner, tag::MSG_SEQ_NUM, &header.msg_seq_num.to_string());
    push_field(&mut inner, tag::SENDING_TIME, &header.sending_time);
    for (t, v) in body {
        push_field(&mut inner, *t, v);
    }

    let mut frame = Vec::with_capacity(inner.len() + 32);
    push_field(&mut frame, tag::BEGIN_STRING, BEGIN_STRING);
    push_field(&mut frame, tag::BODY_LENGTH, &inner.len().to_string());
    frame.extend_from_slice(&inner);

    let checksum: u32 = frame.iter().map(|&b| u32::from(b)).sum();
    push_field(&mut frame, tag::CHECKSUM, &format!("{:03}", checksum % 256));
    frame
}

/// Parse a complete wire frame into a [`FixMessage`].
///
/// Validates BodyLength and CheckSum; a malformed frame fails with a
/// [`FixError`] and must be skipped by the caller, not treated as a
/// connection failure.
pub fn decode(bytes: &[u8]) -> FixResult<FixMessage> {
    if bytes.is_empty() || *bytes.last().unwrap() != SOH {
        return Err(FixError::Truncated(
            "frame does not end with SOH".to_string(),
        ));
    }

    // Walk segments tracking byte offsets so the checksum coverage can be
    // computed without re-serializing.
    let mut fields: Vec<(u32, String)> = Vec::new();
    let mut offset = 0usize;
    let mut checksum_offset: Option<usize> = None;
    let mut declared_checksum: Option<String> = None;
    let mut declared_body_len: Option<usize> = None;
    let mut body_start: Option<usize> = None;

    for segment in bytes.split(|&b| b == SOH) {
        if segment.is_empty() {
            continue;
        }
        let seg_str = String::from_utf8_lossy(segment);
        let (tag_str, value) = seg_str
            .split_once('=')
            .ok_or_else(|| FixError::InvalidField(seg_str.to_string()))?;
        let tag_num: u32 = tag_str
            .parse()
            .map_err(|_| FixError::InvalidField(seg_str.to_string()))?;

        if tag_num == tag::CHECKSUM {
            checksum_offset = Some(offset);
            declared_checksum = Some(value.to_string());
        }
        if tag_num == tag::BODY_LENGTH {
            declared_body_len = Some(
                value
                    .parse()
                    .map_err(|_| FixError::InvalidField(seg_str.to_string()))?,
            );
            body_start = Some(offset + segment.len() + 1);
        }

        fields.push((tag_num, value.to_string()));
        offset += segment.len() + 1;
    }

    let checksum_offset =
        checksum_offset.ok_or_else(|| FixError::Truncated("missing CheckSum (10)".to_string()))?;
    let declared = declared_checksum.unwrap_or_default();

    let computed: u32 = bytes[..checksum_offset].iter().map(|&b| u32::from(b)).sum();
    let computed = format!("{:03}", computed % 256);
    if computed != declared {
        return Err(FixError::ChecksumMismatch { declared, computed });
    }

    if let (Some(declared_len), Some(start)) = (declared_body_len, body_start) {
        let actual = checksum_offset.saturating_sub(start);
        if actual != declared_len {
            return Err(FixError::Truncated(format!(
                "BodyLength {declared_len} does not match body of {actual} bytes"
            )));
        }
    }

    let kind = fields
        .iter()
        .find(|(t, _)| *t == tag::MSG_TYPE)
        .map(|(_, v)| MsgKind::from_wire(v))
        .ok_or(FixError::MissingMsgType)?;

    Ok(FixMessage::new(kind, fields))
}

/// Extract the next complete frame from a read buffer.
///
/// Returns `Ok(Some((frame, consumed)))` when a full frame is available,
/// where `consumed` covers any garbage before BeginString plus the frame
/// itself. Returns `Ok(None)` when more bytes are needed.
pub fn extract_frame(buf: &[u8]) -> FixResult<Option<(Vec<u8>, usize)>> {
    // Anchor on the complete BeginString field: a bare "8=" scan can lock
    // onto the tail of a pair like "98=..." inside garbage and then fail
    // on the real frame behind it.
    let mut begin_field = Vec::with_capacity(BEGIN_STRING.len() + 3);
    begin_field.extend_from_slice(b"8=");
    begin_field.extend_from_slice(BEGIN_STRING.as_bytes());
    begin_field.push(SOH);

    let Some(start) = find_subslice(buf, &begin_field) else {
        return Ok(None);
    };
    let rel = &buf[start..];

    let Some(begin_end) = rel.iter().position(|&b| b == SOH) else {
        return Ok(None);
    };
    let after = &rel[begin_end + 1..];
    if after.len() < 2 {
        return Ok(None);
    }
    if !after.starts_with(b"9=") {
        return Err(FixError::InvalidField(
            "BodyLength (9) must follow BeginString (8)".to_string(),
        ));
    }
    let Some(len_end) = after.iter().position(|&b| b == SOH) else {
        return Ok(None);
    };
    let len_str = std::str::from_utf8(&after[2..len_end])
        .map_err(|_| FixError::InvalidField("non-ASCII BodyLength".to_string()))?;
    let body_len: usize = len_str
        .parse()
        .map_err(|_| FixError::InvalidField(format!("bad BodyLength: {len_str}")))?;

    let body_start = begin_end + 1 + len_end + 1;
    let total = body_start + body_len + CHECKSUM_SEGMENT_LEN;
    if rel.len() < total {
        return Ok(None);
    }
    Ok(Some((rel[..total].to_vec(), start + total)))
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> MessageHeader {
        MessageHeader {
            sender_comp_id: "RATU1".to_string(),
            target_comp_id: "SPOT".to_string(),
            msg_seq_num: 7,
            sending_time: "20260825-12:00:00.000".to_string(),
        }
    }

    fn order_body() -> Vec<(u32, String)> {
        vec![
            (tag::ORDER_QTY, "0.0011".to_string()),
            (tag::ORD_TYPE, "2".to_string()),
            (tag::CL_ORD_ID, "B1724587200000000000".to_string()),
            (tag::PRICE, "2500.00".to_string()),
            (tag::SIDE, "1".to_string()),
            (tag::SYMBOL, "ETHFDUSD".to_string()),
            (tag::TIME_IN_FORCE, "1".to_string()),
        ]
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let body = order_body();
        let bytes = encode(&MsgKind::NewOrderSingle, &header(), &body);
        let msg = decode(&bytes).unwrap();

        assert_eq!(*msg.kind(), MsgKind::NewOrderSingle);
        for (t, v) in &body {
            assert_eq!(msg.get(*t), Some(v.as_str()));
        }
        assert_eq!(msg.get(tag::SENDER_COMP_ID), Some("RATU1"));
        assert_eq!(msg.get(tag::TARGET_COMP_ID), Some("SPOT"));
        assert_eq!(msg.get(tag::MSG_SEQ_NUM), Some("7"));
    }

    #[test]
    fn test_roundtrip_preserves_repeating_group_order() {
        let body = vec![
            (tag::NO_MD_ENTRIES, "2".to_string()),
            (tag::MD_ENTRY_TYPE, "0".to_string()),
            (tag::MD_ENTRY_PX, "100".to_string()),
            (tag::MD_ENTRY_TYPE, "1".to_string()),
            (tag::MD_ENTRY_PX, "101".to_string()),
        ];
        let bytes = encode(&MsgKind::MarketDataSnapshot, &header(), &body);
        let msg = decode(&bytes).unwrap();

        assert_eq!(msg.group_count(tag::NO_MD_ENTRIES), 2);
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 1), Some("100"));
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 2), Some("101"));
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 3), None);
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut bytes = encode(&MsgKind::Heartbeat, &header(), &[]);
        // Flip a body byte without touching the trailer.
        let idx = bytes.len() - CHECKSUM_SEGMENT_LEN - 2;
        bytes[idx] ^= 0x01;

        match decode(&bytes) {
            Err(FixError::ChecksumMismatch { .. }) => {}
            other => panic!("expected checksum mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_truncated_frame() {
        let bytes = encode(&MsgKind::Heartbeat, &header(), &[]);
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(decode(cut), Err(FixError::Truncated(_))));
    }

    #[test]
    fn test_decode_rejects_body_length_mismatch() {
        // Hand-build a frame whose BodyLength overstates the body, with a
        // correct checksum so only the length check can catch it.
        let mut frame = Vec::new();
        push_field(&mut frame, tag::BEGIN_STRING, BEGIN_STRING);
        push_field(&mut frame, tag::BODY_LENGTH, "999");
        push_field(&mut frame, tag::MSG_TYPE, "0");
        let checksum: u32 = frame.iter().map(|&b| u32::from(b)).sum();
        push_field(&mut frame, tag::CHECKSUM, &format!("{:03}", checksum % 256));

        assert!(matches!(decode(&frame), Err(FixError::Truncated(_))));
    }

    #[test]
    fn test_extract_frame_complete() {
        let bytes = encode(&MsgKind::Logon, &header(), &[]);
        let (frame, consumed) = extract_frame(&bytes).unwrap().unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(frame, bytes);
        assert_eq!(*decode(&frame).unwrap().kind(), MsgKind::Logon);
    }

    #[test]
    fn test_extract_frame_partial_returns_none() {
        let bytes = encode(&MsgKind::Logon, &header(), &[]);
        for cut in [1, 5, bytes.len() / 2, bytes.len() - 1] {
            assert!(extract_frame(&bytes[..cut]).unwrap().is_none());
        }
    }

    #[test]
    fn test_extract_frame_two_frames_back_to_back() {
        let first = encode(&MsgKind::Logon, &header(), &[]);
        let second = encode(&MsgKind::Heartbeat, &header(), &[]);
        let mut buf = first.clone();
        buf.extend_from_slice(&second);

        let (frame, consumed) = extract_frame(&buf).unwrap().unwrap();
        assert_eq!(frame, first);
        let (frame2, consumed2) = extract_frame(&buf[consumed..]).unwrap().unwrap();
        assert_eq!(frame2, second);
        assert_eq!(consumed + consumed2, buf.len());
    }

    #[test]
    fn test_extract_frame_skips_embedded_tag_pair_in_garbage() {
        // "98=0" carries an "8=" of its own; the scan must pass over it
        // and land on the real BeginString.
        let bytes = encode(&MsgKind::Heartbeat, &header(), &[]);
        let mut buf = b"98=0\x01junk".to_vec();
        buf.extend_from_slice(&bytes);

        let (frame, consumed) = extract_frame(&buf).unwrap().unwrap();
        assert_eq!(frame, bytes);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn test_extract_frame_skips_leading_garbage() {
        let bytes = encode(&MsgKind::Heartbeat, &header(), &[]);
        let mut buf = b"\x00\x00junk".to_vec();
        buf.extend_from_slice(&bytes);

        let (frame, consumed) = extract_frame(&buf).unwrap().unwrap();
        assert_eq!(frame, bytes);
        assert_eq!(consumed, buf.len());
    }
}
