//! Envelope codec: wraps domain messages into [`ProtoMessage`] and back.
//!
//! The payload-type registry is assembled once at compile time from the
//! `payload_registry!` listing below; anything outside it is rejected as
//! [`ProtoError::UnknownPayloadType`] so the receive loop can log and skip
//! frames from newer schema revisions without tearing the connection down.

use prost::Message;

use crate::ProtoError;
use crate::messages::*;

/// A domain message that can travel inside the wire envelope.
pub trait Payload: Message + Default {
    const PAYLOAD_TYPE: u32;
    const NAME: &'static str;
}

macro_rules! payload_registry {
    ($($ty:ident = $tag:literal),+ $(,)?) => {
        $(
            impl Payload for $ty {
                const PAYLOAD_TYPE: u32 = $tag;
                const NAME: &'static str = stringify!($ty);
            }
        )+

        /// Schema name for a payload-type tag, `None` when unknown.
        pub fn payload_name(payload_type: u32) -> Option<&'static str> {
            match payload_type {
                $($tag => Some(stringify!($ty)),)+
                _ => None,
            }
        }
    };
}

payload_registry! {
    ProtoErrorRes = 50,
    ProtoHeartbeatEvent = 51,
    ProtoOaApplicationAuthReq = 2100,
    ProtoOaApplicationAuthRes = 2101,
    ProtoOaAccountAuthReq = 2102,
    ProtoOaAccountAuthRes = 2103,
    ProtoOaVersionReq = 2104,
    ProtoOaVersionRes = 2105,
    ProtoOaNewOrderReq = 2106,
    ProtoOaCancelOrderReq = 2108,
    ProtoOaAmendOrderReq = 2109,
    ProtoOaClosePositionReq = 2111,
    ProtoOaAssetListReq = 2112,
    ProtoOaAssetListRes = 2113,
    ProtoOaSymbolsListReq = 2114,
    ProtoOaSymbolsListRes = 2115,
    ProtoOaSymbolByIdReq = 2116,
    ProtoOaSymbolByIdRes = 2117,
    ProtoOaTraderReq = 2121,
    ProtoOaTraderRes = 2122,
    ProtoOaReconcileReq = 2124,
    ProtoOaReconcileRes = 2125,
    ProtoOaExecutionEvent = 2126,
    ProtoOaSubscribeSpotsReq = 2127,
    ProtoOaSubscribeSpotsRes = 2128,
    ProtoOaUnsubscribeSpotsReq = 2129,
    ProtoOaUnsubscribeSpotsRes = 2130,
    ProtoOaSpotEvent = 2131,
    ProtoOaOrderErrorEvent = 2132,
    ProtoOaDealListReq = 2133,
    ProtoOaDealListRes = 2134,
    ProtoOaSubscribeLiveTrendbarReq = 2135,
    ProtoOaUnsubscribeLiveTrendbarReq = 2136,
    ProtoOaGetTrendbarsReq = 2137,
    ProtoOaGetTrendbarsRes = 2138,
    ProtoOaErrorRes = 2142,
    ProtoOaGetTickDataReq = 2145,
    ProtoOaGetTickDataRes = 2146,
    ProtoOaAccountsTokenInvalidatedEvent = 2147,
    ProtoOaClientDisconnectEvent = 2148,
    ProtoOaGetAccountListByAccessTokenReq = 2149,
    ProtoOaGetAccountListByAccessTokenRes = 2150,
    ProtoOaAssetClassListReq = 2153,
    ProtoOaAssetClassListRes = 2154,
    ProtoOaSymbolCategoryListReq = 2160,
    ProtoOaSymbolCategoryListRes = 2161,
    ProtoOaAccountLogoutReq = 2162,
    ProtoOaAccountLogoutRes = 2163,
    ProtoOaAccountDisconnectEvent = 2164,
    ProtoOaSubscribeLiveTrendbarRes = 2165,
    ProtoOaUnsubscribeLiveTrendbarRes = 2166,
}

/// Serializes `message` into an envelope carrying its payload-type tag and
/// the optional correlation id.
pub fn encode<M: Payload>(message: &M, client_msg_id: Option<String>) -> Vec<u8> {
    let envelope = ProtoMessage {
        payload_type: M::PAYLOAD_TYPE,
        payload: message.encode_to_vec(),
        client_msg_id,
    };
    envelope.encode_to_vec()
}

/// Parses envelope bytes and verifies the payload type is in the registry.
pub fn decode(bytes: &[u8]) -> Result<ProtoMessage, ProtoError> {
    let envelope = ProtoMessage::decode(bytes)
        .map_err(|err| ProtoError::MalformedPayload(err.to_string()))?;
    if payload_name(envelope.payload_type).is_none() {
        return Err(ProtoError::UnknownPayloadType(envelope.payload_type));
    }
    Ok(envelope)
}

/// Parses the inner message out of a decoded envelope.
pub fn extract<M: Payload>(envelope: &ProtoMessage) -> Result<M, ProtoError> {
    if envelope.payload_type != M::PAYLOAD_TYPE {
        return Err(ProtoError::PayloadTypeMismatch {
            expected: M::PAYLOAD_TYPE,
            actual: envelope.payload_type,
        });
    }
    M::decode(envelope.payload.as_slice())
        .map_err(|err| ProtoError::MalformedPayload(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trip_preserves_message_and_id() {
        let req = ProtoOaAccountAuthReq {
            ctid_trader_account_id: 12345,
            access_token: "token".to_string(),
        };

        let bytes = encode(&req, Some("msg-1".to_string()));
        let envelope = decode(&bytes).expect("decode");

        assert_eq!(envelope.payload_type, ProtoOaAccountAuthReq::PAYLOAD_TYPE);
        assert_eq!(envelope.client_msg_id.as_deref(), Some("msg-1"));
        assert_eq!(extract::<ProtoOaAccountAuthReq>(&envelope).expect("extract"), req);
    }

    #[test]
    fn heartbeat_has_empty_payload_and_no_id() {
        let bytes = encode(&ProtoHeartbeatEvent::default(), None);
        let envelope = decode(&bytes).expect("decode");

        assert_eq!(envelope.payload_type, ProtoHeartbeatEvent::PAYLOAD_TYPE);
        assert!(envelope.payload.is_empty());
        assert!(envelope.client_msg_id.is_none());
    }

    #[test]
    fn unknown_payload_type_is_rejected() {
        let envelope = ProtoMessage {
            payload_type: 9_999,
            payload: Vec::new(),
            client_msg_id: None,
        };

        let err = decode(&envelope.encode_to_vec()).expect_err("must fail");
        match err {
            ProtoError::UnknownPayloadType(9_999) => {}
            other => panic!("expected UnknownPayloadType, got {other:?}"),
        }
    }

    #[test]
    fn extract_with_wrong_target_fails() {
        let bytes = encode(&ProtoOaVersionReq::default(), None);
        let envelope = decode(&bytes).expect("decode");

        let err = extract::<ProtoOaVersionRes>(&envelope).expect_err("must fail");
        match err {
            ProtoError::PayloadTypeMismatch { expected, actual } => {
                assert_eq!(expected, ProtoOaVersionRes::PAYLOAD_TYPE);
                assert_eq!(actual, ProtoOaVersionReq::PAYLOAD_TYPE);
            }
            other => panic!("expected PayloadTypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_envelope_bytes_are_rejected() {
        // A lone field header with no value is not a valid message.
        let err = decode(&[0x0a]).expect_err("must fail");
        assert!(matches!(err, ProtoError::MalformedPayload(_)));
    }

    #[test]
    fn registry_names_known_tags() {
        assert_eq!(payload_name(51), Some("ProtoHeartbeatEvent"));
        assert_eq!(payload_name(2131), Some("ProtoOaSpotEvent"));
        assert_eq!(payload_name(1), None);
    }
}
