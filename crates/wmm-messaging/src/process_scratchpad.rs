//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Process scratchpad request and response messages."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use rand::Rng;
use serde::Serialize;
use wmm_proto::gateway_api as wire;

use crate::envelope::{MessageKind, Operation};
use crate::error::Result;
use crate::header::{self, RequestHeader, ResponseHeader};
use crate::message::{self, TypedMessage};
use crate::result_code::ResultCode;

/// Request to process the scratchpad stored on a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessScratchpadRequest {
    #[serde(flatten)]
    header: RequestHeader,
}

impl ProcessScratchpadRequest {
    /// Build a request for `sink_id`; a random correlation id is drawn when
    /// none is given.
    pub fn new(sink_id: impl Into<String>, correlation_id: Option<u64>) -> Self {
        Self::with_rng(sink_id, correlation_id, &mut rand::thread_rng())
    }

    /// Same as [`ProcessScratchpadRequest::new`] with an explicit random source.
    pub fn with_rng<R: Rng + ?Sized>(
        sink_id: impl Into<String>,
        correlation_id: Option<u64>,
        rng: &mut R,
    ) -> Self {
        Self {
            header: RequestHeader::with_rng(sink_id, correlation_id, rng),
        }
    }

    /// Override the creation timestamp.
    pub fn with_timestamp_ms(mut self, timestamp_ms: u64) -> Self {
        self.header.timestamp_ms = timestamp_ms;
        self
    }

    /// Build the response answering this request, echoing its correlation id
    /// and sink.
    pub fn respond(
        &self,
        responder_id: impl Into<String>,
        result_code: ResultCode,
    ) -> ProcessScratchpadResponse {
        ProcessScratchpadResponse::new(
            self.header.correlation_id,
            responder_id,
            result_code,
            self.header.source_id.clone(),
        )
    }

    /// Header fields.
    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    /// Sink the message concerns.
    pub fn sink_id(&self) -> &str {
        &self.header.source_id
    }

    /// Identifier pairing the request with its response.
    pub fn correlation_id(&self) -> u64 {
        self.header.correlation_id
    }

    /// Creation time in milliseconds since epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.header.timestamp_ms
    }
}

impl TypedMessage for ProcessScratchpadRequest {
    const KIND: MessageKind = MessageKind::ProcessScratchpadReq;
    const NAME: &'static str = "ProcessScratchpadRequest";

    fn from_operation(operation: Operation) -> Result<Self> {
        let Operation::ProcessScratchpadReq(request) = operation else {
            return Err(message::unexpected::<Self>(&operation));
        };
        let raw = header::require(request.header.as_ref(), Self::NAME)?;
        Ok(Self {
            header: header::parse_request_header(raw)?,
        })
    }

    fn to_operation(&self) -> Operation {
        let mut request = wire::ProcessScratchpadReq::default();
        header::load_request_header(
            request.header.get_or_insert_with(Default::default),
            &self.header,
        );
        Operation::ProcessScratchpadReq(request)
    }
}

/// Outcome of a [`ProcessScratchpadRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessScratchpadResponse {
    #[serde(flatten)]
    header: ResponseHeader,
}

impl ProcessScratchpadResponse {
    /// Build a response stamped now.
    pub fn new(
        correlation_id: u64,
        responder_id: impl Into<String>,
        result_code: ResultCode,
        sink_id: impl Into<String>,
    ) -> Self {
        Self {
            header: ResponseHeader::new(correlation_id, responder_id, result_code, sink_id),
        }
    }

    /// Override the creation timestamp.
    pub fn with_timestamp_ms(mut self, timestamp_ms: u64) -> Self {
        self.header.timestamp_ms = timestamp_ms;
        self
    }

    /// Header fields.
    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    /// Identifier pairing the request with its response.
    pub fn correlation_id(&self) -> u64 {
        self.header.correlation_id
    }

    /// Gateway that answered.
    pub fn responder_id(&self) -> &str {
        &self.header.responder_id
    }

    /// Outcome of the operation.
    pub fn result_code(&self) -> ResultCode {
        self.header.result_code
    }

    /// Sink the message concerns.
    pub fn sink_id(&self) -> &str {
        &self.header.source_id
    }

    /// Creation time in milliseconds since epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.header.timestamp_ms
    }
}

impl TypedMessage for ProcessScratchpadResponse {
    const KIND: MessageKind = MessageKind::ProcessScratchpadResp;
    const NAME: &'static str = "ProcessScratchpadResponse";

    fn from_operation(operation: Operation) -> Result<Self> {
        let Operation::ProcessScratchpadResp(response) = operation else {
            return Err(message::unexpected::<Self>(&operation));
        };
        let raw = header::require(response.header.as_ref(), Self::NAME)?;
        Ok(Self {
            header: header::parse_response_header(raw)?,
        })
    }

    fn to_operation(&self) -> Operation {
        let mut response = wire::ProcessScratchpadResp::default();
        header::load_response_header(
            response.header.get_or_insert_with(Default::default),
            &self.header,
        );
        Operation::ProcessScratchpadResp(response)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::envelope;
    use crate::error::MessagingError;

    #[test]
    fn request_round_trip_keeps_sink_and_correlation() {
        let request = ProcessScratchpadRequest::new("sink-42", Some(7));
        let parsed = ProcessScratchpadRequest::from_payload(&request.payload()).unwrap();
        assert_eq!(parsed.sink_id(), "sink-42");
        assert_eq!(parsed.correlation_id(), 7);
        assert_eq!(parsed, request);
    }

    #[test]
    fn request_without_id_draws_one_from_the_rng() {
        let mut rng = StdRng::seed_from_u64(3);
        let expected = crate::ids::random_id(&mut StdRng::seed_from_u64(3));
        let request = ProcessScratchpadRequest::with_rng("sink", None, &mut rng);
        assert_eq!(request.correlation_id(), expected);
    }

    #[test]
    fn response_round_trip_preserves_every_field() {
        let response =
            ProcessScratchpadResponse::new(7, "gw-1", ResultCode::NoScratchpadPresent, "sink-42")
                .with_timestamp_ms(1_600_000_000_123);
        let parsed = ProcessScratchpadResponse::from_payload(&response.payload()).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(parsed.result_code(), ResultCode::NoScratchpadPresent);
        assert_eq!(parsed.timestamp_ms(), 1_600_000_000_123);
    }

    #[test]
    fn respond_echoes_the_request() {
        let request = ProcessScratchpadRequest::new("sink-5", Some(1234));
        let response = request.respond("gw-9", ResultCode::Ok);
        assert_eq!(response.correlation_id(), 1234);
        assert_eq!(response.sink_id(), "sink-5");
        assert_eq!(response.responder_id(), "gw-9");
    }

    #[test]
    fn request_parser_rejects_a_response_payload() {
        let response = ProcessScratchpadResponse::new(1, "gw", ResultCode::Ok, "sink");
        let err = ProcessScratchpadRequest::from_payload(&response.payload()).unwrap_err();
        assert_eq!(
            err,
            MessagingError::Parsing {
                context: "ProcessScratchpadRequest",
                reason: "expected process_scratchpad_req operation, found process_scratchpad_resp"
                    .into(),
            }
        );
    }

    #[test]
    fn missing_header_is_a_parse_error() {
        let bytes = envelope::encode(Operation::ProcessScratchpadReq(
            wire::ProcessScratchpadReq { header: None },
        ));
        let err = ProcessScratchpadRequest::from_payload(&bytes).unwrap_err();
        assert!(err.to_string().contains("missing header"));
    }

    #[test]
    fn response_without_result_code_is_a_parse_error() {
        let bytes = envelope::encode(Operation::ProcessScratchpadResp(
            wire::ProcessScratchpadResp {
                header: Some(wire::ResponseHeader {
                    req_id: Some(1),
                    gw_id: Some("gw".into()),
                    res: None,
                    sink_id: Some("sink".into()),
                    time_ms_epoch: None,
                }),
            },
        ));
        let err = ProcessScratchpadResponse::from_payload(&bytes).unwrap_err();
        assert_eq!(
            err,
            MessagingError::Parsing {
                context: "ResponseHeader",
                reason: "missing res".into(),
            }
        );
    }
}
