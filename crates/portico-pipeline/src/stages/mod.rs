//! Pipeline stages.
//!
//! Every invocation passes through the same fixed sequence:
//!
//! | Stage | Purpose |
//! |-------|---------|
//! | `decode_path` | Decode path parameters |
//! | `decode_query` | Decode query string parameters |
//! | `decode_body` | Enforce the body limit, decode the body |
//! | `decode_headers` | Decode headers |
//! | `decode_claims` | Decode authorizer claims, when present |
//! | `authorization` | Reject missing or invalid claims when required |
//! | `handler` | Invoke the wrapped handler |
//! | `response` | Classify failures and render the body |
//!
//! All decodes run before the authorization gate, and the gate runs before
//! any decode failure is reported.

pub mod authorization;
pub mod decode;
pub mod error_normalization;

/// A pipeline stage, used to label logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Path parameter decoding.
    DecodePath,
    /// Query parameter decoding.
    DecodeQuery,
    /// Body decoding.
    DecodeBody,
    /// Header decoding.
    DecodeHeaders,
    /// Claims decoding.
    DecodeClaims,
    /// Authorization gate.
    Authorization,
    /// Handler invocation.
    Handler,
    /// Failure classification and rendering.
    Response,
}

impl Stage {
    /// All stages in execution order.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::DecodePath,
            Self::DecodeQuery,
            Self::DecodeBody,
            Self::DecodeHeaders,
            Self::DecodeClaims,
            Self::Authorization,
            Self::Handler,
            Self::Response,
        ]
    }

    /// Stage name as it appears in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DecodePath => "decode_path",
            Self::DecodeQuery => "decode_query",
            Self::DecodeBody => "decode_body",
            Self::DecodeHeaders => "decode_headers",
            Self::DecodeClaims => "decode_claims",
            Self::Authorization => "authorization",
            Self::Handler => "handler",
            Self::Response => "response",
        }
    }

    /// The request part a decode stage reads, if any.
    #[must_use]
    pub const fn part(self) -> Option<&'static str> {
        match self {
            Self::DecodePath => Some("path"),
            Self::DecodeQuery => Some("query"),
            Self::DecodeBody => Some("body"),
            Self::DecodeHeaders => Some("headers"),
            Self::DecodeClaims => Some("claims"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let stages = Stage::all();
        assert_eq!(stages[0], Stage::DecodePath);
        assert_eq!(stages[5], Stage::Authorization);
        assert_eq!(stages[7].name(), "response");
    }

    #[test]
    fn test_decode_stages_name_their_part() {
        let parts: Vec<_> = Stage::all().iter().filter_map(|s| s.part()).collect();
        assert_eq!(parts, ["path", "query", "body", "headers", "claims"]);
        assert_eq!(Stage::Handler.part(), None);
    }
}
