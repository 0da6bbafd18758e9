//! Dispatch - 请求到交易的分发核心
//!
//! HTTP request → RequestDispatcher → TransactionGateway → ResponseShaper

mod dispatcher;
mod params;
mod shaper;

pub use dispatcher::{generate_key, Attachment, DispatchOutcome, RequestDispatcher};
pub use params::RequestParams;
pub use shaper::{ContentKind, EnvelopeStatus, ResponseEnvelope, ResponseShaper, ShapedResponse};
