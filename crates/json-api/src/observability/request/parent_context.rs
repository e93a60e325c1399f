//! W3C trace context extraction.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The remote parent from `traceparent`, if the headers carry a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let carrier = HeaderCarrier(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a missing header yields no parent.
        let context = propagator.extract_with_context(&Context::new(), &carrier);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
