//! Span handles for the dual-tracer fan-out.
//!
//! Every traced operation runs under two parallel spans: one from the
//! registry's local, processor-augmented tracer, and one from the ambient
//! global tracer configured by the surrounding process (a no-op when the
//! embedder never set one). The two spans share an operation name but have
//! independent trace/span ids and lifecycles; a slow sink on one side never
//! blocks the other.

use opentelemetry::global::BoxedSpan;
use opentelemetry::trace::Span;
use opentelemetry::KeyValue;

/// A span from either the local or the global pipeline.
pub enum SpanHandle {
    Local(opentelemetry_sdk::trace::Span),
    Global(BoxedSpan),
}

impl SpanHandle {
    fn set_attributes(&mut self, attributes: impl IntoIterator<Item = KeyValue>) {
        match self {
            SpanHandle::Local(span) => span.set_attributes(attributes),
            SpanHandle::Global(span) => span.set_attributes(attributes),
        }
    }

    fn end(&mut self) {
        match self {
            SpanHandle::Local(span) => span.end(),
            SpanHandle::Global(span) => span.end(),
        }
    }
}

/// The pair of live spans returned by [`TelemetryRegistry::start_trace`].
///
/// Consumed exactly once, either by an annotator applying an attribute set or
/// by [`SpanFanout::end`] when there is nothing to record. Both paths close
/// both spans.
///
/// [`TelemetryRegistry::start_trace`]: crate::telemetry::TelemetryRegistry::start_trace
pub struct SpanFanout {
    spans: Vec<SpanHandle>,
}

impl std::fmt::Debug for SpanFanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFanout")
            .field("spans", &self.spans.len())
            .finish()
    }
}

impl SpanFanout {
    pub(crate) fn new(local: opentelemetry_sdk::trace::Span, global: BoxedSpan) -> Self {
        Self {
            spans: vec![SpanHandle::Local(local), SpanHandle::Global(global)],
        }
    }

    /// Number of fanned-out spans. Always 2.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Apply the attribute set to every span, then close them all.
    pub fn annotate_and_end(mut self, attributes: Vec<KeyValue>) {
        for span in &mut self.spans {
            span.set_attributes(attributes.clone());
            span.end();
        }
    }

    /// Close every span without annotating.
    pub fn end(mut self) {
        for span in &mut self.spans {
            span.end();
        }
    }
}
