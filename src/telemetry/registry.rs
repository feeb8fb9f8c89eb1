//! Span registry owning the local tracer provider.
//!
//! The registry is an explicit handle constructed at startup and injected
//! into every span-emitting component; there is no process-wide global. It
//! accepts span processors while unsealed, and seals itself exactly once on
//! the first trace request: the registered processors are drained into a
//! fresh local tracer provider, and any later registration returns
//! [`TelemetryError::RegistrySealed`] instead of being silently dropped.
//! Seal-on-first-use keeps embedders free of a mandatory startup phase while
//! still letting them inject exporters before traffic starts.

use crate::error::{Result, TelemetryError};
use crate::telemetry::attributes::SYSTEM_NAME;
use crate::telemetry::span::SpanFanout;
use opentelemetry::trace::{Tracer, TracerProvider};
use opentelemetry::Context;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::{
    SdkTracerProvider, SimpleSpanProcessor, SpanData, SpanExporter, SpanProcessor,
};
use opentelemetry_sdk::Resource;
use std::borrow::Cow;
use std::mem;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;
use tracing::warn;

/// Processor list while open; sealed once the provider exists.
enum RegistryState {
    Open(Vec<Box<dyn SpanProcessor>>),
    Sealed,
}

impl std::fmt::Debug for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryState::Open(processors) => {
                write!(f, "Open({} processors)", processors.len())
            }
            RegistryState::Sealed => write!(f, "Sealed"),
        }
    }
}

/// Wrapper so heterogeneous boxed processors fit the provider builder's
/// generic `with_span_processor` bound.
struct BoxedProcessor(Box<dyn SpanProcessor>);

impl std::fmt::Debug for BoxedProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoxedProcessor")
    }
}

impl SpanProcessor for BoxedProcessor {
    fn on_start(&self, span: &mut opentelemetry_sdk::trace::Span, cx: &Context) {
        self.0.on_start(span, cx);
    }

    fn on_end(&self, span: SpanData) {
        self.0.on_end(span);
    }

    fn force_flush(&self) -> OTelSdkResult {
        self.0.force_flush()
    }

    fn shutdown_with_timeout(&self, timeout: Duration) -> OTelSdkResult {
        self.0.shutdown_with_timeout(timeout)
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.0.set_resource(resource);
    }
}

/// Registry for span processors and factory for the dual-tracer fan-out.
#[derive(Debug)]
pub struct TelemetryRegistry {
    state: RwLock<RegistryState>,
    provider: OnceLock<SdkTracerProvider>,
}

impl TelemetryRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::Open(Vec::new())),
            provider: OnceLock::new(),
        }
    }

    /// Register a span processor with the local pipeline.
    ///
    /// Callable any number of times from any number of threads while the
    /// registry is unsealed; processors are attached in registration order.
    /// Once the first trace has been started the registry is sealed and this
    /// returns [`TelemetryError::RegistrySealed`].
    pub fn register_processor(&self, processor: impl SpanProcessor + 'static) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(|poisoned| {
            warn!("registry state lock was poisoned, recovering");
            poisoned.into_inner()
        });
        match &mut *state {
            RegistryState::Open(processors) => {
                processors.push(Box::new(processor));
                Ok(())
            }
            RegistryState::Sealed => Err(TelemetryError::RegistrySealed),
        }
    }

    /// Register a span exporter, wrapped in a simple (synchronous) processor.
    pub fn register_exporter(&self, exporter: impl SpanExporter + 'static) -> Result<()> {
        self.register_processor(SimpleSpanProcessor::new(exporter))
    }

    /// Start the dual-tracer fan-out for one traced operation.
    ///
    /// Returns exactly two live spans sharing the operation name: one from
    /// the local provider, one from the ambient global tracer (a no-op span
    /// when the embedder never configured a global provider). The first call
    /// seals the registry.
    pub fn start_trace(&self, name: impl Into<Cow<'static, str>>) -> SpanFanout {
        let name = name.into();
        let local_tracer = self.local_provider().tracer(SYSTEM_NAME);
        let local = local_tracer.start(name.clone());
        let global = opentelemetry::global::tracer(SYSTEM_NAME).start(name);
        SpanFanout::new(local, global)
    }

    /// Flush every processor attached to the local provider.
    pub fn force_flush(&self) {
        if let Some(provider) = self.provider.get() {
            if let Err(error) = provider.force_flush() {
                warn!(?error, "failed to flush local tracer provider");
            }
        }
    }

    /// Shut the local provider down. Spans started afterwards are no-ops.
    pub fn shutdown(&self) {
        if let Some(provider) = self.provider.get() {
            if let Err(error) = provider.shutdown() {
                warn!(?error, "failed to shut down local tracer provider");
            }
        }
    }

    /// Build the local provider on first use, sealing the registry.
    fn local_provider(&self) -> &SdkTracerProvider {
        self.provider.get_or_init(|| {
            let mut state = self.state.write().unwrap_or_else(|poisoned| {
                warn!("registry state lock was poisoned, recovering");
                poisoned.into_inner()
            });
            let processors = match mem::replace(&mut *state, RegistryState::Sealed) {
                RegistryState::Open(processors) => processors,
                RegistryState::Sealed => Vec::new(),
            };
            drop(state);

            let mut builder = SdkTracerProvider::builder();
            for processor in processors {
                builder = builder.with_span_processor(BoxedProcessor(processor));
            }
            builder.build()
        })
    }
}

impl Default for TelemetryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::attributes::OPERATION_CALL_LLM;
    use opentelemetry_sdk::trace::InMemorySpanExporter;
    use std::sync::Arc;

    #[test]
    fn test_start_trace_returns_two_spans() {
        let registry = TelemetryRegistry::new();
        let fanout = registry.start_trace(OPERATION_CALL_LLM);
        assert_eq!(fanout.len(), 2);
        fanout.end();
    }

    #[test]
    fn test_processors_registered_before_first_trace_are_attached_in_order() {
        let registry = TelemetryRegistry::new();
        let first = InMemorySpanExporter::default();
        let second = InMemorySpanExporter::default();
        registry.register_exporter(first.clone()).unwrap();
        registry.register_exporter(second.clone()).unwrap();

        registry.start_trace(OPERATION_CALL_LLM).end();

        let first_spans = first.get_finished_spans().unwrap();
        let second_spans = second.get_finished_spans().unwrap();
        assert_eq!(first_spans.len(), 1);
        assert_eq!(second_spans.len(), 1);
        assert_eq!(first_spans[0].name, OPERATION_CALL_LLM);
    }

    #[test]
    fn test_late_registration_errors_and_has_no_effect() {
        let registry = TelemetryRegistry::new();
        let early = InMemorySpanExporter::default();
        registry.register_exporter(early.clone()).unwrap();

        registry.start_trace(OPERATION_CALL_LLM).end();

        let late = InMemorySpanExporter::default();
        let result = registry.register_exporter(late.clone());
        assert!(matches!(result, Err(TelemetryError::RegistrySealed)));

        registry.start_trace(OPERATION_CALL_LLM).end();

        // The early exporter saw both traces; the late one saw nothing.
        assert_eq!(early.get_finished_spans().unwrap().len(), 2);
        assert!(late.get_finished_spans().unwrap().is_empty());
    }

    #[test]
    fn test_local_and_global_spans_are_independent() {
        let registry = TelemetryRegistry::new();
        let exporter = InMemorySpanExporter::default();
        registry.register_exporter(exporter.clone()).unwrap();

        registry.start_trace("send_data").end();

        // Only the local pipeline saw the span; the ambient global tracer is
        // a no-op here because no global provider was configured.
        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "send_data");
    }

    #[test]
    fn test_concurrent_registration_before_seal() {
        let registry = Arc::new(TelemetryRegistry::new());
        let exporters: Vec<InMemorySpanExporter> =
            (0..8).map(|_| InMemorySpanExporter::default()).collect();

        let handles: Vec<_> = exporters
            .iter()
            .map(|exporter| {
                let registry = Arc::clone(&registry);
                let exporter = exporter.clone();
                std::thread::spawn(move || registry.register_exporter(exporter).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        registry.start_trace(OPERATION_CALL_LLM).end();

        for exporter in &exporters {
            assert_eq!(exporter.get_finished_spans().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_force_flush_and_shutdown_do_not_panic() {
        let registry = TelemetryRegistry::new();
        // Before first use there is no provider; both are no-ops.
        registry.force_flush();
        registry.shutdown();

        let registry = TelemetryRegistry::new();
        let exporter = InMemorySpanExporter::default();
        registry.register_exporter(exporter).unwrap();
        registry.start_trace(OPERATION_CALL_LLM).end();
        registry.force_flush();
        registry.shutdown();
    }
}
