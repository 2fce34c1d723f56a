//! Telemetry initialization.
//!
//! Installs a JSON log subscriber filtered by `RUST_LOG` (falling back to the
//! configured level), optionally an OTLP trace exporter, and optionally a
//! Prometheus recorder for the gateway's counters.

use crate::infrastructure::config::TelemetrySettings;
use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::Sampler, Resource};
use opentelemetry_semantic_conventions::resource;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Builder for setting up telemetry (Logging, Tracing, Metrics).
pub struct TelemetryBuilder {
    service_name: String,
    service_version: String,
    enable_metrics: bool,
    otlp_endpoint: Option<String>,
    log_level: String,
    sampling_ratio: f64,
}

/// Handles kept alive by the application after [`TelemetryBuilder::init`].
#[derive(Debug, Default)]
pub struct Telemetry {
    prometheus: Option<PrometheusHandle>,
}

impl Telemetry {
    /// Renders the current metrics in Prometheus text format, if the
    /// recorder was installed.
    #[must_use]
    pub fn render_metrics(&self) -> Option<String> {
        self.prometheus.as_ref().map(PrometheusHandle::render)
    }
}

impl TelemetryBuilder {
    /// Creates a builder logging at `info` with tracing and metrics disabled.
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            enable_metrics: false,
            otlp_endpoint: None,
            log_level: "info".to_string(),
            sampling_ratio: 1.0,
        }
    }

    /// Creates a builder from configuration.
    #[must_use]
    pub fn from_settings(settings: &TelemetrySettings) -> Self {
        let mut builder = Self::new(&settings.service_name, env!("CARGO_PKG_VERSION"))
            .with_log_level(&settings.log_level)
            .with_sampling_ratio(settings.sampling_ratio);

        if let Some(endpoint) = &settings.otlp_endpoint {
            builder = builder.with_tracing(endpoint);
        }
        if settings.prometheus {
            builder = builder.with_metrics();
        }
        builder
    }

    /// Exports traces to the OTLP collector at `endpoint`.
    #[must_use]
    pub fn with_tracing(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Installs a Prometheus recorder.
    #[must_use]
    pub fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }

    /// Sets the fallback log filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Sets the trace sampling ratio.
    #[must_use]
    pub fn with_sampling_ratio(mut self, ratio: f64) -> Self {
        self.sampling_ratio = ratio;
        self
    }

    /// Initializes the telemetry system with configured exporters.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The OTLP span exporter cannot be built
    /// - The Prometheus recorder cannot be installed
    /// - The tracing subscriber cannot be initialized
    pub fn init(self) -> Result<Telemetry> {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let fmt_layer = fmt::layer().json().with_span_events(FmtSpan::CLOSE).boxed();

        let registry = Registry::default().with(env_filter).with(fmt_layer);

        if let Some(endpoint) = &self.otlp_endpoint {
            let resource = Resource::builder()
                .with_attributes(vec![
                    opentelemetry::KeyValue::new(resource::SERVICE_NAME, self.service_name.clone()),
                    opentelemetry::KeyValue::new(
                        resource::SERVICE_VERSION,
                        self.service_version.clone(),
                    ),
                ])
                .build();

            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint.clone())
                .build()
                .context("Failed to build OTLP span exporter")?;

            let processor = opentelemetry_sdk::trace::BatchSpanProcessor::builder(exporter).build();

            let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                .with_span_processor(processor)
                .with_resource(resource)
                .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                    self.sampling_ratio,
                ))))
                .build();

            opentelemetry::global::set_tracer_provider(provider.clone());

            let tracer = provider.tracer(self.service_name.clone());
            let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

            registry
                .with(telemetry_layer)
                .try_init()
                .context("Failed to init subscriber")?;
        } else {
            registry.try_init().context("Failed to init subscriber")?;
        }

        let prometheus = if self.enable_metrics {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .context("Failed to install Prometheus recorder")?;
            Some(handle)
        } else {
            None
        };

        Ok(Telemetry { prometheus })
    }
}
