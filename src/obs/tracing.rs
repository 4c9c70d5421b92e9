// std
use std::future::Future;
// self
use crate::obs::FlowKind;

/// Span wrapper applied to every API flow the client and poller run.
///
/// With the `tracing` feature enabled each flow executes inside an
/// `oilfox_client.flow` span carrying the `flow` and `stage` fields; without it
/// the wrapper is zero-sized and awaiting through it adds nothing, so call sites
/// stay identical either way.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens the span for one flow at the named call site.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self { span: tracing::info_span!("oilfox_client.flow", flow = kind.as_str(), stage) }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Runs the flow to completion inside the span.
	pub async fn instrument<Fut>(&self, fut: Fut) -> Fut::Output
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone()).await
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut.await
		}
	}
}
