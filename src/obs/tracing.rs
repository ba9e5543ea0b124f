// self
use crate::{
	_prelude::*,
	obs::{self, OperationKind, OperationOutcome},
};

/// Future returned by [`OperationSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`OperationSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Observation scope for one client operation.
///
/// [`start`](Self::start) counts the attempt, [`finish`](Self::finish) records the outcome on
/// both the span (`outcome` field) and the metrics counter.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	kind: OperationKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens the span for `kind` at call site `stage` and counts an attempt.
	pub fn start(kind: OperationKind, stage: &'static str) -> Self {
		obs::record_operation_outcome(kind, OperationOutcome::Attempt);

		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"cloudfront.operation",
				operation = kind.as_str(),
				stage,
				outcome = tracing::field::Empty,
			);

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self { kind }
		}
	}

	/// Operation this span observes.
	pub fn kind(&self) -> OperationKind {
		self.kind
	}

	/// Runs synchronous signing work inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to a future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records the outcome of `result` and returns it unchanged.
	pub fn finish<T, E>(&self, result: std::result::Result<T, E>) -> std::result::Result<T, E> {
		let outcome =
			if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure };

		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());

		obs::record_operation_outcome(self.kind, outcome);

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn finish_passes_result_through() {
		let span = OperationSpan::start(OperationKind::CannedSignedUrl, "test");
		let ok: std::result::Result<u8, ()> = span.finish(span.in_scope(|| Ok(7)));
		let err: std::result::Result<u8, &str> = span.finish(Err("rejected"));

		assert_eq!(span.kind(), OperationKind::CannedSignedUrl);
		assert_eq!(ok, Ok(7));
		assert_eq!(err, Err("rejected"));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::start(OperationKind::CreateDistribution, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
