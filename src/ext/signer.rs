//! Signing contract used to answer authentication challenges.

/// Produces a detached or attached signature over challenge data.
///
/// The algorithm and key material are entirely up to the implementer; the client only passes
/// the challenge `data` through and encodes whatever comes back. Closures of the shape
/// `Fn(&str) -> String` implement the trait directly.
pub trait Signer
where
	Self: Send + Sync,
{
	/// Signs `data` and returns the signature in textual form.
	fn sign(&self, data: &str) -> String;
}
impl<F> Signer for F
where
	F: Send + Sync + Fn(&str) -> String,
{
	fn sign(&self, data: &str) -> String {
		self(data)
	}
}
