use crate::wireless::target::Target;

/// A live source of radio observations, e.g. a running `airodump-ng`.
///
/// Callers must pair [`acquire`](CaptureSource::acquire) with exactly one
/// [`release`](CaptureSource::release); the discovery loop does this through
/// a scope guard.
pub trait CaptureSource {
    /// Starts capturing.
    fn acquire(&mut self) -> anyhow::Result<()>;

    /// Stops capturing and frees every resource. Must not fail.
    fn release(&mut self);

    /// False once the underlying capture has terminated.
    fn is_alive(&mut self) -> bool;

    /// Merges everything observed since the last call into `previous`.
    ///
    /// Existing targets keep their position and BSSID; new ones are appended.
    fn merge(&mut self, previous: Vec<Target>) -> anyhow::Result<Vec<Target>>;

    /// True if merged targets carry a real WPS state instead of `Unknown`.
    fn reports_wps(&self) -> bool {
        false
    }

    /// True while hidden networks are being decloaked. Only used for status text.
    fn is_decloaking(&self) -> bool {
        false
    }
}
