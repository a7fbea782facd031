/// Provisions the per-run FIFO results queue. Creation is idempotent on the
/// queue name as long as the attributes match.
pub trait QueueProvisioner {
    /// Creates (or re-resolves) the named FIFO queue and returns its URL.
    fn create_fifo_queue(&self, queue_name: &str) -> Result<String, String>;
}
