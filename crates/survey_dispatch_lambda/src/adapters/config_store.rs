/// Read access to the object store holding per-survey config files.
pub trait ConfigStore {
    /// Returns the object's content, or `Ok(None)` when no object exists at
    /// the key.
    fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>, String>;
}
