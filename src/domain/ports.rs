use crate::utils::error::Result;

/// File sink for downloaded PDFs and JSON reports. Paths are relative to the
/// storage root.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Display path of a file written through this storage.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn save_debug_html(&self) -> bool;
}
