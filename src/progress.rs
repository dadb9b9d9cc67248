// src/progress.rs
/// Progress reporting for the scrape run.
/// Front ends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of category pages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One category page parsed.
    fn item_done(&mut self, _label: &str, _rows: usize) {}

    /// One category page failed.
    fn item_failed(&mut self, _label: &str, _err: &str) {}

    /// Called once the data file is written.
    fn finish(&mut self) {}
}
