use super::ToolInvocation;
use std::path::Path;

pub const SCAN_PROGRAM: &str = "scanimage";

/// Build the scanner call for a single page capture.
///
/// The Epson interpreter driver exits nonzero on perfectly good scans, so
/// the invocation tolerates that.
pub fn scan_page(device: &str, resolution: u32, scan_area: &str, output: &Path) -> ToolInvocation {
    ToolInvocation::new(
        SCAN_PROGRAM,
        vec![
            "--device".to_string(),
            device.to_string(),
            "--format=png".to_string(),
            "--output-file".to_string(),
            output.display().to_string(),
            "--x-resolution".to_string(),
            resolution.to_string(),
            "--y-resolution".to_string(),
            resolution.to_string(),
            "--progress".to_string(),
            "--scan-area".to_string(),
            scan_area.to_string(),
        ],
    )
    .tolerate_nonzero()
}
