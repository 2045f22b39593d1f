use std::path::PathBuf;

/// Fixed imaging parameters for the scanner and the PDF packer
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub device: String,
    pub resolution: u32,
    pub scan_area: String,
    pub paper_size: String,
    pub out_root: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            device: "epkowa:interpreter:001:002".to_string(),
            resolution: 200,
            scan_area: "Letter".to_string(),
            paper_size: "Letter".to_string(),
            out_root: PathBuf::from("out"),
        }
    }
}
