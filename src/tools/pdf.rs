use super::ToolInvocation;
use std::path::{Path, PathBuf};

pub const PDF_PROGRAM: &str = "img2pdf";

/// Build the PDF packer call over the ordered page images.
pub fn assemble_pdf(pages: &[PathBuf], paper_size: &str, output: &Path) -> ToolInvocation {
    let mut args: Vec<String> = pages.iter().map(|page| page.display().to_string()).collect();
    args.push("-S".to_string());
    args.push(paper_size.to_string());
    args.push("-o".to_string());
    args.push(output.display().to_string());

    ToolInvocation::new(PDF_PROGRAM, args)
}
