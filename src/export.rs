use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

pub const HTML_FILENAME: &str = "proposal.html";
pub const PDF_FILENAME: &str = "proposal.pdf";

const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("'{0}' is not installed or not on PATH")]
    ConverterMissing(String),
    #[error("converter reported an error: {0}")]
    ConverterFailed(String),
    #[error("converter pipe error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTML export is a straight UTF-8 encoding and cannot fail.
pub fn to_html_bytes(html: &str) -> Vec<u8> {
    html.as_bytes().to_vec()
}

/// External HTML-to-PDF converter. Conversion is best-effort: a missing or
/// failing converter must never block the HTML export path.
pub struct PdfConverter {
    program: String,
}

impl Default for PdfConverter {
    fn default() -> Self {
        PdfConverter::new(DEFAULT_CONVERTER)
    }
}

impl PdfConverter {
    pub fn new(program: impl Into<String>) -> Self {
        PdfConverter {
            program: program.into(),
        }
    }

    /// Capability probe: can the converter binary be spawned at all?
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .is_ok()
    }

    /// Converts finished HTML to PDF bytes entirely in memory, piping the
    /// document through the converter's stdin/stdout.
    pub fn to_pdf_bytes(&self, html: &str) -> Result<Vec<u8>, ConversionError> {
        if !self.is_available() {
            return Err(ConversionError::ConverterMissing(self.program.clone()));
        }

        let mut child = Command::new(&self.program)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // The converter may exit before draining stdin; its stderr is
            // the more useful diagnostic then.
            if let Err(e) = stdin.write_all(html.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if detail.is_empty() {
                output.status.to_string()
            } else {
                detail
            };
            return Err(ConversionError::ConverterFailed(detail));
        }
        if output.stdout.is_empty() {
            return Err(ConversionError::ConverterFailed(
                "converter produced no output".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}
