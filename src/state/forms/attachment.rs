//! Resume attachment validation
//!
//! A file is accepted when its declared MIME type is an allowed document
//! type. When the platform gives no usable type, the file extension decides
//! instead. Anything over [`MAX_ATTACHMENT_BYTES`] is rejected.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Size ceiling for a resume upload (20 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Types that carry no information about the content
const GENERIC_MIME_TYPES: &[&str] = &["", "application/octet-stream"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Only PDF, DOC or DOCX files are accepted")]
    UnsupportedType,
    #[error("File is too large (max 20 MB)")]
    TooLarge,
    #[error("Could not read file: {0}")]
    Unreadable(String),
}

/// A file the user picked, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub file_name: String,
    pub declared_mime: Option<String>,
    pub size: u64,
}

impl FileCandidate {
    /// Read size and leading bytes of a file on disk
    pub fn inspect(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
        }

        let mut header = [0u8; 8];
        let mut file = File::open(path)?;
        let read = file.read(&mut header)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            declared_mime: sniff_mime(&header[..read]).map(str::to_string),
            size: metadata.len(),
        })
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}

/// An accepted resume file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Accept or reject a picked file
pub fn validate_file(candidate: FileCandidate) -> Result<Attachment, AttachmentError> {
    let declared = candidate
        .declared_mime
        .as_deref()
        .map(|m| m.trim().to_ascii_lowercase());

    let mime_type = match declared.as_deref() {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => mime.to_string(),
        Some(mime) if !GENERIC_MIME_TYPES.contains(&mime) => {
            return Err(AttachmentError::UnsupportedType);
        }
        _ => {
            let ext = candidate
                .extension()
                .ok_or(AttachmentError::UnsupportedType)?;
            mime_for_extension(&ext)
                .ok_or(AttachmentError::UnsupportedType)?
                .to_string()
        }
    };

    if candidate.size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge);
    }

    Ok(Attachment {
        path: candidate.path,
        file_name: candidate.file_name,
        mime_type,
        size: candidate.size,
    })
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let index = ALLOWED_EXTENSIONS.iter().position(|e| *e == ext)?;
    ALLOWED_MIME_TYPES.get(index).copied()
}

/// Content type from magic bytes. DOCX is a plain zip container and is left
/// to the extension check.
fn sniff_mime(header: &[u8]) -> Option<&'static str> {
    if header.starts_with(b"%PDF") {
        Some("application/pdf")
    } else if header.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]) {
        Some("application/msword")
    } else if header.starts_with(b"MZ") {
        Some("application/x-msdownload")
    } else if header.starts_with(b"\x7fELF") {
        Some("application/x-executable")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn candidate(file_name: &str, mime: Option<&str>, size: u64) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from(format!("/tmp/{file_name}")),
            file_name: file_name.to_string(),
            declared_mime: mime.map(str::to_string),
            size,
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_pdf_with_correct_mime_passes() {
            let attachment =
                validate_file(candidate("cv.pdf", Some("application/pdf"), 1024)).unwrap();
            assert_eq!(attachment.mime_type, "application/pdf");
            assert_eq!(attachment.file_name, "cv.pdf");
        }

        #[test]
        fn test_renamed_executable_is_rejected() {
            let result = validate_file(candidate(
                "cv.pdf",
                Some("application/x-msdownload"),
                1024,
            ));
            assert_eq!(result, Err(AttachmentError::UnsupportedType));
        }

        #[test]
        fn test_executable_with_exe_extension_is_rejected() {
            let result = validate_file(candidate(
                "setup.exe",
                Some("application/x-msdownload"),
                1024,
            ));
            assert_eq!(result, Err(AttachmentError::UnsupportedType));
        }

        #[test]
        fn test_missing_mime_falls_back_to_extension() {
            let attachment = validate_file(candidate("Resume.DOCX", None, 2048)).unwrap();
            assert_eq!(
                attachment.mime_type,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            );
        }

        #[test]
        fn test_generic_mime_falls_back_to_extension() {
            let attachment = validate_file(candidate(
                "resume.doc",
                Some("application/octet-stream"),
                2048,
            ))
            .unwrap();
            assert_eq!(attachment.mime_type, "application/msword");
        }

        #[test]
        fn test_allowed_mime_with_odd_extension_passes() {
            assert!(validate_file(candidate("resume", Some("application/pdf"), 10)).is_ok());
        }

        #[test]
        fn test_unknown_mime_and_extension_is_rejected() {
            assert_eq!(
                validate_file(candidate("notes.txt", None, 10)),
                Err(AttachmentError::UnsupportedType)
            );
        }

        #[test]
        fn test_25_mib_pdf_is_rejected_for_size() {
            let result = validate_file(candidate(
                "cv.pdf",
                Some("application/pdf"),
                25 * 1024 * 1024,
            ));
            assert_eq!(result, Err(AttachmentError::TooLarge));
        }

        #[test]
        fn test_exactly_20_mib_is_accepted() {
            assert!(
                validate_file(candidate("cv.pdf", Some("application/pdf"), MAX_ATTACHMENT_BYTES))
                    .is_ok()
            );
        }
    }

    mod inspect {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_sniffs_pdf_header() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("resume.pdf");
            let mut file = File::create(&path).unwrap();
            file.write_all(b"%PDF-1.7\n...").unwrap();

            let candidate = FileCandidate::inspect(&path).unwrap();
            assert_eq!(candidate.declared_mime.as_deref(), Some("application/pdf"));
            assert_eq!(candidate.file_name, "resume.pdf");
            assert_eq!(candidate.size, 12);
        }

        #[test]
        fn test_executable_renamed_to_pdf_is_rejected() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("resume.pdf");
            let mut file = File::create(&path).unwrap();
            file.write_all(b"MZ\x90\x00\x03\x00\x00\x00").unwrap();

            let candidate = FileCandidate::inspect(&path).unwrap();
            assert_eq!(
                validate_file(candidate),
                Err(AttachmentError::UnsupportedType)
            );
        }

        #[test]
        fn test_directory_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            assert!(FileCandidate::inspect(dir.path()).is_err());
        }

        #[test]
        fn test_zip_container_has_no_declared_type() {
            assert_eq!(sniff_mime(b"PK\x03\x04rest"), None);
        }
    }
}
