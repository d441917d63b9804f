use std::path::Path;

use log::{debug, info};

use crate::errors::DocumentError;
use crate::file_utils::FileManager;

use super::{DocumentAccessor, IntelliSenseDocument};

/// Reading and writing of IntelliSense documentation files on disk
pub struct DocumentManager;

impl DocumentManager {
    /// Read and validate an IntelliSense document.
    ///
    /// Fails when the file is missing, unreadable, empty, or not shaped like
    /// an IntelliSense documentation file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<DocumentAccessor, DocumentError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        debug!("Loading IntelliSense document: {}", display);

        let source = FileManager::read_to_string(path).map_err(|e| DocumentError::Read {
            path: display.clone(),
            reason: e.root_cause().to_string(),
        })?;
        let accessor = DocumentAccessor::parse(&source, &display)?;

        info!("IntelliSense document loaded: {}", display);
        Ok(accessor)
    }

    /// Write an output document, creating missing parent directories.
    pub fn write<P: AsRef<Path>>(
        path: P,
        document: &IntelliSenseDocument,
    ) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if display.is_empty() {
            return Err(DocumentError::Write {
                path: display,
                reason: "output path is empty".to_string(),
            });
        }

        if let Some(directory) = path.parent() {
            if !directory.as_os_str().is_empty() && !FileManager::dir_exists(directory) {
                FileManager::ensure_dir(directory).map_err(|e| DocumentError::Write {
                    path: display.clone(),
                    reason: e.root_cause().to_string(),
                })?;
                info!("Created output directory: {}", directory.display());
            }
        }

        let xml = document.to_xml_string().map_err(|e| match e {
            DocumentError::Write { reason, .. } => DocumentError::Write {
                path: display.clone(),
                reason,
            },
            other => other,
        })?;
        FileManager::write_to_file(path, &xml).map_err(|e| DocumentError::Write {
            path: display.clone(),
            reason: e.root_cause().to_string(),
        })?;

        info!("IntelliSense document created: {}", display);
        Ok(())
    }
}
