/*!
 * Common test utilities for the xdocai test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

// Re-export the mock providers module
pub mod mock_providers;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample IntelliSense documentation file with three members
pub fn create_test_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>Sample.Library</name>
    </assembly>
    <members>
        <member name="T:Sample.Library.Calculator">
            <summary>Performs arithmetic operations.</summary>
        </member>
        <member name="M:Sample.Library.Calculator.Add(System.Int32,System.Int32)">
            <summary>Adds two integers.</summary>
            <param name="left">The first operand.</param>
            <param name="right">The second operand.</param>
            <returns>The sum of both operands.</returns>
        </member>
        <member name="M:Sample.Library.Calculator.Reset">
            <summary>Resets the accumulator.</summary>
        </member>
    </members>
</doc>
"#;
    create_test_file(dir, filename, content)
}
