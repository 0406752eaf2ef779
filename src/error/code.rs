/// Error codes with category prefix
///
/// Categories:
/// - CFG: Configuration and settings errors
/// - IO: File system operations
/// - ZIP: Archive reading errors
/// - REC: Record lookup errors
/// - VAL: Input validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config errors (CFG001-CFG099)
    /// Domain configuration error (validation failure)
    Cfg001,
    /// Invalid settings file or environment
    Cfg002,

    // I/O errors (IO001-IO099)
    /// File not found
    Io001,
    /// Permission denied
    Io002,
    /// Other I/O failure
    Io003,

    // Archive errors (ZIP001-ZIP099)
    /// Corrupted or unreadable archive
    Zip001,

    // Record errors (REC001-REC099)
    /// Record not found
    Rec001,

    // Validation errors (VAL001-VAL099)
    /// Invalid action context
    Val001,
    /// Invalid JSON data
    Val002,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "CFG001")
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Cfg001 => "CFG001",
            ErrorCode::Cfg002 => "CFG002",
            ErrorCode::Io001 => "IO001",
            ErrorCode::Io002 => "IO002",
            ErrorCode::Io003 => "IO003",
            ErrorCode::Zip001 => "ZIP001",
            ErrorCode::Rec001 => "REC001",
            ErrorCode::Val001 => "VAL001",
            ErrorCode::Val002 => "VAL002",
        }
    }

    /// Returns the general cause description
    pub fn cause(&self) -> &'static str {
        match self {
            ErrorCode::Cfg001 => "The input was rejected by a configuration check",
            ErrorCode::Cfg002 => "The settings file or environment could not be read",
            ErrorCode::Io001 => "The specified file or directory was not found",
            ErrorCode::Io002 => "Permission denied when accessing the file or directory",
            ErrorCode::Io003 => "A file system operation failed",
            ErrorCode::Zip001 => "The archive is corrupted or is not a zip file",
            ErrorCode::Rec001 => "The requested record does not exist",
            ErrorCode::Val001 => "The action context does not describe the expected record",
            ErrorCode::Val002 => "Stored data is not valid JSON",
        }
    }

    /// Returns remediation steps
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorCode::Cfg001 => "1. Read the message above for the rejected value\n2. Fix the input or the setting it names\n3. Run the command again",
            ErrorCode::Cfg002 => "1. Check the settings file syntax\n2. Check ERPKIT_* environment variables\n3. Use --settings to point at another file",
            ErrorCode::Io001 => "1. Verify the file path is correct\n2. Check if the file was moved or deleted\n3. Ensure the path exists",
            ErrorCode::Io002 => "1. Check file/directory permissions\n2. Run with appropriate privileges\n3. Verify ownership of the resource",
            ErrorCode::Io003 => "1. Check available disk space\n2. Retry the operation\n3. Run with --verbose for details",
            ErrorCode::Zip001 => "1. Re-create the archive\n2. Verify the upload was not truncated\n3. Open the archive with another tool to check it",
            ErrorCode::Rec001 => "1. Verify the record id\n2. Use 'erpkit statement list' to see existing records",
            ErrorCode::Val001 => "1. Pass a numeric record id\n2. Refer to the command help",
            ErrorCode::Val002 => "1. Restore the data file from a backup\n2. Remove the corrupted file to start over",
        }
    }
}
