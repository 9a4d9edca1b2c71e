// Centralized magic strings & default values
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".c", ".cpp", ".h", ".hpp"];
pub const TAG_DELIMITER: char = '|';
pub const DEFAULT_OUTPUT_FOLDER: &str = "result";
pub const OUTPUT_FILE_SUFFIX: &str = "onefile_result.py";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const ALLOWED_SPECIAL_TOKEN: &str = "<|endoftext|>";
