// UI Constants
pub const AVATAR: &str = "☕";
pub const HEADER_TITLE: &str = "Milo - Archive Intellect";
pub const USER_INDENT: &str = "      ";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

// Default display names
pub const DEFAULT_USER_NAME: &str = "You";
pub const DEFAULT_BOT_NAME: &str = "Milo";

// API Constants
pub const DEFAULT_BASE_URL: &str = "https://archive-intellect-d2qb.vercel.app";
pub const GET_RESPONSE_PATH: &str = "/get_response";
pub const UPLOAD_PDF_PATH: &str = "/upload_pdf";
pub const UPLOAD_FIELD: &str = "file";
pub const PDF_MIME: &str = "application/pdf";

// Rendered message text
pub const ERROR_PREFIX: &str = "Error: ";
pub const PDF_UPLOADED_PREFIX: &str = "PDF Uploaded: ";
pub const SELECT_FILE_PROMPT: &str = "Please select a PDF file to upload.";
