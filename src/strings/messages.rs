//! # Messages
//!
//! Constant strings and format functions for user-facing messages.
//! Includes error messages, confirmations, and menu captions.

use crate::application::catalog::Medium;
use crate::domain::types::SenderInfo;

pub const WELCOME: &str = "Welcome to Pass Paper Bot! 📚\nSelect an option:";
pub const SELECT_MEDIUM: &str = "Select Medium:";
pub const CONTACT_PROMPT: &str =
    "✍️ Please write your message. It will be forwarded to all admins.";
pub const FORWARD_ACK: &str = "✅ Your message has been forwarded to admins.";
pub const UNKNOWN_COMMAND: &str = "❓ Unknown command. Use /help to see what I understand.";
pub const INVALID_SELECTION: &str = "❌ That selection is no longer valid. Use /start to begin again.";
pub const FILE_NOT_AVAILABLE: &str =
    "❌ No file available for this selection yet. Please try another year or subject.";
pub const NO_FILES: &str = "📂 No files uploaded yet.";
pub const ADMIN_NOT_FOUND: &str = "❌ Admin not found.";
pub const CANNOT_REMOVE_MAIN_ADMIN: &str = "❌ Cannot remove the main admin.";
pub const UPLOAD_RECEIVED: &str =
    "File received! Please reply with the file details (medium_subject_year)";
pub const INVALID_KEY_FORMAT: &str =
    "❌ Invalid format. Use: medium_subject_year\nExample: sinhala_medium_maths_2023";
pub const UPLOAD_SAVED: &str = "✅ File uploaded and mapped successfully!";
pub const ADD_ADMIN_USAGE: &str = "Usage: /addadmin <id>";
pub const REMOVE_ADMIN_USAGE: &str = "Usage: /removeadmin <id>";

pub fn admin_only(command: &str) -> &'static str {
    match command {
        "addadmin" => "❌ Only existing admins can add new admins.",
        "removeadmin" => "❌ Only admins can remove admins.",
        "listadmins" => "❌ Only admins can view admin list.",
        "files" => "❌ Only admins can view file list.",
        "upload" => "❌ Only admins can upload files.",
        _ => "❌ This command is for admins only.",
    }
}

pub fn admin_added(id: &str) -> String {
    format!("✅ Admin added successfully: {id}")
}

pub fn admin_removed(id: &str) -> String {
    format!("✅ Admin removed successfully: {id}")
}

pub fn admin_list(admins: &[String]) -> String {
    format!("*Current Admins:*\n{}", admins.join("\n"))
}

pub fn file_list(keys: &[String]) -> String {
    let rows = keys
        .iter()
        .map(|k| format!("- {k}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("*Available Files:*\n{rows}")
}

pub fn selected_medium(medium: Medium) -> String {
    format!("Selected Medium: {}\n\nSelect Subject:", medium.title())
}

pub fn selected_subject(medium: Medium, subject_title: &str) -> String {
    format!(
        "Selected: {} Medium - {}\n\nSelect Year:",
        medium.title(),
        subject_title
    )
}

pub fn upload_instructions(subject_list: &str) -> String {
    format!(
        "📤 *File Upload Instructions*\n\n\
         1. Send the PDF file you want to upload\n\
         2. Reply to the file with details in format:\n\
         `medium_subject_year`\n\n\
         Example:\n\
         - `sinhala_medium_maths_2023`\n\
         - `english_medium_science_2022`\n\n\
         *Available Subjects:*\n{subject_list}"
    )
}

pub fn forward_header(sender: &SenderInfo) -> String {
    format!(
        "From: {}\nUsername: @{}\nUser ID: {}\n\nMessage:",
        sender.display_name,
        sender.username.as_deref().unwrap_or("N/A"),
        sender.id
    )
}

pub fn persistence_failed(err: &str) -> String {
    format!("❌ Could not save changes, please try again: {err}")
}
