//! # Help Text
//!
//! The full help message shown by the `/help` command.

pub const MAIN: &str = concat!(
    "*Available Commands*\n",
    "/start - Start the bot and show main menu\n",
    "/help - Show this help message\n",
    "/upload - Upload new past papers (admin only)\n",
    "/files - List all available files (admin only)\n",
    "/addadmin - Add new admin (admin only)\n",
    "/removeadmin - Remove an admin (admin only)\n",
    "/listadmins - List all admins (admin only)\n",
    "\n",
    "*How to Use*\n",
    "1. Click Grade 11 to start\n",
    "2. Select Medium (Sinhala/English)\n",
    "3. Choose Subject\n",
    "4. Select Year\n",
    "5. Download the paper\n",
    "\n",
    "*Contact Admin*\n",
    "Use the Contact Admin button to send messages to admin.\n",
);
