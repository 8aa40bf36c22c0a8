//! Fixed project layout constants.

/// Source directory name under the project root.
pub const C_DIR_SOURCE: &str = "src";
/// Build output directory, relative to the project root.
pub const TUP_DIR_BUILD: [&str; 2] = ["build", "chrome"];
/// Manifest V3 input, relative to the source directory.
pub const C_FILE_MANIFEST_V3: &str = "manifest_v3.json";
/// Manifest name the browser loads, relative to the source directory.
pub const C_FILE_MANIFEST: &str = "manifest.json";
/// Development hotreload script, relative to the source directory.
pub const TUP_FILE_HOTRELOAD: [&str; 2] = ["data", "hotreload.js"];

/// Steps printed after a successful build; the output directory follows the last one.
pub const L_INSTALL_INSTRUCTIONS: [&str; 4] = [
    "To install in Chrome:",
    "1. Open Chrome and go to chrome://extensions/",
    "2. Enable \"Developer mode\" in the top right",
    "3. Click \"Load unpacked\" and select",
];
