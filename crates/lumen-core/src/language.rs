//! File classification by name
//!
//! Maps a file name to a display language and an icon glyph. Whole-name
//! matches (package.json, Dockerfile, .gitignore) win over extensions.

use serde::Serialize;

/// How a file is labelled in the tree and status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileClass {
    pub language: &'static str,
    pub icon: &'static str,
}

impl FileClass {
    const fn new(language: &'static str, icon: &'static str) -> Self {
        Self { language, icon }
    }
}

/// Fallback for names nothing else matches
pub const GENERIC: FileClass = FileClass::new("File", "📄");

/// Icon drawn for folders
pub const FOLDER_ICON: &str = "📁";

/// Classify a file by its name
pub fn classify(file_name: &str) -> FileClass {
    let name = file_name.to_lowercase();

    match name.as_str() {
        "package.json" | "package-lock.json" => return FileClass::new("NPM", "📦"),
        "dockerfile" => return FileClass::new("Docker", "🐳"),
        ".gitignore" | ".gitattributes" => return FileClass::new("Git", "🚫"),
        _ => {}
    }

    let Some((_, ext)) = name.rsplit_once('.') else {
        return GENERIC;
    };

    match ext {
        "js" | "mjs" => FileClass::new("JavaScript", "📜"),
        "ts" | "tsx" => FileClass::new("TypeScript", "📘"),
        "jsx" => FileClass::new("React", "⚛️"),
        "py" | "pyw" => FileClass::new("Python", "🐍"),
        "html" | "htm" => FileClass::new("HTML", "🌐"),
        "css" | "scss" | "sass" | "less" => FileClass::new("CSS", "🎨"),
        "vue" => FileClass::new("Vue", "💚"),
        "rs" => FileClass::new("Rust", "🦀"),
        "go" => FileClass::new("Go", "🔵"),
        "java" => FileClass::new("Java", "☕"),
        "cs" => FileClass::new("C#", "🟣"),
        "php" => FileClass::new("PHP", "🐘"),
        "rb" => FileClass::new("Ruby", "💎"),
        "kt" | "kts" => FileClass::new("Kotlin", "🟪"),
        "swift" => FileClass::new("Swift", "🐦"),
        "json" => FileClass::new("JSON", "📋"),
        "xml" | "xaml" => FileClass::new("XML", "📄"),
        "yaml" | "yml" => FileClass::new("YAML", "📋"),
        "toml" => FileClass::new("TOML", "⚙️"),
        "md" | "markdown" => FileClass::new("Markdown", "📝"),
        "txt" => FileClass::new("Text", "📄"),
        "sql" => FileClass::new("SQL", "🗄️"),
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico" => FileClass::new("Image", "🖼️"),
        "sh" | "bash" | "zsh" => FileClass::new("Shell", "💻"),
        _ => GENERIC,
    }
}
