//! File-type inference for property files.
//!
//! The type drives syntax hints in the editor and the MIME/extension used
//! when exporting a buffer. Inference is longest-suffix, case-insensitive.

/// Content type inferred from a property file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Properties,
    Yaml,
    Env,
    Text,
}

impl FileType {
    /// Infers the type from a file name suffix, case-insensitively.
    ///
    /// Unknown or empty names fall back to plain text.
    pub fn infer(file_name: &str) -> Self {
        let normalized = file_name.to_lowercase();
        if normalized.ends_with(".properties") {
            FileType::Properties
        } else if normalized.ends_with(".yml") || normalized.ends_with(".yaml") {
            FileType::Yaml
        } else if normalized == ".env" || normalized.ends_with(".env") {
            FileType::Env
        } else {
            FileType::Text
        }
    }

    /// Human-readable badge shown next to the file name in the editor.
    pub fn label(self) -> &'static str {
        match self {
            FileType::Properties => ".properties",
            FileType::Yaml => ".yml / .yaml",
            FileType::Env => ".env",
            FileType::Text => "plain text",
        }
    }

    /// MIME type of the exported artifact.
    pub fn mime(self) -> &'static str {
        match self {
            FileType::Yaml => "text/yaml",
            FileType::Properties | FileType::Env | FileType::Text => "text/plain",
        }
    }

    /// Default export file name when the buffer carries no usable name.
    pub fn default_file_name(self) -> &'static str {
        match self {
            FileType::Properties => "application.properties",
            FileType::Yaml => "application.yml",
            FileType::Env => ".env",
            FileType::Text => "config.txt",
        }
    }

    fn has_canonical_extension(self, normalized_name: &str) -> bool {
        match self {
            FileType::Properties => normalized_name.ends_with(".properties"),
            FileType::Yaml => {
                normalized_name.ends_with(".yml") || normalized_name.ends_with(".yaml")
            }
            FileType::Env => normalized_name.ends_with(".env"),
            FileType::Text => true,
        }
    }

    fn canonical_extension(self) -> &'static str {
        match self {
            FileType::Properties => ".properties",
            FileType::Yaml => ".yml",
            FileType::Env => ".env",
            FileType::Text => "",
        }
    }
}

/// Appends the canonical extension for `file_type` when `file_name` does not
/// already carry one matching it. Empty names get the type's default name.
pub fn ensure_extension(file_name: &str, file_type: FileType) -> String {
    if file_name.is_empty() {
        return file_type.default_file_name().to_string();
    }

    let normalized = file_name.to_lowercase();
    if file_type.has_canonical_extension(&normalized) {
        return file_name.to_string();
    }

    format!("{file_name}{}", file_type.canonical_extension())
}
