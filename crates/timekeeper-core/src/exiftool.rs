use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ToolError;

/// Something that can report the raw value of a named metadata tag.
///
/// `Ok(None)` means the tag is absent or empty.
pub trait TagSource {
    fn read_tag(&self, path: &Path, tag: &str) -> Result<Option<String>, ToolError>;
}

/// An `exiftool` executable at a known location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TagSource for ExifTool {
    fn read_tag(&self, path: &Path, tag: &str) -> Result<Option<String>, ToolError> {
        // -s -s -s prints the bare value with no tag name
        let output = Command::new(&self.program)
            .args(["-s", "-s", "-s"])
            .arg(format!("-{tag}"))
            .arg(path)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Exit {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }
}

/// Whether metadata extraction is possible for this run. Decided once at
/// startup and handed to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetadataTool {
    #[default]
    Unavailable,
    Invocable(ExifTool),
}

impl MetadataTool {
    /// Use `explicit` when it points at a file, otherwise look for
    /// `exiftool` on `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            if path.is_file() {
                return Self::Invocable(ExifTool::new(path));
            }
            log::warn!("exiftool not found at {}, searching PATH", path.display());
        }

        match find_on_path() {
            Some(program) => Self::Invocable(ExifTool::new(program)),
            None => {
                log::warn!(
                    "exiftool not found, falling back to file modification times. Install it with: {}",
                    install_hint()
                );
                Self::Unavailable
            }
        }
    }

    pub fn source(&self) -> Option<&dyn TagSource> {
        match self {
            Self::Unavailable => None,
            Self::Invocable(tool) => Some(tool as &dyn TagSource),
        }
    }
}

fn find_on_path() -> Option<PathBuf> {
    let names: &[&str] = if cfg!(windows) {
        &["exiftool.exe", "exiftool"]
    } else {
        &["exiftool"]
    };

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Per-platform install instructions for exiftool.
pub fn install_hint() -> &'static str {
    match env::consts::OS {
        "windows" => "winget install ExifTool",
        "linux" => "sudo apt install libimage-exiftool-perl",
        "macos" => "brew install exiftool",
        _ => "https://exiftool.org/",
    }
}
