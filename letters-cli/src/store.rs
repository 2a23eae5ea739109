use letters::Email;
use log::info;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write the inline and attached files of an email into a directory.
/// Returns the paths written, in the order the files appeared.
pub fn save_files(dir: &Path, email: &Email) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut saved = Vec::new();
    for (i, file) in email.inline_files.iter().enumerate() {
        let fallback = format!("inline-{}", i);
        let name = file.filename.as_deref().unwrap_or(&fallback);
        saved.push(write_file(dir, name, &fallback, &file.data)?);
    }
    for (i, file) in email.attached_files.iter().enumerate() {
        let fallback = format!("attachment-{}", i);
        let name = file.filename.as_deref().unwrap_or(&fallback);
        saved.push(write_file(dir, name, &fallback, &file.data)?);
    }
    Ok(saved)
}

fn write_file(dir: &Path, name: &str, fallback: &str, data: &[u8]) -> io::Result<PathBuf> {
    // Never let a filename from the message escape the directory
    let filename = Path::new(name)
        .file_name()
        .unwrap_or_else(|| OsStr::new(fallback));
    let path = dir.join(filename);
    info!("Writing {:#?}", path);
    fs::write(&path, data)?;
    Ok(path)
}
