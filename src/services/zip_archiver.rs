//! Folder-to-zip archiver built on the zip crate.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::domain::AppError;
use crate::ports::Archiver;

#[derive(Debug, Clone, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for ZipArchiver {
    fn zip_dir(&self, src_dir: &Path, dest: &Path) -> Result<(), AppError> {
        let file = File::create(dest)?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        add_dir(&mut writer, src_dir, src_dir, &options)?;
        writer.finish()?;
        Ok(())
    }
}

fn add_dir(
    writer: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: &SimpleFileOptions,
) -> Result<(), AppError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let name = relative.to_string_lossy().replace('\\', "/");

        if path.is_dir() {
            writer.add_directory(name, options.clone())?;
            add_dir(writer, root, &path, options)?;
        } else {
            writer.start_file(name, options.clone())?;
            writer.write_all(&fs::read(&path)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn zip_contains_paths_relative_to_the_root() {
        let root = TempDir::new().unwrap();
        let src = root.path().join("demo-bundle");
        fs::create_dir_all(src.join("src")).unwrap();
        fs::write(src.join("composer.json"), "{}").unwrap();
        fs::write(src.join("src/Bundle.php"), "<?php\n").unwrap();

        let dest = root.path().join("demo-bundle.zip");
        ZipArchiver::new().zip_dir(&src, &dest).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: HashSet<String> =
            (0..archive.len()).map(|i| archive.by_index(i).unwrap().name().to_string()).collect();

        assert!(names.contains("composer.json"));
        assert!(names.contains("src/Bundle.php"));
        assert!(!names.iter().any(|n| n.contains("demo-bundle/")));
    }
}
