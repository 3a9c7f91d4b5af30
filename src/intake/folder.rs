use super::candidate::CandidateFile;
use ignore::Walk;
use std::path::Path;

/// Every regular file under `folder`, honouring `.gitignore` and friends.
/// Unreadable entries are skipped with a warning.
pub fn collect_folder(folder: &Path) -> Vec<CandidateFile> {
    let mut files = Vec::new();

    for entry in Walk::new(folder) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Error walking directory");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match CandidateFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file")
            }
        }
    }

    tracing::info!(folder = %folder.display(), count = files.len(), "Collected files from folder");
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_nested_files() {
        let dir = tempfile::Builder::new().prefix("intake").tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("nested").join("b.png"), "bb").unwrap();

        let mut names: Vec<_> = collect_folder(dir.path())
            .into_iter()
            .map(|f| (f.name, f.size))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![("a.txt".to_string(), 1), ("b.png".to_string(), 2)]
        );
    }

    #[test]
    fn missing_folder_yields_nothing() {
        let dir = tempfile::Builder::new().prefix("intake").tempdir().unwrap();
        assert!(collect_folder(&dir.path().join("absent")).is_empty());
    }
}
