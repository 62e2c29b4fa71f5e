//! Data validation utilities.

use std::fs;
use std::path::{Path, PathBuf};

use craft_core::data::{load_recipe_book, DataLoadError};
use craft_core::error::Result;

/// Outcome of validating one recipe file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFile {
    /// Validated file.
    pub path: PathBuf,
    /// Number of recipes it defines.
    pub recipes: usize,
    /// Number of listed items (recipes plus base resources).
    pub items: usize,
}

/// Validate a RON recipe file, or every `.ron` file in a directory.
///
/// # Errors
///
/// Returns the first load or validation error encountered.
pub fn validate_data_path(path: &Path) -> Result<Vec<ValidatedFile>> {
    if path.is_dir() {
        return validate_data_directory(path);
    }
    Ok(vec![validate_file(path)?])
}

/// Validate all RON recipe files in a directory, in name order.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or any file fails validation.
pub fn validate_data_directory(path: &Path) -> Result<Vec<ValidatedFile>> {
    let io_error = |source| DataLoadError::IoError {
        path: path.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_error)? {
        let file = entry.map_err(io_error)?.path();
        if file.extension().is_some_and(|e| e == "ron") {
            files.push(file);
        }
    }
    files.sort();

    if files.is_empty() {
        tracing::warn!("No .ron files found in {}", path.display());
    }

    files.iter().map(|file| validate_file(file)).collect()
}

fn validate_file(path: &Path) -> Result<ValidatedFile> {
    let book = load_recipe_book(path)?;
    tracing::debug!("{} is valid", path.display());
    Ok(ValidatedFile {
        path: path.to_path_buf(),
        recipes: book.len(),
        items: book.all_items().len(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use craft_core::error::CraftError;

    use super::*;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_validate_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "teas.ron",
            r#"RecipeBookData(
                base_resources: ["Leeks"],
                recipes: [RecipeData(output: "Leek Teas", inputs: [("Leeks", 10.0)])],
            )"#,
        );

        let result = validate_data_path(&path).unwrap();
        assert_eq!(
            result,
            vec![ValidatedFile {
                path,
                recipes: 1,
                items: 2,
            }]
        );
    }

    #[test]
    fn test_validate_directory_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.ron", "RecipeBookData(recipes: [])");
        write_file(dir.path(), "a.ron", "RecipeBookData(base_resources: [])");
        write_file(dir.path(), "notes.txt", "not recipes");

        let result = validate_data_path(dir.path()).unwrap();
        let names: Vec<_> = result
            .iter()
            .filter_map(|f| f.path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ron", "b.ron"]);
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "loop.ron",
            r#"RecipeBookData(recipes: [
                RecipeData(output: "A", inputs: [("B", 1.0)]),
                RecipeData(output: "B", inputs: [("A", 1.0)]),
            ])"#,
        );

        let err = validate_data_path(&path).unwrap_err();
        assert!(matches!(
            err,
            CraftError::DataLoad(DataLoadError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_missing_path() {
        assert!(validate_data_path(Path::new("/definitely/not/here.ron")).is_err());
    }
}
