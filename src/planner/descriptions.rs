//! Package discovery over test description files.
//!
//! A description file is an XML document whose root `TestPackage` element
//! carries an `appPackageName` attribute. Discovery is a flat listing of
//! `*.xml` in the testcases repository; anything malformed is fatal.

use crate::planner::error::PlanError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::{Path, PathBuf};

/// Read the package names of every description file under `dir`, sorted
/// and deduplicated.
pub fn discover_package_names(dir: &Path) -> Result<Vec<String>, PlanError> {
    let mut packages = Vec::new();
    for path in list_description_files(dir)? {
        packages.push(read_package_name(&path)?);
    }
    packages.sort();
    packages.dedup();
    Ok(packages)
}

/// Flat `*.xml` listing of `dir`, sorted by file name.
pub fn list_description_files(dir: &Path) -> Result<Vec<PathBuf>, PlanError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "xml").unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract the `appPackageName` attribute of the root `TestPackage` element.
pub fn read_package_name(path: &Path) -> Result<String, PlanError> {
    let mut reader = Reader::from_file(path).map_err(|e| PlanError::MalformedDescription {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.name().as_ref() != b"TestPackage" {
                    return Err(PlanError::MalformedDescription {
                        path: path.to_path_buf(),
                        reason: format!(
                            "root element is {}, expected TestPackage",
                            String::from_utf8_lossy(element.name().as_ref())
                        ),
                    });
                }
                let attr = element.try_get_attribute("appPackageName")?;
                return match attr {
                    Some(attr) => Ok(attr.unescape_value()?.into_owned()),
                    None => Err(PlanError::MalformedDescription {
                        path: path.to_path_buf(),
                        reason: "TestPackage has no appPackageName attribute".to_string(),
                    }),
                };
            }
            Ok(Event::Eof) => {
                return Err(PlanError::MalformedDescription {
                    path: path.to_path_buf(),
                    reason: "no TestPackage element found".to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => {
                return Err(PlanError::MalformedDescription {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
        buf.clear();
    }
}
