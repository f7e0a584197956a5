/**
Removes the document structure tags (`<DOC ...>`, `<ROOT ...>` and their closing tags) from a
corpus, leaving the entity annotations in place.
*/
use crate::error::{Error, Result};
use crate::reporter::FileFailure;
use crate::scorer::{list_files, read_document};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

static DOCUMENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?(?:ROOT.*?|DOC.*?)>").unwrap());

/// Removes the document structure tags of `text`. The text is borrowed back when it has none.
pub fn strip_document_tags(text: &str) -> Cow<'_, str> {
    DOCUMENT_TAG.replace_all(text, "")
}

/// Files written and skipped by `strip_directory`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StripReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        write!(
            f,
            "{} documents written, {} skipped",
            self.written.len(),
            self.failures.len()
        )
    }
}

fn strip_file(input: &Path, output: &Path) -> Result<()> {
    let text = read_document(input)?;
    fs::write(output, strip_document_tags(&text).as_bytes()).map_err(|e| Error::io(output, e))
}

/// Strips every regular file of `input` into a file of the same name in `output`, which is created
/// when missing.
pub fn strip_directory(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<StripReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!(input = %input.display(), output = %output.display(), "Stripping document tags");
    fs::create_dir_all(output).map_err(|e| Error::io(output, e))?;
    let mut report = StripReport::default();
    for (name, path) in list_files(input)? {
        let target = output.join(&name);
        match strip_file(&path, &target) {
            Ok(()) => report.written.push(target),
            Err(err) => {
                warn!(document = %name, error = %err, "Skipping document");
                report.failures.push(FileFailure::new(name, &err));
            }
        }
    }
    Ok(report)
}
