use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use color_eyre::eyre::WrapErr;
use log::info;
use crate::address::model::AddressException;

/// Append-only CSV log of [`AddressException`]s.
///
/// Parsing never writes anywhere; callers collect exceptions and hand them here.
pub struct ExceptionLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl ExceptionLog {
    /// open (or create) the log, writing the header only into a fresh file
    pub fn open(path: impl AsRef<Path>) -> color_eyre::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("cannot create [{}]", parent.display()))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("cannot open exception log [{}]", path.display()))?;
        let is_new = file.metadata()?.len() == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        Ok(
            Self {
                path: path.to_path_buf(),
                writer,
            }
        )
    }

    pub fn append(&mut self, exceptions: &[AddressException]) -> color_eyre::Result<()> {
        if exceptions.is_empty() {
            return Ok(());
        }
        for exception in exceptions {
            self.writer.serialize(exception)?;
        }
        self.writer.flush()
            .wrap_err_with(|| format!("cannot flush exception log [{}]", self.path.display()))?;
        info!("logged [{}] address exceptions to [{}]", exceptions.len(), self.path.display());
        Ok(())
    }
}
