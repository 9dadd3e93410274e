//! Hourly data file access.
//!
//! Builds the conventional `{root}/{location}/hourly/w{station}.h{yy}` paths,
//! opens a file, discards its header line and yields the remaining lines
//! lazily together with their physical line numbers. Lines are yielded as
//! raw bytes; UTF-8 checking is left to the decoder so that one bad line
//! does not end the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::{
    HEADER_LINES, HOURLY_DIR_NAME, HOURLY_FILE_EXTENSION_PREFIX, HOURLY_FILE_PREFIX,
};
use crate::error::{EpaError, Result};

/// File name of one station-year, e.g. `w94746.h75`
pub fn hourly_file_name(station_id: &str, year: &str) -> String {
    format!("{HOURLY_FILE_PREFIX}{station_id}.{HOURLY_FILE_EXTENSION_PREFIX}{year}")
}

/// Directory holding the hourly files of a location
pub fn hourly_dir(data_root: &Path, location: &str) -> PathBuf {
    data_root.join(location).join(HOURLY_DIR_NAME)
}

/// Full path of one station-year file
pub fn hourly_file_path(data_root: &Path, location: &str, station_id: &str, year: &str) -> PathBuf {
    hourly_dir(data_root, location).join(hourly_file_name(station_id, year))
}

/// Every year file present for a station, sorted by name
pub fn discover_year_files(
    data_root: &Path,
    location: &str,
    station_id: &str,
) -> Result<Vec<PathBuf>> {
    let dir = hourly_dir(data_root, location);
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        hourly_file_name(&glob::Pattern::escape(station_id), "[0-9][0-9]")
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| EpaError::Io(e.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} hourly files matching {}", files.len(), pattern);
    Ok(files)
}

/// An open hourly file positioned after its header
#[derive(Debug)]
pub struct HourlyFile {
    path: PathBuf,
    header: String,
    reader: BufReader<File>,
    next_line_number: usize,
}

impl HourlyFile {
    /// Open a file and read past its header line
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EpaError::FileNotFound { path: path.clone() },
            _ => EpaError::Io(e),
        })?;

        let mut reader = BufReader::new(file);
        let header = match read_line(&mut reader)? {
            Some(line) => String::from_utf8_lossy(&line).into_owned(),
            None => return Err(EpaError::MissingHeader { path }),
        };

        debug!("Opened {} (header: {:?})", path.display(), header.trim());

        Ok(Self {
            path,
            header,
            reader,
            next_line_number: HEADER_LINES + 1,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header line (time zone, latitude, ...), invalid UTF-8 replaced
    pub fn header(&self) -> &str {
        &self.header
    }
}

/// Read one line without its `\n` or `\r\n` terminator; `None` at end of file
fn read_line(reader: &mut impl BufRead) -> std::io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

impl Iterator for HourlyFile {
    /// 1-based physical line number and the line bytes without terminator
    type Item = Result<(usize, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match read_line(&mut self.reader) {
            Ok(line) => line?,
            Err(error) => return Some(Err(EpaError::Io(error))),
        };
        let line_number = self.next_line_number;
        self.next_line_number += 1;
        Some(Ok((line_number, line)))
    }
}
